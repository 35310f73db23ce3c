//! Logging and trace correlation for the FlowEnergy binaries.
//!
//! - **Logging**: human-readable and JSON output via `tracing-subscriber`,
//!   always written to stderr so stdout stays free for command output.
//! - **Tracing**: trace/span id generation and operation spans used to
//!   correlate one CLI invocation or one TUI command across log lines.

pub mod logging;
pub mod tracing_setup;

use fe_telemetry::{logging, tracing_setup};

#[test]
fn init_logging_human() {
    // Should not panic; second call is a safe no-op.
    logging::init_logging("test-service", "debug");
    logging::init_logging("test-service", "info");

    tracing::info!(key = "value", "human-readable log line");
}

#[test]
fn init_logging_json() {
    // The global subscriber may already be set by another test; this is then a no-op.
    logging::init_logging_json("test-service-json", "info");

    tracing::info!(key = "value", "json log line");
}

#[test]
fn init_from_flag() {
    logging::init("flag-test", "warn", true);
    logging::init("flag-test", "warn", false);
}

#[test]
fn logging_inside_operation_span() {
    logging::init_logging("span-test", "debug");
    let (span, trace_id) = tracing_setup::create_operation_span("chart");
    let _guard = span.enter();
    tracing::debug!(%trace_id, "inside span");
    let child = tracing_setup::create_child_span(&trace_id, "gate");
    let _child_guard = child.enter();
    tracing::debug!("inside child span");
}

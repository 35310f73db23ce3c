mod app;
mod command;
mod tabs;
mod ui;
mod widgets;

use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use fe_core::config::Config;

use crate::app::App;

fn main() -> Result<()> {
    // Parse CLI args (simple, no clap dependency).
    let args: Vec<String> = std::env::args().collect();
    let headless = args.iter().any(|a| a == "--headless");
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let config = match config_path {
        Some(path) => Config::load_from(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    // The terminal owns stdout in both modes; logs go to stderr at warn
    // unless the config asks for more.
    let level = if config.general.log_level.eq_ignore_ascii_case("info") {
        "warn"
    } else {
        config.general.log_level.as_str()
    };
    fe_telemetry::logging::init("flowenergy-tui", level, config.general.log_json);

    let app = App::from_config(&config)?;

    if headless {
        return run_headless(app);
    }

    // Set up panic hook to restore terminal on panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run(app);

    restore_terminal()?;
    result
}

/// Run the interactive TUI with the standard crossterm backend.
fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(tier = %app.tier(), "tui started");

    loop {
        terminal.draw(|frame| {
            ui::render(frame, &app);
        })?;

        if ct_event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = ct_event::read()? {
                // One action per physical press; ignore repeats and releases.
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Headless mode: reads JSON or `:` commands from stdin, writes JSON events
/// to stdout. No terminal rendering.
///
/// Usage: `echo '{"cmd":"query_state"}' | flowenergy-tui --headless`
fn run_headless(mut app: App) -> Result<()> {
    let (session, trace_id) = fe_telemetry::tracing_setup::create_operation_span("headless");
    let _session = session.enter();
    emit_event(&serde_json::json!({
        "event": "started",
        "tabs": app::TAB_NAMES.len(),
        "tier": app.tier().as_str(),
    }));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Try JSON command first, then text command
        let cmd = command::parse_json_command(line).or_else(|| command::parse_command(line));

        match cmd {
            Some(cmd) => {
                let span = fe_telemetry::tracing_setup::create_child_span(&trace_id, "command");
                let _guard = span.enter();
                tracing::debug!(command = ?cmd, "executing");
                let prev_tab = app.current_tab;
                let prev_tier = app.tier();
                let prev_clicks = app.upgrade_clicks;
                let result = command::execute_command(&mut app, cmd);

                if app.current_tab != prev_tab {
                    emit_event(&serde_json::json!({
                        "event": "tab_changed",
                        "tab": app.current_tab,
                        "tab_name": app::TAB_NAMES[app.current_tab],
                    }));
                }
                if app.tier() != prev_tier {
                    emit_event(&serde_json::json!({
                        "event": "plan_changed",
                        "tier": app.tier().as_str(),
                    }));
                }
                if app.upgrade_clicks != prev_clicks {
                    emit_event(&serde_json::json!({
                        "event": "upgrade_clicked",
                        "clicks": app.upgrade_clicks,
                    }));
                }

                match result {
                    Some(json_str) => {
                        println!("{}", json_str);
                        let _ = io::stdout().flush();
                    }
                    None => match &app.notice {
                        Some(notice) => emit_event(&serde_json::json!({
                            "event": "ok",
                            "notice": notice,
                        })),
                        None => emit_event(&serde_json::json!({"event": "ok"})),
                    },
                }
            }
            None => {
                emit_event(&serde_json::json!({
                    "event": "error",
                    "message": format!("unknown command: {}", line),
                }));
            }
        }

        if app.should_quit {
            emit_event(&serde_json::json!({"event": "quit"}));
            break;
        }
    }

    Ok(())
}

fn emit_event(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string(value) {
        println!("{}", s);
        let _ = io::stdout().flush();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}

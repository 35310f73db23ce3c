//! Scriptable command layer for the FlowEnergy TUI.
//!
//! Two input forms map onto the same [`AppCommand`]s:
//! - **Command mode**: `:` prefixed text, e.g. `:tab 3`, `:plan free`.
//! - **JSON pipe**: `{"cmd":"tab","args":[3]}` lines on stdin in headless mode.
//!
//! Query commands return the session state as a JSON string.

use serde_json::{json, Value};

use fe_core::analysis::{self, InsightCategory};
use fe_core::catalog::{ChartBody, ChartKind, Page, ReportModule};
use fe_core::datahub;
use fe_core::entitlement::GateDecision;
use fe_core::fixtures;
use fe_core::plan::PlanToggle;

use crate::app::{App, TAB_NAMES};

// ---------------------------------------------------------------------------
// AppCommand enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Navigation
    Tab(usize),
    NextTab,
    PrevTab,
    Select(usize),
    Up,
    Down,

    // Actions
    Toggle,
    /// `None` flips the switch.
    Plan(Option<PlanToggle>),
    Chart(ChartKind),
    Report(ReportModule),
    Filter(Option<InsightCategory>),
    Gallery,
    Upgrade,

    // Queries
    QueryState,
    QueryTab,
    QueryGate,

    // System
    Quit,
    Help,
}

// ---------------------------------------------------------------------------
// Text command parser  (`:` prefixed)
// ---------------------------------------------------------------------------

/// Parse a `:` prefixed command string.
///
/// Examples: `:tab 3`, `:plan free`, `:chart eui`, `:query gate`.
pub fn parse_command(input: &str) -> Option<AppCommand> {
    let input = input.trim();
    let input = input.strip_prefix(':')?;
    let mut parts = input.splitn(2, ' ');
    let verb = parts.next()?.trim();
    let arg = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    match verb {
        "tab" => Some(AppCommand::Tab(arg?.parse().ok()?)),
        "next" | "next_tab" => Some(AppCommand::NextTab),
        "prev" | "prev_tab" => Some(AppCommand::PrevTab),
        "select" | "sel" => Some(AppCommand::Select(arg?.parse().ok()?)),
        "up" | "k" => Some(AppCommand::Up),
        "down" | "j" => Some(AppCommand::Down),
        "toggle" | "space" => Some(AppCommand::Toggle),
        "plan" => match arg {
            None => Some(AppCommand::Plan(None)),
            Some(a) => Some(AppCommand::Plan(Some(parse_toggle(a)?))),
        },
        "chart" => Some(AppCommand::Chart(arg?.parse().ok()?)),
        "report" => Some(AppCommand::Report(arg?.parse().ok()?)),
        "filter" => Some(AppCommand::Filter(parse_filter(arg.unwrap_or("all"))?)),
        "gallery" | "g" => Some(AppCommand::Gallery),
        "upgrade" | "u" => Some(AppCommand::Upgrade),
        "query" => match arg? {
            "state" => Some(AppCommand::QueryState),
            "tab" => Some(AppCommand::QueryTab),
            "gate" => Some(AppCommand::QueryGate),
            _ => None,
        },
        "quit" | "q" => Some(AppCommand::Quit),
        "help" | "?" => Some(AppCommand::Help),
        _ => None,
    }
}

fn parse_toggle(s: &str) -> Option<PlanToggle> {
    match s.to_ascii_lowercase().as_str() {
        "free" => Some(PlanToggle::Free),
        "pro" => Some(PlanToggle::Pro),
        _ => None,
    }
}

/// `all` clears the filter; unknown names are rejected.
fn parse_filter(s: &str) -> Option<Option<InsightCategory>> {
    if s.eq_ignore_ascii_case("all") {
        return Some(None);
    }
    InsightCategory::ALL
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(s))
        .map(Some)
}

// ---------------------------------------------------------------------------
// JSON command parser
// ---------------------------------------------------------------------------

/// Parse a JSON command from an agent pipe.
///
/// Expected format: `{"cmd":"tab","args":[3]}` or `{"cmd":"query_state"}`.
pub fn parse_json_command(json: &str) -> Option<AppCommand> {
    let v: Value = serde_json::from_str(json).ok()?;
    let cmd = v.get("cmd")?.as_str()?;
    let args = v.get("args");

    let arg_usize =
        |idx: usize| -> Option<usize> { args?.as_array()?.get(idx)?.as_u64().map(|n| n as usize) };
    let arg_str = |idx: usize| -> Option<&str> { args?.as_array()?.get(idx)?.as_str() };

    match cmd {
        "tab" => Some(AppCommand::Tab(arg_usize(0)?)),
        "next_tab" => Some(AppCommand::NextTab),
        "prev_tab" => Some(AppCommand::PrevTab),
        "select" => Some(AppCommand::Select(arg_usize(0)?)),
        "up" => Some(AppCommand::Up),
        "down" => Some(AppCommand::Down),
        "toggle" => Some(AppCommand::Toggle),
        "plan" => match arg_str(0) {
            None => Some(AppCommand::Plan(None)),
            Some(a) => Some(AppCommand::Plan(Some(parse_toggle(a)?))),
        },
        "chart" => Some(AppCommand::Chart(arg_str(0)?.parse().ok()?)),
        "report" => Some(AppCommand::Report(arg_str(0)?.parse().ok()?)),
        "filter" => Some(AppCommand::Filter(parse_filter(arg_str(0).unwrap_or("all"))?)),
        "gallery" => Some(AppCommand::Gallery),
        "upgrade" => Some(AppCommand::Upgrade),
        "query_state" => Some(AppCommand::QueryState),
        "query_tab" => Some(AppCommand::QueryTab),
        "query_gate" => Some(AppCommand::QueryGate),
        "quit" => Some(AppCommand::Quit),
        "help" => Some(AppCommand::Help),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

/// Execute a command against the application state.
///
/// Returns `Some(json_string)` for query commands, `None` for everything else.
pub fn execute_command(app: &mut App, cmd: AppCommand) -> Option<String> {
    match cmd {
        // -- Navigation -----------------------------------------------------
        AppCommand::Tab(idx) => app.select_tab(idx),
        AppCommand::NextTab => app.next_tab(),
        AppCommand::PrevTab => app.prev_tab(),
        AppCommand::Select(idx) => {
            let len = app.current_list_len();
            if idx < len {
                app.selected_index = idx;
            }
        }
        AppCommand::Up => app.move_up(),
        AppCommand::Down => app.move_down(),

        // -- Actions --------------------------------------------------------
        AppCommand::Toggle => app.toggle_selected(),
        AppCommand::Plan(None) => app.toggle_plan(),
        AppCommand::Plan(Some(t)) => app.set_plan(t),
        AppCommand::Chart(kind) => app.toggle_chart(kind),
        AppCommand::Report(module) => app.toggle_report(module),
        AppCommand::Filter(filter) => {
            if app.current_page() == Page::Insights && app.page_gate().is_open() {
                app.set_insight_filter(filter);
            }
        }
        AppCommand::Gallery => {
            if app.show_gallery {
                app.close_gallery();
            } else {
                app.select_tab(0);
                app.open_gallery();
            }
        }
        AppCommand::Upgrade => {
            app.click_upgrade();
        }

        // -- Queries --------------------------------------------------------
        AppCommand::QueryState => return Some(serialize_state(app).to_string()),
        AppCommand::QueryTab => return Some(serialize_tab_data(app).to_string()),
        AppCommand::QueryGate => return Some(gate_json(&app.active_gate()).to_string()),

        // -- System ---------------------------------------------------------
        AppCommand::Quit => app.should_quit = true,
        AppCommand::Help => app.show_help = true,
    }
    None
}

// ---------------------------------------------------------------------------
// Serialization helpers
// ---------------------------------------------------------------------------

fn gate_json(gate: &GateDecision) -> Value {
    json!({
        "mode": gate.mode,
        "title": gate.title,
        "prompt_text": gate.prompt_text,
    })
}

fn serialize_state(app: &App) -> Value {
    let tab_name = TAB_NAMES.get(app.current_tab).unwrap_or(&"unknown");
    json!({
        "current_tab": app.current_tab,
        "tab_name": tab_name,
        "selected_index": app.selected_index,
        "tier": app.tier().as_str(),
        "tier_label": app.tier().display_label(),
        "show_gallery": app.show_gallery,
        "enabled_charts": app.charts.enabled().iter().map(|k| k.id()).collect::<Vec<_>>(),
        "report_modules": app.reports.modules().iter().map(|m| m.id()).collect::<Vec<_>>(),
        "report_pages": app.reports.total_pages(),
        "insight_filter": app.insight_filter.map(|c| c.as_str()),
        "building": app.building,
        "time_range": app.time_range.key(),
        "upgrade_clicks": app.upgrade_clicks,
        "notice": app.notice,
        "gate": gate_json(&app.page_gate()),
    })
}

/// Data behind the current tab. Gated pages report only their gate.
fn serialize_tab_data(app: &App) -> Value {
    let page = app.current_page();
    let gate = app.page_gate();
    if !gate.is_open() {
        return json!({ "page": page, "gate": gate_json(&gate) });
    }

    let data = match page {
        Page::Dashboard => {
            let tier = app.tier();
            let charts: Vec<Value> = app
                .charts
                .enabled()
                .iter()
                .map(|kind| {
                    let gate = fe_core::entitlement::evaluate(tier, kind);
                    let rows = if gate.is_open() {
                        match kind.body() {
                            Ok(ChartBody::Series(ds)) => json!(ds.len()),
                            Ok(ChartBody::Placeholder) => json!("placeholder"),
                            Err(e) => json!(e.to_string()),
                        }
                    } else {
                        Value::Null
                    };
                    json!({
                        "id": kind.id(),
                        "name": kind.name(),
                        "open": gate.is_open(),
                        "rows": rows,
                    })
                })
                .collect();
            json!({ "charts": charts })
        }
        Page::Prediction => json!({
            "records": fixtures::prediction().map(|ds| ds.to_records()).unwrap_or_default(),
            "cards": analysis::prediction_cards(),
        }),
        Page::Optimization => json!({
            "parameters": app.parameters,
            "total_savings": analysis::total_savings(&app.parameters),
        }),
        Page::Demand => json!({
            "metrics": analysis::demand_metrics(),
            "suggestions": app.suggestions,
            "total_saving": analysis::total_shift_saving(&app.suggestions),
        }),
        Page::Insights => json!({
            "filter": app.insight_filter.map(|c| c.as_str()),
            "insights": app.filtered_insights(),
            "critical": analysis::critical_count(&app.insights),
        }),
        Page::Reports => json!({
            "modules": ReportModule::ALL
                .iter()
                .map(|m| json!({
                    "id": m.id(),
                    "premium": m.premium(),
                    "pages": m.pages(),
                    "selected": app.reports.contains(*m),
                }))
                .collect::<Vec<_>>(),
            "total_pages": app.reports.total_pages(),
        }),
        Page::DataHub => json!({
            "tree": app
                .topology_rows()
                .iter()
                .map(|r| json!({
                    "id": r.node.id,
                    "name": r.node.name,
                    "kind": r.node.kind,
                    "depth": r.depth,
                    "expanded": r.expanded,
                    "status": r.node.status,
                }))
                .collect::<Vec<_>>(),
            "selected_equipment": app.selected_equipment,
            "mappings": datahub::field_mappings(),
            "stream": datahub::STREAM_HEALTH,
            "log": datahub::sync_log(),
        }),
        Page::Settings => json!({ "config": app.config_text }),
    };

    json!({ "page": page, "gate": gate_json(&gate), "data": data })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use fe_core::plan::PlanTier;

    fn query(app: &mut App, cmd: AppCommand) -> Value {
        let out = execute_command(app, cmd).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn parse_text_commands() {
        assert_eq!(parse_command(":tab 3"), Some(AppCommand::Tab(3)));
        assert_eq!(parse_command(":tab"), None);
        assert_eq!(parse_command(":plan"), Some(AppCommand::Plan(None)));
        assert_eq!(parse_command(":plan FREE"), Some(AppCommand::Plan(Some(PlanToggle::Free))));
        assert_eq!(parse_command(":plan gold"), None);
        assert_eq!(parse_command(":chart eui"), Some(AppCommand::Chart(ChartKind::Eui)));
        assert_eq!(parse_command(":chart nope"), None);
        assert_eq!(parse_command(":report carbon"), Some(AppCommand::Report(ReportModule::Carbon)));
        assert_eq!(parse_command(":filter"), Some(AppCommand::Filter(None)));
        assert_eq!(
            parse_command(":filter savings"),
            Some(AppCommand::Filter(Some(InsightCategory::Savings)))
        );
        assert_eq!(parse_command(":query gate"), Some(AppCommand::QueryGate));
        assert_eq!(parse_command("tab 3"), None);
    }

    #[test]
    fn parse_json_commands() {
        assert_eq!(parse_json_command(r#"{"cmd":"tab","args":[2]}"#), Some(AppCommand::Tab(2)));
        assert_eq!(
            parse_json_command(r#"{"cmd":"plan","args":["pro"]}"#),
            Some(AppCommand::Plan(Some(PlanToggle::Pro)))
        );
        assert_eq!(parse_json_command(r#"{"cmd":"plan"}"#), Some(AppCommand::Plan(None)));
        assert_eq!(parse_json_command(r#"{"cmd":"upgrade"}"#), Some(AppCommand::Upgrade));
        assert_eq!(parse_json_command(r#"{"cmd":"tab"}"#), None);
        assert_eq!(parse_json_command("not json"), None);
    }

    #[test]
    fn query_state_reports_plan_and_gate() {
        let mut app = App::new(PlanTier::Free);
        execute_command(&mut app, AppCommand::Tab(2));
        let state = query(&mut app, AppCommand::QueryState);
        assert_eq!(state["tab_name"], "Prediction");
        assert_eq!(state["tier"], "free");
        assert_eq!(state["gate"]["mode"], "gated");
        assert_eq!(state["gate"]["title"], "Energy Prediction Analysis");
        assert_eq!(state["report_pages"], 6);
    }

    #[test]
    fn gated_tab_hides_data() {
        let mut app = App::new(PlanTier::Free);
        execute_command(&mut app, AppCommand::Tab(3));
        let tab = query(&mut app, AppCommand::QueryTab);
        assert!(tab.get("data").is_none());

        execute_command(&mut app, AppCommand::Plan(Some(PlanToggle::Pro)));
        let tab = query(&mut app, AppCommand::QueryTab);
        assert_eq!(tab["data"]["total_savings"], 46_400);
    }

    #[test]
    fn select_is_bounded_by_list() {
        let mut app = App::new(PlanTier::Pro);
        execute_command(&mut app, AppCommand::Tab(6));
        execute_command(&mut app, AppCommand::Select(7));
        assert_eq!(app.selected_index, 7);
        execute_command(&mut app, AppCommand::Select(8));
        assert_eq!(app.selected_index, 7);
    }

    #[test]
    fn data_hub_tab_reports_tree_and_log() {
        let mut app = App::new(PlanTier::Free);
        execute_command(&mut app, AppCommand::Tab(1));
        let tab = query(&mut app, AppCommand::QueryTab);
        assert_eq!(tab["page"], "data_hub");
        assert_eq!(tab["gate"]["mode"], "open");
        assert_eq!(tab["data"]["tree"].as_array().map(Vec::len), Some(7));
        assert_eq!(tab["data"]["tree"][2]["status"], "online");
        assert_eq!(tab["data"]["selected_equipment"], "eq-1");
        assert_eq!(tab["data"]["log"][4]["level"], "error");
        assert!(tab["data"].get("config").is_none());

        // Collapse the first site.
        execute_command(&mut app, AppCommand::Toggle);
        let tab = query(&mut app, AppCommand::QueryTab);
        assert_eq!(tab["data"]["tree"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn gallery_command_opens_on_dashboard() {
        let mut app = App::new(PlanTier::Pro);
        execute_command(&mut app, AppCommand::Tab(4));
        execute_command(&mut app, AppCommand::Gallery);
        assert_eq!(app.current_tab, 0);
        assert!(app.show_gallery);
        execute_command(&mut app, AppCommand::Gallery);
        assert!(!app.show_gallery);
    }
}

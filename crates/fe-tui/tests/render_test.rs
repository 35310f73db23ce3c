//! Render tests for every FlowEnergy TUI tab.
//!
//! Each test draws the full UI into a 120x40 buffer and checks that the
//! expected content, or the upgrade overlay, appears.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

// Include binary-crate modules via path for testing.
#[path = "../src/app.rs"]
mod app;
#[path = "../src/tabs/mod.rs"]
mod tabs;
#[path = "../src/ui.rs"]
mod ui;
#[path = "../src/widgets/mod.rs"]
mod widgets;

use fe_core::analysis;
use fe_core::catalog::ChartKind;
use fe_core::plan::PlanTier;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn render_to_string(app: &app::App) -> String {
    let backend = TestBackend::new(WIDTH, HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    let buf = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn render_tab(tier: PlanTier, tab: char) -> String {
    let mut app = app::App::new(tier);
    app.on_key(key(KeyCode::Char(tab)));
    render_to_string(&app)
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

#[test]
fn header_shows_brand_tabs_and_plan() {
    let out = render_tab(PlanTier::Pro, '1');
    assert!(out.contains("FlowEnergy"));
    assert!(out.contains("Pro Access"));
    for name in app::TAB_NAMES {
        assert!(out.contains(name), "missing tab {name}");
    }
    assert!(!out.contains("Prediction*"));
}

#[test]
fn free_plan_marks_locked_tabs() {
    let out = render_tab(PlanTier::Free, '1');
    assert!(out.contains("Free Node"));
    assert!(out.contains("Prediction*"));
    assert!(out.contains("Reports") && !out.contains("Reports*"));
}

#[test]
fn help_modal_lists_keys() {
    let mut app = app::App::new(PlanTier::Pro);
    app.on_key(key(KeyCode::Char('?')));
    let out = render_to_string(&app);
    assert!(out.contains("Keybindings"));
    assert!(out.contains("Switch plan Free / Pro"));
}

#[test]
fn status_bar_shows_notice() {
    let mut app = app::App::new(PlanTier::Pro);
    app.on_key(key(KeyCode::Char('p')));
    let out = render_to_string(&app);
    assert!(out.contains("Plan switched to Free Node"));
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[test]
fn dashboard_renders_metrics_and_default_charts() {
    let out = render_tab(PlanTier::Free, '1');
    assert!(out.contains("Today's Consumption"));
    assert!(out.contains("Load Factor"));
    for kind in ChartKind::DEFAULT_ENABLED {
        assert!(out.contains(kind.name()), "missing chart {}", kind.name());
    }
    assert!(!out.contains("Upgrade to Pro"));
}

#[test]
fn dashboard_gates_premium_chart_on_free() {
    let mut app = app::App::new(PlanTier::Free);
    app.toggle_chart(ChartKind::Regression);
    let out = render_to_string(&app);
    assert!(out.contains("Upgrade to Pro"));

    app.toggle_plan();
    let out = render_to_string(&app);
    assert!(!out.contains("Upgrade to Pro"));
    assert!(out.contains(ChartKind::Regression.name()));
}

#[test]
fn dashboard_without_charts_shows_hint() {
    let mut app = app::App::new(PlanTier::Pro);
    for kind in ChartKind::DEFAULT_ENABLED {
        app.toggle_chart(kind);
    }
    let out = render_to_string(&app);
    assert!(out.contains("No charts enabled"));
}

#[test]
fn gallery_lists_categories() {
    let mut app = app::App::new(PlanTier::Free);
    app.on_key(key(KeyCode::Char('g')));
    let out = render_to_string(&app);
    assert!(out.contains("Chart Gallery"));
    assert!(out.contains("Basic Charts"));
    assert!(out.contains("Advanced Analytics"));
    assert!(out.contains("AI-Powered"));
    assert!(out.contains("locked"));
}

// ---------------------------------------------------------------------------
// Data Hub
// ---------------------------------------------------------------------------

#[test]
fn data_hub_renders_topology_mapping_and_log() {
    let out = render_tab(PlanTier::Free, '2');
    assert!(out.contains("Asset Topology"));
    assert!(out.contains("Chiller-1 (Main)"));
    assert!(out.contains("Taichung Plant"));
    assert!(out.contains("[Online]"));
    assert!(out.contains("Field Mapping"));
    assert!(out.contains("unmapped"));
    assert!(out.contains("Stream Pulse"));
    assert!(out.contains("[08:42:11]"));
    assert!(!out.contains("Upgrade to Pro"));
    // Fab 1 starts collapsed.
    assert!(!out.contains("Air Compressor 01"));
}

// ---------------------------------------------------------------------------
// Premium pages
// ---------------------------------------------------------------------------

#[test]
fn prediction_gated_on_free() {
    let out = render_tab(PlanTier::Free, '3');
    assert!(out.contains("Energy Prediction Analysis"));
    assert!(out.contains("Upgrade to Pro"));
}

#[test]
fn prediction_open_on_pro() {
    let out = render_tab(PlanTier::Pro, '3');
    assert!(out.contains("Energy Forecast"));
    assert!(out.contains("Consumption Trend"));
    assert!(!out.contains("Upgrade to Pro"));
}

#[test]
fn optimization_renders_parameters() {
    let out = render_tab(PlanTier::Pro, '4');
    assert!(out.contains("Recommendations"));
    assert!(out.contains("NT$46,400/mo"));
    for p in analysis::optimization_parameters() {
        assert!(out.contains(p.name), "missing parameter {}", p.name);
    }
}

#[test]
fn optimization_gated_on_free() {
    let out = render_tab(PlanTier::Free, '4');
    assert!(out.contains("Optimization Engine"));
    assert!(out.contains("Upgrade to Pro"));
}

#[test]
fn demand_renders_profile_and_suggestions() {
    let out = render_tab(PlanTier::Pro, '5');
    assert!(out.contains("24h Demand Profile"));
    assert!(out.contains("/350 kW"));
    assert!(out.contains("Load Shifting"));
    assert!(out.contains("Ice Storage Charging"));
}

#[test]
fn insights_render_feed_with_first_expanded() {
    let out = render_tab(PlanTier::Pro, '6');
    let insights = analysis::insights();
    assert!(out.contains("AI Insights"));
    assert!(out.contains(insights[0].title));
    assert!(out.contains(insights[0].actions[0]));
    assert!(out.contains("All (5)"));
}

#[test]
fn insights_gated_on_free() {
    let out = render_tab(PlanTier::Free, '6');
    assert!(out.contains("Upgrade to Pro"));
}

// ---------------------------------------------------------------------------
// Open pages
// ---------------------------------------------------------------------------

#[test]
fn reports_show_modules_and_history() {
    let out = render_tab(PlanTier::Free, '7');
    assert!(out.contains("Report Modules"));
    assert!(out.contains("Executive Summary"));
    assert!(out.contains("~6 pages"));
    assert!(out.contains("Previous Reports"));
    assert!(!out.contains("Upgrade to Pro"));
}

#[test]
fn settings_compare_plans_and_show_config() {
    let out = render_tab(PlanTier::Pro, '8');
    assert!(out.contains("Enterprise"));
    assert!(out.contains("unlimited"));
    assert!(out.contains("default_tier"));
}

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use fe_core::analysis::{self, Insight, InsightCategory, OptimizationParameter, ShiftSuggestion};
use fe_core::catalog::{ChartKind, ChartSelection, Page, ReportModule, ReportSelection, TimeRange};
use fe_core::config::{Config, ConfigError};
use fe_core::datahub::{self, NodeKind, TopologyNode, TreeRow};
use fe_core::entitlement::{decide, evaluate, GateDecision};
use fe_core::plan::{PlanSession, PlanTier, PlanToggle};

/// Tab names displayed in the header.
pub const TAB_NAMES: &[&str] = &[
    "Dashboard",
    "Data Hub",
    "Prediction",
    "Optimization",
    "Demand",
    "Insights",
    "Reports",
    "Settings",
];

/// Page behind each tab, same order as [`TAB_NAMES`].
pub const TAB_PAGES: [Page; 8] = [
    Page::Dashboard,
    Page::DataHub,
    Page::Prediction,
    Page::Optimization,
    Page::Demand,
    Page::Insights,
    Page::Reports,
    Page::Settings,
];

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub current_tab: usize,
    pub should_quit: bool,
    pub show_help: bool,
    /// Chart gallery overlay on the dashboard.
    pub show_gallery: bool,

    /// Per-tab selected index for list navigation (gallery rows while open).
    pub selected_index: usize,

    pub plan: PlanSession,
    pub charts: ChartSelection,
    pub reports: ReportSelection,
    pub building: String,
    pub time_range: TimeRange,

    pub insight_filter: Option<InsightCategory>,
    pub expanded_insight: Option<&'static str>,
    /// Upgrade button presses forwarded so far this session.
    pub upgrade_clicks: u32,
    /// One-line message shown in the status bar until the next action.
    pub notice: Option<String>,

    /// Topology nodes open in the Data Hub tree.
    pub expanded_nodes: HashSet<&'static str>,
    pub selected_equipment: &'static str,

    // Data
    pub topology: Vec<TopologyNode>,
    pub insights: Vec<Insight>,
    pub parameters: Vec<OptimizationParameter>,
    pub suggestions: Vec<ShiftSuggestion>,
    pub config_text: String,
}

impl App {
    pub fn new(tier: PlanTier) -> Self {
        let cfg = Config::default();
        Self {
            current_tab: 0,
            should_quit: false,
            show_help: false,
            show_gallery: false,
            selected_index: 0,
            plan: PlanSession::new(tier),
            charts: ChartSelection::default(),
            reports: ReportSelection::default(),
            building: cfg.dashboard.building.clone(),
            time_range: TimeRange::default(),
            insight_filter: None,
            expanded_insight: Some("1"),
            upgrade_clicks: 0,
            notice: None,
            expanded_nodes: datahub::DEFAULT_EXPANDED.into_iter().collect(),
            selected_equipment: datahub::DEFAULT_EQUIPMENT,
            topology: datahub::topology(),
            insights: analysis::insights(),
            parameters: analysis::optimization_parameters(),
            suggestions: analysis::shift_suggestions(),
            config_text: cfg.to_toml().unwrap_or_default(),
        }
    }

    /// Session state seeded from the configured defaults.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut app = Self::new(cfg.plan.default_tier()?);
        app.charts = cfg.dashboard.chart_selection()?;
        app.reports = cfg.reports.selection()?;
        app.time_range = cfg.dashboard.time_range()?;
        app.building = cfg.dashboard.building.clone();
        app.config_text = cfg.to_toml()?;
        Ok(app)
    }

    pub fn tier(&self) -> PlanTier {
        self.plan.tier()
    }

    pub fn current_page(&self) -> Page {
        TAB_PAGES[self.current_tab.min(TAB_PAGES.len() - 1)]
    }

    /// Gate for the page on the current tab.
    pub fn page_gate(&self) -> GateDecision {
        evaluate(self.tier(), &self.current_page())
    }

    /// Gate the upgrade key acts on: the highlighted gallery entry or report
    /// module, the first locked chart on the dashboard, or the page itself.
    pub fn active_gate(&self) -> GateDecision {
        let tier = self.tier();
        let open = || decide(true, "", None);
        match self.current_page() {
            Page::Dashboard if self.show_gallery => ChartKind::ALL
                .get(self.selected_index)
                .map_or_else(open, |k| evaluate(tier, k)),
            Page::Dashboard => self
                .charts
                .enabled()
                .iter()
                .map(|k| evaluate(tier, k))
                .find(|d| !d.is_open())
                .unwrap_or_else(open),
            Page::Reports => ReportModule::ALL
                .get(self.selected_index)
                .map_or_else(open, |m| evaluate(tier, m)),
            page => evaluate(tier, &page),
        }
    }

    pub fn filtered_insights(&self) -> Vec<&Insight> {
        analysis::filter_insights(&self.insights, self.insight_filter)
    }

    /// Data Hub tree rows under the current expansion.
    pub fn topology_rows(&self) -> Vec<TreeRow<'_>> {
        datahub::visible_rows(&self.topology, &self.expanded_nodes)
    }

    pub fn selected_node(&self) -> Option<&TopologyNode> {
        datahub::find_node(&self.topology, self.selected_equipment)
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Help modal intercepts Esc and ?
        if self.show_help {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return;
        }

        if self.show_gallery {
            match key.code {
                KeyCode::Char('g') | KeyCode::Esc => self.close_gallery(),
                KeyCode::Char('j') | KeyCode::Down => self.move_down(),
                KeyCode::Char('k') | KeyCode::Up => self.move_up(),
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
                KeyCode::Char('p') => self.toggle_plan(),
                KeyCode::Char('u') => {
                    self.click_upgrade();
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            // Quit
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            // Tab switching: 1-8
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                self.select_tab(idx);
            }

            // Tab / Shift-Tab
            KeyCode::Tab => self.next_tab(),
            KeyCode::BackTab => self.prev_tab(),

            // List navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),

            KeyCode::Char('p') => self.toggle_plan(),
            KeyCode::Char('g') if self.current_page() == Page::Dashboard => self.open_gallery(),
            KeyCode::Char('f') => self.cycle_insight_filter(),
            KeyCode::Char('u') => {
                self.click_upgrade();
            }

            // Help
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc => self.notice = None,

            _ => {}
        }
    }

    // -- Navigation ---------------------------------------------------------

    pub fn select_tab(&mut self, idx: usize) {
        if idx < TAB_NAMES.len() {
            self.current_tab = idx;
            self.selected_index = 0;
            self.show_gallery = false;
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab((self.current_tab + 1) % TAB_NAMES.len());
    }

    pub fn prev_tab(&mut self) {
        let idx = if self.current_tab == 0 {
            TAB_NAMES.len() - 1
        } else {
            self.current_tab - 1
        };
        self.select_tab(idx);
    }

    pub fn move_down(&mut self) {
        let max = self.current_list_len();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Returns the length of the selectable list on the current tab. Gated
    /// pages are not interactive and report zero.
    pub fn current_list_len(&self) -> usize {
        if self.show_gallery {
            return ChartKind::ALL.len();
        }
        if !self.page_gate().is_open() {
            return 0;
        }
        match self.current_page() {
            Page::DataHub => self.topology_rows().len(),
            Page::Optimization => self.parameters.len(),
            Page::Demand => self.suggestions.len(),
            Page::Insights => self.filtered_insights().len(),
            Page::Reports => ReportModule::ALL.len(),
            _ => 0,
        }
    }

    // -- Actions ------------------------------------------------------------

    pub fn open_gallery(&mut self) {
        self.show_gallery = true;
        self.selected_index = 0;
    }

    pub fn close_gallery(&mut self) {
        self.show_gallery = false;
        self.selected_index = 0;
    }

    /// Space / Enter on the highlighted row.
    pub fn toggle_selected(&mut self) {
        if self.show_gallery {
            if let Some(kind) = ChartKind::ALL.get(self.selected_index) {
                self.toggle_chart(*kind);
            }
            return;
        }
        if !self.page_gate().is_open() {
            return;
        }
        match self.current_page() {
            Page::DataHub => self.toggle_node(),
            Page::Reports => {
                if let Some(module) = ReportModule::ALL.get(self.selected_index) {
                    self.toggle_report(*module);
                }
            }
            Page::Insights => {
                let id = self.filtered_insights().get(self.selected_index).map(|i| i.id);
                if let Some(id) = id {
                    self.expanded_insight = if self.expanded_insight == Some(id) { None } else { Some(id) };
                }
            }
            _ => {}
        }
    }

    /// Expand or collapse the highlighted site or building, or select the
    /// highlighted equipment.
    fn toggle_node(&mut self) {
        let Some(row) = self.topology_rows().get(self.selected_index).copied() else {
            return;
        };
        let (id, kind, has_children) = (row.node.id, row.node.kind, row.node.has_children());
        if kind == NodeKind::Equipment {
            self.selected_equipment = id;
        } else if has_children && !self.expanded_nodes.remove(id) {
            self.expanded_nodes.insert(id);
        }
    }

    pub fn toggle_chart(&mut self, kind: ChartKind) {
        let enabled = self.charts.toggle(kind);
        tracing::debug!(chart = kind.id(), enabled, "chart toggled");
        self.notice = None;
    }

    pub fn toggle_report(&mut self, module: ReportModule) {
        match self.reports.toggle(self.tier(), module) {
            Ok(_) => self.notice = None,
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    pub fn toggle_plan(&mut self) {
        let tier = self.plan.toggle();
        self.notice = Some(format!("Plan switched to {}", tier.display_label()));
    }

    pub fn set_plan(&mut self, toggle: PlanToggle) {
        self.plan.set(toggle);
        self.notice = Some(format!("Plan switched to {}", self.tier().display_label()));
    }

    pub fn set_insight_filter(&mut self, filter: Option<InsightCategory>) {
        self.insight_filter = filter;
        self.selected_index = 0;
    }

    fn cycle_insight_filter(&mut self) {
        if self.current_page() != Page::Insights || !self.page_gate().is_open() {
            return;
        }
        let next = match self.insight_filter {
            None => Some(InsightCategory::Anomaly),
            Some(InsightCategory::Anomaly) => Some(InsightCategory::Savings),
            Some(InsightCategory::Savings) => Some(InsightCategory::Trend),
            Some(InsightCategory::Trend) => None,
        };
        self.set_insight_filter(next);
    }

    /// One press of the upgrade button. Fires only when the active gate is
    /// closed; returns whether it fired.
    pub fn click_upgrade(&mut self) -> bool {
        let gate = self.active_gate();
        let mut clicks = 0;
        let fired = gate.wrap(()).click_upgrade(Some(&mut || clicks += 1));
        if fired {
            self.upgrade_clicks += clicks;
            tracing::info!(feature = %gate.title, tier = %self.tier(), "upgrade requested");
            self.notice = Some(format!("Upgrade requested: {}", gate.title));
        }
        fired
    }
}

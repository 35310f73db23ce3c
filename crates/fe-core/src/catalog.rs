//! Closed catalogues of charts, report modules, navigation pages and filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, DatasetError};
use crate::entitlement::FeatureFlagged;
use crate::fixtures;
use crate::format::format_relative_time;
use crate::plan::PlanTier;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown chart `{0}`")]
    UnknownChart(String),
    #[error("unknown report module `{0}`")]
    UnknownReport(String),
    #[error("unknown site `{0}`")]
    UnknownSite(String),
    #[error("unknown time range `{0}` (expected 1D, 1W, 1M, 3M, 1Y or custom)")]
    UnknownTimeRange(String),
    #[error("`{0}` requires the Pro plan")]
    PremiumLocked(String),
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartCategory {
    Basic,
    Advanced,
    Ai,
}

impl ChartCategory {
    pub const ALL: [ChartCategory; 3] = [ChartCategory::Basic, ChartCategory::Advanced, ChartCategory::Ai];

    pub fn label(&self) -> &'static str {
        match self {
            ChartCategory::Basic => "Basic Charts",
            ChartCategory::Advanced => "Advanced Analytics",
            ChartCategory::Ai => "AI-Powered",
        }
    }

    /// Plan badge shown beside the category heading.
    pub fn plan_badge(&self) -> &'static str {
        match self {
            ChartCategory::Basic => "Free",
            ChartCategory::Advanced | ChartCategory::Ai => "Pro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Consumption,
    Cost,
    Equipment,
    Peak,
    #[serde(rename = "powerfactor")]
    PowerFactor,
    Heatmap,
    Regression,
    Anomaly,
    Eui,
    Sankey,
    Pareto,
    Efficiency,
    DemandResponse,
}

/// What a chart card draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Series(Dataset),
    /// Specialised visualisation with no generic series renderer.
    Placeholder,
}

pub const PLACEHOLDER_NOTE: &str = "Specialized visualization, coming with backend integration";

impl ChartKind {
    pub const ALL: [ChartKind; 13] = [
        ChartKind::Consumption,
        ChartKind::Cost,
        ChartKind::Equipment,
        ChartKind::Peak,
        ChartKind::PowerFactor,
        ChartKind::Heatmap,
        ChartKind::Regression,
        ChartKind::Anomaly,
        ChartKind::Eui,
        ChartKind::Sankey,
        ChartKind::Pareto,
        ChartKind::Efficiency,
        ChartKind::DemandResponse,
    ];

    pub const DEFAULT_ENABLED: [ChartKind; 5] = [
        ChartKind::Consumption,
        ChartKind::Cost,
        ChartKind::Equipment,
        ChartKind::Peak,
        ChartKind::PowerFactor,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ChartKind::Consumption => "consumption",
            ChartKind::Cost => "cost",
            ChartKind::Equipment => "equipment",
            ChartKind::Peak => "peak",
            ChartKind::PowerFactor => "powerfactor",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Regression => "regression",
            ChartKind::Anomaly => "anomaly",
            ChartKind::Eui => "eui",
            ChartKind::Sankey => "sankey",
            ChartKind::Pareto => "pareto",
            ChartKind::Efficiency => "efficiency",
            ChartKind::DemandResponse => "demand_response",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Consumption => "Energy Consumption",
            ChartKind::Cost => "Cost Tracking",
            ChartKind::Equipment => "Equipment Comparison",
            ChartKind::Peak => "Peak Demand Profile",
            ChartKind::PowerFactor => "Power Factor",
            ChartKind::Heatmap => "Load Profile Heatmap",
            ChartKind::Regression => "Regression Analysis",
            ChartKind::Anomaly => "Anomaly Detection",
            ChartKind::Eui => "EUI Benchmarking",
            ChartKind::Sankey => "Sankey Energy Flow",
            ChartKind::Pareto => "Pareto Analysis (80/20)",
            ChartKind::Efficiency => "Efficiency Curve (kW/RT)",
            ChartKind::DemandResponse => "Demand Response Sim",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartKind::Consumption => "kWh usage over time with trend analysis",
            ChartKind::Cost => "NT$ billing by period with rate breakdown",
            ChartKind::Equipment => "Side-by-side equipment energy usage",
            ChartKind::Peak => "Demand vs contracted capacity over time",
            ChartKind::PowerFactor => "Monthly power factor trend with target line",
            ChartKind::Heatmap => "24h × 7day energy pattern visualization",
            ChartKind::Regression => "kWh vs temperature/occupancy correlation",
            ChartKind::Anomaly => "ML-based baseline deviation highlighting",
            ChartKind::Eui => "kWh/m² compared to industry standards",
            ChartKind::Sankey => "Energy distribution from source to end-use",
            ChartKind::Pareto => "Top energy consumers ranked by impact",
            ChartKind::Efficiency => "Chiller performance across load range",
            ChartKind::DemandResponse => "What-if load shifting scenarios",
        }
    }

    pub fn category(&self) -> ChartCategory {
        match self {
            ChartKind::Consumption
            | ChartKind::Cost
            | ChartKind::Equipment
            | ChartKind::Peak
            | ChartKind::PowerFactor => ChartCategory::Basic,
            ChartKind::Heatmap | ChartKind::Regression | ChartKind::Anomaly | ChartKind::Eui => {
                ChartCategory::Advanced
            }
            ChartKind::Sankey | ChartKind::Pareto | ChartKind::Efficiency | ChartKind::DemandResponse => {
                ChartCategory::Ai
            }
        }
    }

    pub fn premium(&self) -> bool {
        self.category() != ChartCategory::Basic
    }

    /// Unit of the value axis; empty for dimensionless series.
    pub fn y_unit(&self) -> &'static str {
        match self {
            ChartKind::Consumption | ChartKind::Peak => "kW",
            ChartKind::Cost => "NT$",
            ChartKind::Equipment | ChartKind::Regression | ChartKind::Pareto => "kWh",
            ChartKind::PowerFactor => "",
            ChartKind::Eui => "kWh/m²",
            ChartKind::Efficiency => "kW/RT",
            ChartKind::Heatmap | ChartKind::Anomaly | ChartKind::Sankey | ChartKind::DemandResponse => "",
        }
    }

    pub fn body(&self) -> Result<ChartBody, DatasetError> {
        let ds = match self {
            ChartKind::Consumption => fixtures::consumption()?,
            ChartKind::Cost => fixtures::cost()?,
            ChartKind::Equipment => fixtures::equipment()?,
            ChartKind::Peak => fixtures::peak()?,
            ChartKind::PowerFactor => fixtures::power_factor()?,
            ChartKind::Regression => fixtures::regression()?,
            ChartKind::Eui => fixtures::eui()?,
            ChartKind::Pareto => fixtures::pareto()?,
            ChartKind::Efficiency => fixtures::efficiency()?,
            ChartKind::Heatmap | ChartKind::Anomaly | ChartKind::Sankey | ChartKind::DemandResponse => {
                return Ok(ChartBody::Placeholder);
            }
        };
        Ok(ChartBody::Series(ds))
    }

    pub fn in_category(category: ChartCategory) -> impl Iterator<Item = ChartKind> {
        ChartKind::ALL.into_iter().filter(move |k| k.category() == category)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        ChartKind::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .ok_or_else(|| CatalogError::UnknownChart(s.to_string()))
    }
}

impl FeatureFlagged for ChartKind {
    fn feature_name(&self) -> &str {
        self.name()
    }
    fn is_premium(&self) -> bool {
        self.premium()
    }
    fn feature_description(&self) -> Option<&str> {
        Some(self.description())
    }
}

/// Ordered list of charts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSelection {
    enabled: Vec<ChartKind>,
}

impl Default for ChartSelection {
    fn default() -> Self {
        Self::new(ChartKind::DEFAULT_ENABLED)
    }
}

impl ChartSelection {
    /// Duplicates keep their first position.
    pub fn new(kinds: impl IntoIterator<Item = ChartKind>) -> Self {
        let mut enabled = Vec::new();
        for k in kinds {
            if !enabled.contains(&k) {
                enabled.push(k);
            }
        }
        Self { enabled }
    }

    pub fn enabled(&self) -> &[ChartKind] {
        &self.enabled
    }

    pub fn contains(&self, kind: ChartKind) -> bool {
        self.enabled.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Remove if present, otherwise append. Returns whether it is now enabled.
    ///
    /// Premium charts can be enabled on any plan; they are gated at render.
    pub fn toggle(&mut self, kind: ChartKind) -> bool {
        if let Some(pos) = self.enabled.iter().position(|k| *k == kind) {
            self.enabled.remove(pos);
            false
        } else {
            self.enabled.push(kind);
            true
        }
    }

    /// Enabled charts partitioned into (free, premium), order preserved.
    pub fn split(&self) -> (Vec<ChartKind>, Vec<ChartKind>) {
        self.enabled.iter().partition(|k| !k.premium())
    }
}

// ---------------------------------------------------------------------------
// Report modules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportModule {
    Executive,
    Consumption,
    Cost,
    Anomaly,
    Benchmark,
    Efficiency,
    Carbon,
    Custom,
}

impl ReportModule {
    pub const ALL: [ReportModule; 8] = [
        ReportModule::Executive,
        ReportModule::Consumption,
        ReportModule::Cost,
        ReportModule::Anomaly,
        ReportModule::Benchmark,
        ReportModule::Efficiency,
        ReportModule::Carbon,
        ReportModule::Custom,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ReportModule::Executive => "executive",
            ReportModule::Consumption => "consumption",
            ReportModule::Cost => "cost",
            ReportModule::Anomaly => "anomaly",
            ReportModule::Benchmark => "benchmark",
            ReportModule::Efficiency => "efficiency",
            ReportModule::Carbon => "carbon",
            ReportModule::Custom => "custom",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReportModule::Executive => "Executive Summary",
            ReportModule::Consumption => "Consumption Analysis",
            ReportModule::Cost => "Cost Analysis",
            ReportModule::Anomaly => "Anomaly Report",
            ReportModule::Benchmark => "Benchmarking",
            ReportModule::Efficiency => "Efficiency Report",
            ReportModule::Carbon => "Carbon & ESG",
            ReportModule::Custom => "Custom Charts",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportModule::Executive => "KPIs, trends overview, and key highlights",
            ReportModule::Consumption => "Usage breakdown by time, equipment, and site",
            ReportModule::Cost => "Billing breakdown, tariff optimization, and savings",
            ReportModule::Anomaly => "ML-detected anomalies and root-cause analysis",
            ReportModule::Benchmark => "EUI across sites vs industry standards",
            ReportModule::Efficiency => "Equipment COP/kW/RT performance analysis",
            ReportModule::Carbon => "GHG emissions, scope tracking, sustainability",
            ReportModule::Custom => "Include selected dashboard charts in report",
        }
    }

    pub fn premium(&self) -> bool {
        !matches!(self, ReportModule::Executive | ReportModule::Consumption)
    }

    pub fn pages(&self) -> u32 {
        match self {
            ReportModule::Executive | ReportModule::Benchmark | ReportModule::Custom => 2,
            ReportModule::Cost | ReportModule::Anomaly | ReportModule::Carbon => 3,
            ReportModule::Consumption | ReportModule::Efficiency => 4,
        }
    }
}

impl FromStr for ReportModule {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        ReportModule::ALL
            .into_iter()
            .find(|m| m.id() == id)
            .ok_or_else(|| CatalogError::UnknownReport(s.to_string()))
    }
}

impl FeatureFlagged for ReportModule {
    fn feature_name(&self) -> &str {
        self.name()
    }
    fn is_premium(&self) -> bool {
        self.premium()
    }
    fn feature_description(&self) -> Option<&str> {
        Some(self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSelection {
    modules: Vec<ReportModule>,
}

impl Default for ReportSelection {
    fn default() -> Self {
        Self {
            modules: vec![ReportModule::Executive, ReportModule::Consumption],
        }
    }
}

impl ReportSelection {
    pub fn empty() -> Self {
        Self { modules: Vec::new() }
    }

    pub fn modules(&self) -> &[ReportModule] {
        &self.modules
    }

    pub fn contains(&self, module: ReportModule) -> bool {
        self.modules.contains(&module)
    }

    /// Add or remove `module`. Premium modules are refused for tiers without
    /// premium access and the selection is left unchanged.
    pub fn toggle(&mut self, tier: PlanTier, module: ReportModule) -> Result<bool, CatalogError> {
        if module.premium() && !tier.has_premium_access() {
            tracing::warn!(module = module.id(), %tier, "premium report module refused");
            return Err(CatalogError::PremiumLocked(module.name().to_string()));
        }
        if let Some(pos) = self.modules.iter().position(|m| *m == module) {
            self.modules.remove(pos);
            Ok(false)
        } else {
            self.modules.push(module);
            Ok(true)
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.modules.iter().map(|m| m.pages()).sum()
    }
}

/// An already generated report in the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PastReport {
    pub id: &'static str,
    pub name: &'static str,
    pub date: &'static str,
    pub modules: u32,
    pub pages: u32,
}

impl PastReport {
    /// Midnight UTC on the report date.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        let day = NaiveDate::parse_from_str(self.date, "%Y-%m-%d").ok()?;
        Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
    }

    /// "3 d ago" style age relative to `now`; the raw date if it does not parse.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        match self.generated_at() {
            Some(at) => format_relative_time(at, now),
            None => self.date.to_string(),
        }
    }
}

pub fn previous_reports() -> Vec<PastReport> {
    vec![
        PastReport {
            id: "r1",
            name: "January 2026 Monthly Report",
            date: "2026-02-01",
            modules: 5,
            pages: 18,
        },
        PastReport {
            id: "r2",
            name: "Q4 2025 Quarterly Review",
            date: "2026-01-05",
            modules: 7,
            pages: 24,
        },
        PastReport {
            id: "r3",
            name: "2025 Annual Energy Report",
            date: "2026-01-15",
            modules: 8,
            pages: 32,
        },
    ]
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    DataHub,
    Prediction,
    Optimization,
    Demand,
    Insights,
    Reports,
    Settings,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::DataHub => "Data Hub",
            Page::Prediction => "Prediction",
            Page::Optimization => "Optimization",
            Page::Demand => "Demand Analysis",
            Page::Insights => "AI Insights",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Page::Dashboard => "/dashboard",
            Page::DataHub => "/data-hub",
            Page::Prediction => "/analysis/prediction",
            Page::Optimization => "/analysis/optimization",
            Page::Demand => "/analysis/demand",
            Page::Insights => "/analysis/insights",
            Page::Reports => "/reports",
            Page::Settings => "/settings",
        }
    }

    pub fn premium(&self) -> bool {
        matches!(
            self,
            Page::Prediction | Page::Optimization | Page::Demand | Page::Insights
        )
    }

    /// Name the page's gate overlay carries.
    pub fn gate_name(&self) -> &'static str {
        match self {
            Page::Prediction => "Energy Prediction Analysis",
            Page::Optimization => "Optimization Engine",
            _ => self.label(),
        }
    }

    /// Link target for `tier`; locked pages do not navigate.
    pub fn link_for(&self, tier: PlanTier) -> &'static str {
        if self.premium() && !tier.has_premium_access() {
            "#"
        } else {
            self.href()
        }
    }
}

impl FeatureFlagged for Page {
    fn feature_name(&self) -> &str {
        self.gate_name()
    }
    fn is_premium(&self) -> bool {
        self.premium()
    }
    fn feature_description(&self) -> Option<&str> {
        match self {
            Page::Prediction => Some(crate::analysis::PREDICTION_DESCRIPTION),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub pages: &'static [Page],
}

pub const NAV_SECTIONS: [NavSection; 3] = [
    NavSection {
        title: "Main",
        pages: &[Page::Dashboard, Page::DataHub],
    },
    NavSection {
        title: "Data Analysis",
        pages: &[Page::Prediction, Page::Optimization, Page::Demand, Page::Insights],
    },
    NavSection {
        title: "Output",
        pages: &[Page::Reports, Page::Settings],
    },
];

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: &'static str,
    pub name: &'static str,
}

pub const SITES: [Site; 4] = [
    Site { id: "all", name: "All Sites" },
    Site { id: "s1", name: "Taipei HQ" },
    Site { id: "s2", name: "Taichung Plant" },
    Site { id: "s3", name: "Kaohsiung Warehouse" },
];

pub fn site(id: &str) -> Result<Site, CatalogError> {
    SITES
        .iter()
        .copied()
        .find(|s| s.id == id)
        .ok_or_else(|| CatalogError::UnknownSite(id.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1D")]
    Day,
    #[serde(rename = "1W")]
    Week,
    #[default]
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "3M")]
    Quarter,
    #[serde(rename = "1Y")]
    Year,
    #[serde(rename = "custom")]
    Custom,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
        TimeRange::Custom,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TimeRange::Day => "1D",
            TimeRange::Week => "1W",
            TimeRange::Month => "1M",
            TimeRange::Quarter => "3M",
            TimeRange::Year => "1Y",
            TimeRange::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Day => "Today",
            TimeRange::Week => "This Week",
            TimeRange::Month => "This Month",
            TimeRange::Quarter => "3 Months",
            TimeRange::Year => "1 Year",
            TimeRange::Custom => "Custom",
        }
    }
}

impl FromStr for TimeRange {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|r| r.key() == s.trim())
            .ok_or_else(|| CatalogError::UnknownTimeRange(s.to_string()))
    }
}

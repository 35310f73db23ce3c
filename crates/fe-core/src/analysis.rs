//! Static analysis tables and summaries for the premium analysis pages.

use serde::Serialize;

use crate::dataset::{Dataset, DatasetError};
use crate::fixtures;
use crate::format::{format_energy, format_number};
use crate::series::round_to;

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// Whether a trend reads as good news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// One KPI tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub decimals: u32,
    pub trend: Trend,
    pub trend_percent: Option<f64>,
    /// Rising consumption is bad, rising efficiency is good.
    pub trend_up_is_good: bool,
}

impl Metric {
    /// Value with its unit. Energy scales to MWh / GWh.
    pub fn display_value(&self) -> String {
        match self.unit {
            "kWh" => format_energy(self.value),
            unit => format!("{} {}", format_number(self.value, self.decimals as usize), unit),
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match (self.trend, self.trend_up_is_good) {
            (Trend::Neutral, _) => Sentiment::Neutral,
            (Trend::Up, true) | (Trend::Down, false) => Sentiment::Positive,
            (Trend::Up, false) | (Trend::Down, true) => Sentiment::Negative,
        }
    }
}

// ---------------------------------------------------------------------------
// Optimisation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationParameter {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub current: f64,
    pub optimal: f64,
    /// NT$ per month.
    pub savings: u64,
    pub savings_percent: f64,
    pub risk: Risk,
}

impl OptimizationParameter {
    /// Signed change from the current to the optimal setpoint.
    pub fn delta(&self) -> f64 {
        round_to(self.optimal - self.current, 1)
    }
}

pub fn optimization_parameters() -> Vec<OptimizationParameter> {
    vec![
        OptimizationParameter {
            id: "1",
            name: "Chiller Supply Temp",
            unit: "°C",
            current: 7.0,
            optimal: 8.2,
            savings: 12_500,
            savings_percent: 8.5,
            risk: Risk::Low,
        },
        OptimizationParameter {
            id: "2",
            name: "AHU Supply Air Temp",
            unit: "°C",
            current: 14.0,
            optimal: 15.5,
            savings: 8_200,
            savings_percent: 5.2,
            risk: Risk::Low,
        },
        OptimizationParameter {
            id: "3",
            name: "Condenser Water Temp",
            unit: "°C",
            current: 32.0,
            optimal: 29.5,
            savings: 18_900,
            savings_percent: 11.3,
            risk: Risk::Medium,
        },
        OptimizationParameter {
            id: "4",
            name: "Chiller Loading",
            unit: "%",
            current: 65.0,
            optimal: 78.0,
            savings: 6_800,
            savings_percent: 4.1,
            risk: Risk::Low,
        },
    ]
}

pub fn total_savings(params: &[OptimizationParameter]) -> u64 {
    params.iter().map(|p| p.savings).sum()
}

pub fn optimization_metrics(params: &[OptimizationParameter]) -> Vec<Metric> {
    vec![
        Metric {
            label: "Total Potential Savings",
            value: total_savings(params) as f64,
            unit: "NT$/mo",
            decimals: 0,
            trend: Trend::Down,
            trend_percent: Some(-7.8),
            trend_up_is_good: false,
        },
        Metric {
            label: "Parameters to Optimize",
            value: params.len() as f64,
            unit: "items",
            decimals: 0,
            trend: Trend::Neutral,
            trend_percent: None,
            trend_up_is_good: true,
        },
        Metric {
            label: "Avg Efficiency Gain",
            value: 7.3,
            unit: "%",
            decimals: 1,
            trend: Trend::Up,
            trend_percent: Some(7.3),
            trend_up_is_good: true,
        },
    ]
}

// ---------------------------------------------------------------------------
// AI insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Anomaly,
    Savings,
    Trend,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 3] = [
        InsightCategory::Anomaly,
        InsightCategory::Savings,
        InsightCategory::Trend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Anomaly => "anomaly",
            InsightCategory::Savings => "savings",
            InsightCategory::Trend => "trend",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InsightCategory::Anomaly => "Anomalies",
            InsightCategory::Savings => "Savings",
            InsightCategory::Trend => "Trends",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::High => "Critical",
            Severity::Medium => "Important",
            Severity::Low => "Suggestion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub id: &'static str,
    pub category: InsightCategory,
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    pub metric: &'static str,
    pub timestamp: &'static str,
    pub actions: &'static [&'static str],
}

pub fn insights() -> Vec<Insight> {
    vec![
        Insight {
            id: "1",
            category: InsightCategory::Anomaly,
            severity: Severity::High,
            title: "Abnormal night-time energy spike detected",
            description: "Energy consumption between 02:00–04:00 increased by 45% compared to baseline. \
                This may indicate equipment malfunction or unauthorized usage.",
            metric: "+45% vs baseline",
            timestamp: "Today, 04:23",
            actions: &["Inspect HVAC controls", "Check security logs"],
        },
        Insight {
            id: "2",
            category: InsightCategory::Savings,
            severity: Severity::Medium,
            title: "Chiller sequencing inefficiency identified",
            description: "Running 2 chillers at 40% load each instead of 1 at 80% wastes approximately \
                NT$4,200/month. Consider implementing optimal staging logic.",
            metric: "NT$4,200/mo wasted",
            timestamp: "Yesterday",
            actions: &["Optimize staging", "Review schedule"],
        },
        Insight {
            id: "3",
            category: InsightCategory::Trend,
            severity: Severity::Low,
            title: "Weekday vs Weekend pattern shift",
            description: "Weekend consumption has increased 12% over the past month, suggesting changed \
                occupancy patterns or equipment schedules not adjusted for weekends.",
            metric: "+12% weekend usage",
            timestamp: "This week",
            actions: &["Adjust weekend schedule"],
        },
        Insight {
            id: "4",
            category: InsightCategory::Savings,
            severity: Severity::Medium,
            title: "Outdoor air damper optimization opportunity",
            description: "Current economizer settings miss free cooling opportunities when outdoor temp \
                drops below 18°C. Adjusting setpoints could save 8% on cooling costs.",
            metric: "8% cooling reduction",
            timestamp: "This week",
            actions: &["Update damper controls"],
        },
        Insight {
            id: "5",
            category: InsightCategory::Anomaly,
            severity: Severity::Low,
            title: "Lighting schedule drift detected",
            description: "Floor 3 lights are turning on 30 minutes earlier than scheduled over the past \
                2 weeks, possibly due to a timer configuration issue.",
            metric: "30 min early activation",
            timestamp: "2 days ago",
            actions: &["Reset timer", "Check BMS schedule"],
        },
    ]
}

/// `None` keeps every insight.
pub fn filter_insights(all: &[Insight], category: Option<InsightCategory>) -> Vec<&Insight> {
    all.iter()
        .filter(|i| category.is_none_or(|c| i.category == c))
        .collect()
}

/// Count per category, in [`InsightCategory::ALL`] order.
pub fn category_counts(all: &[Insight]) -> Vec<(InsightCategory, usize)> {
    InsightCategory::ALL
        .iter()
        .map(|c| (*c, all.iter().filter(|i| i.category == *c).count()))
        .collect()
}

pub fn critical_count(all: &[Insight]) -> usize {
    all.iter().filter(|i| i.severity == Severity::High).count()
}

// ---------------------------------------------------------------------------
// Prediction cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub title: &'static str,
    pub body: &'static str,
    pub tone: Tone,
}

pub const PREDICTION_DESCRIPTION: &str = "Unlock AI-powered energy predictions with confidence \
    intervals, anomaly detection, and actionable optimization recommendations.";

pub fn prediction_cards() -> Vec<InsightCard> {
    vec![
        InsightCard {
            title: "Consumption Trend",
            body: "Energy usage is trending 5.2% lower than last month, primarily due to HVAC optimization.",
            tone: Tone::Positive,
        },
        InsightCard {
            title: "Peak Demand Alert",
            body: "Predicted peak demand on Day 5 may exceed contracted capacity. Consider load shifting.",
            tone: Tone::Warning,
        },
        InsightCard {
            title: "Savings Opportunity",
            body: "Shifting 15% of daytime load to off-peak hours could save NT$8,500/month.",
            tone: Tone::Info,
        },
    ]
}

// ---------------------------------------------------------------------------
// Demand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftSuggestion {
    pub from: &'static str,
    pub to: &'static str,
    pub load_kw: u32,
    /// NT$ per month.
    pub saving: u64,
    pub equipment: &'static str,
    pub difficulty: Difficulty,
}

pub fn shift_suggestions() -> Vec<ShiftSuggestion> {
    vec![
        ShiftSuggestion {
            from: "13:00–15:00",
            to: "22:00–00:00",
            load_kw: 45,
            saving: 3_200,
            equipment: "Ice Storage Charging",
            difficulty: Difficulty::Easy,
        },
        ShiftSuggestion {
            from: "10:00–12:00",
            to: "06:00–08:00",
            load_kw: 28,
            saving: 1_800,
            equipment: "Pre-cooling HVAC",
            difficulty: Difficulty::Easy,
        },
        ShiftSuggestion {
            from: "14:00–16:00",
            to: "20:00–22:00",
            load_kw: 35,
            saving: 2_500,
            equipment: "EV Charging Schedule",
            difficulty: Difficulty::Medium,
        },
    ]
}

pub fn total_shift_saving(s: &[ShiftSuggestion]) -> u64 {
    s.iter().map(|x| x.saving).sum()
}

/// How close a peak sits to the contracted capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Utilization {
    Normal,
    Warning,
    Danger,
}

impl Utilization {
    /// Above 90 % is danger, above 75 % warning.
    pub fn classify(peak_kw: f64, contracted_kw: f64) -> Self {
        let pct = contract_percent(peak_kw, contracted_kw);
        if pct > 90.0 {
            Utilization::Danger
        } else if pct > 75.0 {
            Utilization::Warning
        } else {
            Utilization::Normal
        }
    }
}

pub fn contract_percent(peak_kw: f64, contracted_kw: f64) -> f64 {
    if contracted_kw <= 0.0 {
        return 0.0;
    }
    peak_kw / contracted_kw * 100.0
}

/// Peak, average and load factor of one demand column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandSummary {
    pub peak_kw: f64,
    pub peak_label: String,
    pub average_kw: f64,
    /// Average over peak, percent.
    pub load_factor: f64,
    pub contracted_kw: f64,
    /// Contracted minus peak; negative when the contract is exceeded.
    pub headroom_kw: f64,
    pub utilization: Utilization,
}

impl DemandSummary {
    /// `None` when the column is missing or the dataset is empty.
    pub fn from_dataset(ds: &Dataset, column: &str, contracted_kw: f64) -> Option<Self> {
        let values = &ds.column(column)?.values;
        let (peak_idx, peak_kw) = values
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })?;
        let average_kw = values.iter().sum::<f64>() / values.len() as f64;
        let load_factor = if peak_kw > 0.0 {
            round_to(average_kw / peak_kw * 100.0, 1)
        } else {
            0.0
        };
        Some(Self {
            peak_kw,
            peak_label: ds.domain().label(peak_idx),
            average_kw: round_to(average_kw, 1),
            load_factor,
            contracted_kw,
            headroom_kw: contracted_kw - peak_kw,
            utilization: Utilization::classify(peak_kw, contracted_kw),
        })
    }
}

pub fn demand_metrics() -> Vec<Metric> {
    vec![
        Metric {
            label: "Peak Demand",
            value: 301.0,
            unit: "kW",
            decimals: 0,
            trend: Trend::Up,
            trend_percent: Some(4.5),
            trend_up_is_good: false,
        },
        Metric {
            label: "Contracted Capacity",
            value: 350.0,
            unit: "kW",
            decimals: 0,
            trend: Trend::Neutral,
            trend_percent: None,
            trend_up_is_good: true,
        },
        Metric {
            label: "Load Factor",
            value: 68.5,
            unit: "%",
            decimals: 1,
            trend: Trend::Up,
            trend_percent: Some(2.1),
            trend_up_is_good: true,
        },
        Metric {
            label: "Demand Charge",
            value: 27_200.0,
            unit: "NT$/mo",
            decimals: 0,
            trend: Trend::Up,
            trend_percent: Some(6.5),
            trend_up_is_good: false,
        },
    ]
}

/// Headline tiles above the dashboard charts, derived from today's
/// consumption and demand profiles.
pub fn dashboard_metrics() -> Result<Vec<Metric>, DatasetError> {
    let consumption = fixtures::consumption()?;
    let today: f64 = consumption
        .column("consumption")
        .map(|c| c.values.iter().sum())
        .unwrap_or_default();
    let peak = fixtures::peak()?;
    let Some(summary) = DemandSummary::from_dataset(&peak, "demand", fixtures::CONTRACTED_KW) else {
        return Ok(Vec::new());
    };
    Ok(vec![
        Metric {
            label: "Today's Consumption",
            value: today,
            unit: "kWh",
            decimals: 0,
            trend: Trend::Down,
            trend_percent: Some(-5.2),
            trend_up_is_good: false,
        },
        Metric {
            label: "Peak Demand",
            value: summary.peak_kw,
            unit: "kW",
            decimals: 0,
            trend: Trend::Up,
            trend_percent: Some(4.5),
            trend_up_is_good: false,
        },
        Metric {
            label: "Load Factor",
            value: summary.load_factor,
            unit: "%",
            decimals: 1,
            trend: Trend::Up,
            trend_percent: Some(2.1),
            trend_up_is_good: true,
        },
        Metric {
            label: "Contract Headroom",
            value: summary.headroom_kw,
            unit: "kW",
            decimals: 0,
            trend: Trend::Neutral,
            trend_percent: None,
            trend_up_is_good: true,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::fixtures;
    use crate::series::{ColorToken, SeriesSpec};

    #[test]
    fn dashboard_tiles_follow_fixtures() {
        let m = dashboard_metrics().unwrap();
        assert_eq!(m.len(), 4);
        let peak = fixtures::peak().unwrap();
        let max = peak.column("demand").unwrap().values.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(m[1].value, max);
        assert_eq!(m[3].value, fixtures::CONTRACTED_KW - max);
        assert_eq!(m[0].sentiment(), Sentiment::Positive);

        let today: f64 = fixtures::consumption().unwrap().column("consumption").unwrap().values.iter().sum();
        assert!(today >= 1_000.0);
        assert_eq!(m[0].display_value(), format_energy(today));
        assert!(m[0].display_value().ends_with(" MWh"));
        assert_eq!(m[2].display_value(), format!("{} %", format_number(m[2].value, 1)));
    }

    #[test]
    fn optimisation_savings_total() {
        let p = optimization_parameters();
        assert_eq!(p.len(), 4);
        assert_eq!(total_savings(&p), 46_400);
        assert_eq!(p[2].delta(), -2.5);
        assert_eq!(optimization_metrics(&p)[0].value, 46_400.0);
    }

    #[test]
    fn metric_sentiment() {
        let m = &optimization_metrics(&optimization_parameters())[0];
        // savings trending down with up-is-bad reads as good news
        assert_eq!(m.sentiment(), Sentiment::Positive);
        let charge = &demand_metrics()[3];
        assert_eq!(charge.sentiment(), Sentiment::Negative);
        assert_eq!(demand_metrics()[1].sentiment(), Sentiment::Neutral);
    }

    #[test]
    fn insight_filtering_and_counts() {
        let all = insights();
        assert_eq!(filter_insights(&all, None).len(), 5);
        let anomalies = filter_insights(&all, Some(InsightCategory::Anomaly));
        assert_eq!(anomalies.iter().map(|i| i.id).collect::<Vec<_>>(), vec!["1", "5"]);
        assert_eq!(
            category_counts(&all),
            vec![
                (InsightCategory::Anomaly, 2),
                (InsightCategory::Savings, 2),
                (InsightCategory::Trend, 1),
            ]
        );
        assert_eq!(critical_count(&all), 1);
        assert_eq!(Severity::Medium.label(), "Important");
    }

    #[test]
    fn shift_savings_total() {
        assert_eq!(total_shift_saving(&shift_suggestions()), 7_500);
    }

    #[test]
    fn utilization_thresholds() {
        assert_eq!(Utilization::classify(320.0, 350.0), Utilization::Danger);
        assert_eq!(Utilization::classify(312.0, 350.0), Utilization::Warning);
        assert_eq!(Utilization::classify(250.0, 350.0), Utilization::Normal);
        assert_eq!(contract_percent(100.0, 0.0), 0.0);
    }

    #[test]
    fn demand_summary_over_profile() {
        let ds = fixtures::demand_profile().unwrap();
        let s = DemandSummary::from_dataset(&ds, "demand", fixtures::CONTRACTED_KW).unwrap();
        let demand = &ds.column("demand").unwrap().values;
        let max = demand.iter().copied().fold(f64::MIN, f64::max);
        assert_eq!(s.peak_kw, max);
        assert!(s.load_factor > 0.0 && s.load_factor <= 100.0);
        assert_eq!(s.headroom_kw, fixtures::CONTRACTED_KW - max);
    }

    #[test]
    fn demand_summary_first_peak_wins() {
        let ds = Dataset::build(
            Domain::categories(["a", "b", "c"]),
            &[SeriesSpec::from_values("d", "D", ColorToken::Chart1, vec![5.0, 10.0, 10.0])],
        )
        .unwrap();
        let s = DemandSummary::from_dataset(&ds, "d", 20.0).unwrap();
        assert_eq!(s.peak_label, "b");
        assert_eq!(s.load_factor, 83.3);
        assert!(DemandSummary::from_dataset(&ds, "missing", 20.0).is_none());
    }

    #[test]
    fn demand_summary_empty_dataset() {
        let ds = Dataset::build(
            Domain::Days { count: 0 },
            &[SeriesSpec::constant("d", "D", ColorToken::Chart1, 1.0)],
        )
        .unwrap();
        assert!(DemandSummary::from_dataset(&ds, "d", 350.0).is_none());
    }
}

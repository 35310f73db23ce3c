//! Mock datasets behind every dashboard chart.
//!
//! Generated series are closed-form functions of the index; table-backed
//! series are literal values. Integer-valued series round half-up.

use crate::dataset::{Dataset, DatasetError};
use crate::domain::Domain;
use crate::series::{floor_at, perturb, round_half_up, round_to, wave, ColorToken, SeriesSpec};

const MONTHS: [&str; 6] = ["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"];

/// Contracted capacity of the demo site, kW.
pub const CONTRACTED_KW: f64 = 350.0;
/// Internal peak target, kW.
pub const TARGET_KW: f64 = 300.0;
/// Demand never drops below this base load, kW.
pub const BASE_LOAD_KW: f64 = 80.0;

fn months() -> Domain {
    Domain::categories(MONTHS)
}

/// Hourly demand curve shared by the dashboard and demand pages.
pub fn demand_kw(i: usize) -> f64 {
    let base = 180.0 + wave(i, 3.8, 6.0) * 120.0;
    round_half_up(floor_at(base + perturb(i, 7, 23), BASE_LOAD_KW))
}

// ---------------------------------------------------------------------------
// Dashboard charts
// ---------------------------------------------------------------------------

pub fn consumption() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::HourOfDay,
        &[
            SeriesSpec::new("consumption", "Actual", ColorToken::Chart1, |i| {
                round_half_up(180.0 + wave(i, 3.0, 0.0) * 80.0 + perturb(i, 7, 19))
            }),
            SeriesSpec::new("prediction", "Predicted", ColorToken::Chart2, |i| {
                round_half_up(175.0 + wave(i, 3.0, 0.0) * 75.0 + perturb(i, 5, 11))
            }),
        ],
    )
}

pub fn cost() -> Result<Dataset, DatasetError> {
    Dataset::build(
        months(),
        &[
            SeriesSpec::from_values(
                "onPeak",
                "On-Peak",
                ColorToken::Chart4,
                vec![18500.0, 17200.0, 15800.0, 14500.0, 16200.0, 17800.0],
            ),
            SeriesSpec::from_values(
                "offPeak",
                "Off-Peak",
                ColorToken::Chart3,
                vec![8200.0, 7800.0, 7200.0, 6800.0, 7400.0, 8000.0],
            ),
            SeriesSpec::from_values(
                "demand",
                "Demand",
                ColorToken::Chart1,
                vec![5500.0, 5200.0, 4800.0, 4500.0, 5100.0, 5400.0],
            ),
        ],
    )
}

/// Energy by equipment. Solar PV is net export and stays negative.
pub fn equipment() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::categories([
            "Chiller-1", "Chiller-2", "AHU-1F", "AHU-2F", "CW Pump", "CT", "Lighting", "Solar PV",
        ]),
        &[SeriesSpec::from_values(
            "kWh",
            "Energy",
            ColorToken::Chart1,
            vec![12400.0, 11800.0, 4500.0, 4200.0, 3100.0, 2800.0, 2200.0, -1800.0],
        )],
    )
}

pub fn peak() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::HourOfDay,
        &[
            SeriesSpec::new("demand", "Demand", ColorToken::Chart4, demand_kw),
            SeriesSpec::constant("contracted", "Contract", ColorToken::Chart5, CONTRACTED_KW),
        ],
    )
}

pub fn power_factor() -> Result<Dataset, DatasetError> {
    Dataset::build(
        months(),
        &[SeriesSpec::from_values(
            "pf",
            "Power Factor",
            ColorToken::Chart3,
            vec![0.92, 0.91, 0.93, 0.94, 0.90, 0.89],
        )],
    )
}

/// kWh against outdoor temperature with a linear baseline.
pub fn regression() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::Temperature { start: 20.0, step: 0.5, count: 30 },
        &[
            SeriesSpec::new("kWh", "Actual kWh", ColorToken::Chart1, |i| {
                round_half_up(150.0 + i as f64 * 8.0 + wave(i, 4.0, 0.0) * 30.0)
            }),
            SeriesSpec::new("baseline", "Regression", ColorToken::Chart2, |i| {
                round_half_up(160.0 + i as f64 * 7.5)
            }),
        ],
    )
}

pub fn eui() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::categories(["Taipei HQ", "Taichung", "Kaohsiung", "Industry Avg"]),
        &[
            SeriesSpec::from_values(
                "eui",
                "EUI (kWh/m²)",
                ColorToken::Chart1,
                vec![185.0, 245.0, 120.0, 220.0],
            ),
            SeriesSpec::from_values(
                "benchmark",
                "Benchmark",
                ColorToken::Chart5,
                vec![210.0, 280.0, 150.0, 220.0],
            ),
        ],
    )
}

pub fn pareto() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::categories([
            "Chiller-1", "Chiller-2", "AHU-1F", "AHU-2F", "CW Pump", "CT", "Lighting", "Others",
        ]),
        &[
            SeriesSpec::from_values(
                "kWh",
                "Energy (kWh)",
                ColorToken::Chart1,
                vec![12400.0, 11800.0, 4500.0, 4200.0, 3100.0, 2800.0, 2200.0, 3000.0],
            ),
            SeriesSpec::from_values(
                "cumPct",
                "Cumulative %",
                ColorToken::Chart4,
                vec![28.0, 55.0, 65.0, 75.0, 82.0, 88.0, 93.0, 100.0],
            ),
        ],
    )
}

/// Chiller kW/RT across the load range; above 65 % load the current
/// sequencing pays a fixed penalty.
pub fn efficiency() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::LoadPercent { steps: 20, step: 5 },
        &[
            SeriesSpec::new("kwrt", "Current kW/RT", ColorToken::Chart4, |i| {
                let load = ((i + 1) * 5) as f64;
                let penalty = if i > 12 { 0.08 } else { 0.0 };
                round_to(0.55 + (load / 30.0).sin() * 0.15 + penalty, 3)
            }),
            SeriesSpec::new("optimal", "Optimal", ColorToken::Chart3, optimal_kwrt),
        ],
    )
}

fn optimal_kwrt(i: usize) -> f64 {
    let load = ((i + 1) * 5) as f64;
    round_to(0.50 + (load / 30.0).sin() * 0.12, 3)
}

// ---------------------------------------------------------------------------
// Analysis pages
// ---------------------------------------------------------------------------

/// 24h demand against contract and target (demand page).
pub fn demand_profile() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::HourOfDay,
        &[
            SeriesSpec::new("demand", "Demand", ColorToken::Chart1, demand_kw),
            SeriesSpec::constant("contracted", "Contract", ColorToken::Chart5, CONTRACTED_KW),
            SeriesSpec::constant("target", "Target", ColorToken::Chart3, TARGET_KW),
        ],
    )
}

pub fn monthly_peak() -> Result<Dataset, DatasetError> {
    Dataset::build(
        months(),
        &[
            SeriesSpec::from_values(
                "peak",
                "Peak kW",
                ColorToken::Chart4,
                vec![312.0, 298.0, 276.0, 265.0, 288.0, 301.0],
            ),
            SeriesSpec::from_values(
                "cost",
                "Demand Charge",
                ColorToken::Chart1,
                vec![28500.0, 26200.0, 23800.0, 22100.0, 25500.0, 27200.0],
            ),
        ],
    )
}

/// Days with metered data in the 14-day prediction window.
pub const OBSERVED_DAYS: usize = 7;

/// Two-week forecast. `actual` is NaN for days not yet observed, which
/// serializes as `null`.
pub fn prediction() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::Days { count: 14 },
        &[
            SeriesSpec::new("actual", "Actual", ColorToken::Chart1, |i| {
                if i < OBSERVED_DAYS {
                    round_half_up(280.0 + wave(i, 2.0, 0.0) * 60.0 + perturb(i, 7, 13))
                } else {
                    f64::NAN
                }
            }),
            SeriesSpec::new("predicted", "Predicted", ColorToken::Chart2, |i| {
                round_half_up(275.0 + wave(i, 2.0, 0.0) * 55.0 + perturb(i, 5, 11))
            }),
            SeriesSpec::new("upper", "Upper Bound", ColorToken::Chart5, |i| {
                round_half_up(310.0 + wave(i, 2.0, 0.0) * 55.0)
            }),
            SeriesSpec::new("lower", "Lower Bound", ColorToken::Chart3, |i| {
                round_half_up(240.0 + wave(i, 2.0, 0.0) * 55.0)
            }),
        ],
    )
}

/// Efficiency curve on the optimisation page: steeper penalty above 60 %
/// load plus a small index-derived wobble.
pub fn optimization_efficiency() -> Result<Dataset, DatasetError> {
    Dataset::build(
        Domain::LoadPercent { steps: 20, step: 5 },
        &[
            SeriesSpec::new("current", "Current kW/RT", ColorToken::Chart4, |i| {
                let load = ((i + 1) * 5) as f64;
                let penalty = if load > 60.0 { 0.1 } else { 0.0 };
                round_to(
                    0.55 + (load / 30.0).sin() * 0.15 + penalty + perturb(i, 3, 7) * 0.01,
                    3,
                )
            }),
            SeriesSpec::new("optimal", "Optimal", ColorToken::Chart3, optimal_kwrt),
        ],
    )
}

use fe_core::dataset::{Dataset, DatasetError};
use fe_core::domain::Domain;
use fe_core::series::{floor_at, generate, wave, ColorToken, SeriesSpec};

fn demand(i: usize) -> f64 {
    floor_at(180.0 + wave(i, 3.8, 6.0) * 120.0, 80.0)
}

#[test]
fn hourly_demand_curve_is_floored() {
    let out = generate(24, demand);
    assert_eq!(out.len(), 24);
    assert!(out.iter().all(|v| *v >= 80.0));
    // sin(-6/3.8) is below -1/3, so the first hour clamps to the base load
    assert_eq!(out[0], 80.0);
    // the curve crosses its baseline at the phase offset
    assert_eq!(out[6], 180.0);
    for (i, v) in out.iter().enumerate() {
        assert_eq!(*v, demand(i));
    }
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(generate(24, demand), generate(24, demand));
}

#[test]
fn actual_and_predicted_over_two_weeks() {
    let ds = Dataset::build(
        Domain::Days { count: 14 },
        &[
            SeriesSpec::new("actual", "Actual", ColorToken::Chart1, |i| 280.0 + i as f64),
            SeriesSpec::new("predicted", "Predicted", ColorToken::Chart2, |i| 275.0 + i as f64),
        ],
    )
    .unwrap();
    let rows = ds.rows();
    assert_eq!(rows.len(), 14);
    assert!(rows.iter().all(|r| r.values.len() == 2));
    assert_eq!(ds.column_keys(), vec!["actual", "predicted"]);
    assert_eq!(rows[0].label, "Day 1");
    assert_eq!(rows[13].values, vec![293.0, 288.0]);
}

#[test]
fn dataset_serializes_with_domain_tag() {
    let ds = Dataset::build(
        Domain::HourOfDay,
        &[SeriesSpec::constant("contracted", "Contract", ColorToken::Chart5, 350.0)],
    )
    .unwrap();
    let json = serde_json::to_value(&ds).unwrap();
    assert_eq!(json["domain"]["kind"], "hour_of_day");
    assert_eq!(json["columns"][0]["color"], "chart-5");
    let back: Dataset = serde_json::from_value(json).unwrap();
    assert_eq!(back, ds);
}

#[test]
fn ragged_error_message_names_column() {
    let err = Dataset::build(
        Domain::categories(["a", "b"]),
        &[SeriesSpec::from_values("x", "X", ColorToken::Chart1, vec![1.0])],
    )
    .unwrap_err();
    assert!(matches!(err, DatasetError::RaggedColumn { .. }));
    assert!(err.to_string().contains("`x`"));
}

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// Pure value function evaluated once per domain index.
pub type ValueFn = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// Evaluate `f` over `0..n`. `result[i] == f(i)` for every index.
pub fn generate<F>(n: usize, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64,
{
    (0..n).map(f).collect()
}

// ---------------------------------------------------------------------------
// Shape helpers
// ---------------------------------------------------------------------------

/// `sin((i - phase) / divisor)`.
pub fn wave(i: usize, divisor: f64, phase: f64) -> f64 {
    ((i as f64 - phase) / divisor).sin()
}

/// Bounded index-derived wobble in `[0, modulus)`: `(i * step) % modulus`.
///
/// Only exists so generated lines are not visually flat. It never draws from a
/// random source.
pub fn perturb(i: usize, step: usize, modulus: usize) -> f64 {
    if modulus == 0 {
        return 0.0;
    }
    ((i * step) % modulus) as f64
}

/// Clamp physically meaningless values up to `min`.
pub fn floor_at(value: f64, min: f64) -> f64 {
    value.max(min)
}

/// Round to the nearest integer with ties going towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let p = 10f64.powi(decimals as i32);
    (value * p).round() / p
}

// ---------------------------------------------------------------------------
// ColorToken
// ---------------------------------------------------------------------------

/// Palette slot a series is drawn with. Front-ends map these to real colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorToken {
    #[serde(rename = "chart-1")]
    Chart1,
    #[serde(rename = "chart-2")]
    Chart2,
    #[serde(rename = "chart-3")]
    Chart3,
    #[serde(rename = "chart-4")]
    Chart4,
    #[serde(rename = "chart-5")]
    Chart5,
}

// ---------------------------------------------------------------------------
// SeriesPoint / SeriesSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Declarative recipe for one named column of a [`crate::dataset::Dataset`].
#[derive(Clone)]
pub struct SeriesSpec {
    pub key: String,
    pub label: String,
    pub color: ColorToken,
    value_fn: ValueFn,
    /// Set for table-backed specs, which are only total over their own length.
    declared_len: Option<usize>,
}

impl SeriesSpec {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, color: ColorToken, f: F) -> Self
    where
        F: Fn(usize) -> f64 + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            color,
            value_fn: Arc::new(f),
            declared_len: None,
        }
    }

    /// Same value at every index (contract lines, targets).
    pub fn constant(
        key: impl Into<String>,
        label: impl Into<String>,
        color: ColorToken,
        value: f64,
    ) -> Self {
        Self::new(key, label, color, move |_| value)
    }

    /// Column backed by a literal table. Its length must match the domain it
    /// is zipped into.
    pub fn from_values(
        key: impl Into<String>,
        label: impl Into<String>,
        color: ColorToken,
        values: Vec<f64>,
    ) -> Self {
        let len = values.len();
        let mut spec = Self::new(key, label, color, move |i| {
            values.get(i).copied().unwrap_or(f64::NAN)
        });
        spec.declared_len = Some(len);
        spec
    }

    pub fn declared_len(&self) -> Option<usize> {
        self.declared_len
    }

    pub fn value_at(&self, i: usize) -> f64 {
        (self.value_fn)(i)
    }

    pub fn generate(&self, n: usize) -> Vec<f64> {
        generate(n, |i| self.value_at(i))
    }

    /// Label each generated value with its domain label.
    pub fn points(&self, domain: &Domain) -> Vec<SeriesPoint> {
        (0..domain.len())
            .map(|i| SeriesPoint {
                label: domain.label(i),
                value: self.value_at(i),
            })
            .collect()
    }
}

impl fmt::Debug for SeriesSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("color", &self.color)
            .field("declared_len", &self.declared_len)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(i: usize) -> f64 {
        floor_at(180.0 + wave(i, 3.8, 6.0) * 120.0, 80.0)
    }

    #[test]
    fn generate_has_exact_length() {
        for n in [0usize, 1, 7, 24, 100] {
            assert_eq!(generate(n, |i| i as f64).len(), n);
        }
    }

    #[test]
    fn generate_matches_function_pointwise() {
        let out = generate(24, demand);
        for (i, v) in out.iter().enumerate() {
            assert_eq!(*v, demand(i));
        }
    }

    #[test]
    fn generate_is_deterministic() {
        assert_eq!(generate(24, demand), generate(24, demand));
    }

    #[test]
    fn demand_curve_is_floored() {
        let out = generate(24, demand);
        assert_eq!(out.len(), 24);
        assert!(out.iter().all(|v| *v >= 80.0));
        // sin(-6/3.8) is close to -1, so the raw value dips below the floor.
        assert_eq!(out[0], 80.0);
        assert!((out[6] - 180.0).abs() < 1e-9);
    }

    #[test]
    fn perturb_is_bounded() {
        for i in 0..200 {
            let p = perturb(i, 7, 23);
            assert!((0.0..23.0).contains(&p));
        }
        assert_eq!(perturb(5, 3, 0), 0.0);
    }

    #[test]
    fn round_half_up_ties_go_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }

    #[test]
    fn round_to_three_places() {
        assert_eq!(round_to(0.123456, 3), 0.123);
        assert_eq!(round_to(0.5, 3), 0.5);
    }

    #[test]
    fn negative_values_pass_through_without_floor() {
        let spec = SeriesSpec::from_values("kwh", "Energy", ColorToken::Chart1, vec![100.0, -1800.0]);
        assert_eq!(spec.generate(2), vec![100.0, -1800.0]);
        assert_eq!(spec.declared_len(), Some(2));
    }

    #[test]
    fn constant_spec() {
        let spec = SeriesSpec::constant("contracted", "Contract", ColorToken::Chart5, 350.0);
        assert!(spec.generate(24).iter().all(|v| *v == 350.0));
        assert_eq!(spec.declared_len(), None);
    }

    #[test]
    fn points_carry_domain_labels() {
        let spec = SeriesSpec::new("x", "X", ColorToken::Chart1, |i| i as f64);
        let pts = spec.points(&Domain::HourOfDay);
        assert_eq!(pts.len(), 24);
        assert_eq!(pts[14].label, "14:00");
        assert_eq!(pts[14].value, 14.0);
    }

    #[test]
    fn color_token_wire_names() {
        assert_eq!(serde_json::to_string(&ColorToken::Chart2).unwrap(), "\"chart-2\"");
        assert_eq!(serde_json::to_string(&ColorToken::Chart5).unwrap(), "\"chart-5\"");
        let back: ColorToken = serde_json::from_str("\"chart-4\"").unwrap();
        assert_eq!(back, ColorToken::Chart4);
    }
}

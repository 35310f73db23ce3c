use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::series::{ColorToken, SeriesSpec};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("column `{key}` has {actual} values but the domain has {expected}")]
    RaggedColumn {
        key: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate column key `{0}`")]
    DuplicateColumn(String),
}

// ---------------------------------------------------------------------------
// Column / Row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub color: ColorToken,
    pub values: Vec<f64>,
}

/// One domain position across every column, in column declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Column-aligned set of series over one domain.
///
/// Every column holds exactly `domain.len()` values. Ragged input is rejected
/// at construction rather than padded or truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    domain: Domain,
    columns: Vec<Column>,
}

impl Dataset {
    /// Evaluate every spec over the domain and zip the results by index.
    pub fn build(domain: Domain, specs: &[SeriesSpec]) -> Result<Self, DatasetError> {
        let n = domain.len();
        let mut columns: Vec<Column> = Vec::with_capacity(specs.len());
        for spec in specs {
            if let Some(actual) = spec.declared_len() {
                if actual != n {
                    return Err(DatasetError::RaggedColumn {
                        key: spec.key.clone(),
                        expected: n,
                        actual,
                    });
                }
            }
            if columns.iter().any(|c| c.key == spec.key) {
                return Err(DatasetError::DuplicateColumn(spec.key.clone()));
            }
            columns.push(Column {
                key: spec.key.clone(),
                label: spec.label.clone(),
                color: spec.color,
                values: spec.generate(n),
            });
        }
        tracing::debug!(rows = n, columns = columns.len(), "dataset built");
        Ok(Self { domain, columns })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Number of rows (the domain length).
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    pub fn rows(&self) -> Vec<Row> {
        (0..self.len())
            .map(|i| Row {
                label: self.domain.label(i),
                values: self.columns.iter().map(|c| c.values[i]).collect(),
            })
            .collect()
    }

    /// Flatten into one JSON object per row, keyed by the domain axis key and
    /// each column key.
    pub fn to_records(&self) -> Vec<serde_json::Value> {
        let axis = self.domain.axis_key();
        (0..self.len())
            .map(|i| {
                let mut obj = serde_json::Map::new();
                obj.insert(axis.to_string(), serde_json::json!(self.domain.label(i)));
                for col in &self.columns {
                    obj.insert(col.key.clone(), serde_json::json!(col.values[i]));
                }
                serde_json::Value::Object(obj)
            })
            .collect()
    }

    /// Smallest and largest finite value across all columns. Missing
    /// readings (NaN) are skipped.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut vals = self
            .columns
            .iter()
            .flat_map(|c| c.values.iter().copied())
            .filter(|v| v.is_finite());
        let first = vals.next()?;
        Some(vals.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

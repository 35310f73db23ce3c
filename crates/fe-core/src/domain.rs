use serde::{Deserialize, Serialize};

/// Labelled x-axis a dataset is generated over.
///
/// Labels are rendered verbatim by front-ends; the index order is the domain
/// order and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    /// `"00:00"` through `"23:00"`.
    HourOfDay,
    /// `"Day 1"` through `"Day {count}"`.
    Days { count: usize },
    /// `"{step}%"`, `"{2*step}%"`, ... for `steps` entries.
    LoadPercent { steps: usize, step: u32 },
    /// Temperatures starting at `start`, `step` apart.
    Temperature { start: f64, step: f64, count: usize },
    /// Free-form category labels (months, equipment, buildings).
    Categories { labels: Vec<String> },
}

impl Domain {
    pub fn categories<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Domain::Categories {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Domain::HourOfDay => 24,
            Domain::Days { count } => *count,
            Domain::LoadPercent { steps, .. } => *steps,
            Domain::Temperature { count, .. } => *count,
            Domain::Categories { labels } => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label for index `i`. Out-of-range indices yield an empty string.
    pub fn label(&self, i: usize) -> String {
        if i >= self.len() {
            return String::new();
        }
        match self {
            Domain::HourOfDay => format!("{:02}:00", i),
            Domain::Days { .. } => format!("Day {}", i + 1),
            Domain::LoadPercent { step, .. } => format!("{}%", (i as u32 + 1) * step),
            Domain::Temperature { start, step, .. } => format!("{}", start + i as f64 * step),
            Domain::Categories { labels } => labels[i].clone(),
        }
    }

    pub fn labels(&self) -> Vec<String> {
        (0..self.len()).map(|i| self.label(i)).collect()
    }

    /// Name of the x column when a dataset is flattened into records.
    pub fn axis_key(&self) -> &'static str {
        match self {
            Domain::HourOfDay => "time",
            Domain::Days { .. } => "day",
            Domain::LoadPercent { .. } => "load",
            Domain::Temperature { .. } => "temp",
            Domain::Categories { .. } => "name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_of_day_labels() {
        let d = Domain::HourOfDay;
        assert_eq!(d.len(), 24);
        assert_eq!(d.label(0), "00:00");
        assert_eq!(d.label(9), "09:00");
        assert_eq!(d.label(23), "23:00");
        assert_eq!(d.label(24), "");
    }

    #[test]
    fn day_labels_are_one_based() {
        let d = Domain::Days { count: 14 };
        assert_eq!(d.label(0), "Day 1");
        assert_eq!(d.label(13), "Day 14");
    }

    #[test]
    fn load_percent_labels() {
        let d = Domain::LoadPercent { steps: 20, step: 5 };
        assert_eq!(d.label(0), "5%");
        assert_eq!(d.label(19), "100%");
    }

    #[test]
    fn temperature_labels_drop_trailing_zero() {
        let d = Domain::Temperature { start: 20.0, step: 0.5, count: 30 };
        assert_eq!(d.label(0), "20");
        assert_eq!(d.label(1), "20.5");
        assert_eq!(d.label(29), "34.5");
    }

    #[test]
    fn categories_preserve_order() {
        let d = Domain::categories(["Sep", "Oct", "Nov"]);
        assert_eq!(d.labels(), vec!["Sep", "Oct", "Nov"]);
        assert_eq!(d.axis_key(), "name");
    }

    #[test]
    fn empty_domain() {
        let d = Domain::Days { count: 0 };
        assert!(d.is_empty());
        assert!(d.labels().is_empty());
    }
}

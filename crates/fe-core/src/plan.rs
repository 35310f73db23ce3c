use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PlanTier
// ---------------------------------------------------------------------------

/// Subscription level of the current session.
///
/// Gating is binary: only [`PlanTier::Free`] lacks premium access. `Pro` and
/// `Enterprise` differ in [`PlanLimits`] quotas and display labels only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    #[default]
    Pro,
    Enterprise,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Free, PlanTier::Pro, PlanTier::Enterprise];

    pub fn has_premium_access(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
            PlanTier::Enterprise => "enterprise",
        }
    }

    /// Badge text shown next to the user name.
    pub fn display_label(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free Node",
            PlanTier::Pro => "Pro Access",
            PlanTier::Enterprise => "Enterprise",
        }
    }

    pub fn limits(&self) -> PlanLimits {
        PlanLimits::for_tier(*self)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("unknown plan tier `{0}` (expected free, pro or enterprise)")]
    Unknown(String),
}

impl FromStr for PlanTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "pro" => Ok(PlanTier::Pro),
            "enterprise" => Ok(PlanTier::Enterprise),
            _ => Err(PlanError::Unknown(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PlanToggle
// ---------------------------------------------------------------------------

/// The two values the in-app plan switch can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanToggle {
    Free,
    Pro,
}

impl PlanToggle {
    /// The other side of the switch.
    pub fn flipped(&self) -> PlanToggle {
        match self {
            PlanToggle::Free => PlanToggle::Pro,
            PlanToggle::Pro => PlanToggle::Free,
        }
    }
}

impl From<PlanToggle> for PlanTier {
    fn from(t: PlanToggle) -> Self {
        match t {
            PlanToggle::Free => PlanTier::Free,
            PlanToggle::Pro => PlanTier::Pro,
        }
    }
}

impl From<PlanTier> for PlanToggle {
    /// Enterprise sits on the paid side of the switch.
    fn from(t: PlanTier) -> Self {
        match t {
            PlanTier::Free => PlanToggle::Free,
            PlanTier::Pro | PlanTier::Enterprise => PlanToggle::Pro,
        }
    }
}

/// Session-scoped plan holder. Starts at the configured default and changes
/// only through [`PlanSession::set`] / [`PlanSession::toggle`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanSession {
    tier: PlanTier,
}

impl PlanSession {
    pub fn new(tier: PlanTier) -> Self {
        Self { tier }
    }

    pub fn tier(&self) -> PlanTier {
        self.tier
    }

    pub fn set(&mut self, toggle: PlanToggle) {
        let next = PlanTier::from(toggle);
        if next != self.tier {
            tracing::info!(from = %self.tier, to = %next, "plan changed");
        }
        self.tier = next;
    }

    /// Flip between free and pro.
    pub fn toggle(&mut self) -> PlanTier {
        let next = PlanToggle::from(self.tier).flipped();
        self.set(next);
        self.tier
    }
}

// ---------------------------------------------------------------------------
// Features / limits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Dashboard,
    CsvImport,
    BasicCharts,
    AiPrediction,
    Optimization,
    DemandAnalysis,
    AutoReports,
    RealtimeStreaming,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Dashboard,
        Feature::CsvImport,
        Feature::BasicCharts,
        Feature::AiPrediction,
        Feature::Optimization,
        Feature::DemandAnalysis,
        Feature::AutoReports,
        Feature::RealtimeStreaming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Dashboard => "dashboard",
            Feature::CsvImport => "csv_import",
            Feature::BasicCharts => "basic_charts",
            Feature::AiPrediction => "ai_prediction",
            Feature::Optimization => "optimization",
            Feature::DemandAnalysis => "demand_analysis",
            Feature::AutoReports => "auto_reports",
            Feature::RealtimeStreaming => "realtime_streaming",
        }
    }
}

const FREE_FEATURES: &[Feature] = &[Feature::Dashboard, Feature::CsvImport, Feature::BasicCharts];

const PRO_FEATURES: &[Feature] = &[
    Feature::Dashboard,
    Feature::CsvImport,
    Feature::BasicCharts,
    Feature::AiPrediction,
    Feature::Optimization,
    Feature::DemandAnalysis,
    Feature::AutoReports,
    Feature::RealtimeStreaming,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSet {
    Listed(Vec<Feature>),
    All,
}

/// Per-tier quotas. `None` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanLimits {
    pub max_sites: Option<u32>,
    pub max_devices: Option<u32>,
    pub data_retention_days: Option<u32>,
    pub features: FeatureSet,
}

impl PlanLimits {
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Free => Self {
                max_sites: Some(1),
                max_devices: Some(5),
                data_retention_days: Some(7),
                features: FeatureSet::Listed(FREE_FEATURES.to_vec()),
            },
            PlanTier::Pro => Self {
                max_sites: Some(10),
                max_devices: Some(50),
                data_retention_days: Some(90),
                features: FeatureSet::Listed(PRO_FEATURES.to_vec()),
            },
            PlanTier::Enterprise => Self {
                max_sites: None,
                max_devices: None,
                data_retention_days: None,
                features: FeatureSet::All,
            },
        }
    }

    pub fn allows(&self, feature: Feature) -> bool {
        match &self.features {
            FeatureSet::All => true,
            FeatureSet::Listed(list) => list.contains(&feature),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tier_is_pro() {
        assert_eq!(PlanTier::default(), PlanTier::Pro);
        assert_eq!(PlanSession::default().tier(), PlanTier::Pro);
    }

    #[test]
    fn only_free_lacks_premium() {
        assert!(!PlanTier::Free.has_premium_access());
        assert!(PlanTier::Pro.has_premium_access());
        assert!(PlanTier::Enterprise.has_premium_access());
    }

    #[test]
    fn parse_tiers() {
        assert_eq!("free".parse::<PlanTier>().unwrap(), PlanTier::Free);
        assert_eq!(" PRO ".parse::<PlanTier>().unwrap(), PlanTier::Pro);
        assert_eq!("Enterprise".parse::<PlanTier>().unwrap(), PlanTier::Enterprise);
        let err = "gold".parse::<PlanTier>().unwrap_err();
        assert!(err.to_string().contains("gold"));
    }

    #[test]
    fn toggle_flips_free_and_pro() {
        let mut s = PlanSession::default();
        assert_eq!(s.toggle(), PlanTier::Free);
        assert_eq!(s.toggle(), PlanTier::Pro);
    }

    #[test]
    fn enterprise_toggles_down_to_free() {
        let mut s = PlanSession::new(PlanTier::Enterprise);
        assert_eq!(s.toggle(), PlanTier::Free);
    }

    #[test]
    fn set_from_toggle() {
        let mut s = PlanSession::new(PlanTier::Free);
        s.set(PlanToggle::Pro);
        assert_eq!(s.tier(), PlanTier::Pro);
        s.set(PlanToggle::Pro);
        assert_eq!(s.tier(), PlanTier::Pro);
    }

    #[test]
    fn display_labels() {
        assert_eq!(PlanTier::Free.display_label(), "Free Node");
        assert_eq!(PlanTier::Pro.display_label(), "Pro Access");
        assert_eq!(PlanTier::Enterprise.display_label(), "Enterprise");
    }

    #[test]
    fn free_limits() {
        let l = PlanLimits::for_tier(PlanTier::Free);
        assert_eq!(l.max_sites, Some(1));
        assert_eq!(l.max_devices, Some(5));
        assert_eq!(l.data_retention_days, Some(7));
        assert!(l.allows(Feature::CsvImport));
        assert!(!l.allows(Feature::AiPrediction));
    }

    #[test]
    fn pro_limits_cover_every_feature() {
        let l = PlanTier::Pro.limits();
        assert_eq!(l.max_sites, Some(10));
        for f in Feature::ALL {
            assert!(l.allows(f), "pro should allow {}", f.as_str());
        }
    }

    #[test]
    fn enterprise_is_unlimited() {
        let l = PlanTier::Enterprise.limits();
        assert_eq!(l.max_sites, None);
        assert_eq!(l.max_devices, None);
        assert_eq!(l.data_retention_days, None);
        assert_eq!(l.features, FeatureSet::All);
    }
}

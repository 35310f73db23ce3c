use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{self, ChartKind, ChartSelection, ReportModule, ReportSelection, TimeRange};
use crate::plan::PlanTier;

/// Top-level configuration loaded from `~/.flowenergy/config.toml`.
///
/// Values are stored as plain strings so a hand-edited file round-trips
/// unchanged; [`Config::validate`] checks them against the catalogues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
}

impl Config {
    /// Load config from `~/.flowenergy/config.toml`, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(path)
        } else {
            let cfg = Config::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let cfg: Config = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.general.validate()?;
        self.plan.default_tier()?;
        self.dashboard.validate()?;
        self.reports.selection()?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".flowenergy")
            .join("config.toml")
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Section structs
// ---------------------------------------------------------------------------

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub log_json: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::Validation(format!(
                "general.log_level `{}` must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )))
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Tier every session starts on.
    #[serde(default = "default_tier")]
    pub default_tier: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            default_tier: default_tier(),
        }
    }
}

impl PlanConfig {
    pub fn default_tier(&self) -> Result<PlanTier, ConfigError> {
        self.default_tier
            .parse()
            .map_err(|e| ConfigError::Validation(format!("plan.default_tier: {e}")))
    }
}

fn default_tier() -> String {
    PlanTier::default().as_str().into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_enabled_charts")]
    pub enabled_charts: Vec<String>,
    #[serde(default = "default_building")]
    pub building: String,
    #[serde(default = "default_time_range")]
    pub time_range: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled_charts: default_enabled_charts(),
            building: default_building(),
            time_range: default_time_range(),
        }
    }
}

impl DashboardConfig {
    pub fn chart_selection(&self) -> Result<ChartSelection, ConfigError> {
        let kinds = self
            .enabled_charts
            .iter()
            .map(|id| id.parse::<ChartKind>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::Validation(format!("dashboard.enabled_charts: {e}")))?;
        Ok(ChartSelection::new(kinds))
    }

    pub fn time_range(&self) -> Result<TimeRange, ConfigError> {
        self.time_range
            .parse()
            .map_err(|e| ConfigError::Validation(format!("dashboard.time_range: {e}")))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.chart_selection()?;
        catalog::site(&self.building)
            .map_err(|e| ConfigError::Validation(format!("dashboard.building: {e}")))?;
        self.time_range()?;
        Ok(())
    }
}

fn default_enabled_charts() -> Vec<String> {
    ChartKind::DEFAULT_ENABLED.iter().map(|k| k.id().to_string()).collect()
}
fn default_building() -> String {
    "all".into()
}
fn default_time_range() -> String {
    TimeRange::default().key().into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_modules")]
    pub default_modules: Vec<String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_modules: default_modules(),
        }
    }
}

impl ReportsConfig {
    /// Starting report selection. Premium modules are kept here; the plan
    /// check happens when the selection is edited.
    pub fn selection(&self) -> Result<ReportSelection, ConfigError> {
        let mut sel = ReportSelection::empty();
        for id in &self.default_modules {
            let module: ReportModule = id
                .parse()
                .map_err(|e| ConfigError::Validation(format!("reports.default_modules: {e}")))?;
            if !sel.contains(module) {
                sel.toggle(PlanTier::Enterprise, module)
                    .map_err(|e| ConfigError::Validation(e.to_string()))?;
            }
        }
        Ok(sel)
    }
}

fn default_modules() -> Vec<String> {
    ReportSelection::default()
        .modules()
        .iter()
        .map(|m| m.id().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.plan.default_tier().unwrap(), PlanTier::Pro);
        assert_eq!(cfg.dashboard.chart_selection().unwrap(), ChartSelection::default());
        assert_eq!(cfg.reports.selection().unwrap(), ReportSelection::default());
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut cfg = Config::default();
        cfg.general.log_level = "DEBUG".into();
        cfg.validate().unwrap();
        cfg.general.log_level = "loud".into();
        assert!(cfg.validate().is_err());
    }
}

use fe_core::config::{Config, ConfigError};
use fe_core::plan::PlanTier;
use fe_core::catalog::{ChartKind, ReportModule, TimeRange};
use std::io::Write;

#[test]
fn default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.general.log_level, "info");
    assert!(!cfg.general.log_json);
    assert_eq!(cfg.plan.default_tier, "pro");
    assert_eq!(
        cfg.dashboard.enabled_charts,
        vec!["consumption", "cost", "equipment", "peak", "powerfactor"]
    );
    assert_eq!(cfg.dashboard.building, "all");
    assert_eq!(cfg.dashboard.time_range, "1M");
    assert_eq!(cfg.reports.default_modules, vec!["executive", "consumption"]);
}

#[test]
fn config_roundtrip() {
    let cfg = Config::default();
    let toml_str = cfg.to_toml().expect("serialize to toml");
    assert!(toml_str.contains("default_tier = \"pro\""));

    let parsed: Config = toml::from_str(&toml_str).expect("parse toml back");
    assert_eq!(parsed, cfg);
    parsed.validate().expect("config validates");
}

#[test]
fn config_partial_toml() {
    let partial = r#"
[plan]
default_tier = "free"

[dashboard]
enabled_charts = ["pareto", "cost"]
"#;
    let cfg: Config = toml::from_str(partial).expect("parse partial");
    assert_eq!(cfg.plan.default_tier().unwrap(), PlanTier::Free);
    let sel = cfg.dashboard.chart_selection().unwrap();
    assert_eq!(sel.enabled(), &[ChartKind::Pareto, ChartKind::Cost]);
    // defaults should fill in the rest
    assert_eq!(cfg.general.log_level, "info");
    assert_eq!(cfg.dashboard.time_range().unwrap(), TimeRange::Month);
    cfg.validate().expect("config validates");
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(
        file,
        r#"
[general]
log_json = true

[reports]
default_modules = ["carbon", "executive", "carbon"]
"#
    )
    .unwrap();
    let cfg = Config::load_from(file.path()).expect("load");
    assert!(cfg.general.log_json);
    let sel = cfg.reports.selection().unwrap();
    assert_eq!(sel.modules(), &[ReportModule::Carbon, ReportModule::Executive]);
    assert_eq!(sel.total_pages(), 5);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[plan\ndefault_tier = ").unwrap();
    let err = Config::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_tier_fails_validation() {
    let mut cfg = Config::default();
    cfg.plan.default_tier = "gold".to_string();
    let err = cfg.validate().expect_err("validation should fail");
    assert!(err.to_string().contains("default_tier"));
}

#[test]
fn unknown_chart_fails_validation() {
    let mut cfg = Config::default();
    cfg.dashboard.enabled_charts.push("pie".to_string());
    let err = cfg.validate().expect_err("validation should fail");
    assert!(err.to_string().contains("enabled_charts"));
}

#[test]
fn unknown_building_and_range_fail_validation() {
    let mut cfg = Config::default();
    cfg.dashboard.building = "s7".to_string();
    assert!(cfg.validate().unwrap_err().to_string().contains("building"));

    let mut cfg = Config::default();
    cfg.dashboard.time_range = "2W".to_string();
    assert!(cfg.validate().unwrap_err().to_string().contains("time_range"));
}

#[test]
fn unknown_report_module_fails_validation() {
    let mut cfg = Config::default();
    cfg.reports.default_modules = vec!["appendix".into()];
    assert!(cfg.validate().unwrap_err().to_string().contains("default_modules"));
}

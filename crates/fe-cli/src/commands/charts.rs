use fe_core::catalog::{ChartCategory, ChartKind};
use fe_core::config::Config;
use fe_core::entitlement::evaluate;
use fe_core::plan::PlanTier;

/// List every chart grouped by category with its lock state for `tier`.
/// `*` marks charts enabled on the configured dashboard.
pub fn render(tier: PlanTier, cfg: &Config) -> anyhow::Result<String> {
    let selection = cfg.dashboard.chart_selection()?;
    let mut out = vec![format!("FlowEnergy charts  ({})", tier.display_label())];

    for category in ChartCategory::ALL {
        out.push(String::new());
        out.push(format!("{}  [{}]", category.label(), category.plan_badge()));
        for kind in ChartKind::in_category(category) {
            let enabled = if selection.contains(kind) { "*" } else { " " };
            let state = if evaluate(tier, &kind).is_open() { "open" } else { "locked" };
            out.push(format!(
                "  {enabled} {:<16} {:<26} {state}",
                kind.id(),
                kind.name()
            ));
        }
    }

    let (free, premium) = selection.split();
    out.push(String::new());
    out.push(format!(
        "{} enabled ({} free, {} premium)",
        selection.len(),
        free.len(),
        premium.len()
    ));
    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_locks_eight_charts() {
        let out = render(PlanTier::Free, &Config::default()).unwrap();
        assert_eq!(out.matches("locked").count(), 8);
        assert!(out.starts_with("FlowEnergy charts  (Free Node)"));
        assert!(out.contains("Advanced Analytics  [Pro]"));
        assert!(out.contains("5 enabled (5 free, 0 premium)"));
    }

    #[test]
    fn pro_tier_opens_everything() {
        let out = render(PlanTier::Pro, &Config::default()).unwrap();
        assert_eq!(out.matches("locked").count(), 0);
        assert_eq!(out.matches(" open").count(), 13);
    }

    #[test]
    fn enabled_marker_follows_config() {
        let mut cfg = Config::default();
        cfg.dashboard.enabled_charts = vec!["pareto".into()];
        let out = render(PlanTier::Pro, &cfg).unwrap();
        let pareto = out.lines().find(|l| l.contains("pareto")).unwrap();
        assert!(pareto.trim_start().starts_with("* pareto"));
        assert!(out.contains("1 enabled (0 free, 1 premium)"));
    }
}

use fe_core::catalog::{CatalogError, ReportModule};
use fe_core::config::Config;
use fe_core::plan::PlanTier;

/// Toggle `select` on top of the configured default modules for `tier`.
/// Locked modules are reported, not fatal; unknown ids are.
pub fn render(tier: PlanTier, cfg: &Config, select: &[String]) -> anyhow::Result<String> {
    let mut selection = cfg.reports.selection()?;
    let mut refused = Vec::new();
    for id in select {
        let module: ReportModule = id.parse()?;
        match selection.toggle(tier, module) {
            Ok(_) => {}
            Err(CatalogError::PremiumLocked(name)) => refused.push(name),
            Err(e) => return Err(e.into()),
        }
    }

    let mut out = vec![format!("Report modules  ({})", tier.display_label())];
    for module in ReportModule::ALL {
        let mark = if selection.contains(module) { "[x]" } else { "[ ]" };
        let lock = if module.premium() && !tier.has_premium_access() { "  PRO" } else { "" };
        out.push(format!(
            "{mark} {:<22} {} pages{lock}",
            module.name(),
            module.pages()
        ));
    }
    out.push(String::new());
    out.push(format!(
        "{} selected · ~{} pages",
        selection.modules().len(),
        selection.total_pages()
    ));
    for name in refused {
        out.push(format!("skipped {name}: requires the Pro plan"));
    }
    Ok(out.join("\n"))
}

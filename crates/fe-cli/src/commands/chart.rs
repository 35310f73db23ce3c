use fe_core::catalog::{ChartBody, ChartKind, PLACEHOLDER_NOTE};
use fe_core::entitlement::{evaluate, Gated};
use fe_core::plan::PlanTier;
use serde_json::json;

use super::{fmt_value, table};

/// Render one chart for `tier`. Gated charts print their overlay, never data.
pub fn render(id: &str, tier: PlanTier, as_json: bool) -> anyhow::Result<String> {
    let kind: ChartKind = id.parse()?;
    let gated = evaluate(tier, &kind).wrap(kind.body()?);
    tracing::info!(chart = kind.id(), %tier, open = gated.is_interactive(), "chart rendered");

    match gated {
        Gated::Obscured { overlay, .. } => {
            if as_json {
                Ok(serde_json::to_string_pretty(&json!({
                    "chart": kind.id(),
                    "mode": "gated",
                    "overlay": overlay,
                }))?)
            } else {
                Ok(format!(
                    "{}  [locked]\n{}\n> {}",
                    overlay.title, overlay.prompt_text, overlay.cta_label
                ))
            }
        }
        Gated::Open(ChartBody::Placeholder) => {
            if as_json {
                Ok(serde_json::to_string_pretty(&json!({
                    "chart": kind.id(),
                    "mode": "open",
                    "placeholder": true,
                }))?)
            } else {
                Ok(format!("{}\n{PLACEHOLDER_NOTE}", kind.name()))
            }
        }
        Gated::Open(ChartBody::Series(ds)) => {
            if as_json {
                Ok(serde_json::to_string_pretty(&json!({
                    "chart": kind.id(),
                    "mode": "open",
                    "unit": kind.y_unit(),
                    // Record objects do not keep column order.
                    "columns": ds.column_keys(),
                    "records": ds.to_records(),
                }))?)
            } else {
                let mut header = vec![ds.domain().axis_key().to_string()];
                header.extend(ds.columns().iter().map(|c| c.label.clone()));
                let rows: Vec<Vec<String>> = ds
                    .rows()
                    .into_iter()
                    .map(|r| {
                        let mut cells = vec![r.label];
                        cells.extend(r.values.into_iter().map(fmt_value));
                        cells
                    })
                    .collect();
                let unit = match kind.y_unit() {
                    "" => String::new(),
                    u => format!("  ({u})"),
                };
                Ok(format!("{}{unit}\n{}", kind.name(), table(&header, &rows)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_chart_prints_table() {
        let out = render("equipment", PlanTier::Free, false).unwrap();
        assert!(out.starts_with("Equipment Comparison  (kWh)"));
        assert!(out.contains("Solar PV"));
        assert!(out.contains("-1,800"));
        // title + header + rule + 8 rows
        assert_eq!(out.lines().count(), 11);
    }

    #[test]
    fn gated_chart_prints_overlay_only() {
        let out = render("pareto", PlanTier::Free, false).unwrap();
        assert!(out.contains("Pareto Analysis (80/20)  [locked]"));
        assert!(out.contains("Top energy consumers ranked by impact"));
        assert!(out.contains("Upgrade to Pro"));
        assert!(!out.contains("12,400"));
    }

    #[test]
    fn gated_chart_json() {
        let out = render("eui", PlanTier::Free, true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["mode"], "gated");
        assert_eq!(v["overlay"]["title"], "EUI Benchmarking");
        assert!(v.get("records").is_none());
    }

    #[test]
    fn open_chart_json_records() {
        let out = render("consumption", PlanTier::Pro, true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["unit"], "kW");
        let records = v["records"].as_array().unwrap();
        assert_eq!(records.len(), 24);
        assert_eq!(records[0]["time"], "00:00");
        assert_eq!(records[0]["consumption"], 180.0);
        assert_eq!(v["columns"], serde_json::json!(["consumption", "prediction"]));
    }

    #[test]
    fn placeholder_chart() {
        let out = render("sankey", PlanTier::Enterprise, false).unwrap();
        assert!(out.contains("Sankey Energy Flow"));
        assert!(out.contains(PLACEHOLDER_NOTE));
    }

    #[test]
    fn unknown_chart_is_an_error() {
        let err = render("pie", PlanTier::Pro, false).unwrap_err();
        assert!(err.to_string().contains("unknown chart `pie`"));
    }
}

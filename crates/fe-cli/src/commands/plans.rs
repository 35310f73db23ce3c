use fe_core::plan::{Feature, FeatureSet, PlanTier};

use super::table;

fn quota(v: Option<u32>) -> String {
    v.map_or_else(|| "unlimited".to_string(), |n| n.to_string())
}

pub fn render() -> String {
    let header = ["plan", "label", "sites", "devices", "retention", "features"].map(String::from);
    let rows: Vec<Vec<String>> = PlanTier::ALL
        .iter()
        .map(|tier| {
            let limits = tier.limits();
            let features = match &limits.features {
                FeatureSet::All => "all".to_string(),
                FeatureSet::Listed(list) => list.iter().map(Feature::as_str).collect::<Vec<_>>().join(", "),
            };
            vec![
                tier.as_str().to_string(),
                tier.display_label().to_string(),
                quota(limits.max_sites),
                quota(limits.max_devices),
                limits
                    .data_retention_days
                    .map_or_else(|| "unlimited".to_string(), |d| format!("{d} days")),
                features,
            ]
        })
        .collect();
    table(&header, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_three_tiers() {
        let out = render();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("free"));
        assert!(lines[2].contains("7 days"));
        assert!(lines[2].contains("dashboard, csv_import, basic_charts"));
        assert!(lines[4].contains("unlimited"));
        assert!(lines[4].ends_with("all"));
    }
}

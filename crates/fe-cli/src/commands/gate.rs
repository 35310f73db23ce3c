use fe_core::entitlement::decide;

/// Evaluate the gate for a free-form feature name and print the decision.
pub fn render(feature: &str, premium: bool, description: Option<&str>) -> anyhow::Result<String> {
    let decision = decide(premium, feature, description);
    Ok(serde_json::to_string_pretty(&decision)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_premium_without_description() {
        let v: serde_json::Value =
            serde_json::from_str(&render("Energy Prediction", false, None).unwrap()).unwrap();
        assert_eq!(v["mode"], "gated");
        assert!(v["prompt_text"].as_str().unwrap().contains("Energy Prediction"));
    }

    #[test]
    fn premium_with_description() {
        let v: serde_json::Value =
            serde_json::from_str(&render("Energy Prediction", true, Some("desc")).unwrap()).unwrap();
        assert_eq!(v["mode"], "open");
        assert_eq!(v["prompt_text"], "");
    }
}

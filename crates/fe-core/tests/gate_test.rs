use fe_core::catalog::{ChartKind, Page, ReportModule, NAV_SECTIONS};
use fe_core::entitlement::{decide, evaluate, FeatureFlagged, GateMode};
use fe_core::plan::{PlanSession, PlanTier};

#[test]
fn energy_prediction_gated_for_free() {
    let d = decide(false, "Energy Prediction", None);
    assert_eq!(d.mode, GateMode::Gated);
    assert!(d.prompt_text.contains("Energy Prediction"));
}

#[test]
fn energy_prediction_open_for_premium() {
    let d = decide(true, "Energy Prediction", Some("desc"));
    assert_eq!(d.mode, GateMode::Open);
    assert_eq!(d.prompt_text, "");
}

#[test]
fn toggling_plan_reopens_every_premium_item() {
    let mut session = PlanSession::default();
    session.toggle();
    assert_eq!(session.tier(), PlanTier::Free);

    let gated = ChartKind::ALL
        .iter()
        .filter(|k| !evaluate(session.tier(), *k).is_open())
        .count();
    assert_eq!(gated, 8);

    session.toggle();
    assert!(ChartKind::ALL.iter().all(|k| evaluate(session.tier(), k).is_open()));
}

#[test]
fn catalogue_items_share_one_gate_path() {
    let items: Vec<&dyn FeatureFlagged> = vec![&ChartKind::Sankey, &ReportModule::Carbon, &Page::Insights];
    for item in items {
        let d = evaluate(PlanTier::Free, item);
        assert_eq!(d.mode, GateMode::Gated);
        assert_eq!(d.title, item.feature_name());
    }
}

#[test]
fn free_pages_never_gate() {
    for section in NAV_SECTIONS {
        for page in section.pages {
            let d = evaluate(PlanTier::Free, page);
            assert_eq!(d.is_open(), !page.premium(), "{}", page.label());
        }
    }
}

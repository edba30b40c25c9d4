mod common;

use channel_dash::data::dataset::Dataset;
use channel_dash::panels::*;

fn collapsed_label_for(p: &impl Panel) -> String {
    p.icon_only()
        .map(|s| s.to_string())
        .unwrap_or_else(|| p.title().to_string())
}

#[test]
fn collapsed_label_uses_icon_when_available() {
    let p = ChartPanel::default();
    let label = collapsed_label_for(&p);
    assert_eq!(label, p.icon_only().unwrap().to_string());
    assert!(!label.contains(p.title()));
}

#[test]
fn full_label_contains_both_icon_and_title() {
    let p = SelectorPanel::new(&Dataset::default());
    let label = p.title_and_icon();
    assert!(label.contains(p.title()));
    assert!(label.contains(p.icon_only().unwrap()));
}

#[test]
fn selector_lists_sorted_choices() {
    let p = SelectorPanel::new(&common::sample_dataset());
    let months: Vec<&str> = p.months().iter().map(|m| m.as_str()).collect();
    assert_eq!(months, ["2024-01", "2024-02", "2024-03"]);
    assert_eq!(p.agents(), ["Ana", "Bea", "Carla", "Dani", "Eva", "Fabi"]);
    assert!(p.state().visible);
}

#[test]
fn selector_for_empty_dataset_has_no_choices() {
    let p = SelectorPanel::new(&Dataset::default());
    assert!(p.months().is_empty());
    assert!(p.agents().is_empty());
}

//! Tests for risk level classification

use riskchart::classify::{classify, group_by_level, PointClass, RiskLevel, UNKNOWN_COLOR};
use riskchart::ChartError;
use strum::IntoEnumIterator;

#[test]
fn test_known_tags() {
    assert_eq!(classify("low").unwrap(), RiskLevel::Low);
    assert_eq!(classify("medium").unwrap(), RiskLevel::Medium);
    assert_eq!(classify("high").unwrap(), RiskLevel::High);
    assert_eq!(classify(" High ").unwrap(), RiskLevel::High);
}

#[test]
fn test_unknown_tag_is_typed_error() {
    match classify("critical") {
        Err(ChartError::UnknownRiskLevel { tag }) => assert_eq!(tag, "critical"),
        other => panic!("expected UnknownRiskLevel, got {:?}", other),
    }
}

#[test]
fn test_unknown_tag_is_flagged_not_green() {
    let class = PointClass::from_tag("critical");
    assert!(class.is_unknown());
    assert_eq!(class.color(), UNKNOWN_COLOR);
    assert_ne!(class.color(), RiskLevel::Low.color());
    assert_eq!(class.label(), "unknown");
}

#[test]
fn test_color_mapping() {
    let colors: Vec<(RiskLevel, &str)> = RiskLevel::iter().map(|l| (l, l.color())).collect();
    assert_eq!(
        colors,
        vec![
            (RiskLevel::Low, "#059669"),
            (RiskLevel::Medium, "#d97706"),
            (RiskLevel::High, "#dc2626"),
        ]
    );
}

#[test]
fn test_badge_classes() {
    assert_eq!(RiskLevel::High.badge_class(), "bg-red-600");
    assert_eq!(RiskLevel::Medium.badge_class(), "bg-yellow-600");
    assert_eq!(RiskLevel::Low.badge_class(), "bg-green-600");
}

#[test]
fn test_sorting_by_severity() {
    let mut classes = vec![
        PointClass::from_tag("low"),
        PointClass::from_tag("bogus"),
        PointClass::from_tag("high"),
        PointClass::from_tag("medium"),
    ];
    classes.sort_by_key(|c| c.severity_rank());
    let labels: Vec<&str> = classes.iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["high", "medium", "low", "unknown"]);
}

#[test]
fn test_grouping() {
    let tags = ["low", "high", "low", "medium", "high", "high"];
    let classes: Vec<PointClass> = tags.iter().map(|t| PointClass::from_tag(t)).collect();
    let groups = group_by_level(&classes, |c| c);
    let summary: Vec<(&str, usize)> = groups
        .iter()
        .map(|(class, items)| (class.label(), items.len()))
        .collect();
    assert_eq!(summary, vec![("high", 3), ("medium", 1), ("low", 2)]);
}

#[test]
fn test_distinct_unknown_tags_group_separately() {
    let tags = ["severe", "high", "critical", "severe", "critical", "critical"];
    let classes: Vec<PointClass> = tags.iter().map(|t| PointClass::from_tag(t)).collect();
    let groups = group_by_level(&classes, |c| c);

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].0, PointClass::Level(RiskLevel::High));
    assert_eq!(groups[1].0, PointClass::Unknown("critical".to_string()));
    assert_eq!(groups[1].1.len(), 3);
    assert_eq!(groups[2].0, PointClass::Unknown("severe".to_string()));
    assert_eq!(groups[2].1.len(), 2);
}

#[test]
fn test_serializes_as_label() {
    let json = serde_json::to_string(&PointClass::from_tag("medium")).unwrap();
    assert_eq!(json, "\"medium\"");
    let json = serde_json::to_string(&PointClass::from_tag("extreme")).unwrap();
    assert_eq!(json, "\"unknown\"");
}

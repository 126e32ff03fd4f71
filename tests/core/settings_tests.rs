//! Tests for settings loading and saving

use riskchart::layout::{ChartLayout, OutOfRange};
use riskchart::settings::ChartSettings;

#[test]
fn test_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = ChartSettings {
        out_of_range: OutOfRange::Overflow,
        high_risk_threshold: 70.0,
        recent_limit: 3,
        ..ChartSettings::default()
    };
    settings.save_to(&path).unwrap();

    let loaded = ChartSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ChartSettings::load_from(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_malformed_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(ChartSettings::load_from(&path).is_err());
}

#[test]
fn test_empty_object_gives_defaults() {
    let settings: ChartSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, ChartSettings::default());
    assert_eq!(settings.forecast_layout(), ChartLayout::forecast());
    assert_eq!(settings.history_layout(), ChartLayout::history());
}

#[test]
fn test_margin_override() {
    let settings: ChartSettings = serde_json::from_str(
        r#"{"forecast_layout":{"margins":{"top":5,"right":20,"bottom":5,"left":40}}}"#,
    )
    .unwrap();
    let layout = settings.forecast_layout();
    assert_eq!(layout.inner_height(), 190.0);
    assert_eq!(layout.inner_width(), 440.0);
}

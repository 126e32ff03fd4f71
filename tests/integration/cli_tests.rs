//! Tests for the `riskchart` binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use riskchart::settings::ChartSettings;

use crate::common::fixtures::{FORECAST_90D, HISTORY};

fn fixture_path(file_path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(file_path)
}

fn riskchart(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_riskchart"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run riskchart")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Temp dir holding a default settings file
fn workspace() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.json");
    ChartSettings::default().save_to(&config).unwrap();
    (dir, config)
}

#[test]
fn test_init_config_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("riskchart").join("settings.json");

    let output = riskchart(&config, &["init-config"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(ChartSettings::load_from(&config).unwrap(), ChartSettings::default());

    let output = riskchart(&config, &["init-config"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));

    let output = riskchart(&config, &["init-config", "--force"]);
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn test_summary_of_fixture() {
    let (_dir, config) = workspace();
    let input = fixture_path(FORECAST_90D);

    let output = riskchart(&config, &["summary", "-i", input.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Average Risk"));
    assert!(text.contains("51%"));
    assert!(text.contains("75%"));
    assert!(text.contains("15%"));
    assert!(text.lines().any(|l| l.starts_with("High Risk Days") && l.ends_with("38")));
}

#[test]
fn test_summary_of_empty_forecast_succeeds() {
    let (dir, config) = workspace();
    let input = dir.path().join("empty.json");
    std::fs::write(&input, "[]").unwrap();
    let input = input.to_str().unwrap();

    let output = riskchart(&config, &["summary", "-i", input]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("No forecast data available"));
    assert!(text.contains("0%"));
    assert!(text.contains("–"));

    let output = riskchart(&config, &["summary", "-i", input, "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["count"], 0);
    assert_eq!(summary["average"], 0.0);
    assert!(summary["max"].is_null());
    assert!(summary["min"].is_null());
    assert_eq!(summary["highRiskCount"], 0);
}

#[test]
fn test_render_infers_format_from_extension() {
    let (dir, config) = workspace();
    let input = fixture_path(HISTORY);
    let output_path = dir.path().join("history.png");

    let output = riskchart(
        &config,
        &[
            "history",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_history_warns_on_unknown_risk() {
    let (dir, config) = workspace();
    let input = dir.path().join("history.json");
    std::fs::write(
        &input,
        r#"[{"id":"x","timestamp":"2024-05-02T09:00:00Z","premiseIndex":97,"riskLevel":"critical"}]"#,
    )
    .unwrap();
    let output_path = dir.path().join("history.svg");

    let output = riskchart(
        &config,
        &[
            "history",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("unknown risk level"));
    assert!(std::fs::read_to_string(&output_path)
        .unwrap()
        .contains("data-risk=\"unknown\""));
}

#[test]
fn test_oversized_png_scale_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.json");
    let settings = ChartSettings {
        png_scale: 1_000_000,
        ..ChartSettings::default()
    };
    settings.save_to(&config).unwrap();

    let input = fixture_path(FORECAST_90D);
    let output_path = dir.path().join("forecast.png");
    let output = riskchart(
        &config,
        &[
            "forecast",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("PNG scale"));
    assert!(!output_path.exists());
}

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use recalendar_core::ConfigurationDocument;
use tempfile::TempDir;

/// Temp dir doubling as an empty XDG config home so a real user
/// configuration never leaks into the tests.
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

fn recal_cmd(env: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("recal").expect("Failed to find recal binary");
    cmd.env("XDG_CONFIG_HOME", env.path().join("config"));
    cmd.arg("--no-color");
    cmd
}

const SCENARIO: &str = r#"{
    "year": 2024,
    "start_month": 9,
    "month_count": 3,
    "month_overview_enabled": true,
    "language": "en",
    "month_itinerary": [{ "type": "item", "value": "Buy books" }],
    "day_itineraries": [[], [], [{ "type": "lines", "value": 4 }], [], [], [], []]
}"#;

#[test]
fn test_cli_weekdays_default_locale() {
    let env = create_cli_test_environment();
    recal_cmd(&env)
        .arg("weekdays")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Weekdays (en)"))
        .stdout(predicate::str::contains("| 1 | 0 | Monday | Mon |"));
}

#[test]
fn test_cli_weekdays_sunday_first() {
    let env = create_cli_test_environment();
    recal_cmd(&env)
        .args(["weekdays", "--language", "en-US"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 1 | 6 | Sunday | Sun |"))
        .stdout(predicate::str::contains("| 7 | 5 | Saturday | Sat |"));
}

#[test]
fn test_cli_months_wraps_year() {
    let env = create_cli_test_environment();
    recal_cmd(&env)
        .args(["months", "--year", "2024", "--start-month", "10", "--month-count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **November 2024** (30 days)"))
        .stdout(predicate::str::contains("3. **January 2025** (31 days)"));
}

#[test]
fn test_cli_rejects_month_count_out_of_range() {
    let env = create_cli_test_environment();
    recal_cmd(&env)
        .args(["months", "--month-count", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month_count"));

    recal_cmd(&env)
        .args(["months", "--month-count", "0"])
        .assert()
        .failure();
}

#[test]
fn test_cli_rejects_unknown_language_and_format() {
    let env = create_cli_test_environment();
    recal_cmd(&env)
        .args(["weekdays", "--language", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fr"));

    recal_cmd(&env)
        .args(["weekdays", "--format", "b5"])
        .assert()
        .failure();
}

#[test]
fn test_cli_generate_saves_pdf() {
    let env = create_cli_test_environment();
    let config = env.path().join("calendar.json");
    fs::write(&config, SCENARIO).unwrap();
    let out = env.path().join("out");

    recal_cmd(&env)
        .args(["generate", "--config", config.to_str().unwrap()])
        .args(["--output-dir", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved full document"))
        .stdout(predicate::str::contains("recalendar.pdf"));

    let bytes = fs::read(out.join("recalendar.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_cli_preview_is_smaller_than_full_document() {
    let env = create_cli_test_environment();
    let config = env.path().join("calendar.json");
    fs::write(&config, SCENARIO).unwrap();
    let preview = env.path().join("preview.pdf");

    recal_cmd(&env)
        .args(["preview", "--config", config.to_str().unwrap()])
        .args(["--output", preview.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview ready"));

    recal_cmd(&env)
        .args(["generate", "--config", config.to_str().unwrap()])
        .args(["--output-dir", env.path().to_str().unwrap()])
        .assert()
        .success();

    let preview_len = fs::read(&preview).unwrap().len();
    let full_len = fs::read(env.path().join("recalendar.pdf")).unwrap().len();
    assert!(preview_len < full_len);
}

#[test]
fn test_cli_reads_xdg_config() {
    let env = create_cli_test_environment();
    let config_dir = env.path().join("config").join("recalendar");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("calendar.json"), SCENARIO).unwrap();

    recal_cmd(&env)
        .arg("months")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **October 2024**"))
        .stdout(predicate::str::contains("3. **December 2024**"));
}

#[test]
fn test_cli_invalid_config_document() {
    let env = create_cli_test_environment();
    let config = env.path().join("calendar.json");
    fs::write(&config, r#"{ "year": 2024, "month_count": 13 }"#).unwrap();

    recal_cmd(&env)
        .args(["months", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_cli_template_round_trips() {
    let env = create_cli_test_environment();
    let output = recal_cmd(&env)
        .args(["template", "--year", "2030"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let document: ConfigurationDocument = serde_json::from_slice(&output).unwrap();
    assert_eq!(document.year, 2030);
    assert_eq!(document.day_itineraries.len(), 7);
}

#[test]
fn test_cli_schema_lists_fields() {
    let env = create_cli_test_environment();
    recal_cmd(&env)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("month_count"))
        .stdout(predicate::str::contains("day_itineraries"));
}

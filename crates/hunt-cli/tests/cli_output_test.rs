//! Integration tests for the `hunt` binary's offline commands

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn hunt(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hunt"))
        .args(args)
        .arg("--data-dir")
        .arg(data_dir)
        .env_remove("HUNT_DATA_DIR")
        .env_remove("HUNT_COUNTRY_CODES")
        .env_remove("HUNT_SEARCH_LIMIT")
        .env_remove("HUNT_UNSPLASH_ACCESS_KEY")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute hunt")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn config_entry<'a>(status: &'a serde_json::Value, key: &str) -> &'a serde_json::Value {
    status["data"]["config"]
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["key"] == key)
        .unwrap()
}

#[test]
fn test_photos_json_on_empty_store() {
    let dir = TempDir::new().unwrap();
    let output = hunt(dir.path(), &["photos", "--json"]);

    assert!(output.status.success());
    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"], serde_json::json!([]));
    assert!(dir.path().join("documents").join("maps").is_dir());
}

#[test]
fn test_photos_human_on_empty_store() {
    let dir = TempDir::new().unwrap();
    let output = hunt(dir.path(), &["photos"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(no data)"));
}

#[test]
fn test_status_reports_config_sources() {
    let dir = TempDir::new().unwrap();
    let toml = "country_codes = \"us\"\nsearch_limit = 5\n";
    std::fs::write(dir.path().join("hunt.toml"), toml).unwrap();

    let output = hunt(dir.path(), &["status", "--json"]);
    assert!(output.status.success());
    let status = json_stdout(&output);

    let codes = config_entry(&status, "country_codes");
    assert_eq!(codes["value"], "us");
    assert_eq!(codes["source"], "file");
    assert_eq!(config_entry(&status, "search_limit")["value"], "5");
    assert_eq!(config_entry(&status, "data_dir")["source"], "cli");
    let access_key = config_entry(&status, "unsplash_access_key");
    assert_eq!(access_key["value"], "not set");
    assert_eq!(status["data"]["photos"], 0);
    assert_eq!(status["data"]["progress"], "Start your hunt!");
}

#[test]
fn test_status_progress_counts_stored_photos() {
    let dir = TempDir::new().unwrap();
    let documents = dir.path().join("documents");
    let preferences = dir.path().join("preferences");
    std::fs::create_dir_all(&documents).unwrap();
    std::fs::create_dir_all(&preferences).unwrap();

    std::fs::write(documents.join("kept.jpg"), b"jpeg bytes").unwrap();
    let info = r#"{"6c3b3a5e-2f5c-5d3a-9a8e-0d4f7c1b2a90": {
        "filename": "kept.jpg",
        "date_added": "2026-10-01T12:00:00Z",
        "source": "camera"
    }}"#;
    std::fs::write(preferences.join("photo_info.json"), info).unwrap();

    let output = hunt(dir.path(), &["status", "--json"]);
    assert!(output.status.success());
    let status = json_stdout(&output);

    assert_eq!(status["data"]["photos"], 1);
    assert_eq!(status["data"]["progress"], "You found 1 items");
}

#[test]
fn test_flag_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("hunt.toml"), "country_codes = \"us\"\n").unwrap();

    let output = hunt(dir.path(), &["status", "--json", "--country-codes", "fr"]);
    let status = json_stdout(&output);

    let codes = config_entry(&status, "country_codes");
    assert_eq!(codes["value"], "fr");
    assert_eq!(codes["source"], "cli");
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("hunt.toml"), "search_limit = \"lots\"").unwrap();

    let output = hunt(dir.path(), &["status"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}

#[test]
fn test_attach_missing_file_fails_before_search() {
    let dir = TempDir::new().unwrap();
    let args = ["attach", "bakery", "--file", "/nonexistent/photo.jpg"];
    let output = hunt(dir.path(), &args);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot read photo file"));
}

//! Integration tests for the `dars` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_dars.txt")
}

/// Run the binary with its config directory pointed into `home`
fn dars(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dars"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("APPDATA", home)
        .output()
        .expect("Failed to run dars")
}

#[test]
fn test_parse_writes_json() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("audit.json");
    let fixture = fixture_path();

    let output = dars(
        home.path(),
        &[
            "parse",
            fixture.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--compact",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["student_info"]["name"], "Bucky Badger");
    assert_eq!(json["summary"]["requirements_status"]["total_requirements"], 9);
    assert_eq!(json["certificate_eligible"], false);
}

#[test]
fn test_parse_without_summary() {
    let home = TempDir::new().unwrap();
    let fixture = fixture_path();

    let output = dars(home.path(), &["parse", fixture.to_str().unwrap(), "--no-summary"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.get("summary").is_none());
    assert!(json.get("requirements").is_some());
}

#[test]
fn test_validate_rejects_non_report() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("notes.txt");
    fs::write(&input, "Grocery list\nOK Milk\n").unwrap();

    let output = dars(home.path(), &["validate", input.to_str().unwrap()]);
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["is_valid"], false);
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_validate_accepts_fixture() {
    let home = TempDir::new().unwrap();
    let fixture = fixture_path();

    let output = dars(home.path(), &["validate", fixture.to_str().unwrap()]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["is_valid"], true);
}

#[test]
fn test_report_markdown() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("audit.md");
    let fixture = fixture_path();

    let output = dars(
        home.path(),
        &[
            "report",
            fixture.to_str().unwrap(),
            "-f",
            "markdown",
            "-o",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{output:?}");

    let markdown = fs::read_to_string(&out).unwrap();
    assert!(markdown.contains("Bucky Badger"));
    assert!(markdown.contains("Ethnic Studies"));
}

#[test]
fn test_prereq_graph() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("prereq.json");
    fs::write(
        &input,
        r#"{"operator": "OR", "children": ["MATH 222", {"subjects": ["MATH", "STAT"], "course_number": 240}]}"#,
    )
    .unwrap();

    let output = dars(
        home.path(),
        &["prereq", input.to_str().unwrap(), "--course", "STAT 340"],
    );
    assert!(output.status.success(), "{output:?}");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["nodes"][0]["id"], "STAT 340");
    assert_eq!(json["nodes"][1]["id"], "OR_1");
    assert_eq!(json["nodes"][3]["id"], "MATH/STAT 240");
    assert_eq!(json["links"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_missing_input_fails() {
    let home = TempDir::new().unwrap();
    let output = dars(home.path(), &["summary", "/no/such/report.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

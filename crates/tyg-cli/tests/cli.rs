//! Binary smoke tests for the generate and check commands.

use assert_cmd::Command;
use predicates::prelude::*;

fn write_schema(dir: &std::path::Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

const ALERT_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "id": { "type": "integer" },
        "name": { "type": "string" }
    },
    "required": ["id", "name"]
}"#;

#[test]
fn generate_writes_type_modules() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas");
    std::fs::create_dir(&schemas).unwrap();
    write_schema(&schemas, "alert_schema.json", ALERT_SCHEMA);

    Command::cargo_bin("tyg")
        .unwrap()
        .current_dir(dir.path())
        .args(["generate", "--schema-dir", "schemas", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 1 type module"));

    let generated = std::fs::read_to_string(schemas.join("alert.types.ts")).unwrap();
    assert!(generated.contains("export interface Alert {"));
    assert!(generated.contains("id: number;"));
}

#[test]
fn generate_fails_on_missing_directory() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("tyg")
        .unwrap()
        .current_dir(dir.path())
        .args(["generate", "--schema-dir", "missing", "--no-color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not readable"));
}

#[test]
fn generate_continues_past_a_broken_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas");
    std::fs::create_dir(&schemas).unwrap();
    write_schema(&schemas, "bad_schema.json", "{ broken");
    write_schema(&schemas, "good_schema.json", ALERT_SCHEMA);

    Command::cargo_bin("tyg")
        .unwrap()
        .current_dir(dir.path())
        .args(["generate", "--schema-dir", "schemas", "--no-color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad_schema.json"));

    // The sibling schema still generated despite the failure.
    assert!(schemas.join("good.types.ts").exists());
    assert!(!schemas.join("bad.types.ts").exists());
}

#[test]
fn check_reports_diagnostics_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas");
    std::fs::create_dir(&schemas).unwrap();
    write_schema(&schemas, "bad_schema.json", "{ broken");

    Command::cargo_bin("tyg")
        .unwrap()
        .current_dir(dir.path())
        .args(["check", "--schema-dir", "schemas", "--no-color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to compile"));

    assert!(!schemas.join("bad.types.ts").exists());
}

#[test]
fn check_passes_on_valid_schemas() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas");
    std::fs::create_dir(&schemas).unwrap();
    write_schema(&schemas, "alert_schema.json", ALERT_SCHEMA);

    Command::cargo_bin("tyg")
        .unwrap()
        .current_dir(dir.path())
        .args(["check", "--schema-dir", "schemas", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Checked 1 schema file"));

    // Check never writes generated modules.
    assert!(!schemas.join("alert.types.ts").exists());
}

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use screening_spec::{FieldKind, candidate_profile};

fn cli() -> Command {
    Command::cargo_bin("screening-cli").expect("binary builds")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn sections_lists_all_nine() {
    let output = cli().arg("sections").output().expect("run");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Product Manager Candidate Screening"));
    assert!(stdout.contains("Section 1: Excellence & Accountability"));
    assert!(stdout.contains("Section 9: Final Declaration"));
    assert!(stdout.contains("full_name"));
    assert!(stdout.contains("[max 150 words]"));
}

#[test]
fn schema_declares_required_fields() {
    let output = cli().arg("schema").output().expect("run");
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_str(&stdout_of(&output)).expect("json");
    assert!(schema["properties"]["full_name"].is_object());
    assert!(
        schema["required"]
            .as_array()
            .expect("required array")
            .iter()
            .any(|value| value == "email")
    );
}

#[test]
fn registry_schema_flag_switches_document() {
    let output = cli().args(["schema", "--registry"]).output().expect("run");
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_str(&stdout_of(&output)).expect("json");
    assert!(schema.is_object());
}

#[test]
fn example_answers_validate_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    let answers = dir.path().join("answers.json");

    let output = cli().arg("example").output().expect("run example");
    assert!(output.status.success());
    fs::write(&answers, output.stdout).expect("write answers");

    let output = cli()
        .arg("validate")
        .arg("--answers")
        .arg(&answers)
        .output()
        .expect("run validate");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Validation result: valid"));
}

#[test]
fn validate_reports_missing_required_fields() {
    let dir = TempDir::new().expect("tempdir");
    let answers = dir.path().join("answers.json");
    fs::write(&answers, r#"{ "full_name": "" }"#).expect("write answers");

    let output = cli()
        .args(["validate", "--section", "1", "--answers"])
        .arg(&answers)
        .output()
        .expect("run validate");
    assert!(!output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Validation result: invalid"));
    assert!(stdout.contains("This field is required"));
}

#[test]
fn validate_rejects_unknown_fields() {
    let dir = TempDir::new().expect("tempdir");
    let answers = dir.path().join("answers.json");
    fs::write(&answers, r#"{ "favourite_colour": "teal" }"#).expect("write answers");

    let output = cli()
        .arg("validate")
        .arg("--answers")
        .arg(&answers)
        .output()
        .expect("run validate");
    assert!(!output.status.success());
}

#[test]
fn validate_rejects_out_of_range_sections() {
    let dir = TempDir::new().expect("tempdir");
    let answers = dir.path().join("answers.json");
    fs::write(&answers, "{}").expect("write answers");

    let output = cli()
        .args(["validate", "--section", "12", "--answers"])
        .arg(&answers)
        .output()
        .expect("run validate");
    assert!(!output.status.success());
}

#[test]
fn wizard_exit_keeps_the_draft() {
    let dir = TempDir::new().expect("tempdir");
    let output = cli()
        .arg("wizard")
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("Ada Lovelace\nexit\n")
        .output()
        .expect("run wizard");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Draft saved"));
    assert!(dir.path().join("draft.cbor").exists());
}

/// Script a full pass through all nine sections and check that exactly one
/// submission lands in the gateway directory and the draft is cleared.
#[test]
fn wizard_full_run_submits_once() {
    let registry = candidate_profile();
    let mut script = String::new();
    for section in &registry.sections {
        for field in &section.fields {
            let answer = if field.name.starts_with("prioritization_")
                && field.kind == FieldKind::Integer
            {
                "20".to_string()
            } else if field.name == "email" {
                "ada@example.com".to_string()
            } else {
                match field.kind {
                    FieldKind::Text => "Sample answer".to_string(),
                    FieldKind::LongText => "A short but complete response.".to_string(),
                    FieldKind::Integer => "2".to_string(),
                    FieldKind::Rating => "7".to_string(),
                    FieldKind::Boolean | FieldKind::Declaration => "yes".to_string(),
                    FieldKind::Choice => "1".to_string(),
                }
            };
            script.push_str(&answer);
            script.push('\n');
        }
    }

    let dir = TempDir::new().expect("tempdir");
    let output = cli()
        .arg("wizard")
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin(script)
        .output()
        .expect("run wizard");
    assert!(output.status.success(), "wizard failed: {}", stdout_of(&output));
    assert!(stdout_of(&output).contains("Reference ID:"));

    let submissions: Vec<_> = fs::read_dir(dir.path().join("submissions"))
        .expect("submissions dir")
        .collect();
    assert_eq!(submissions.len(), 1);
    assert!(dir.path().join("notifications.log").exists());
    assert!(!dir.path().join("draft.cbor").exists());
}

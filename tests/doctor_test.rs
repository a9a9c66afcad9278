//! Integration tests for `pioforge doctor`

mod common;

use common::{combined_output, TestProject};

#[test]
fn test_doctor_reports_external_tool_status() {
    let project = TestProject::new();
    let output = project.run(&["doctor"]);

    // Pass or fail depends on whether PlatformIO is installed; either way
    // the tool must be mentioned.
    assert!(combined_output(&output).contains("platformio"));
}

#[test]
fn test_doctor_reports_missing_manifest() {
    let project = TestProject::new();
    let output = project.run(&["doctor"]);
    assert!(combined_output(&output).contains("pioforge init"));
}

#[test]
fn test_doctor_reports_manifest_issues() {
    let project = TestProject::new();
    project.create_file("pioforge.toml", "this is not [ valid toml");

    let output = project.run(&["doctor"]);
    assert!(combined_output(&output).contains("manifest"));
}

#[test]
fn test_doctor_json_output_is_valid() {
    let project = TestProject::with_manifest(&[]);
    let output = project.run(&["--json", "doctor"]);

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("doctor --json should emit valid JSON");
    assert!(parsed["checks"].is_array());
}

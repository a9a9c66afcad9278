//! Integration tests for `pioforge init`

mod common;

use common::{combined_output, TestProject};

#[test]
fn test_init_creates_project_layout() {
    let project = TestProject::new();
    let output = project.run(&["init"]);

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(project.file_exists("pioforge.toml"));
    assert!(project.file_exists("main.cpp"));
    assert!(project.path().join("libraries").is_dir());
    assert!(project.file_exists(".gitignore"));
}

#[test]
fn test_init_manifest_is_valid_toml() {
    let project = TestProject::new();
    let output = project.run(&[
        "init",
        "--board",
        "esp32dev",
        "--platform",
        "espressif32",
        "--framework",
        "arduino",
    ]);

    assert!(output.status.success(), "{}", combined_output(&output));
    let content = project.read_file("pioforge.toml");
    let value: toml::Value = toml::from_str(&content).expect("manifest should be valid TOML");
    assert_eq!(
        value["platformio"]["board"].as_str(),
        Some("esp32dev")
    );
}

#[test]
fn test_init_fails_in_non_empty_directory() {
    let project = TestProject::new();
    project.create_file("existing.txt", "content");

    let output = project.run(&["init"]);
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("--force"));
}

#[test]
fn test_init_force_succeeds_in_non_empty_directory() {
    let project = TestProject::new();
    project.create_file("existing.txt", "content");

    let output = project.run(&["init", "--force"]);
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(project.file_exists("pioforge.toml"));
}

#[test]
fn test_init_twice_fails() {
    let project = TestProject::new();
    assert!(project.run(&["init"]).status.success());

    let second = project.run(&["init", "--force"]);
    assert!(!second.status.success());
}

#[test]
fn test_gitignore_entries() {
    let project = TestProject::new();
    project.run(&["init"]);

    let gitignore = project.read_file(".gitignore");
    assert!(gitignore.contains("build/"));
    assert!(gitignore.contains("output/"));
}

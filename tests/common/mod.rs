//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new empty test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a test project with a manifest, main.cpp and the given
    /// direct library dependencies
    pub fn with_manifest(libraries: &[&str]) -> Self {
        let project = Self::new();
        let deps = libraries
            .iter()
            .map(|l| format!("\"{l}\""))
            .collect::<Vec<_>>()
            .join(", ");
        project.create_file(
            "pioforge.toml",
            &format!(
                r#"
[project]
name = "testproject"
libraries = [{deps}]

[platformio]
board = "uno"
platform = "atmelavr"
framework = "arduino"

[platformio.options]
build_flags = "-DX=1"
"#
            ),
        );
        project.create_file("main.cpp", "int main() { return 0; }\n");
        project
    }

    /// Declare a library with a header, a source and dependencies
    pub fn add_library(&self, name: &str, deps: &[&str]) {
        let deps_toml = deps
            .iter()
            .map(|d| format!("\"{d}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.create_file(
            &format!("libraries/{name}/library.toml"),
            &format!(
                "[library]\nname = \"{name}\"\nheader = \"{name}.h\"\nsource = \"{name}.cpp\"\ndeps = [{deps_toml}]\n"
            ),
        );
        self.create_file(&format!("libraries/{name}/{name}.h"), &format!("// {name} header\n"));
        self.create_file(
            &format!("libraries/{name}/{name}.cpp"),
            &format!("// {name} source\n"),
        );
    }

    /// Run the pioforge binary with the given arguments in the project dir
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pioforge"));
        cmd.current_dir(self.path());
        cmd.args(args);
        cmd.output().expect("Failed to execute pioforge")
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined stdout and stderr of a command
#[allow(dead_code)]
pub fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

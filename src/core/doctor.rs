//! Doctor command logic
//!
//! Checks that the external toolchain is reachable and that the project
//! configuration is healthy, with suggestions for anything that fails.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::defaults::{EXTERNAL_TOOL, LIBRARY_DIR, MANIFEST_NAME};
use crate::core::library;
use crate::core::manifest::Manifest;

/// Result of a single dependency check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional dependency
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Configuration issues found
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Check if all required checks passed and no config issues were found
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed) && self.config_issues.is_empty()
    }

    /// Failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

static VERSION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn version_pattern() -> &'static Regex {
    VERSION_PATTERN
        .get_or_init(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("invalid version pattern"))
}

/// Extract a semantic version from tool output
pub fn extract_version(output: &str) -> Option<String> {
    version_pattern()
        .captures(output)
        .map(|c| c[1].to_string())
}

/// Run all doctor checks
pub fn run_doctor(project_dir: Option<&Path>) -> DoctorReport {
    let mut report = DoctorReport::default();

    report.checks.push(check_external_tool());

    if let Some(dir) = project_dir {
        check_project_config(dir, &mut report);
    }

    report
}

fn check_external_tool() -> CheckResult {
    match which::which(EXTERNAL_TOOL) {
        Ok(path) => {
            let version = std::process::Command::new(&path)
                .arg("--version")
                .output()
                .ok()
                .and_then(|out| extract_version(&String::from_utf8_lossy(&out.stdout)));
            CheckResult::pass(EXTERNAL_TOOL, version, true)
        }
        Err(_) => CheckResult::fail(
            EXTERNAL_TOOL,
            "not found on PATH",
            Some("install PlatformIO Core: https://platformio.org/install/cli"),
            true,
        ),
    }
}

fn check_project_config(project_dir: &Path, report: &mut DoctorReport) {
    let manifest_path = project_dir.join(MANIFEST_NAME);
    if !manifest_path.exists() {
        report.config_issues.push(format!(
            "no {MANIFEST_NAME} found (run 'pioforge init' to create a project)"
        ));
        return;
    }

    let manifest = match std::fs::read_to_string(&manifest_path)
        .map_err(|e| e.to_string())
        .and_then(|content| Manifest::from_toml(&content).map_err(|e| e.to_string()))
    {
        Ok(manifest) => manifest,
        Err(e) => {
            report.config_issues.push(format!("manifest: {e}"));
            return;
        }
    };

    for issue in manifest.validate() {
        report.config_issues.push(format!("manifest: {issue}"));
    }

    if let Err(e) = library::load_all(&project_dir.join(LIBRARY_DIR)) {
        report.config_issues.push(format!("libraries: {e}"));
    }
}

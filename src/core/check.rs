//! Configuration validation logic
//!
//! Validates the manifest, every library declaration and the dependency
//! graph without building anything. All problems are collected so one run
//! reports everything a fix-up pass needs.

use std::path::Path;

use crate::config::defaults::LIBRARY_DIR;
use crate::core::library;
use crate::core::manifest::Manifest;
use crate::core::resolver::DependencyGraph;

/// Outcome of a check run
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Problems that make the project unbuildable
    pub errors: Vec<String>,
    /// Suspicious but non-fatal findings
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the project is buildable
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a project directory
pub fn check_project(project_dir: &Path, manifest: &Manifest) -> CheckReport {
    let mut report = CheckReport::default();

    for issue in manifest.validate() {
        report.errors.push(issue);
    }

    let main_source = project_dir.join(&manifest.project.main);
    if !main_source.is_file() {
        report.errors.push(format!(
            "main source '{}' does not exist",
            manifest.project.main
        ));
    }

    let units = match library::load_all(&project_dir.join(LIBRARY_DIR)) {
        Ok(units) => units,
        Err(e) => {
            report.errors.push(e.to_string());
            return report;
        }
    };

    let graph = DependencyGraph::from_units(&units);
    if let Err(e) = graph.verify() {
        report.errors.push(e.to_string());
    }
    if let Err(e) = graph.check_acyclic() {
        report.errors.push(e.to_string());
    }

    for name in &manifest.project.libraries {
        if !units.contains_key(name) {
            report.errors.push(format!(
                "project depends on library '{name}' but libraries/{name}/ is not declared"
            ));
        }
    }

    for name in units.keys() {
        if !manifest.project.libraries.contains(name)
            && !units.values().any(|u| u.deps.contains(name))
        {
            report
                .warnings
                .push(format!("library '{name}' is declared but never used"));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[project]
name = "blink"
libraries = ["led"]

[platformio]
board = "uno"
platform = "atmelavr"
framework = "arduino"
"#;

    fn declare(root: &Path, name: &str, deps: &[&str]) {
        let dir = root.join("libraries").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let deps_toml = deps
            .iter()
            .map(|d| format!("\"{d}\""))
            .collect::<Vec<_>>()
            .join(", ");
        std::fs::write(
            dir.join("library.toml"),
            format!("[library]\nname = \"{name}\"\nheader = \"{name}.h\"\ndeps = [{deps_toml}]\n"),
        )
        .unwrap();
        std::fs::write(dir.join(format!("{name}.h")), "// h").unwrap();
    }

    #[test]
    fn test_valid_project_passes() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("main.cpp"), "int main() {}").unwrap();
        declare(project.path(), "led", &[]);

        let manifest = Manifest::from_toml(MANIFEST).unwrap();
        let report = check_project(project.path(), &manifest);

        assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_main_source_is_an_error() {
        let project = TempDir::new().unwrap();
        declare(project.path(), "led", &[]);

        let manifest = Manifest::from_toml(MANIFEST).unwrap();
        let report = check_project(project.path(), &manifest);

        assert!(!report.is_ok());
        assert!(report.errors.iter().any(|e| e.contains("main.cpp")));
    }

    #[test]
    fn test_undeclared_project_library_is_an_error() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("main.cpp"), "int main() {}").unwrap();

        let manifest = Manifest::from_toml(MANIFEST).unwrap();
        let report = check_project(project.path(), &manifest);

        assert!(report.errors.iter().any(|e| e.contains("'led'")));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("main.cpp"), "int main() {}").unwrap();
        declare(project.path(), "led", &["pwm"]);
        declare(project.path(), "pwm", &["led"]);

        let manifest = Manifest::from_toml(MANIFEST).unwrap();
        let report = check_project(project.path(), &manifest);

        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("Cyclic dependency")));
    }

    #[test]
    fn test_unused_library_is_a_warning() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("main.cpp"), "int main() {}").unwrap();
        declare(project.path(), "led", &[]);
        declare(project.path(), "unused", &[]);

        let manifest = Manifest::from_toml(MANIFEST).unwrap();
        let report = check_project(project.path(), &manifest);

        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("unused")));
    }
}

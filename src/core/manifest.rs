//! Manifest (pioforge.toml) parsing and validation
//!
//! The manifest is the main configuration file for a pioforge project. It
//! names the project, its main source file and direct library dependencies,
//! and carries the PlatformIO settings rendered into `platformio.ini`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::defaults::DEFAULT_MAIN_SOURCE;
use crate::error::PioforgeError;

/// The main project manifest (pioforge.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Project configuration
    pub project: ProjectConfig,

    /// PlatformIO configuration
    pub platformio: PlatformioConfig,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Main C++ source file, relative to the project root
    #[serde(default = "default_main")]
    pub main: String,

    /// Names of libraries the project depends on directly
    #[serde(default)]
    pub libraries: Vec<String>,
}

fn default_main() -> String {
    DEFAULT_MAIN_SOURCE.to_string()
}

/// PlatformIO settings rendered into the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformioConfig {
    /// Target board identifier (e.g. "uno")
    pub board: String,

    /// Platform identifier (e.g. "atmelavr")
    pub platform: String,

    /// Framework identifier (e.g. "arduino")
    pub framework: String,

    /// Free-form configuration overrides, rendered as `key = value` lines
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Manifest {
    /// Parse a manifest from TOML
    pub fn from_toml(content: &str) -> Result<Self, PioforgeError> {
        toml::from_str(content).map_err(|e| PioforgeError::ManifestParse { source: e })
    }

    /// Serialize the manifest to TOML
    pub fn to_toml(&self) -> Result<String, PioforgeError> {
        toml::to_string_pretty(self).map_err(|e| PioforgeError::Generic(e.to_string()))
    }

    /// Validate the manifest, collecting all problems rather than the first
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.project.name.trim().is_empty() {
            issues.push("project.name must not be empty".to_string());
        }
        if self.project.main.trim().is_empty() {
            issues.push("project.main must not be empty".to_string());
        }
        if self.platformio.board.trim().is_empty() {
            issues.push("platformio.board must not be empty".to_string());
        }
        if self.platformio.platform.trim().is_empty() {
            issues.push("platformio.platform must not be empty".to_string());
        }
        if self.platformio.framework.trim().is_empty() {
            issues.push("platformio.framework must not be empty".to_string());
        }

        let mut seen = std::collections::BTreeSet::new();
        for library in &self.project.libraries {
            if !seen.insert(library) {
                issues.push(format!("project.libraries lists '{library}' twice"));
            }
        }

        issues
    }
}

//! Clean logic
//!
//! Removes the directories pioforge writes: `build/` (bundle staging,
//! bundle archives, assembled project tree) and `output/` (firmware
//! artifacts and the upload script).

use std::path::Path;

use crate::error::FilesystemError;

/// Directories to remove during clean
pub const CLEAN_DIRECTORIES: &[&str] = &["build", "output"];

/// Result of clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Directories that were removed
    pub removed: Vec<String>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<String>,
}

/// Remove generated artifacts from a project
pub fn clean_project(project_path: &Path) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();

    for dir_name in CLEAN_DIRECTORIES {
        let dir_path = project_path.join(dir_name);

        if dir_path.exists() {
            std::fs::remove_dir_all(&dir_path).map_err(|e| FilesystemError::RemoveDir {
                path: dir_path.clone(),
                error: e.to_string(),
            })?;
            result.removed.push((*dir_name).to_string());
        } else {
            result.skipped.push((*dir_name).to_string());
        }
    }

    Ok(result)
}

/// Check if a project has any generated artifacts
pub fn has_artifacts(project_path: &Path) -> bool {
    CLEAN_DIRECTORIES
        .iter()
        .any(|dir| project_path.join(dir).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_generated_directories() {
        let project = TempDir::new().unwrap();
        let bundles = project.path().join("build/bundles");
        let output = project.path().join("output");
        std::fs::create_dir_all(&bundles).unwrap();
        std::fs::create_dir_all(&output).unwrap();
        std::fs::write(bundles.join("led.zip"), "zip").unwrap();
        std::fs::write(output.join("firmware.hex"), "hex").unwrap();

        let result = clean_project(project.path()).unwrap();

        assert!(!project.path().join("build").exists());
        assert!(!output.exists());
        assert_eq!(result.removed, vec!["build", "output"]);
    }

    #[test]
    fn test_clean_reports_skipped_directories() {
        let project = TempDir::new().unwrap();

        let result = clean_project(project.path()).unwrap();

        assert!(result.removed.is_empty());
        assert_eq!(result.skipped, vec!["build", "output"]);
    }

    #[test]
    fn test_has_artifacts() {
        let project = TempDir::new().unwrap();
        assert!(!has_artifacts(project.path()));

        std::fs::create_dir_all(project.path().join("build")).unwrap();
        assert!(has_artifacts(project.path()));
    }
}

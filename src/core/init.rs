//! Project initialization logic
//!
//! Creates the manifest, the `libraries/` directory, a starter main source
//! and the .gitignore entries for a new pioforge project.

use std::path::Path;

use crate::config::defaults::{DEFAULT_MAIN_SOURCE, MANIFEST_NAME};
use crate::error::InitError;

/// Directories that should be created during init
pub const REQUIRED_DIRECTORIES: &[&str] = &["libraries"];

/// Entries to add to .gitignore
pub const GITIGNORE_ENTRIES: &[&str] = &["build/", "output/"];

/// Marker comment for the pioforge section in .gitignore
pub const GITIGNORE_MARKER: &str = "# pioforge";

/// Options for project initialization
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Target board identifier
    pub board: Option<String>,
    /// Platform identifier
    pub platform: Option<String>,
    /// Framework identifier
    pub framework: Option<String>,
    /// Force initialization in a non-empty directory
    pub force: bool,
}

/// Result of initialization
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created manifest
    pub manifest_path: std::path::PathBuf,
    /// Whether .gitignore was created or updated
    pub gitignore_updated: bool,
    /// Whether a starter main source was written
    pub main_created: bool,
}

/// Check if a directory is empty (ignoring hidden files like .git)
pub fn is_directory_empty(path: &Path) -> std::io::Result<bool> {
    let entries: Vec<_> = std::fs::read_dir(path)?
        .filter_map(Result::ok)
        .filter(|e| {
            !e.file_name()
                .to_str()
                .map(|s| s.starts_with('.'))
                .unwrap_or(false)
        })
        .collect();
    Ok(entries.is_empty())
}

/// Generate the default manifest content with comments
pub fn generate_manifest_content(
    project_name: &str,
    board: &str,
    platform: &str,
    framework: &str,
) -> String {
    format!(
        r#"# Pioforge Project Configuration

[project]
name = "{project_name}"
# Main C++ source file
main = "main.cpp"
# Libraries the project depends on directly (declared under libraries/)
libraries = []

[platformio]
board = "{board}"
platform = "{platform}"
framework = "{framework}"

# Free-form overrides rendered into platformio.ini as `key = value` lines
# [platformio.options]
# build_flags = "-DDEBUG=1"
# upload_speed = "115200"
"#
    )
}

/// Starter main source written when none exists
pub const STARTER_MAIN: &str = r#"#include <Arduino.h>

void setup() {
}

void loop() {
}
"#;

/// Initialize a new pioforge project
pub fn init_project(project_dir: &Path, options: &InitOptions) -> Result<InitResult, InitError> {
    if !project_dir.exists() {
        return Err(InitError::DirectoryNotFound {
            path: project_dir.to_path_buf(),
        });
    }

    let manifest_path = project_dir.join(MANIFEST_NAME);
    if manifest_path.exists() {
        return Err(InitError::AlreadyInitialized {
            path: manifest_path,
        });
    }

    let empty = is_directory_empty(project_dir).map_err(|e| InitError::IoError {
        path: project_dir.to_path_buf(),
        error: e.to_string(),
    })?;
    if !empty && !options.force {
        return Err(InitError::DirectoryNotEmpty {
            path: project_dir.to_path_buf(),
        });
    }

    let project_name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "firmware".to_string());

    let content = generate_manifest_content(
        &project_name,
        options.board.as_deref().unwrap_or("uno"),
        options.platform.as_deref().unwrap_or("atmelavr"),
        options.framework.as_deref().unwrap_or("arduino"),
    );
    std::fs::write(&manifest_path, content).map_err(|e| InitError::IoError {
        path: manifest_path.clone(),
        error: e.to_string(),
    })?;

    for dir_name in REQUIRED_DIRECTORIES {
        let dir = project_dir.join(dir_name);
        std::fs::create_dir_all(&dir).map_err(|e| InitError::IoError {
            path: dir,
            error: e.to_string(),
        })?;
    }

    let main_path = project_dir.join(DEFAULT_MAIN_SOURCE);
    let main_created = if main_path.exists() {
        false
    } else {
        std::fs::write(&main_path, STARTER_MAIN).map_err(|e| InitError::IoError {
            path: main_path,
            error: e.to_string(),
        })?;
        true
    };

    let gitignore_updated = update_gitignore(project_dir).map_err(|e| InitError::IoError {
        path: project_dir.join(".gitignore"),
        error: e.to_string(),
    })?;

    Ok(InitResult {
        manifest_path,
        gitignore_updated,
        main_created,
    })
}

/// Append the pioforge section to .gitignore if not already present
fn update_gitignore(project_dir: &Path) -> std::io::Result<bool> {
    let path = project_dir.join(".gitignore");
    let existing = if path.exists() {
        std::fs::read_to_string(&path)?
    } else {
        String::new()
    };

    if existing.contains(GITIGNORE_MARKER) {
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(GITIGNORE_MARKER);
    content.push('\n');
    for entry in GITIGNORE_ENTRIES {
        content.push_str(entry);
        content.push('\n');
    }
    std::fs::write(&path, content)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::Manifest;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_manifest_and_layout() {
        let dir = TempDir::new().unwrap();
        let result = init_project(dir.path(), &InitOptions::default()).unwrap();

        assert!(result.manifest_path.exists());
        assert!(result.main_created);
        assert!(result.gitignore_updated);
        assert!(dir.path().join("libraries").is_dir());
        assert!(dir.path().join("main.cpp").is_file());
    }

    #[test]
    fn test_generated_manifest_parses() {
        let dir = TempDir::new().unwrap();
        let options = InitOptions {
            board: Some("esp32dev".to_string()),
            platform: Some("espressif32".to_string()),
            framework: Some("arduino".to_string()),
            force: false,
        };
        let result = init_project(dir.path(), &options).unwrap();

        let content = std::fs::read_to_string(&result.manifest_path).unwrap();
        let manifest = Manifest::from_toml(&content).unwrap();
        assert_eq!(manifest.platformio.board, "esp32dev");
        assert_eq!(manifest.platformio.platform, "espressif32");
    }

    #[test]
    fn test_init_refuses_non_empty_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("something.txt"), "x").unwrap();

        let err = init_project(dir.path(), &InitOptions::default()).unwrap_err();
        assert!(matches!(err, InitError::DirectoryNotEmpty { .. }));
    }

    #[test]
    fn test_init_force_allows_non_empty_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("something.txt"), "x").unwrap();

        let options = InitOptions {
            force: true,
            ..Default::default()
        };
        assert!(init_project(dir.path(), &options).is_ok());
    }

    #[test]
    fn test_init_refuses_existing_project() {
        let dir = TempDir::new().unwrap();
        init_project(
            dir.path(),
            &InitOptions {
                force: true,
                ..Default::default()
            },
        )
        .unwrap();

        let err = init_project(
            dir.path(),
            &InitOptions {
                force: true,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, InitError::AlreadyInitialized { .. }));
    }

    #[test]
    fn test_init_keeps_existing_main_source() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.cpp"), "// mine").unwrap();

        let result = init_project(
            dir.path(),
            &InitOptions {
                force: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert!(!result.main_created);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("main.cpp")).unwrap(),
            "// mine"
        );
    }

    #[test]
    fn test_gitignore_not_duplicated() {
        let dir = TempDir::new().unwrap();
        update_gitignore(dir.path()).unwrap();
        let updated_again = update_gitignore(dir.path()).unwrap();

        assert!(!updated_again);
        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content.matches("build/").count(), 1);
    }
}

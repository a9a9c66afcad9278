//! Library unit declarations
//!
//! Each library lives in its own directory under `libraries/` and is
//! described by a `library.toml`: one required header, an optional source,
//! optional extra files (glob patterns that must each resolve to exactly one
//! file) and a list of dependency names. Units are loaded once and immutable
//! afterwards; each produces exactly one bundle.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::defaults::LIBRARY_DECL_NAME;
use crate::error::LibraryError;

static UNIT_NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn unit_name_pattern() -> &'static Regex {
    UNIT_NAME_PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("invalid name pattern"))
}

/// Check whether a name is a valid library unit name
pub fn is_valid_unit_name(name: &str) -> bool {
    unit_name_pattern().is_match(name)
}

/// On-disk library declaration (library.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDecl {
    /// Library section
    pub library: LibrarySection,
}

/// `[library]` section of a declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySection {
    /// Unit name; must match the directory name
    pub name: String,

    /// Required header file, relative to the library directory
    pub header: String,

    /// Optional source file, relative to the library directory
    #[serde(default)]
    pub source: Option<String>,

    /// Extra header patterns; each must resolve to exactly one file
    #[serde(default)]
    pub extra_headers: Vec<String>,

    /// Extra source patterns; each must resolve to exactly one file
    #[serde(default)]
    pub extra_sources: Vec<String>,

    /// Names of libraries this one depends on
    #[serde(default)]
    pub deps: Vec<String>,
}

/// A fully resolved library unit
///
/// All paths are absolute and verified to exist at load time.
#[derive(Debug, Clone)]
pub struct LibraryUnit {
    /// Unique unit name
    pub name: String,
    /// Directory the unit was loaded from
    pub dir: PathBuf,
    /// Required header file
    pub header: PathBuf,
    /// Optional source file
    pub source: Option<PathBuf>,
    /// Resolved extra files, bundled under their original file names
    pub extra_files: Vec<PathBuf>,
    /// Direct dependency names
    pub deps: Vec<String>,
}

impl LibraryUnit {
    /// Load and resolve a unit from its directory
    pub fn load(dir: &Path) -> Result<Self, LibraryError> {
        let decl_path = dir.join(LIBRARY_DECL_NAME);
        let content =
            std::fs::read_to_string(&decl_path).map_err(|e| LibraryError::IoError {
                path: decl_path.clone(),
                error: e.to_string(),
            })?;
        let decl: LibraryDecl =
            toml::from_str(&content).map_err(|e| LibraryError::ParseError {
                path: decl_path,
                error: e.to_string(),
            })?;
        Self::resolve(dir, &decl.library)
    }

    fn resolve(dir: &Path, section: &LibrarySection) -> Result<Self, LibraryError> {
        let name = section.name.clone();

        if !is_valid_unit_name(&name) {
            return Err(LibraryError::InvalidName { name });
        }

        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if dir_name != name {
            return Err(LibraryError::NameMismatch {
                declared: name,
                directory: dir_name,
            });
        }

        let header = dir.join(&section.header);
        if !header.is_file() {
            return Err(LibraryError::MissingHeader {
                library: name,
                path: header,
            });
        }

        let source = match &section.source {
            Some(relative) => {
                let path = dir.join(relative);
                if !path.is_file() {
                    return Err(LibraryError::MissingSource {
                        library: name,
                        path,
                    });
                }
                Some(path)
            }
            None => None,
        };

        let mut extra_files = Vec::new();
        for pattern in section.extra_headers.iter().chain(&section.extra_sources) {
            extra_files.push(resolve_reference(dir, &name, pattern)?);
        }

        let unit = Self {
            name,
            dir: dir.to_path_buf(),
            header,
            source,
            extra_files,
            deps: section.deps.clone(),
        };
        unit.check_destination_collisions()?;
        Ok(unit)
    }

    /// File names the unit's files take inside its bundle slot
    pub fn destination_names(&self) -> Vec<String> {
        let mut names = vec![format!("{}.h", self.name)];
        if self.source.is_some() {
            names.push(format!("{}.cpp", self.name));
        }
        for extra in &self.extra_files {
            names.push(
                extra
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
        }
        names
    }

    fn check_destination_collisions(&self) -> Result<(), LibraryError> {
        let mut seen = BTreeSet::new();
        for name in self.destination_names() {
            if !seen.insert(name.clone()) {
                return Err(LibraryError::FileCollision {
                    library: self.name.clone(),
                    file: name,
                });
            }
        }
        Ok(())
    }
}

/// A declared extra-file pattern must resolve to exactly one file
fn resolve_reference(dir: &Path, library: &str, pattern: &str) -> Result<PathBuf, LibraryError> {
    let full_pattern = dir.join(pattern).display().to_string();
    let mut matches: Vec<PathBuf> = glob::glob(&full_pattern)
        .map_err(|e| LibraryError::InvalidReference {
            library: library.to_string(),
            pattern: format!("{pattern} ({e})"),
            matches: 0,
        })?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();

    if matches.len() != 1 {
        return Err(LibraryError::InvalidReference {
            library: library.to_string(),
            pattern: pattern.to_string(),
            matches: matches.len(),
        });
    }
    Ok(matches.remove(0))
}

/// Load every library declaration under a `libraries/` directory
///
/// Returns units keyed by name. Duplicate names are rejected.
pub fn load_all(libraries_dir: &Path) -> Result<BTreeMap<String, LibraryUnit>, LibraryError> {
    let mut units = BTreeMap::new();

    if !libraries_dir.is_dir() {
        return Ok(units);
    }

    let entries = std::fs::read_dir(libraries_dir).map_err(|e| LibraryError::IoError {
        path: libraries_dir.to_path_buf(),
        error: e.to_string(),
    })?;

    for entry in entries.filter_map(Result::ok) {
        let dir = entry.path();
        if !dir.is_dir() || !dir.join(LIBRARY_DECL_NAME).is_file() {
            continue;
        }
        let unit = LibraryUnit::load(&dir)?;
        if units.contains_key(&unit.name) {
            return Err(LibraryError::DuplicateName { name: unit.name });
        }
        units.insert(unit.name.clone(), unit);
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn declare(root: &Path, name: &str, decl: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = root.join("libraries").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("library.toml"), decl).unwrap();
        for (file, content) in files {
            let path = dir.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_minimal_unit() {
        let root = TempDir::new().unwrap();
        let dir = declare(
            root.path(),
            "led",
            "[library]\nname = \"led\"\nheader = \"led.h\"\n",
            &[("led.h", "void on();")],
        );

        let unit = LibraryUnit::load(&dir).unwrap();
        assert_eq!(unit.name, "led");
        assert!(unit.source.is_none());
        assert!(unit.deps.is_empty());
        assert_eq!(unit.destination_names(), vec!["led.h"]);
    }

    #[test]
    fn test_load_unit_with_source_and_deps() {
        let root = TempDir::new().unwrap();
        let dir = declare(
            root.path(),
            "servo",
            "[library]\nname = \"servo\"\nheader = \"include/servo.h\"\nsource = \"src/servo.cpp\"\ndeps = [\"pwm\"]\n",
            &[("include/servo.h", "h"), ("src/servo.cpp", "c")],
        );

        let unit = LibraryUnit::load(&dir).unwrap();
        assert!(unit.source.is_some());
        assert_eq!(unit.deps, vec!["pwm"]);
        assert_eq!(unit.destination_names(), vec!["servo.h", "servo.cpp"]);
    }

    #[test]
    fn test_reference_matching_zero_files_is_invalid() {
        let root = TempDir::new().unwrap();
        let dir = declare(
            root.path(),
            "led",
            "[library]\nname = \"led\"\nheader = \"led.h\"\nextra_headers = [\"missing/*.h\"]\n",
            &[("led.h", "h")],
        );

        let err = LibraryUnit::load(&dir).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::InvalidReference { matches: 0, .. }
        ));
    }

    #[test]
    fn test_reference_matching_two_files_is_invalid() {
        let root = TempDir::new().unwrap();
        let dir = declare(
            root.path(),
            "led",
            "[library]\nname = \"led\"\nheader = \"led.h\"\nextra_headers = [\"extra/*.h\"]\n",
            &[("led.h", "h"), ("extra/a.h", "a"), ("extra/b.h", "b")],
        );

        let err = LibraryUnit::load(&dir).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::InvalidReference { matches: 2, .. }
        ));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let root = TempDir::new().unwrap();
        let dir = declare(
            root.path(),
            "1bad",
            "[library]\nname = \"1bad\"\nheader = \"x.h\"\n",
            &[("x.h", "h")],
        );

        let err = LibraryUnit::load(&dir).unwrap_err();
        assert!(matches!(err, LibraryError::InvalidName { .. }));
    }

    #[test]
    fn test_name_must_match_directory() {
        let root = TempDir::new().unwrap();
        let dir = declare(
            root.path(),
            "led",
            "[library]\nname = \"lamp\"\nheader = \"lamp.h\"\n",
            &[("lamp.h", "h")],
        );

        let err = LibraryUnit::load(&dir).unwrap_err();
        assert!(matches!(err, LibraryError::NameMismatch { .. }));
    }

    #[test]
    fn test_missing_header_rejected() {
        let root = TempDir::new().unwrap();
        let dir = declare(
            root.path(),
            "led",
            "[library]\nname = \"led\"\nheader = \"led.h\"\n",
            &[],
        );

        let err = LibraryUnit::load(&dir).unwrap_err();
        assert!(matches!(err, LibraryError::MissingHeader { .. }));
    }

    #[test]
    fn test_extra_file_colliding_with_renamed_header() {
        let root = TempDir::new().unwrap();
        // extra/led.h would land at the same slot as the renamed header
        let dir = declare(
            root.path(),
            "led",
            "[library]\nname = \"led\"\nheader = \"main.h\"\nextra_headers = [\"extra/led.h\"]\n",
            &[("main.h", "h"), ("extra/led.h", "dup")],
        );

        let err = LibraryUnit::load(&dir).unwrap_err();
        assert!(matches!(err, LibraryError::FileCollision { .. }));
    }

    #[test]
    fn test_load_all_finds_every_declaration() {
        let root = TempDir::new().unwrap();
        declare(
            root.path(),
            "led",
            "[library]\nname = \"led\"\nheader = \"led.h\"\n",
            &[("led.h", "h")],
        );
        declare(
            root.path(),
            "pwm",
            "[library]\nname = \"pwm\"\nheader = \"pwm.h\"\n",
            &[("pwm.h", "h")],
        );

        let units = load_all(&root.path().join("libraries")).unwrap();
        assert_eq!(units.len(), 2);
        assert!(units.contains_key("led"));
        assert!(units.contains_key("pwm"));
    }

    #[test]
    fn test_load_all_without_directory_is_empty() {
        let root = TempDir::new().unwrap();
        let units = load_all(&root.path().join("libraries")).unwrap();
        assert!(units.is_empty());
    }

    #[test]
    fn test_unit_name_pattern() {
        assert!(is_valid_unit_name("led"));
        assert!(is_valid_unit_name("Servo-2_x"));
        assert!(!is_valid_unit_name(""));
        assert!(!is_valid_unit_name("9lives"));
        assert!(!is_valid_unit_name("bad name"));
        assert!(!is_valid_unit_name("../escape"));
    }
}

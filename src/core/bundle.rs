//! Bundle building
//!
//! Packages one library unit into a self-contained ZIP archive. The unit's
//! files are staged under `lib/<name>/`, with the header and source renamed
//! to `<name>.h` / `<name>.cpp` and extra files keeping their own names,
//! then the staged layout is archived rooted at the staging directory.
//! Bundles never contain dependency files; transitivity is resolved by the
//! consumer at extraction time.

use std::path::{Path, PathBuf};

use crate::config::defaults::{BUNDLE_DIR, LIBRARY_ROOT, STAGE_DIR};
use crate::core::library::LibraryUnit;
use crate::error::{LibraryError, PioforgeError};
use crate::infra::{archive, filesystem};

/// A produced bundle archive
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Name of the unit the bundle was built from
    pub unit: String,
    /// Path of the archive on disk
    pub archive_path: PathBuf,
}

/// Build the bundle for one unit
///
/// Writes `build/bundles/<name>.zip` under `project_dir`, restaging the
/// layout from scratch on every call. Inputs are only read, never moved.
pub fn build_bundle(project_dir: &Path, unit: &LibraryUnit) -> Result<Bundle, PioforgeError> {
    let stage_dir = project_dir.join(STAGE_DIR).join(&unit.name);
    let slot = stage_dir.join(LIBRARY_ROOT).join(&unit.name);

    filesystem::remove_dir_all(&stage_dir)?;
    filesystem::create_dir_all(&slot)?;

    copy_into_slot(unit, &unit.header, &slot.join(format!("{}.h", unit.name)))?;
    if let Some(source) = &unit.source {
        copy_into_slot(unit, source, &slot.join(format!("{}.cpp", unit.name)))?;
    }
    for extra in &unit.extra_files {
        let file_name = extra.file_name().ok_or_else(|| LibraryError::IoError {
            path: extra.clone(),
            error: "file has no name".to_string(),
        })?;
        copy_into_slot(unit, extra, &slot.join(file_name))?;
    }

    let archive_path = bundle_path(project_dir, &unit.name);
    archive::create(&stage_dir, &archive_path)?;

    tracing::debug!("Bundled library '{}' -> {}", unit.name, archive_path.display());

    Ok(Bundle {
        unit: unit.name.clone(),
        archive_path,
    })
}

/// Path a unit's bundle archive is written to
pub fn bundle_path(project_dir: &Path, unit_name: &str) -> PathBuf {
    project_dir.join(BUNDLE_DIR).join(format!("{unit_name}.zip"))
}

fn copy_into_slot(unit: &LibraryUnit, from: &Path, to: &Path) -> Result<(), LibraryError> {
    std::fs::copy(from, to).map_err(|e| LibraryError::IoError {
        path: from.to_path_buf(),
        error: format!("copying into bundle for '{}': {e}", unit.name),
    })?;
    Ok(())
}

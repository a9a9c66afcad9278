//! Bundle archive creation and extraction
//!
//! Archives are plain ZIP files whose internal paths are relative to the
//! staging root, so extracting one at a project directory reproduces the
//! `lib/<name>/...` layout directly. Extraction is idempotent: an entry whose
//! destination already exists with identical content is skipped, while a
//! content mismatch is a hard `ConflictingDependency` error.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ArchiveError;

/// Create a ZIP archive from the contents of a directory
///
/// Entry paths are relative to `src_dir`, with forward slashes regardless of
/// the host platform.
pub fn create(src_dir: &Path, dest: &Path) -> Result<(), ArchiveError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ArchiveError::Create {
            path: dest.to_path_buf(),
            error: e.to_string(),
        })?;
    }

    let file = File::create(dest).map_err(|e| ArchiveError::Create {
        path: dest.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in walkdir::WalkDir::new(src_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path == src_dir {
            continue;
        }
        let relative = path
            .strip_prefix(src_dir)
            .map_err(|e| ArchiveError::Create {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        let name = archive_entry_name(relative);

        if entry.file_type().is_dir() {
            writer
                .add_directory(name.as_str(), options)
                .map_err(|e| ArchiveError::Create {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                })?;
        } else {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| ArchiveError::Create {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                })?;
            let mut input = File::open(path).map_err(|e| ArchiveError::Create {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
            std::io::copy(&mut input, &mut writer).map_err(|e| ArchiveError::Create {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        }
    }

    writer.finish().map_err(|e| ArchiveError::Create {
        path: dest.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(())
}

/// Extract a ZIP archive into a target directory
///
/// Safe to run multiple times for the same logical bundle: existing files
/// with identical content are left alone. A same-path entry with different
/// content aborts with [`ArchiveError::ConflictingDependency`].
pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    let file = File::open(archive_path).map_err(|e| ArchiveError::Read {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ArchiveError::Read {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;

    let archive_name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| archive_path.display().to_string());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| ArchiveError::Read {
            path: archive_path.to_path_buf(),
            error: e.to_string(),
        })?;

        // enclosed_name rejects entries that would escape the target directory
        let Some(relative) = entry.enclosed_name() else {
            return Err(ArchiveError::Extract {
                path: archive_path.to_path_buf(),
                error: format!("archive entry '{}' has an unsafe path", entry.name()),
            });
        };
        let target = dest_dir.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| ArchiveError::Extract {
                path: target.clone(),
                error: e.to_string(),
            })?;
            continue;
        }

        let mut content = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut content)
            .map_err(|e| ArchiveError::Extract {
                path: target.clone(),
                error: e.to_string(),
            })?;

        if target.exists() {
            let existing = std::fs::read(&target).map_err(|e| ArchiveError::Extract {
                path: target.clone(),
                error: e.to_string(),
            })?;
            if existing == content {
                continue;
            }
            return Err(ArchiveError::ConflictingDependency {
                path: relative,
                archive: archive_name,
            });
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ArchiveError::Extract {
                path: parent.to_path_buf(),
                error: e.to_string(),
            })?;
        }
        let mut out = File::create(&target).map_err(|e| ArchiveError::Extract {
            path: target.clone(),
            error: e.to_string(),
        })?;
        out.write_all(&content).map_err(|e| ArchiveError::Extract {
            path: target.clone(),
            error: e.to_string(),
        })?;
    }

    Ok(())
}

/// List the file entries of an archive (directories omitted)
pub fn list_files(archive_path: &Path) -> Result<Vec<String>, ArchiveError> {
    let file = File::open(archive_path).map_err(|e| ArchiveError::Read {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ArchiveError::Read {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut names = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(|e| ArchiveError::Read {
            path: archive_path.to_path_buf(),
            error: e.to_string(),
        })?;
        if !entry.is_dir() {
            names.push(entry.name().to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn archive_entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_create_and_extract_roundtrip() {
        let src = TempDir::new().unwrap();
        write(src.path(), "lib/servo/servo.h", "void attach();");
        write(src.path(), "lib/servo/servo.cpp", "void attach() {}");

        let out = TempDir::new().unwrap();
        let zip_path = out.path().join("servo.zip");
        create(src.path(), &zip_path).unwrap();

        let dest = TempDir::new().unwrap();
        extract(&zip_path, dest.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.path().join("lib/servo/servo.h")).unwrap(),
            "void attach();"
        );
        assert_eq!(
            std::fs::read_to_string(dest.path().join("lib/servo/servo.cpp")).unwrap(),
            "void attach() {}"
        );
    }

    #[test]
    fn test_list_files_sorted() {
        let src = TempDir::new().unwrap();
        write(src.path(), "lib/servo/servo.h", "h");
        write(src.path(), "lib/servo/extra.h", "e");

        let out = TempDir::new().unwrap();
        let zip_path = out.path().join("servo.zip");
        create(src.path(), &zip_path).unwrap();

        let names = list_files(&zip_path).unwrap();
        assert_eq!(names, vec!["lib/servo/extra.h", "lib/servo/servo.h"]);
    }

    #[test]
    fn test_extract_twice_is_idempotent() {
        let src = TempDir::new().unwrap();
        write(src.path(), "lib/bus/bus.h", "struct Bus;");

        let out = TempDir::new().unwrap();
        let zip_path = out.path().join("bus.zip");
        create(src.path(), &zip_path).unwrap();

        let dest = TempDir::new().unwrap();
        extract(&zip_path, dest.path()).unwrap();
        extract(&zip_path, dest.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.path().join("lib/bus/bus.h")).unwrap(),
            "struct Bus;"
        );
    }

    #[test]
    fn test_extract_conflicting_content_fails() {
        let src = TempDir::new().unwrap();
        write(src.path(), "lib/bus/bus.h", "struct Bus;");

        let out = TempDir::new().unwrap();
        let zip_path = out.path().join("bus.zip");
        create(src.path(), &zip_path).unwrap();

        let dest = TempDir::new().unwrap();
        write(dest.path(), "lib/bus/bus.h", "struct OtherBus;");

        let err = extract(&zip_path, dest.path()).unwrap_err();
        assert!(matches!(err, ArchiveError::ConflictingDependency { .. }));
    }
}

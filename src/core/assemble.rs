//! Project tree assembly
//!
//! Builds the on-disk directory PlatformIO consumes: the rendered
//! configuration at `platformio.ini`, the project's main source at
//! `src/main.cpp`, and every bundle in the transitive set extracted under
//! `lib/`. The tree is ephemeral and rebuilt from scratch on every call;
//! extraction order is irrelevant because shared bundles extract
//! idempotently and content conflicts abort the assembly.

use std::path::{Path, PathBuf};

use crate::config::defaults::{CONFIG_FILE_NAME, LIBRARY_DIR, PROJECT_SOURCE_PATH, PROJECT_TREE_DIR};
use crate::core::bundle::{build_bundle, Bundle};
use crate::core::library;
use crate::core::manifest::Manifest;
use crate::core::resolver::DependencyGraph;
use crate::core::platformio::render_config;
use crate::error::{AssembleError, PioforgeError};
use crate::infra::{archive, filesystem};

/// The assembled project tree
#[derive(Debug)]
pub struct ProjectTree {
    /// Root of the assembled tree
    pub dir: PathBuf,
    /// Rendered configuration file
    pub config_path: PathBuf,
    /// Copied main source file
    pub source_path: PathBuf,
    /// Names of the units whose bundles were extracted
    pub extracted: Vec<String>,
}

/// Build the bundles for the project's transitive dependency set
///
/// Loads every library declaration, verifies the dependency graph (missing
/// references and cycles fail fast), collects the transitive set reachable
/// from the project's direct libraries and builds one bundle per unit in it.
pub fn collect_project_bundles(
    project_dir: &Path,
    manifest: &Manifest,
) -> Result<Vec<Bundle>, PioforgeError> {
    let units = library::load_all(&project_dir.join(LIBRARY_DIR))?;
    let graph = DependencyGraph::from_units(&units);
    let transitive = graph.collect_transitive_from(
        manifest.project.libraries.iter().map(String::as_str),
    )?;

    let mut bundles = Vec::with_capacity(transitive.len());
    for name in &transitive {
        let unit = units.get(name).expect("transitive set only names declared units");
        bundles.push(build_bundle(project_dir, unit)?);
    }
    Ok(bundles)
}

/// Assemble the project tree from a manifest and the transitive bundle set
///
/// `bundles` is the full transitive set; deduplication happened upstream in
/// the resolver so each bundle extracts exactly once here.
pub fn assemble(
    project_dir: &Path,
    manifest: &Manifest,
    bundles: &[Bundle],
) -> Result<ProjectTree, PioforgeError> {
    let tree_dir = project_dir.join(PROJECT_TREE_DIR);
    filesystem::remove_dir_all(&tree_dir)?;
    filesystem::create_dir_all(&tree_dir)?;

    let config_path = tree_dir.join(CONFIG_FILE_NAME);
    let rendered = render_config(&manifest.platformio)?;
    filesystem::write_file(&config_path, &rendered)?;

    let main_source = project_dir.join(&manifest.project.main);
    if !main_source.is_file() {
        return Err(AssembleError::MissingMainSource { path: main_source }.into());
    }
    let source_path = tree_dir.join(PROJECT_SOURCE_PATH);
    filesystem::copy_file(&main_source, &source_path)?;

    let mut extracted = Vec::with_capacity(bundles.len());
    for bundle in bundles {
        archive::extract(&bundle.archive_path, &tree_dir)
            .map_err(AssembleError::Archive)?;
        extracted.push(bundle.unit.clone());
    }

    tracing::info!(
        "Assembled project tree at {} ({} libraries)",
        tree_dir.display(),
        extracted.len()
    );

    Ok(ProjectTree {
        dir: tree_dir,
        config_path,
        source_path,
        extracted,
    })
}

//! CLI implementation for `pioforge tree`

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::output::print_warning;
use crate::config::defaults::LIBRARY_DIR;
use crate::core::library;
use crate::core::resolver::DependencyGraph;
use crate::core::tree::DependencyTree;

use super::load_manifest;

/// Execute the tree command
pub async fn execute(project_dir: &Path, library_name: Option<&str>, graph: bool) -> Result<()> {
    let manifest = load_manifest(project_dir)?;

    let units = library::load_all(&project_dir.join(LIBRARY_DIR))
        .with_context(|| "Failed to load library declarations")?;

    let mut tree = DependencyTree::new(&manifest, &units);
    if let Some(name) = library_name {
        if !tree.contains(name) {
            bail!("Library '{name}' is not declared under {LIBRARY_DIR}/");
        }
        tree = tree.rooted_at(name);
    }

    if graph {
        print!("{}", tree.render_dot());
    } else {
        print!("{}", tree.render_text());
    }

    if DependencyGraph::from_units(&units).has_cycle() {
        print_warning("Dependency graph contains a cycle; builds will fail");
    }

    Ok(())
}

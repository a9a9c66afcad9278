//! CLI implementation for `pioforge assemble`

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{print_detail, print_success};
use crate::core::assemble::{assemble, collect_project_bundles};

use super::load_manifest;

/// Execute the assemble command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = load_manifest(project_dir)?;

    let bundles = collect_project_bundles(project_dir, &manifest)
        .with_context(|| "Failed to build library bundles")?;
    let tree = assemble(project_dir, &manifest, &bundles)
        .with_context(|| "Failed to assemble project tree")?;

    print_success(&format!(
        "Assembled project tree at {}",
        tree.dir
            .strip_prefix(project_dir)
            .unwrap_or(&tree.dir)
            .display()
    ));
    if tree.extracted.is_empty() {
        print_detail("No library bundles (project has no dependencies)");
    } else {
        print_detail(&format!("Libraries: {}", tree.extracted.join(", ")));
    }

    Ok(())
}

//! CLI implementation for `pioforge clean`

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{print_detail, print_success};
use crate::core::clean::{clean_project, has_artifacts};

use super::load_manifest;

/// Execute the clean command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let _manifest = load_manifest(project_dir)?;

    if !has_artifacts(project_dir) {
        print_success("Nothing to clean");
        return Ok(());
    }

    let result = clean_project(project_dir).with_context(|| "Failed to clean artifacts")?;

    if result.removed.is_empty() {
        print_success("Nothing to clean");
    } else {
        print_success("Cleaned generated artifacts:");
        for dir in &result.removed {
            print_detail(&format!("Removed {dir}/"));
        }
    }

    Ok(())
}

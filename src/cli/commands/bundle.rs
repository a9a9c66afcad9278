//! CLI implementation for `pioforge bundle`

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::output::{print_detail, print_success};
use crate::config::defaults::LIBRARY_DIR;
use crate::core::bundle::build_bundle;
use crate::core::library;

use super::load_manifest;

/// Execute the bundle command
pub async fn execute(project_dir: &Path, library_name: Option<&str>) -> Result<()> {
    let _manifest = load_manifest(project_dir)?;

    let units = library::load_all(&project_dir.join(LIBRARY_DIR))
        .with_context(|| "Failed to load library declarations")?;

    if units.is_empty() {
        bail!("No libraries declared under {LIBRARY_DIR}/");
    }

    let selected: Vec<&str> = match library_name {
        Some(name) => {
            if !units.contains_key(name) {
                bail!("Library '{name}' is not declared under {LIBRARY_DIR}/");
            }
            vec![name]
        }
        None => units.keys().map(String::as_str).collect(),
    };

    for name in &selected {
        let unit = &units[*name];
        let bundle = build_bundle(project_dir, unit)
            .with_context(|| format!("Failed to bundle library '{name}'"))?;
        print_detail(&format!(
            "{name} -> {}",
            bundle
                .archive_path
                .strip_prefix(project_dir)
                .unwrap_or(&bundle.archive_path)
                .display()
        ));
    }

    print_success(&format!(
        "Bundled {} librar{}",
        selected.len(),
        if selected.len() == 1 { "y" } else { "ies" }
    ));
    Ok(())
}

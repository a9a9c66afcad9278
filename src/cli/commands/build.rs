//! CLI implementation for `pioforge build`
//!
//! Runs the full pipeline: bundle every library in the transitive set,
//! assemble the project tree and invoke PlatformIO against it. Successful
//! builds copy the firmware artifacts into `output/` and write the
//! standalone upload script.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{create_spinner, print_detail, print_success, print_warning};
use crate::config::defaults::{FIRMWARE_ELF, FIRMWARE_HEX, OUTPUT_DIR, UPLOAD_SCRIPT_NAME};
use crate::core::assemble::{assemble, collect_project_bundles};
use crate::infra::invoker::{upload_script, ExecutionPolicy, Invoker};
use crate::infra::filesystem;

use super::load_manifest;

/// Execute the build command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = load_manifest(project_dir)?;

    let bundles = collect_project_bundles(project_dir, &manifest)
        .with_context(|| "Failed to build library bundles")?;
    print_detail(&format!("Bundled {} libraries", bundles.len()));

    let tree = assemble(project_dir, &manifest, &bundles)
        .with_context(|| "Failed to assemble project tree")?;

    let invoker = Invoker::new(ExecutionPolicy::default());
    let spinner = create_spinner("Running platformio build...");
    let result = invoker.run_build(&tree.dir, &manifest.platformio.board);
    spinner.finish_and_clear();
    let artifacts = result.with_context(|| "PlatformIO build failed")?;

    let output_dir = project_dir.join(OUTPUT_DIR);
    filesystem::create_dir_all(&output_dir)?;

    for (artifact, name) in [(&artifacts.elf, FIRMWARE_ELF), (&artifacts.hex, FIRMWARE_HEX)] {
        if artifact.is_file() {
            filesystem::copy_file(artifact, &output_dir.join(name))?;
        } else {
            print_warning(&format!("Expected artifact {name} was not produced"));
        }
    }

    let script_path = output_dir.join(UPLOAD_SCRIPT_NAME);
    filesystem::write_executable(&script_path, &upload_script(&tree.dir))?;

    print_success("Build complete!");
    for name in [FIRMWARE_ELF, FIRMWARE_HEX] {
        let path = output_dir.join(name);
        if let Ok(metadata) = std::fs::metadata(&path) {
            print_detail(&format!(
                "{} ({} bytes)",
                path.strip_prefix(project_dir).unwrap_or(&path).display(),
                metadata.len()
            ));
        }
    }
    print_detail(&format!(
        "{} (standalone upload script)",
        script_path
            .strip_prefix(project_dir)
            .unwrap_or(&script_path)
            .display()
    ));

    Ok(())
}

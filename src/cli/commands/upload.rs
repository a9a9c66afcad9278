//! CLI implementation for `pioforge upload`
//!
//! Re-invokes PlatformIO with the upload target against the previously
//! assembled project tree. Flashing writes to a physical device, so the
//! command confirms first unless `--yes` is given and is never retried.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::output::{create_spinner, is_quiet, print_success};
use crate::config::defaults::PROJECT_TREE_DIR;
use crate::infra::invoker::{ExecutionPolicy, Invoker};

use super::load_manifest;

/// Execute the upload command
pub async fn execute(project_dir: &Path, yes: bool) -> Result<()> {
    let _manifest = load_manifest(project_dir)?;

    let tree_dir = project_dir.join(PROJECT_TREE_DIR);
    if !tree_dir.is_dir() {
        bail!("No assembled project tree found. Run 'pioforge build' first.");
    }

    if !yes && !confirm("Upload firmware to the connected device?")? {
        bail!("Upload cancelled");
    }

    let invoker = Invoker::new(ExecutionPolicy::default());
    let spinner = create_spinner("Uploading firmware...");
    let result = invoker.run_upload(&tree_dir);
    spinner.finish_and_clear();
    result.with_context(|| "PlatformIO upload failed")?;

    print_success("Upload complete!");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    if is_quiet() {
        // Quiet mode cannot prompt; require --yes
        return Ok(false);
    }
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

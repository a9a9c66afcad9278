//! CLI implementation for `pioforge check`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{is_json, print_success, print_warning, status};
use crate::core::check::check_project;

use super::load_manifest;

/// Execute the check command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = load_manifest(project_dir)?;
    let report = check_project(project_dir, &manifest);

    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.is_ok() { "success" } else { "error" },
            "errors": report.errors,
            "warnings": report.warnings,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json_result).unwrap_or_default()
        );
        if !report.is_ok() {
            return Err(anyhow::anyhow!("Configuration is invalid"));
        }
        return Ok(());
    }

    for warning in &report.warnings {
        print_warning(warning);
    }

    if report.is_ok() {
        print_success("Configuration is valid");
        Ok(())
    } else {
        for error in &report.errors {
            eprintln!("{} {error}", status::ERROR);
        }
        Err(anyhow::anyhow!(
            "Configuration is invalid ({} error{})",
            report.errors.len(),
            if report.errors.len() == 1 { "" } else { "s" }
        ))
    }
}

//! CLI implementation for `pioforge doctor`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{is_json, is_quiet, print_detail, print_info, status};
use crate::core::doctor::run_doctor;

/// Execute the doctor command
pub async fn execute(project_dir: Option<&Path>) -> Result<()> {
    let report = run_doctor(project_dir);

    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.all_passed() { "success" } else { "error" },
            "checks": report.checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "passed": c.passed,
                "required": c.required,
                "version": c.version,
                "error": c.error,
                "suggestion": c.suggestion,
            })).collect::<Vec<_>>(),
            "config_issues": report.config_issues,
            "passed_count": report.passed_count(),
            "total_count": report.checks.len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json_result).unwrap_or_default()
        );
        if !report.failed_required().is_empty() {
            return Err(anyhow::anyhow!("Missing required dependencies"));
        }
        return Ok(());
    }

    if is_quiet() {
        let failed_required = report.failed_required();
        if !failed_required.is_empty() {
            for check in failed_required {
                eprintln!("{} Missing required: {}", status::ERROR, check.name);
            }
            return Err(anyhow::anyhow!("Missing required dependencies"));
        }
        return Ok(());
    }

    print_info("Checking system dependencies...");
    println!();

    for check in &report.checks {
        let version_str = check
            .version
            .as_ref()
            .map(|v| format!(" (v{v})"))
            .unwrap_or_default();
        let required_str = if check.required { "" } else { " [optional]" };

        if check.passed {
            println!(
                "  {} {}{version_str}{required_str}",
                status::SUCCESS,
                check.name
            );
        } else {
            println!("  {} {}{required_str}", status::ERROR, check.name);
            if let Some(error) = &check.error {
                print_detail(&format!("Error: {error}"));
            }
            if let Some(suggestion) = &check.suggestion {
                print_detail(&format!("Suggestion: {suggestion}"));
            }
        }
    }

    if !report.config_issues.is_empty() {
        println!();
        print_info("Configuration issues:");
        for issue in &report.config_issues {
            print_detail(issue);
        }
    }

    println!();
    if report.all_passed() {
        println!(
            "{} All checks passed ({}/{})",
            status::SUCCESS,
            report.passed_count(),
            report.checks.len()
        );
        Ok(())
    } else if report.failed_required().is_empty() {
        println!("{} Some optional checks failed", status::WARNING);
        Ok(())
    } else {
        Err(anyhow::anyhow!("Missing required dependencies"))
    }
}

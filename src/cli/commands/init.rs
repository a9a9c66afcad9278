//! CLI implementation for `pioforge init`

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{print_detail, print_success};
use crate::core::init::{init_project, InitOptions};

/// Execute the init command
pub async fn execute(
    project_dir: &Path,
    board: Option<String>,
    platform: Option<String>,
    framework: Option<String>,
    force: bool,
) -> Result<()> {
    let options = InitOptions {
        board,
        platform,
        framework,
        force,
    };

    let result = init_project(project_dir, &options)
        .with_context(|| format!("Failed to initialize project in {}", project_dir.display()))?;

    print_success("Initialized pioforge project");
    print_detail(&format!("Created {}", result.manifest_path.display()));
    if result.main_created {
        print_detail("Created main.cpp");
    }
    if result.gitignore_updated {
        print_detail("Updated .gitignore");
    }
    print_detail("Declare libraries under libraries/<name>/library.toml");

    Ok(())
}

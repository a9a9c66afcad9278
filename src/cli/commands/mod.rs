//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod assemble;
pub mod build;
pub mod bundle;
pub mod check;
pub mod clean;
pub mod doctor;
pub mod init;
pub mod tree;
pub mod upload;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use crate::config::defaults::MANIFEST_NAME;
use crate::core::manifest::Manifest;

/// Load and parse the project manifest, failing with guidance if absent
pub(crate) fn load_manifest(project_dir: &Path) -> Result<Manifest> {
    let manifest_path = project_dir.join(MANIFEST_NAME);
    if !manifest_path.exists() {
        bail!(
            "No {MANIFEST_NAME} found in {}. Run 'pioforge init' to create a project.",
            project_dir.display()
        );
    }
    let content = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read manifest at {}", manifest_path.display()))?;
    Manifest::from_toml(&content).with_context(|| format!("Failed to parse {MANIFEST_NAME}"))
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new pioforge project
    Init {
        /// Target board identifier
        #[arg(short, long)]
        board: Option<String>,

        /// Platform identifier
        #[arg(short, long)]
        platform: Option<String>,

        /// Framework identifier
        #[arg(short = 'F', long)]
        framework: Option<String>,

        /// Force initialization in non-empty directory
        #[arg(short, long)]
        force: bool,
    },

    /// Build library bundles
    Bundle {
        /// Bundle only the named library (bundles all when omitted)
        library: Option<String>,
    },

    /// Display the dependency tree
    Tree {
        /// Show dependencies for a specific library
        library: Option<String>,

        /// Output in DOT graph format
        #[arg(long)]
        graph: bool,
    },

    /// Validate configuration without building
    Check,

    /// Assemble the project tree without invoking the toolchain
    Assemble,

    /// Build the firmware
    Build,

    /// Upload the firmware to a connected device
    Upload {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove generated artifacts
    Clean,

    /// Check system dependencies
    Doctor,
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Init {
                board,
                platform,
                framework,
                force,
            } => {
                let current_dir = std::env::current_dir()?;
                init::execute(&current_dir, board, platform, framework, force).await
            }
            Self::Bundle { library } => {
                let current_dir = std::env::current_dir()?;
                bundle::execute(&current_dir, library.as_deref()).await
            }
            Self::Tree { library, graph } => {
                let current_dir = std::env::current_dir()?;
                tree::execute(&current_dir, library.as_deref(), graph).await
            }
            Self::Check => {
                let current_dir = std::env::current_dir()?;
                check::execute(&current_dir).await
            }
            Self::Assemble => {
                let current_dir = std::env::current_dir()?;
                assemble::execute(&current_dir).await
            }
            Self::Build => {
                let current_dir = std::env::current_dir()?;
                build::execute(&current_dir).await
            }
            Self::Upload { yes } => {
                let current_dir = std::env::current_dir()?;
                upload::execute(&current_dir, yes).await
            }
            Self::Clean => {
                let current_dir = std::env::current_dir()?;
                clean::execute(&current_dir).await
            }
            Self::Doctor => {
                let current_dir = std::env::current_dir().ok();
                doctor::execute(current_dir.as_deref()).await
            }
        }
    }
}

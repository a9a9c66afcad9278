//! External build tool invocation
//!
//! Runs PlatformIO as a blocking subprocess against an assembled project
//! tree. The tool is invoked under an explicit [`ExecutionPolicy`]: a
//! declared minimal PATH plus a sandbox flag. The invoker refuses to run
//! under a sandboxed policy, since the toolchain needs direct access to host
//! compilers and, for upload, device interfaces. Failures are surfaced
//! verbatim with the exit code and captured output; nothing is retried.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::defaults::{EXTERNAL_TOOL, FIRMWARE_ELF, FIRMWARE_HEX, PIO_ENV_DIR, TOOL_PATH};
use crate::error::InvokerError;

/// Environment the external tool runs under
#[derive(Debug, Clone)]
pub struct ExecutionPolicy {
    /// PATH value the subprocess sees
    pub path: String,
    /// Additional environment variables
    pub envs: Vec<(String, String)>,
    /// Whether the caller intends to run inside a sandbox
    pub sandboxed: bool,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            path: TOOL_PATH.to_string(),
            envs: Vec::new(),
            sandboxed: false,
        }
    }
}

/// Paths of the compiled firmware artifacts inside a project tree
#[derive(Debug, Clone)]
pub struct BuildArtifacts {
    pub elf: PathBuf,
    pub hex: PathBuf,
}

/// PlatformIO subprocess wrapper
#[derive(Debug)]
pub struct Invoker {
    tool: String,
    policy: ExecutionPolicy,
}

impl Invoker {
    /// Create an invoker for the default external tool
    pub fn new(policy: ExecutionPolicy) -> Self {
        Self {
            tool: EXTERNAL_TOOL.to_string(),
            policy,
        }
    }

    /// Create an invoker for a specific tool executable (used in tests)
    pub fn with_tool(tool: &str, policy: ExecutionPolicy) -> Self {
        Self {
            tool: tool.to_string(),
            policy,
        }
    }

    /// Run `<tool> run -d <project_dir>` and report the firmware artifacts
    ///
    /// The artifact paths are where PlatformIO places its outputs for the
    /// given board environment; callers should check existence before use.
    pub fn run_build(
        &self,
        project_dir: &Path,
        board: &str,
    ) -> Result<BuildArtifacts, InvokerError> {
        let dir = project_dir.display().to_string();
        self.run(&["run", "-d", &dir])?;

        let env_dir = project_dir.join(PIO_ENV_DIR).join(board);
        Ok(BuildArtifacts {
            elf: env_dir.join(FIRMWARE_ELF),
            hex: env_dir.join(FIRMWARE_HEX),
        })
    }

    /// Run `<tool> run -d <project_dir> -t upload`
    ///
    /// Flashes a connected device. Must not run inside a sandbox and is
    /// never retried: re-flashing after a partial write is a caller decision.
    pub fn run_upload(&self, project_dir: &Path) -> Result<(), InvokerError> {
        let dir = project_dir.display().to_string();
        self.run(&["run", "-d", &dir, "-t", "upload"])
    }

    fn run(&self, args: &[&str]) -> Result<(), InvokerError> {
        if self.policy.sandboxed {
            return Err(InvokerError::SandboxedPolicy {
                tool: self.tool.clone(),
            });
        }

        // Resolve against the declared PATH, not the ambient one
        let tool_path = which::which_in(&self.tool, Some(&self.policy.path), ".").map_err(
            |_| InvokerError::ToolNotFound {
                tool: self.tool.clone(),
                path: self.policy.path.clone(),
            },
        )?;

        let command_line = format!("{} {}", self.tool, args.join(" "));
        tracing::info!("Running external tool: {command_line}");

        let mut command = Command::new(&tool_path);
        command
            .args(args)
            .env_clear()
            .env("PATH", &self.policy.path);
        for (key, value) in &self.policy.envs {
            command.env(key, value);
        }

        let output = command.output().map_err(|e| InvokerError::IoError {
            command: command_line.clone(),
            error: e.to_string(),
        })?;

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(InvokerError::ExternalToolFailure {
                command: command_line,
                code: output.status.code().unwrap_or(-1),
                output: captured,
            });
        }

        Ok(())
    }
}

/// Render the standalone upload script for an assembled project tree
pub fn upload_script(project_dir: &Path) -> String {
    format!(
        "#!/bin/sh\nexec {} run -d \"{}\" -t upload\n",
        EXTERNAL_TOOL,
        project_dir.display()
    )
}

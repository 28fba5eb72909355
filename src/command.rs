use crate::error::{BackupError, Result};
use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// An external program invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Standard output is written here when set and discarded otherwise.
    pub stdout_path: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout_path: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout_path = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stderr: String,
}

impl CommandOutput {
    /// Human-readable reason for a failed run.
    pub fn failure_reason(&self, program: &str) -> String {
        let status = match self.code {
            Some(code) => format!("{} exited with status {}", program, code),
            None => format!("{} was terminated by a signal", program),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            status
        } else {
            format!("{}: {}", status, stderr)
        }
    }
}

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Runs the command to completion. An `Err` means the process could not
    /// be started; a non-zero exit is reported through `CommandOutput`.
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

#[async_trait]
impl CommandExecutor for SystemExecutor {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!("Running {} with {} argument(s)", spec.program, spec.args.len());

        let stdout = match &spec.stdout_path {
            Some(path) => Stdio::from(File::create(path)?),
            None => Stdio::null(),
        };

        // `output()` would replace the stdout redirect with a pipe
        let child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BackupError::Command(format!("failed to start {}: {}", spec.program, e)))?;
        let output = child.wait_with_output().await?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

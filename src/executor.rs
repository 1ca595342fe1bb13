//! Command transport layer
//!
//! The [`Executor`] trait abstracts "run this argument vector somewhere":
//! directly as a local subprocess, inside a Docker container, or in any
//! custom sandbox. Implementations capture both output streams fully; a
//! non-zero exit code is not an error at this layer - that is the caller's
//! decision.

use std::io;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::JjError;

/// Captured result of one subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// The argument vector as requested by the caller (never the
    /// sandbox-wrapped form)
    pub args: Vec<String>,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// True when the process exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Protocol for executing commands.
///
/// Implement this to run jj commands in a sandbox (Docker, nsjail, a remote
/// agent) instead of directly via local subprocess.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute `cmd` and return the captured output.
    ///
    /// Must not fail for a non-zero exit code.
    async fn execute(&self, cmd: &[String]) -> Result<CommandOutput, JjError>;
}

/// Default executor - runs commands via a local subprocess
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExecutor;

#[async_trait]
impl Executor for LocalExecutor {
    async fn execute(&self, cmd: &[String]) -> Result<CommandOutput, JjError> {
        let (program, rest) = cmd
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        // kill_on_drop: a cancelled call must not leak the child process
        let output = Command::new(program)
            .args(rest)
            .kill_on_drop(true)
            .output()
            .await?;

        Ok(CommandOutput {
            args: cmd.to_vec(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

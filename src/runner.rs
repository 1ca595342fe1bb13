//! Low-level jj command runner
//!
//! Builds the full argument vector for each call, delegates to the
//! transport, and classifies non-zero exits into typed failures.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::constants::{errors, flags};
use crate::error::JjError;
use crate::executor::{CommandOutput, Executor, LocalExecutor};

/// Low-level wrapper for jj commands.
///
/// One runner is shared by the repository facade and all feature managers
/// bound to the same repository.
#[derive(Clone)]
pub struct Runner {
    jj_path: String,
    repo_path: Option<PathBuf>,
    executor: Arc<dyn Executor>,
}

impl Runner {
    /// Create a runner using the local subprocess executor.
    pub fn new(jj_path: impl Into<String>, repo_path: Option<PathBuf>) -> Result<Self, JjError> {
        Self::with_executor(jj_path, repo_path, Arc::new(LocalExecutor))
    }

    /// Create a runner backed by a custom executor.
    ///
    /// The jj binary must be resolvable on the search path; this is checked
    /// once, at construction, and never re-checked.
    pub fn with_executor(
        jj_path: impl Into<String>,
        repo_path: Option<PathBuf>,
        executor: Arc<dyn Executor>,
    ) -> Result<Self, JjError> {
        let jj_path = jj_path.into();
        if which::which(&jj_path).is_err() {
            return Err(JjError::NotFound { path: jj_path });
        }
        Ok(Self {
            jj_path,
            repo_path,
            executor,
        })
    }

    /// Path of the configured jj binary
    pub fn jj_path(&self) -> &str {
        &self.jj_path
    }

    /// Repository path bound at construction, if any
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// The transport used for bundle plumbing and custom invocations
    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    /// Run a jj command, classifying a non-zero exit into a typed error.
    pub async fn run(&self, args: &[&str]) -> Result<CommandOutput, JjError> {
        let result = self.run_unchecked(args).await?;
        if result.success() {
            return Ok(result);
        }

        let stderr = result.stderr.trim().to_string();
        if errors::REPO_NOT_FOUND_HINTS
            .iter()
            .any(|hint| stderr.contains(hint))
        {
            return Err(JjError::RepoNotFound {
                command: result.args,
                exit_code: result.exit_code,
                stderr,
            });
        }
        Err(JjError::CommandFailed {
            command: result.args,
            exit_code: result.exit_code,
            stderr,
        })
    }

    /// Run a jj command and return the raw result regardless of exit code.
    ///
    /// Failure is observable only via [`CommandOutput::exit_code`].
    pub async fn run_unchecked(&self, args: &[&str]) -> Result<CommandOutput, JjError> {
        let cmd = self.command(args);
        debug!(command = %cmd.join(" "), "running jj command");
        self.executor.execute(&cmd).await
    }

    /// Full argument vector: binary, global flags, repository flag, args
    fn command(&self, args: &[&str]) -> Vec<String> {
        let mut cmd = vec![
            self.jj_path.clone(),
            flags::NO_PAGER.to_string(),
            flags::COLOR.to_string(),
            flags::COLOR_NEVER.to_string(),
        ];
        if let Some(path) = &self.repo_path {
            cmd.push(flags::REPOSITORY.to_string());
            cmd.push(path.display().to_string());
        }
        cmd.extend(args.iter().map(|s| s.to_string()));
        cmd
    }
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("jj_path", &self.jj_path)
            .field("repo_path", &self.repo_path)
            .finish_non_exhaustive()
    }
}

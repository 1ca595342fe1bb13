//! Errors produced while executing jj commands

use std::io;

use thiserror::Error;

/// Errors that can occur when executing jj commands or parsing their output
#[derive(Error, Debug)]
pub enum JjError {
    /// The configured jj binary could not be resolved on the search path.
    ///
    /// Raised once, at construction; never retried.
    #[error("could not find jj binary {path:?}; is jj installed and on your PATH?")]
    NotFound { path: String },

    /// A checked command exited with a non-zero status.
    #[error("jj command failed (exit {exit_code}): {stderr}")]
    CommandFailed {
        command: Vec<String>,
        exit_code: i32,
        stderr: String,
    },

    /// A checked command exited non-zero and stderr matched a known
    /// "no repository here" pattern.
    #[error("no jj repository found (exit {exit_code}): {stderr}")]
    RepoNotFound {
        command: Vec<String>,
        exit_code: i32,
        stderr: String,
    },

    #[error("failed to parse jj output: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for JjError {
    fn from(err: serde_json::Error) -> Self {
        JjError::Parse(err.to_string())
    }
}

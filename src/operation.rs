//! Operation log subcommands (`repo.op.*`)

use std::sync::Arc;

use crate::error::JjError;
use crate::model::Operation;
use crate::parser;
use crate::runner::Runner;

/// Manages the jj operation log
#[derive(Debug, Clone)]
pub struct OperationManager {
    runner: Arc<Runner>,
}

impl OperationManager {
    pub(crate) fn new(runner: Arc<Runner>) -> Self {
        Self { runner }
    }

    /// List operations, newest first.
    pub async fn log(&self, limit: Option<usize>) -> Result<Vec<Operation>, JjError> {
        let limit_s;
        let mut args = vec!["operation", "log", "--no-graph"];
        if let Some(limit) = limit {
            limit_s = limit.to_string();
            args.extend(["-n", limit_s.as_str()]);
        }
        let result = self.runner.run(&args).await?;
        Ok(parser::parse_op_log(&result.stdout))
    }

    /// Restore the repository to its state as of a previous operation.
    pub async fn restore(&self, operation_id: &str) -> Result<(), JjError> {
        self.runner
            .run(&["operation", "restore", operation_id])
            .await?;
        Ok(())
    }

    /// Undo a single operation by applying its inverse.
    pub async fn undo(&self, operation_id: &str) -> Result<(), JjError> {
        self.runner
            .run(&["operation", "undo", operation_id])
            .await?;
        Ok(())
    }
}

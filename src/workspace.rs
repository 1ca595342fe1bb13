//! Workspace subcommands (`repo.workspace.*`)

use std::sync::Arc;

use crate::error::JjError;
use crate::parser;
use crate::runner::Runner;

/// Manages jj workspaces
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    runner: Arc<Runner>,
}

impl WorkspaceManager {
    pub(crate) fn new(runner: Arc<Runner>) -> Self {
        Self { runner }
    }

    /// Add a new workspace at `path`, named `name` if given.
    pub async fn add(&self, path: &str, name: Option<&str>) -> Result<(), JjError> {
        let mut args = vec!["workspace", "add", path];
        if let Some(name) = name {
            args.extend(["--name", name]);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Forget workspaces.
    pub async fn forget(&self, names: &[&str]) -> Result<(), JjError> {
        let mut args = vec!["workspace", "forget"];
        args.extend_from_slice(names);
        self.runner.run(&args).await?;
        Ok(())
    }

    /// List workspace names.
    pub async fn list(&self) -> Result<Vec<String>, JjError> {
        let result = self.runner.run(&["workspace", "list"]).await?;
        Ok(parser::parse_workspace_list(&result.stdout))
    }

    /// Return the root path of the current workspace.
    pub async fn root(&self) -> Result<String, JjError> {
        let result = self.runner.run(&["workspace", "root"]).await?;
        Ok(result.stdout.trim().to_string())
    }

    /// Update a stale workspace.
    pub async fn update_stale(&self) -> Result<(), JjError> {
        self.runner.run(&["workspace", "update-stale"]).await?;
        Ok(())
    }
}

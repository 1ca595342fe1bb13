//! Bookmark subcommands (`repo.bookmark.*`)

use std::sync::Arc;

use crate::constants;
use crate::error::JjError;
use crate::model::Bookmark;
use crate::parser;
use crate::runner::Runner;

/// Manages jj bookmarks
#[derive(Debug, Clone)]
pub struct BookmarkManager {
    runner: Arc<Runner>,
}

impl BookmarkManager {
    pub(crate) fn new(runner: Arc<Runner>) -> Self {
        Self { runner }
    }

    /// List bookmarks, optionally including remote-tracking entries.
    pub async fn list(&self, all_remotes: bool) -> Result<Vec<Bookmark>, JjError> {
        let mut args = vec!["bookmark", "list"];
        if all_remotes {
            args.push("--all-remotes");
        }
        let result = self.runner.run(&args).await?;
        Ok(parser::parse_bookmark_list(&result.stdout))
    }

    /// Create a new bookmark, at `revision` if given.
    pub async fn create(&self, name: &str, revision: Option<&str>) -> Result<(), JjError> {
        let mut args = vec!["bookmark", "create", name];
        if let Some(revision) = revision {
            args.extend(["-r", revision]);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Delete bookmarks.
    pub async fn delete(&self, names: &[&str]) -> Result<(), JjError> {
        let mut args = vec!["bookmark", "delete"];
        args.extend_from_slice(names);
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Forget bookmarks without propagating a deletion to remotes.
    pub async fn forget(&self, names: &[&str]) -> Result<(), JjError> {
        let mut args = vec!["bookmark", "forget"];
        args.extend_from_slice(names);
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Move a bookmark to a different revision.
    pub async fn move_to(&self, name: &str, to: Option<&str>) -> Result<(), JjError> {
        let mut args = vec!["bookmark", "move", name];
        if let Some(to) = to {
            args.extend(["--to", to]);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Set a bookmark (create or move).
    pub async fn set(&self, name: &str, revision: Option<&str>) -> Result<(), JjError> {
        let mut args = vec!["bookmark", "set", name];
        if let Some(revision) = revision {
            args.extend(["-r", revision]);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Rename a bookmark.
    pub async fn rename(&self, old: &str, new: &str) -> Result<(), JjError> {
        self.runner.run(&["bookmark", "rename", old, new]).await?;
        Ok(())
    }

    /// Start tracking a remote bookmark (remote defaults to "origin").
    pub async fn track(&self, bookmark: &str, remote: Option<&str>) -> Result<(), JjError> {
        let target = format!("{bookmark}@{}", remote.unwrap_or(constants::DEFAULT_REMOTE));
        self.runner.run(&["bookmark", "track", &target]).await?;
        Ok(())
    }

    /// Stop tracking a remote bookmark (remote defaults to "origin").
    pub async fn untrack(&self, bookmark: &str, remote: Option<&str>) -> Result<(), JjError> {
        let target = format!("{bookmark}@{}", remote.unwrap_or(constants::DEFAULT_REMOTE));
        self.runner.run(&["bookmark", "untrack", &target]).await?;
        Ok(())
    }
}

//! Repository facade
//!
//! [`Repo`] is the main entry point: it owns one [`Runner`] shared with all
//! feature managers and exposes repository-level query and mutation
//! operations. Every query re-runs jj; nothing is cached.

use std::path::PathBuf;
use std::sync::Arc;

use crate::bookmark::BookmarkManager;
use crate::constants;
use crate::error::JjError;
use crate::executor::{CommandOutput, Executor};
use crate::git::GitManager;
use crate::model::{Change, DiffSummary};
use crate::operation::OperationManager;
use crate::parser;
use crate::runner::Runner;
use crate::template::Templates;
use crate::workspace::WorkspaceManager;

/// Working copy status: current change plus diff summary.
///
/// Composed from two independent jj calls with no transactional guarantee
/// between them; if the repository mutates concurrently the two halves may
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub working_copy: Change,
    pub diff: DiffSummary,
}

/// Options for [`Repo::log`]
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Revset selecting changes (defaults to "@")
    pub revset: Option<String>,
    /// Maximum number of changes to return
    pub limit: Option<usize>,
}

/// Revision selection shared by [`Repo::diff`], [`Repo::diff_git`], and
/// [`Repo::restore`]
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub revision: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Options for [`Repo::new_change`]
#[derive(Debug, Clone, Default)]
pub struct NewOptions {
    pub message: Option<String>,
    pub insert_before: bool,
    pub insert_after: bool,
}

/// Options for [`Repo::squash`]
#[derive(Debug, Clone, Default)]
pub struct SquashOptions {
    pub revision: Option<String>,
    /// Squash into this revision instead of the parent
    pub into: Option<String>,
    pub message: Option<String>,
}

/// Options for [`Repo::rebase`]
#[derive(Debug, Clone, Default)]
pub struct RebaseOptions {
    pub revision: Option<String>,
    pub source: Option<String>,
    pub branch: Option<String>,
}

/// Options for [`Repo::restore`]
#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    pub revision: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Main entry point for interacting with a jj repository
pub struct Repo {
    runner: Arc<Runner>,
    pub bookmark: BookmarkManager,
    pub git: GitManager,
    pub workspace: WorkspaceManager,
    pub op: OperationManager,
}

impl Repo {
    /// Open the repository containing the current directory.
    pub fn new() -> Result<Self, JjError> {
        Self::with_options(None, constants::JJ_COMMAND, None)
    }

    /// Open the repository at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JjError> {
        Self::with_options(Some(path.into()), constants::JJ_COMMAND, None)
    }

    /// Open a repository with a custom jj binary and/or transport.
    pub fn with_options(
        path: Option<PathBuf>,
        jj_path: &str,
        executor: Option<Arc<dyn Executor>>,
    ) -> Result<Self, JjError> {
        let runner = match executor {
            Some(executor) => Runner::with_executor(jj_path, path, executor)?,
            None => Runner::new(jj_path, path)?,
        };
        let runner = Arc::new(runner);
        Ok(Self {
            bookmark: BookmarkManager::new(runner.clone()),
            git: GitManager::new(runner.clone()),
            workspace: WorkspaceManager::new(runner.clone()),
            op: OperationManager::new(runner.clone()),
            runner,
        })
    }

    /// The runner shared by this repository and its managers
    pub fn runner(&self) -> &Arc<Runner> {
        &self.runner
    }

    // -- Escape hatch -------------------------------------------------------

    /// Run an arbitrary jj command and return the raw output.
    ///
    /// No exit-code checking: failure is observable only via
    /// [`CommandOutput::exit_code`].
    pub async fn run(&self, args: &[&str]) -> Result<CommandOutput, JjError> {
        self.runner.run_unchecked(args).await
    }

    // -- Query commands -----------------------------------------------------

    /// Return changes matching a revset (defaults to "@").
    pub async fn log(&self, options: LogOptions) -> Result<Vec<Change>, JjError> {
        let template = Templates::change_list();
        let revset = options.revset.as_deref().unwrap_or("@");
        let limit_s;
        let mut args = vec!["log", "--no-graph", "-T", template.as_str(), "-r", revset];
        if let Some(limit) = options.limit {
            limit_s = limit.to_string();
            args.extend(["-n", limit_s.as_str()]);
        }
        let result = self.runner.run(&args).await?;
        parser::parse_changes(&result.stdout)
    }

    /// Show a single change.
    pub async fn show(&self, rev: &str) -> Result<Change, JjError> {
        let args = [
            "log",
            "--no-graph",
            "-T",
            Templates::change(),
            "-r",
            rev,
            "-n",
            "1",
        ];
        let result = self.runner.run(&args).await?;
        parser::parse_change(&result.stdout)
    }

    /// Return a parsed diff summary.
    pub async fn diff(&self, options: DiffOptions) -> Result<DiffSummary, JjError> {
        let args = diff_args(["diff", "--summary"], &options.revision, &options.from, &options.to);
        let result = self.runner.run(&args).await?;
        parser::parse_diff_summary(&result.stdout)
    }

    /// Return a raw git-format diff.
    pub async fn diff_git(&self, options: DiffOptions) -> Result<String, JjError> {
        let args = diff_args(["diff", "--git"], &options.revision, &options.from, &options.to);
        let result = self.runner.run(&args).await?;
        Ok(result.stdout)
    }

    /// Return the working copy status (change metadata plus diff summary).
    pub async fn status(&self) -> Result<Status, JjError> {
        let working_copy = self.show("@").await?;
        let diff = self.diff(DiffOptions::default()).await?;
        Ok(Status { working_copy, diff })
    }

    /// List tracked files, at `revision` if given.
    pub async fn file_list(&self, revision: Option<&str>) -> Result<Vec<String>, JjError> {
        let mut args = vec!["file", "list"];
        if let Some(revision) = revision {
            args.extend(["-r", revision]);
        }
        let result = self.runner.run(&args).await?;
        Ok(result
            .stdout
            .trim()
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    // -- Mutation commands --------------------------------------------------

    /// Create a new change on top of the given revisions. Returns the new
    /// working copy change.
    pub async fn new_change(
        &self,
        revisions: &[&str],
        options: NewOptions,
    ) -> Result<Change, JjError> {
        let mut args = vec!["new"];
        args.extend_from_slice(revisions);
        if let Some(message) = options.message.as_deref() {
            args.extend(["-m", message]);
        }
        if options.insert_before {
            args.push("--insert-before");
        }
        if options.insert_after {
            args.push("--insert-after");
        }
        self.runner.run(&args).await?;
        self.show("@").await
    }

    /// Set the description of a revision. Returns the updated change.
    pub async fn describe(
        &self,
        revision: &str,
        message: &str,
        reset_author: bool,
    ) -> Result<Change, JjError> {
        let mut args = vec!["describe", revision, "-m", message];
        if reset_author {
            args.push("--reset-author");
        }
        self.runner.run(&args).await?;
        self.show(revision).await
    }

    /// Finalize the working copy under `message` and start a new change.
    /// Returns the finalized change.
    pub async fn commit(&self, message: &str) -> Result<Change, JjError> {
        self.runner.run(&["commit", "-m", message]).await?;
        self.show("@-").await
    }

    /// Set the working copy to the given revision.
    pub async fn edit(&self, revision: &str) -> Result<(), JjError> {
        self.runner.run(&["edit", revision]).await?;
        Ok(())
    }

    /// Squash a change into its parent (or into a specific revision).
    pub async fn squash(&self, options: SquashOptions) -> Result<(), JjError> {
        let mut args = vec!["squash"];
        if let Some(revision) = options.revision.as_deref() {
            args.extend(["-r", revision]);
        }
        if let Some(into) = options.into.as_deref() {
            args.extend(["--into", into]);
        }
        if let Some(message) = options.message.as_deref() {
            args.extend(["-m", message]);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Split a change by file paths (interactive split not supported).
    pub async fn split(&self, revision: Option<&str>, files: &[&str]) -> Result<(), JjError> {
        let mut args = vec!["split"];
        if let Some(revision) = revision {
            args.extend(["-r", revision]);
        }
        args.push("--");
        args.extend_from_slice(files);
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Rebase revisions onto a destination.
    pub async fn rebase(&self, destination: &str, options: RebaseOptions) -> Result<(), JjError> {
        let mut args = vec!["rebase", "-d", destination];
        if let Some(revision) = options.revision.as_deref() {
            args.extend(["-r", revision]);
        }
        if let Some(source) = options.source.as_deref() {
            args.extend(["-s", source]);
        }
        if let Some(branch) = options.branch.as_deref() {
            args.extend(["-b", branch]);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Abandon revisions (defaults to the working copy).
    pub async fn abandon(&self, revisions: &[&str]) -> Result<(), JjError> {
        let mut args = vec!["abandon"];
        if revisions.is_empty() {
            args.push("@");
        } else {
            args.extend_from_slice(revisions);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Restore file contents from another revision.
    pub async fn restore(&self, options: RestoreOptions) -> Result<(), JjError> {
        let mut args = vec!["restore"];
        if let Some(revision) = options.revision.as_deref() {
            args.extend(["-r", revision]);
        }
        if let Some(from) = options.from.as_deref() {
            args.extend(["--from", from]);
        }
        if let Some(to) = options.to.as_deref() {
            args.extend(["--to", to]);
        }
        self.runner.run(&args).await?;
        Ok(())
    }

    /// Duplicate revisions (defaults to the working copy). Returns the
    /// duplicated changes.
    pub async fn duplicate(&self, revisions: &[&str]) -> Result<Vec<Change>, JjError> {
        let mut args = vec!["duplicate"];
        if revisions.is_empty() {
            args.push("@");
        } else {
            args.extend_from_slice(revisions);
        }
        self.runner.run(&args).await?;
        self.log(LogOptions {
            revset: Some("latest(@-..)".to_string()),
            limit: Some(revisions.len().max(1)),
        })
        .await
    }

    /// Undo the last operation.
    pub async fn undo(&self) -> Result<(), JjError> {
        self.runner.run(&["undo"]).await?;
        Ok(())
    }
}

/// Shared flag emission for revision/from/to selection
fn diff_args<'a>(
    base: [&'a str; 2],
    revision: &'a Option<String>,
    from: &'a Option<String>,
    to: &'a Option<String>,
) -> Vec<&'a str> {
    let mut args = base.to_vec();
    if let Some(revision) = revision.as_deref() {
        args.extend(["-r", revision]);
    }
    if let Some(from) = from.as_deref() {
        args.extend(["--from", from]);
    }
    if let Some(to) = to.as_deref() {
        args.extend(["--to", to]);
    }
    args
}

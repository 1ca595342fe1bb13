//! Git interop subcommands (`repo.git.*`): push/fetch, remotes, clone, and
//! bundle plumbing

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants;
use crate::error::JjError;
use crate::executor::{CommandOutput, Executor};
use crate::model::GitRemote;
use crate::parser;
use crate::repo::Repo;
use crate::runner::Runner;

/// Options for `jj git push`
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// Push to this remote instead of the default
    pub remote: Option<String>,
    /// Push only this bookmark
    pub bookmark: Option<String>,
    /// Push all bookmarks
    pub all_bookmarks: bool,
    /// Push the bookmark generated for this change
    pub change: Option<String>,
}

/// Options for `jj git fetch`
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Fetch from this remote instead of the default
    pub remote: Option<String>,
    /// Fetch from every configured remote
    pub all_remotes: bool,
}

/// Options for [`GitManager::clone`]
#[derive(Clone)]
pub struct CloneOptions {
    /// jj binary used for the clone and the returned repository
    pub jj_path: String,
    /// Transport for the clone and the returned repository
    pub executor: Option<Arc<dyn Executor>>,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            jj_path: constants::JJ_COMMAND.to_string(),
            executor: None,
        }
    }
}

/// Manages jj git interop
#[derive(Debug, Clone)]
pub struct GitManager {
    runner: Arc<Runner>,
}

impl GitManager {
    pub(crate) fn new(runner: Arc<Runner>) -> Self {
        Self { runner }
    }

    /// Push to a git remote. Returns the command output (jj reports push
    /// progress on stderr).
    pub async fn push(&self, options: PushOptions) -> Result<String, JjError> {
        let mut args = vec!["git", "push"];
        if let Some(remote) = options.remote.as_deref() {
            args.extend(["--remote", remote]);
        }
        if let Some(bookmark) = options.bookmark.as_deref() {
            args.extend(["-b", bookmark]);
        }
        if options.all_bookmarks {
            args.push("--all");
        }
        if let Some(change) = options.change.as_deref() {
            args.extend(["-c", change]);
        }
        let result = self.runner.run(&args).await?;
        Ok(result.stderr + &result.stdout)
    }

    /// Fetch from a git remote. Returns the command output.
    pub async fn fetch(&self, options: FetchOptions) -> Result<String, JjError> {
        let mut args = vec!["git", "fetch"];
        if let Some(remote) = options.remote.as_deref() {
            args.extend(["--remote", remote]);
        }
        if options.all_remotes {
            args.push("--all-remotes");
        }
        let result = self.runner.run(&args).await?;
        Ok(result.stderr + &result.stdout)
    }

    /// Clone a git repository and return a [`Repo`] bound to the clone.
    ///
    /// The clone runs with no repository binding; the returned repository
    /// points at `destination`, or at a directory named after the URL's
    /// final path segment with any trailing ".git" stripped.
    pub async fn clone(
        url: &str,
        destination: Option<&Path>,
        options: CloneOptions,
    ) -> Result<Repo, JjError> {
        let runner = match &options.executor {
            Some(executor) => Runner::with_executor(&options.jj_path, None, executor.clone())?,
            None => Runner::new(&options.jj_path, None)?,
        };

        let dest_s;
        let mut args = vec!["git", "clone", url];
        if let Some(destination) = destination {
            dest_s = destination.display().to_string();
            args.push(dest_s.as_str());
        }
        runner.run(&args).await?;

        let clone_path = match destination {
            Some(destination) => destination.to_path_buf(),
            None => PathBuf::from(derive_clone_dir(url)),
        };
        Repo::with_options(Some(clone_path), &options.jj_path, options.executor)
    }

    /// Add a git remote.
    pub async fn remote_add(&self, name: &str, url: &str) -> Result<(), JjError> {
        self.runner.run(&["git", "remote", "add", name, url]).await?;
        Ok(())
    }

    /// Remove a git remote.
    pub async fn remote_remove(&self, name: &str) -> Result<(), JjError> {
        self.runner.run(&["git", "remote", "remove", name]).await?;
        Ok(())
    }

    /// Rename a git remote.
    pub async fn remote_rename(&self, old: &str, new: &str) -> Result<(), JjError> {
        self.runner
            .run(&["git", "remote", "rename", old, new])
            .await?;
        Ok(())
    }

    /// Set the URL of a git remote.
    pub async fn remote_set_url(&self, name: &str, url: &str) -> Result<(), JjError> {
        self.runner
            .run(&["git", "remote", "set-url", name, url])
            .await?;
        Ok(())
    }

    /// List configured git remotes.
    pub async fn remote_list(&self) -> Result<Vec<GitRemote>, JjError> {
        let result = self.runner.run(&["git", "remote", "list"]).await?;
        Ok(parser::parse_remote_list(&result.stdout))
    }

    /// Export jj refs to the underlying git repository.
    pub async fn export(&self) -> Result<(), JjError> {
        self.runner.run(&["git", "export"]).await?;
        Ok(())
    }

    /// Import git refs into jj.
    pub async fn import(&self) -> Result<(), JjError> {
        self.runner.run(&["git", "import"]).await?;
        Ok(())
    }

    // Bundle operations drive the underlying git repository directly; jj
    // does not expose bundle plumbing.

    /// Create a git bundle from the underlying repository.
    ///
    /// Exports jj refs to git first. With no explicit refs the bundle
    /// covers `--all`. Returns the bundle path.
    pub async fn bundle_create(&self, path: &str, refs: &[&str]) -> Result<String, JjError> {
        self.export().await?;
        let mut args = vec!["bundle", "create", path];
        if refs.is_empty() {
            args.push("--all");
        } else {
            args.extend_from_slice(refs);
        }
        check_git(self.git_cmd(&args).await?)?;
        Ok(path.to_string())
    }

    /// Fetch refs from a bundle file, then import them into jj.
    ///
    /// `git fetch <bundle> <refspec>` unpacks objects and creates refs in
    /// one step; the default refspec `+refs/*:refs/*` maps every bundle ref
    /// into the local ref namespace.
    pub async fn bundle_unbundle(&self, path: &str, refspec: Option<&str>) -> Result<(), JjError> {
        let refspec = refspec.unwrap_or(constants::BUNDLE_REFSPEC);
        check_git(self.git_cmd(&["fetch", path, refspec]).await?)?;
        self.import().await
    }

    /// Verify a bundle file. Returns git's verification report.
    pub async fn bundle_verify(&self, path: &str) -> Result<String, JjError> {
        let result = check_git(self.git_cmd(&["bundle", "verify", path]).await?)?;
        Ok(format!("{}{}", result.stdout, result.stderr)
            .trim()
            .to_string())
    }

    async fn workspace_root(&self) -> Result<String, JjError> {
        let result = self.runner.run(&["workspace", "root"]).await?;
        Ok(result.stdout.trim().to_string())
    }

    /// Run a raw git command against the repository's working root
    async fn git_cmd(&self, args: &[&str]) -> Result<CommandOutput, JjError> {
        let root = self.workspace_root().await?;
        let mut cmd = vec![
            constants::GIT_COMMAND.to_string(),
            "-C".to_string(),
            root,
        ];
        cmd.extend(args.iter().map(|s| s.to_string()));
        self.runner.executor().execute(&cmd).await
    }
}

/// Replicate the runner's error shaping for plumbing-level git calls
fn check_git(result: CommandOutput) -> Result<CommandOutput, JjError> {
    if result.success() {
        return Ok(result);
    }
    Err(JjError::CommandFailed {
        exit_code: result.exit_code,
        stderr: result.stderr.trim().to_string(),
        command: result.args,
    })
}

/// Last path segment of `url`, with any trailing ".git" stripped
fn derive_clone_dir(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    name.strip_suffix(".git").unwrap_or(name).to_string()
}

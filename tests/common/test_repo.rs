//! TestRepo helper for live-jj integration tests.
//!
//! Provides a temporary jj repository, cleaned up on drop.

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// A temporary jj repository for testing.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new jj repository in a temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if `jj git init` fails; gate callers with `skip_if_no_jj!`.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp directory");

        let output = Command::new("jj")
            .args(["git", "init"])
            .current_dir(dir.path())
            .output()
            .expect("failed to execute jj git init");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("jj git init failed: {}", stderr);
        }

        Self { dir }
    }

    /// Path to the repository root.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Execute a jj command in this repository, panicking on failure.
    pub fn jj(&self, args: &[&str]) -> String {
        let output = Command::new("jj")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("failed to execute jj command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "jj {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent directories");
        }
        std::fs::write(&path, content).expect("failed to write file");
    }

    /// Get the description of a revision.
    pub fn get_description(&self, rev: &str) -> String {
        self.jj(&["log", "-r", rev, "--no-graph", "-T", "description"])
            .trim()
            .to_string()
    }

    /// Count the number of changes matching a revset.
    pub fn count_changes(&self, revset: &str) -> usize {
        self.jj(&["log", "-r", revset, "--no-graph", "-T", "\"x\""])
            .matches('x')
            .count()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

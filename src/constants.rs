//! jj-specific constants
//!
//! Centralized definitions for binary names, global flags, and error
//! detection patterns.

/// jj command binary name
pub const JJ_COMMAND: &str = "jj";

/// git plumbing binary name (bundle operations only)
pub const GIT_COMMAND: &str = "git";

/// docker binary name
pub const DOCKER_COMMAND: &str = "docker";

/// Remote assumed when none is given to track/untrack
pub const DEFAULT_REMOTE: &str = "origin";

/// Refspec mapping every bundle ref into the local ref namespace
pub const BUNDLE_REFSPEC: &str = "+refs/*:refs/*";

/// Global jj flags added to every invocation
pub mod flags {
    /// Disable the pager (global flag, safe for all commands)
    pub const NO_PAGER: &str = "--no-pager";
    /// Disable color output for parsing
    pub const COLOR: &str = "--color";
    pub const COLOR_NEVER: &str = "never";
    /// Specify repository path
    pub const REPOSITORY: &str = "--repository";
}

/// Error detection patterns in jj output
pub mod errors {
    /// stderr fragments that signal "no repository here"
    pub const REPO_NOT_FOUND_HINTS: [&str; 3] = [
        "There is no jj repo",
        "No repo found",
        "is not a valid jj repo",
    ];
}

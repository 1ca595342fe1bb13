//! Common test utilities: a scripted executor and repository helpers.
//!
//! Note: Each integration test file compiles as a separate crate, so not
//! all helpers are used in every test file.

#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(unused_macros)]

pub mod test_repo;

pub use test_repo::TestRepo;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jj_client::{CommandOutput, Executor, JjError, Repo, Runner};
use serde_json::{Value, json};

/// Any binary resolvable on PATH satisfies the runner's existence check;
/// the mock intercepts execution before anything is spawned.
pub const FAKE_JJ: &str = "sh";

/// Executor that records calls and returns queued results.
#[derive(Debug, Default)]
pub struct MockExecutor {
    calls: Mutex<Vec<Vec<String>>>,
    responses: Mutex<VecDeque<CommandOutput>>,
}

impl MockExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the result returned by the next execute() call.
    pub fn queue(&self, stdout: &str, stderr: &str, exit_code: i32) {
        self.responses.lock().unwrap().push_back(CommandOutput {
            args: Vec::new(),
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        });
    }

    pub fn queue_ok(&self, stdout: &str) {
        self.queue(stdout, "", 0);
    }

    /// All argument vectors seen so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// The nth recorded argument vector.
    pub fn call(&self, index: usize) -> Vec<String> {
        self.calls()[index].clone()
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn execute(&self, cmd: &[String]) -> Result<CommandOutput, JjError> {
        self.calls.lock().unwrap().push(cmd.to_vec());
        let mut output = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(CommandOutput {
                args: Vec::new(),
                exit_code: 0,
                stdout: String::new(),
                stderr: String::new(),
            });
        output.args = cmd.to_vec();
        Ok(output)
    }
}

pub fn make_runner(executor: &Arc<MockExecutor>) -> Runner {
    Runner::with_executor(FAKE_JJ, None, executor.clone()).expect("runner construction")
}

pub fn make_repo(executor: &Arc<MockExecutor>) -> Repo {
    Repo::with_options(None, FAKE_JJ, Some(executor.clone() as Arc<dyn Executor>))
        .expect("repo construction")
}

pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Template JSON fixtures
// ---------------------------------------------------------------------------

pub fn signature_json() -> Value {
    json!({
        "name": "Test User",
        "email": "test@example.com",
        "timestamp": "2025-01-15T10:30:00+00:00",
    })
}

pub fn change_json(change_id: &str) -> Value {
    json!({
        "base": {
            "change_id": change_id,
            "commit_id": "deadbeef",
            "parents": ["00000000"],
            "description": "test change",
            "author": signature_json(),
            "committer": signature_json(),
        },
        "bookmarks": [],
        "local_bookmarks": [],
        "tags": [],
        "empty": false,
        "conflict": false,
        "hidden": false,
    })
}

/// Render one change as `jj log -T <change template>` would emit it.
pub fn change_stdout(value: &Value) -> String {
    value.to_string()
}

/// Render changes as the list template would emit them, separator included.
pub fn changes_stdout(values: &[Value]) -> String {
    values.iter().map(|v| format!("{v}<<JJ_SEP>>")).collect()
}

/// Skip a live-jj test when the binary is unavailable.
///
/// Bring into scope with `#[macro_use] mod common;`.
macro_rules! skip_if_no_jj {
    () => {
        if which::which("jj").is_err() {
            eprintln!("skipping: jj binary not found on PATH");
            return;
        }
    };
}

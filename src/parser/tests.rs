use serde_json::{Value, json};

use super::*;
use crate::model::DiffStatus;
use crate::template::SEPARATOR;

fn signature_json() -> Value {
    json!({
        "name": "Test User",
        "email": "test@example.com",
        "timestamp": "2025-01-15T10:30:00+00:00",
    })
}

fn change_json(change_id: &str) -> Value {
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

fn changes_stdout(values: &[Value]) -> String {
    values.iter().map(|v| format!("{v}{SEPARATOR}")).collect()
}

#[test]
fn test_parse_change_single() {
    let change = parse_change(&change_json("single1").to_string()).unwrap();
    assert_eq!(change.change_id, "single1");
    assert_eq!(change.description, "test change");
}

#[test]
fn test_parse_change_surrounding_whitespace() {
    let text = format!("  \n{}\n  ", change_json("ws1"));
    assert_eq!(parse_change(&text).unwrap().change_id, "ws1");
}

#[test]
fn test_parse_change_malformed_json() {
    assert!(parse_change("{not json").is_err());
}

#[test]
fn test_parse_changes_empty_input() {
    assert!(parse_changes("").unwrap().is_empty());
    assert!(parse_changes("   \n  ").unwrap().is_empty());
}

#[test]
fn test_parse_changes_multiple_preserve_order() {
    let output = changes_stdout(&[
        change_json("first"),
        change_json("second"),
        change_json("third"),
    ]);
    let ids: Vec<String> = parse_changes(&output)
        .unwrap()
        .into_iter()
        .map(|c| c.change_id)
        .collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_parse_changes_trailing_separator_ignored() {
    let output = format!("{}{SEPARATOR}", change_json("trail"));
    let changes = parse_changes(&output).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_id, "trail");
}

#[test]
fn test_parse_diff_summary_statuses() {
    let summary = parse_diff_summary("M foo.py\nA bar.py\n").unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary.entries[0].status, DiffStatus::Modified);
    assert_eq!(summary.entries[0].path, "foo.py");
    assert!(summary.entries[0].from_path.is_none());
    assert_eq!(summary.entries[1].status, DiffStatus::Added);
    assert_eq!(summary.entries[1].path, "bar.py");
}

#[test]
fn test_parse_diff_summary_rename() {
    let summary = parse_diff_summary("R {old.py => new.py}\n").unwrap();
    assert_eq!(summary.len(), 1);
    let entry = &summary.entries[0];
    assert_eq!(entry.status, DiffStatus::Renamed);
    assert_eq!(entry.path, "new.py");
    assert_eq!(entry.from_path.as_deref(), Some("old.py"));
}

#[test]
fn test_parse_diff_summary_rename_without_braces() {
    let summary = parse_diff_summary("R old.py => new.py\n").unwrap();
    let entry = &summary.entries[0];
    assert_eq!(entry.path, "new.py");
    assert_eq!(entry.from_path.as_deref(), Some("old.py"));
}

#[test]
fn test_parse_diff_summary_empty_input() {
    assert!(parse_diff_summary("").unwrap().is_empty());
    assert!(parse_diff_summary("   \n\n  ").unwrap().is_empty());
}

#[test]
fn test_parse_diff_summary_extra_whitespace() {
    let summary = parse_diff_summary("  M  foo.py  \n  D  bar.py  \n").unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary.entries[0].path, "foo.py");
    assert_eq!(summary.entries[1].status, DiffStatus::Deleted);
}

#[test]
fn test_parse_diff_summary_unknown_status() {
    assert!(parse_diff_summary("? mystery.py\n").is_err());
}

#[test]
fn test_parse_op_log_two_entries() {
    let output = "\
abc123def456 user@host 5 minutes ago
describe commit 1234
args: jj describe -m 'fix'

fedcba654321 user@host 10 minutes ago
new empty commit
args: jj new
";
    let operations = parse_op_log(output);
    assert_eq!(operations.len(), 2);
    assert_eq!(operations[0].id, "abc123def456");
    assert_eq!(operations[0].user, "user@host");
    assert_eq!(operations[0].time, "5 minutes ago");
    assert_eq!(operations[0].description, "describe commit 1234");
    assert_eq!(operations[0].tags, "jj describe -m 'fix'");
    assert_eq!(operations[1].description, "new empty commit");
    assert_eq!(operations[1].tags, "jj new");
}

#[test]
fn test_parse_op_log_root_operation() {
    let operations = parse_op_log("000000000000 root()\n");
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0].id, "000000000000");
    assert_eq!(operations[0].user, "root()");
    assert_eq!(operations[0].time, "");
    assert_eq!(operations[0].description, "");
    assert_eq!(operations[0].tags, "");
}

#[test]
fn test_parse_op_log_multiline_description() {
    let output = "\
abc123 user@host 1 hour ago
first line
second line
";
    let operations = parse_op_log(output);
    assert_eq!(operations[0].description, "first line\nsecond line");
}

#[test]
fn test_parse_op_log_args_prefix_always_diverted() {
    // a body line that happens to start with "args: " is still treated as
    // the recorded command, matching jj's own output shape
    let output = "\
abc123 user@host 1 hour ago
args: anything at all
";
    let operations = parse_op_log(output);
    assert_eq!(operations[0].description, "");
    assert_eq!(operations[0].tags, "anything at all");
}

#[test]
fn test_parse_op_log_empty_input() {
    assert!(parse_op_log("").is_empty());
    assert!(parse_op_log("\n\n  \n").is_empty());
}

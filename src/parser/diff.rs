//! Diff summary parser (`jj diff --summary`)

use std::sync::LazyLock;

use regex::Regex;

use crate::error::JjError;
use crate::model::{DiffEntry, DiffStatus, DiffSummary};

/// Matches the rename payload `{old => new}`; the braces are optional and
/// both sides are captured with surrounding whitespace intact.
static RENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{?(.+?) => (.+?)\}?$").expect("invalid rename regex"));

/// Parse `jj diff --summary` output.
///
/// Each non-blank line is `<status> <path>`; renames look like
/// `R {old.py => new.py}`. Blank lines are skipped and emission order is
/// preserved.
pub fn parse_diff_summary(output: &str) -> Result<DiffSummary, JjError> {
    let mut entries = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut chars = line.chars();
        let Some(code) = chars.next() else {
            continue;
        };
        let rest = chars.as_str().trim();
        let Some(status) = DiffStatus::from_code(code) else {
            return Err(JjError::Parse(format!(
                "unknown diff status in line {line:?}"
            )));
        };

        if status == DiffStatus::Renamed
            && let Some(caps) = RENAME_REGEX.captures(rest)
        {
            entries.push(DiffEntry {
                status,
                path: caps[2].trim().to_string(),
                from_path: Some(caps[1].trim().to_string()),
            });
            continue;
        }

        entries.push(DiffEntry {
            status,
            path: rest.to_string(),
            from_path: None,
        });
    }
    Ok(DiffSummary { entries })
}

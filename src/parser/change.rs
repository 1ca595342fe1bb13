//! Change JSON parsers (template output)

use serde_json::Value;

use crate::error::JjError;
use crate::model::Change;
use crate::template::SEPARATOR;

/// Parse a single change from template JSON output
pub fn parse_change(output: &str) -> Result<Change, JjError> {
    let value: Value = serde_json::from_str(output.trim())?;
    Change::from_json(&value)
}

/// Parse multiple changes separated by the template sentinel.
///
/// Segments are trimmed and empty segments skipped, so a trailing separator
/// with nothing after it produces no entry.
pub fn parse_changes(output: &str) -> Result<Vec<Change>, JjError> {
    let output = output.trim();
    if output.is_empty() {
        return Ok(Vec::new());
    }
    let mut changes = Vec::new();
    for part in output.split(SEPARATOR) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(part)?;
        changes.push(Change::from_json(&value)?);
    }
    Ok(changes)
}

//! Parser for `jj bookmark list` output

use crate::model::Bookmark;

/// Parse `jj bookmark list` output.
///
/// Lines look like `name: change_id commit_id`, `name (deleted)`, or
/// `name@remote: ...` for remote-tracking entries.
pub fn parse_bookmark_list(output: &str) -> Vec<Bookmark> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let name = line.split(':').next().unwrap_or(line).trim();
            let present = !line.contains("(deleted)");
            match name.split_once('@') {
                Some((base, remote)) => Bookmark {
                    name: base.to_string(),
                    present,
                    tracking: Some(remote.to_string()),
                },
                None => Bookmark {
                    name: name.to_string(),
                    present,
                    tracking: None,
                },
            }
        })
        .collect()
}

//! Parser for `jj git remote list` output

use crate::model::GitRemote;

/// Parse `jj git remote list` output.
///
/// Each non-blank line is `<name> <url>`; the url defaults to empty when
/// the line has only one token.
pub fn parse_remote_list(output: &str) -> Vec<GitRemote> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or("").to_string();
            let url = parts.next().map(str::trim).unwrap_or("").to_string();
            GitRemote { name, url }
        })
        .collect()
}

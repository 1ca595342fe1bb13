//! Parser for `jj workspace list` output

/// Parse `jj workspace list` output into workspace names.
///
/// Lines look like `name: change_id (description)`.
pub fn parse_workspace_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(':').next().unwrap_or(line).trim().to_string())
        .collect()
}

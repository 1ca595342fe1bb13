//! Operation log parser (`jj operation log --no-graph`)

use crate::model::Operation;

/// Prefix marking the line that records the invoking command
const ARGS_PREFIX: &str = "args: ";

/// Parse `jj operation log --no-graph` output.
///
/// Entries are separated by blank lines:
///
/// ```text
/// <id> <user@host> <time-description>
/// <description>
/// args: <command args>
/// ```
///
/// The root operation is a bare `<id> root()` header. The `args:` line is
/// diverted into [`Operation::tags`]; all other body lines join with
/// newlines into the description. Order matches jj's emission order.
pub fn parse_op_log(output: &str) -> Vec<Operation> {
    let mut operations = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                operations.push(parse_block(&block));
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        operations.push(parse_block(&block));
    }
    operations
}

fn parse_block(block: &[&str]) -> Operation {
    // header: "<id> <user> <time>"; the time keeps its internal spaces
    let header = block.first().copied().unwrap_or("");
    let (id, rest) = next_token(header);
    let (user, rest) = next_token(rest);
    let time = rest.trim().to_string();

    let mut desc_lines: Vec<&str> = Vec::new();
    let mut tags = String::new();
    for line in block.iter().skip(1) {
        match line.strip_prefix(ARGS_PREFIX) {
            Some(args) => tags = args.to_string(),
            None => desc_lines.push(line),
        }
    }

    Operation {
        id: id.to_string(),
        user: user.to_string(),
        time,
        description: desc_lines.join("\n"),
        tags,
    }
}

/// Split the first whitespace-delimited token off `input`
fn next_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], &input[idx..]),
        None => (input, ""),
    }
}

//! jj template expressions for machine-readable output
//!
//! The change template asks jj to emit one JSON object per change: the
//! tool's native `json(self)` payload under a "base" key, plus fields that
//! `json(self)` does not include.

/// Sentinel emitted after every entry in multi-change output
pub const SEPARATOR: &str = "<<JJ_SEP>>";

/// Templates passed to jj with `-T`
pub struct Templates;

impl Templates {
    /// Template producing one JSON object for a single change
    pub fn change() -> &'static str {
        concat!(
            r#"surround("{", "}", "#,
            r#""\"base\":" ++ json(self)"#,
            r#" ++ ",\"bookmarks\":" ++ json(bookmarks)"#,
            r#" ++ ",\"local_bookmarks\":" ++ json(local_bookmarks)"#,
            r#" ++ ",\"tags\":" ++ json(tags)"#,
            r#" ++ ",\"empty\":" ++ json(empty)"#,
            r#" ++ ",\"conflict\":" ++ json(conflict)"#,
            r#" ++ ",\"hidden\":" ++ json(hidden)"#,
            ")"
        )
    }

    /// Change template plus the entry separator, for multi-change queries
    pub fn change_list() -> String {
        format!("{} ++ \"{}\"", Self::change(), SEPARATOR)
    }
}

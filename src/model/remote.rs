//! Git remote model

/// A configured git remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRemote {
    pub name: String,
    /// Empty when jj's listing carries no url for this remote
    pub url: String,
}

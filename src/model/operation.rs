//! Operation log entry model

/// A jj operation log entry - one recorded mutation to repository state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Operation {
    pub id: String,

    /// Possibly multi-line description
    pub description: String,

    /// Free-text time description, e.g. "5 minutes ago"
    pub time: String,

    /// Free-text user@host string
    pub user: String,

    /// The invoking command's argument string, when jj records one
    pub tags: String,
}

//! Change (commit) metadata and author identity

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::error::JjError;

/// Author or committer identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<FixedOffset>,
}

impl Signature {
    /// Parse from a `json(self)` signature object
    pub fn from_json(data: &Value) -> Result<Self, JjError> {
        let raw: RawSignature = serde_json::from_value(data.clone())?;
        raw.try_into()
    }
}

/// Represents a jj change (similar to a Git commit).
///
/// Constructed fresh on every query and never cached, so two instances with
/// the same change_id may reflect different historical states if the
/// repository moved between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Stable identifier, survives rewrites
    pub change_id: String,

    /// Content hash, changes whenever the contents change
    pub commit_id: String,

    /// Parent change identifiers (empty only for the root change)
    pub parents: Vec<String>,

    pub description: String,

    pub author: Signature,

    pub committer: Signature,

    /// Bookmark names pointing at this change
    pub bookmarks: Vec<String>,

    /// Local-only bookmark names
    pub local_bookmarks: Vec<String>,

    pub tags: Vec<String>,

    /// True when the change has no file modifications
    pub empty: bool,

    pub conflict: bool,

    pub hidden: bool,
}

impl Change {
    /// Build a Change from one template JSON object.
    ///
    /// The payload may wrap the native fields in a "base" envelope or carry
    /// them flattened at the top level; both shapes produce the same record.
    pub fn from_json(data: &Value) -> Result<Self, JjError> {
        let base: RawBase = serde_json::from_value(data.get("base").unwrap_or(data).clone())?;
        Ok(Self {
            change_id: base.change_id,
            commit_id: base.commit_id,
            parents: base.parents,
            description: base.description,
            author: base.author.try_into()?,
            committer: base.committer.try_into()?,
            bookmarks: extract_names(data.get("bookmarks"))?,
            local_bookmarks: extract_names(data.get("local_bookmarks"))?,
            tags: extract_names(data.get("tags"))?,
            empty: bool_field(data, "empty"),
            conflict: bool_field(data, "conflict"),
            hidden: bool_field(data, "hidden"),
        })
    }

    /// Display string for the description
    pub fn display_description(&self) -> &str {
        if self.description.is_empty() {
            "(no description set)"
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSignature {
    name: String,
    email: String,
    timestamp: String,
}

impl TryFrom<RawSignature> for Signature {
    type Error = JjError;

    fn try_from(raw: RawSignature) -> Result<Self, JjError> {
        Ok(Self {
            timestamp: parse_timestamp(&raw.timestamp)?,
            name: raw.name,
            email: raw.email,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawBase {
    change_id: String,
    commit_id: String,
    parents: Vec<String>,
    description: String,
    author: RawSignature,
    committer: RawSignature,
}

/// Ref names in `json(bookmarks)` / `json(tags)` output arrive either as
/// bare strings or as objects carrying a "name" field among others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RefName {
    Plain(String),
    Named { name: String },
}

fn extract_names(value: Option<&Value>) -> Result<Vec<String>, JjError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let refs: Vec<RefName> = serde_json::from_value(value.clone())?;
    Ok(refs
        .into_iter()
        .map(|r| match r {
            RefName::Plain(name) | RefName::Named { name } => name,
        })
        .collect())
}

fn bool_field(data: &Value, key: &str) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Parse an ISO-8601 datetime, offset-aware or naive.
///
/// Accepts RFC 3339 and `%z`-style offsets without a colon; naive
/// timestamps are taken as UTC.
fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, JjError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc().fixed_offset())
        })
        .map_err(|err| JjError::Parse(format!("invalid timestamp {value:?}: {err}")))
}

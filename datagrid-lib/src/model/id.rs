//! Canonical row identifiers

use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Value;

/// Stable identifier for one row.
///
/// Identifiers are always strings. Numeric keys coming from the host data are
/// converted once when rows are ingested, so `1` and `"1"` name the same row.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::RowId;
///
/// assert_eq!(RowId::from(42i64), RowId::from("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an identifier from a cell value.
    ///
    /// Returns `None` for null or blank values so the caller can fall back to
    /// the row's position.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        let text = value.to_text();
        if text.is_empty() { None } else { Some(Self(text)) }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<&String> for RowId {
    fn from(v: &String) -> Self {
        Self(v.clone())
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        Self(v.to_string())
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        Self(v.to_string())
    }
}

impl From<usize> for RowId {
    fn from(v: usize) -> Self {
        Self(v.to_string())
    }
}

impl From<Uuid> for RowId {
    fn from(v: Uuid) -> Self {
        Self(v.to_string())
    }
}

//! Dynamic row record and the `TableRow` access trait

use std::borrow::Cow;
use std::collections::HashMap;

use super::Value;

/// Trait for anything the engine can treat as a row.
///
/// The engine never inspects a row beyond looking up individual fields by
/// key. Missing fields return `None` and are treated the same as `Null`.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use datagrid_lib::model::{TableRow, Value};
///
/// struct TestCase {
///     id: i64,
///     title: String,
/// }
///
/// impl TableRow for TestCase {
///     fn value(&self, key: &str) -> Option<Cow<'_, Value>> {
///         match key {
///             "id" => Some(Cow::Owned(Value::from(self.id))),
///             "title" => Some(Cow::Owned(Value::from(self.title.as_str()))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Returns the value stored under `key`, if any.
    fn value(&self, key: &str) -> Option<Cow<'_, Value>>;
}

/// A map-backed row.
///
/// `Row` holds field values as a `HashMap<String, Value>`. It is the row type
/// most hosts use when records arrive as JSON.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Row, Value};
///
/// let row = Row::new()
///     .set("id", 7i64)
///     .set("title", "Checkout flow");
///
/// assert_eq!(row.get("title"), Some(&Value::from("Checkout flow")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a row from a JSON object.
    ///
    /// Returns `None` if `json` is not an object.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Object(map) => Some(Self::from(map)),
            _ => None,
        }
    }
}

impl From<HashMap<String, Value>> for Row {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = map.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { fields }
    }
}

impl TableRow for Row {
    fn value(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.fields.get(key).map(Cow::Borrowed)
    }
}

impl TableRow for HashMap<String, Value> {
    fn value(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl TableRow for serde_json::Map<String, serde_json::Value> {
    fn value(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(|v| Cow::Owned(Value::from(v.clone())))
    }
}

impl<T: TableRow + ?Sized> TableRow for &T {
    fn value(&self, key: &str) -> Option<Cow<'_, Value>> {
        (**self).value(key)
    }
}

//! Filter persistence.
//!
//! A [`FilterSet`] is saved per table under [`storage_key`] as UTF-8 JSON:
//!
//! ```json
//! { "rules": [ { "field": "status", "operator": "eq", "value": "1" } ], "logic": "AND" }
//! ```
//!
//! [`FilterStore`] backends move raw strings; [`FilterPersistence`] wraps one
//! with the payload codec. Loading is explicit: the host calls
//! [`FilterPersistence::load`] before configuring a table and feeds the
//! result to [`TableOptions::with_saved_filters`](crate::TableOptions::with_saved_filters).

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use log::debug;
use log::warn;

use crate::error::PersistError;
use crate::error::StoreError;
use crate::filter::FilterSet;

/// Prefix of every persisted filter key.
pub const KEY_PREFIX: &str = "tableFilters-";

/// Returns the storage key for a table.
pub fn storage_key(table_id: &str) -> String {
    format!("{}{}", KEY_PREFIX, table_id)
}

/// Backend trait for filter storage.
///
/// Implementations handle raw string storage and retrieval. Calls are
/// synchronous and either succeed or fail immediately.
pub trait FilterStore: Send + Sync {
    /// Read the payload stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous payload.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

/// Serializes a filter set to its persisted JSON form.
pub fn encode(filters: &FilterSet) -> Result<String, serde_json::Error> {
    serde_json::to_string(filters)
}

/// Parses a persisted payload.
///
/// Returns `None` for anything that is not a complete `{ rules, logic }`
/// object with well-formed rules.
pub fn decode(payload: &str) -> Option<FilterSet> {
    match serde_json::from_str::<FilterSet>(payload) {
        Ok(filters) => Some(filters),
        Err(e) => {
            debug!("[persist] rejecting payload: {}", e);
            None
        }
    }
}

/// Saves and restores filter sets by table id.
///
/// # Example
///
/// ```
/// use datagrid_lib::filter::{FilterRule, FilterSet};
/// use datagrid_lib::persist::{FilterPersistence, MemoryStore};
///
/// let persistence = FilterPersistence::new(MemoryStore::new());
/// let filters = FilterSet::all([FilterRule::eq("status", "1")]);
///
/// persistence.save("cases", &filters).unwrap();
/// assert_eq!(persistence.load("cases"), Some(filters));
/// assert_eq!(persistence.load("other"), None);
/// ```
#[derive(Clone)]
pub struct FilterPersistence {
    store: Arc<dyn FilterStore>,
}

impl FilterPersistence {
    /// Create a persistence adapter over the given backend.
    pub fn new(store: impl FilterStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a persistence adapter over a shared backend.
    pub fn from_shared(store: Arc<dyn FilterStore>) -> Self {
        Self { store }
    }

    /// Save the committed filter set of a table.
    pub fn save(&self, table_id: &str, filters: &FilterSet) -> Result<(), PersistError> {
        let payload = encode(filters).map_err(PersistError::Encode)?;
        self.store.write(&storage_key(table_id), &payload)?;
        debug!(
            "[persist] saved {} rule(s) for table '{}'",
            filters.len(),
            table_id
        );
        Ok(())
    }

    /// Restore the filter set of a table.
    ///
    /// Fails soft: a storage error or an unreadable payload is logged and
    /// reported as "nothing saved".
    pub fn load(&self, table_id: &str) -> Option<FilterSet> {
        let key = storage_key(table_id);
        let payload = match self.store.read(&key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                warn!("[persist] failed to read '{}': {}", key, e);
                return None;
            }
        };

        let filters = decode(&payload);
        if filters.is_none() {
            warn!("[persist] ignoring malformed payload under '{}'", key);
        }
        filters
    }

    /// Forget the saved filter set of a table.
    pub fn clear(&self, table_id: &str) -> Result<(), PersistError> {
        self.store.remove(&storage_key(table_id))?;
        Ok(())
    }

    /// Ids of every table with a saved payload, sorted.
    pub fn saved_tables(&self) -> Result<Vec<String>, PersistError> {
        let keys = self.store.keys_with_prefix(KEY_PREFIX)?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect())
    }
}

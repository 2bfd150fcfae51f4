//! Sort stage

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::model::TableRow;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// The single active sort: one column key and a direction.
///
/// # Example
///
/// ```
/// use datagrid_lib::pipeline::{Direction, SortConfig};
///
/// let sort = SortConfig::cycle(None, "title");
/// assert_eq!(sort, Some(SortConfig::asc("title")));
///
/// let sort = SortConfig::cycle(sort.as_ref(), "title");
/// assert_eq!(sort, Some(SortConfig::desc("title")));
///
/// assert_eq!(SortConfig::cycle(sort.as_ref(), "title"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column key to sort by.
    pub key: String,
    /// Sort direction.
    pub direction: Direction,
}

impl SortConfig {
    /// Creates an ascending sort on a key.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a key.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }

    /// Next sort state after a header click on `key`.
    ///
    /// Same key cycles asc → desc → unset; another key starts at asc.
    pub fn cycle(current: Option<&SortConfig>, key: &str) -> Option<SortConfig> {
        match current {
            Some(sort) if sort.key == key => match sort.direction {
                Direction::Asc => Some(SortConfig::desc(key)),
                Direction::Desc => None,
            },
            _ => Some(SortConfig::asc(key)),
        }
    }
}

/// Returns row indices in sorted order.
///
/// The sort is stable and never touches `rows`. Without a sort config the
/// original order is returned as-is.
pub fn sort_indices<R: TableRow>(rows: &[R], sort: Option<&SortConfig>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    let Some(sort) = sort else {
        return order;
    };

    let keys: Vec<SortKey> = rows
        .iter()
        .map(|row| match row.value(&sort.key) {
            Some(value) => SortKey::of(&value),
            None => SortKey::Null,
        })
        .collect();

    order.sort_by(|&a, &b| {
        let ordering = keys[a].cmp(&keys[b]);
        match sort.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
    order
}

/// Returns references to `rows` in sorted order.
pub fn sort<'r, R: TableRow>(rows: &'r [R], sort: Option<&SortConfig>) -> Vec<&'r R> {
    sort_indices(rows, sort)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

/// Type-aware comparison used by the sort stage.
///
/// Values are ranked by class first: null, then numbers, then dates, then
/// text. Within a class numbers compare numerically (NaN sorts last),
/// dates by instant and everything else by [`text_order`] over
/// [`Value::to_text`]. The result is a total order even for columns that
/// mix types.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}

/// Approximates locale collation: case-insensitive first, then raw.
pub fn text_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// One cell reduced to what the sort compares. Computed once per row.
#[derive(Debug)]
enum SortKey {
    Null,
    Number(f64),
    Date(DateTime<Utc>),
    Text { folded: String, raw: String },
}

impl SortKey {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => SortKey::Null,
            Value::DateTime(dt) => SortKey::Date(*dt),
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) => {
                match value.as_number() {
                    Some(n) => SortKey::Number(n),
                    None => SortKey::text(value),
                }
            }
            other => SortKey::text(other),
        }
    }

    fn text(value: &Value) -> Self {
        let raw = value.to_text();
        SortKey::Text {
            folded: raw.to_lowercase(),
            raw,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Number(_) => 1,
            SortKey::Date(_) => 2,
            SortKey::Text { .. } => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (
                SortKey::Text { folded: fa, raw: ra },
                SortKey::Text { folded: fb, raw: rb },
            ) => fa.cmp(fb).then_with(|| ra.cmp(rb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

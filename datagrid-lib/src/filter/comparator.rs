//! Comparator primitives and per-column resolution
//!
//! Every filter operator is built from three primitives: `equal`, `greater`
//! and `includes`. A column may override any of them; the rest fall back to
//! the defaults in this module.
//!
//! All primitives take `(cell, operand)`: the row's value first, the rule's
//! operand (always a `Value::String` coming from the editor) second.

use std::fmt;
use std::sync::Arc;

use crate::error::ComparatorError;
use crate::model::Column;
use crate::model::Value;
use crate::model::parse_number;
use crate::model::parse_timestamp;

/// A comparator override supplied by a column.
pub type CompareFn = Arc<dyn Fn(&Value, &Value) -> Result<bool, ComparatorError> + Send + Sync>;

/// Optional overrides for the three comparator primitives.
///
/// # Example
///
/// ```
/// use datagrid_lib::filter::Comparator;
/// use datagrid_lib::model::Value;
///
/// // Case-insensitive equality for a free-text column.
/// let comparator = Comparator::new().with_equal(|cell, operand| {
///     Ok(cell.to_text().eq_ignore_ascii_case(&operand.to_text()))
/// });
/// assert!(comparator.equal.is_some());
/// ```
#[derive(Clone, Default)]
pub struct Comparator {
    /// Override for `equal`.
    pub equal: Option<CompareFn>,
    /// Override for `greater`.
    pub greater: Option<CompareFn>,
    /// Override for `includes`.
    pub includes: Option<CompareFn>,
}

impl Comparator {
    /// Creates a comparator with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides `equal`.
    pub fn with_equal<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        self.equal = Some(Arc::new(f));
        self
    }

    /// Overrides `greater`.
    pub fn with_greater<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        self.greater = Some(Arc::new(f));
        self
    }

    /// Overrides `includes`.
    pub fn with_includes<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        self.includes = Some(Arc::new(f));
        self
    }

    /// Returns `true` if no primitive is overridden.
    pub fn is_default(&self) -> bool {
        self.equal.is_none() && self.greater.is_none() && self.includes.is_none()
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("equal", &self.equal.as_ref().map(|_| "custom"))
            .field("greater", &self.greater.as_ref().map(|_| "custom"))
            .field("includes", &self.includes.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// The comparator set used for one rule, resolved once per filter pass.
#[derive(Clone, Copy, Default)]
pub struct ResolvedComparator<'a> {
    equal: Option<&'a CompareFn>,
    greater: Option<&'a CompareFn>,
    includes: Option<&'a CompareFn>,
}

impl<'a> ResolvedComparator<'a> {
    /// Resolves the comparator for a column.
    ///
    /// `None` (a rule naming an unknown column) resolves to the defaults.
    pub fn resolve(column: Option<&'a Column>) -> Self {
        match column.map(Column::comparator_overrides) {
            Some(c) => Self {
                equal: c.equal.as_ref(),
                greater: c.greater.as_ref(),
                includes: c.includes.as_ref(),
            },
            None => Self::default(),
        }
    }

    /// Evaluates `equal`. Override errors propagate unchanged.
    pub fn equal(&self, cell: &Value, operand: &Value) -> Result<bool, ComparatorError> {
        match self.equal {
            Some(f) => f(cell, operand),
            None => Ok(default_equal(cell, operand)),
        }
    }

    /// Evaluates `greater`. Override errors propagate unchanged.
    pub fn greater(&self, cell: &Value, operand: &Value) -> Result<bool, ComparatorError> {
        match self.greater {
            Some(f) => f(cell, operand),
            None => Ok(default_greater(cell, operand)),
        }
    }

    /// Evaluates `includes`. Override errors propagate unchanged.
    pub fn includes(&self, cell: &Value, operand: &Value) -> Result<bool, ComparatorError> {
        match self.includes {
            Some(f) => f(cell, operand),
            None => Ok(default_includes(cell, operand)),
        }
    }
}

/// Loose equality on the string coercion of both sides.
pub fn default_equal(cell: &Value, operand: &Value) -> bool {
    cell.to_text() == operand.to_text()
}

/// Substring test on the string coercion of both sides.
pub fn default_includes(cell: &Value, operand: &Value) -> bool {
    cell.to_text().contains(&operand.to_text())
}

/// Native ordering: `cell > operand`.
///
/// Numbers compare numerically and plain strings lexically. A numeric side
/// forces numeric comparison, so a non-numeric string against a number is
/// incomparable and yields `false`. Dates compare by timestamp against an
/// operand that parses as a date. Anything else is incomparable.
pub fn default_greater(cell: &Value, operand: &Value) -> bool {
    match (Ordinal::of(cell), Ordinal::of(operand)) {
        (Ordinal::Number(a), Ordinal::Number(b)) => a > b,
        (Ordinal::Number(a), Ordinal::Text(b)) => parse_number(b).is_some_and(|b| a > b),
        (Ordinal::Text(a), Ordinal::Number(b)) => parse_number(a).is_some_and(|a| a > b),
        (Ordinal::Text(a), Ordinal::Text(b)) => match parse_number(b) {
            Some(b) => parse_number(a).is_some_and(|a| a > b),
            None => a > b,
        },
        (Ordinal::Date(a), Ordinal::Date(b)) => a > b,
        (Ordinal::Date(a), Ordinal::Text(b)) => parse_timestamp(b).is_some_and(|b| a > b),
        (Ordinal::Text(a), Ordinal::Date(b)) => parse_timestamp(a).is_some_and(|a| a > b),
        (Ordinal::Date(a), Ordinal::Number(b)) => (a as f64) > b,
        (Ordinal::Number(a), Ordinal::Date(b)) => a > (b as f64),
        (Ordinal::Incomparable, _) | (_, Ordinal::Incomparable) => false,
    }
}

enum Ordinal<'v> {
    Number(f64),
    Date(i64),
    Text(&'v str),
    Incomparable,
}

impl<'v> Ordinal<'v> {
    fn of(value: &'v Value) -> Self {
        if let Some(n) = value.as_number() {
            return Ordinal::Number(n);
        }
        if let Some(ts) = value.as_timestamp() {
            return Ordinal::Date(ts);
        }
        match value.as_str() {
            Some(s) => Ordinal::Text(s),
            None => Ordinal::Incomparable,
        }
    }
}

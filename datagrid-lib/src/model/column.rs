//! Column descriptors

use crate::error::ComparatorError;
use crate::filter::Comparator;
use crate::filter::FilterRule;
use crate::filter::Operator;

use super::Value;

/// One enumerated choice for a column's value picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Value written into the rule.
    pub value: String,
    /// Text shown in the picker.
    pub label: String,
}

impl Choice {
    /// Creates a choice with a separate label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&str> for Choice {
    fn from(v: &str) -> Self {
        Self::new(v, v)
    }
}

impl From<(&str, &str)> for Choice {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value, label)
    }
}

/// Column configuration.
///
/// A column names the row field it reads (`key`), its header text, whether
/// it can be sorted or filtered, which operators its filter offers, and any
/// comparator overrides.
///
/// # Examples
///
/// ```
/// use datagrid_lib::filter::Operator;
/// use datagrid_lib::model::Column;
///
/// let columns = vec![
///     Column::new("id", "ID").sortable(),
///     Column::new("title", "Title").sortable().filterable(),
///     Column::new("status", "Status")
///         .filterable()
///         .operators([Operator::Eq, Operator::Neq])
///         .select_from([("1", "Active"), ("0", "Archived")]),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Field key (or a synthetic key for computed columns).
    pub key: String,
    /// Column header text.
    pub header: String,
    /// Whether this column is sortable.
    pub sortable: bool,
    /// Whether this column is offered in the filter editor.
    pub filterable: bool,
    operators: Option<Vec<Operator>>,
    select_from: Option<Vec<Choice>>,
    comparator: Comparator,
}

impl Column {
    /// Create a new column.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            filterable: false,
            operators: None,
            select_from: None,
            comparator: Comparator::default(),
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Restrict the operators offered for this column.
    pub fn operators(mut self, operators: impl IntoIterator<Item = Operator>) -> Self {
        self.operators = Some(operators.into_iter().collect());
        self
    }

    /// Offer an enumerated set of values.
    pub fn select_from<C: Into<Choice>>(mut self, choices: impl IntoIterator<Item = C>) -> Self {
        self.select_from = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Replace all comparator overrides.
    pub fn comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Override the `equal` primitive.
    pub fn equal_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        self.comparator = self.comparator.with_equal(f);
        self
    }

    /// Override the `greater` primitive.
    pub fn greater_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        self.comparator = self.comparator.with_greater(f);
        self
    }

    /// Override the `includes` primitive.
    pub fn includes_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        self.comparator = self.comparator.with_includes(f);
        self
    }

    /// Returns the comparator overrides.
    pub fn comparator_overrides(&self) -> &Comparator {
        &self.comparator
    }

    /// Operators offered for this column.
    ///
    /// Falls back to [`Operator::all`] when none were configured.
    pub fn allowed_operators(&self) -> &[Operator] {
        match &self.operators {
            Some(ops) if !ops.is_empty() => ops.as_slice(),
            _ => Operator::all(),
        }
    }

    /// Enumerated values, if the column has any.
    pub fn choices(&self) -> Option<&[Choice]> {
        self.select_from.as_deref()
    }

    /// Seeds a new rule for this column.
    ///
    /// Uses the first allowed operator and the first enumerated value (empty
    /// when the column has no choices).
    pub fn initial_rule(&self) -> FilterRule {
        let operator = self
            .allowed_operators()
            .first()
            .cloned()
            .unwrap_or_default();
        let value = self
            .choices()
            .and_then(|c| c.first())
            .map(|c| c.value.clone())
            .unwrap_or_default();
        FilterRule::new(self.key.clone(), operator, value)
    }
}

//! Filter rule evaluation
//!
//! A [`FilterEvaluator`] resolves each rule's column and comparator once,
//! then tests rows one at a time. Comparator overrides may fail; a failing
//! rule counts as "does not match" for that row and the failure is handed
//! back to the caller instead of aborting the pass.

use std::borrow::Cow;
use std::fmt;

use crate::error::ComparatorError;
use crate::model::Column;
use crate::model::TableRow;
use crate::model::Value;

use super::FilterRule;
use super::FilterSet;
use super::Logic;
use super::Operator;
use super::ResolvedComparator;

/// Applies one operator using the resolved primitives.
pub fn apply_operator(
    operator: &Operator,
    comparator: &ResolvedComparator<'_>,
    cell: &Value,
    operand: &Value,
) -> Result<bool, ComparatorError> {
    match operator {
        Operator::Eq => comparator.equal(cell, operand),
        Operator::Neq => Ok(!comparator.equal(cell, operand)?),
        Operator::Contains => comparator.includes(cell, operand),
        Operator::NotContains => Ok(!comparator.includes(cell, operand)?),
        Operator::Gt => comparator.greater(cell, operand),
        Operator::Gte => {
            Ok(comparator.greater(cell, operand)? || comparator.equal(cell, operand)?)
        }
        Operator::Lt => {
            Ok(!comparator.greater(cell, operand)? && !comparator.equal(cell, operand)?)
        }
        Operator::Lte => Ok(!comparator.greater(cell, operand)?),
        Operator::Unrecognized(_) => Ok(true),
    }
}

/// One rule prepared for evaluation.
struct PreparedRule<'a> {
    rule: &'a FilterRule,
    column: Option<&'a Column>,
    comparator: ResolvedComparator<'a>,
    operand: Value,
}

/// A comparator failure for one `(row, rule)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    /// Position of the failing rule in its filter set.
    pub rule_index: usize,
    /// Key of the column the rule reads.
    pub column: String,
    /// Header of that column, when the column exists.
    pub header: Option<String>,
    /// The comparator's error.
    pub error: ComparatorError,
}

/// Result of testing one row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Whether the row passes the filter set.
    pub matched: bool,
    /// Comparator failures hit while testing this row.
    pub failures: Vec<RuleFailure>,
}

/// Evaluates a [`FilterSet`] against rows.
///
/// # Example
///
/// ```
/// use datagrid_lib::filter::{FilterEvaluator, FilterRule, FilterSet};
/// use datagrid_lib::model::{Column, Row};
///
/// let columns = vec![Column::new("a", "A"), Column::new("b", "B")];
/// let filters = FilterSet::any([FilterRule::eq("a", "1"), FilterRule::eq("b", "2")]);
/// let evaluator = FilterEvaluator::new(&filters, &columns);
///
/// let row = Row::new().set("a", "1").set("b", "3");
/// assert!(evaluator.matches(&row));
/// ```
pub struct FilterEvaluator<'a> {
    rules: Vec<PreparedRule<'a>>,
    logic: Logic,
}

impl<'a> FilterEvaluator<'a> {
    /// Prepares `filters` against the table's columns.
    pub fn new(filters: &'a FilterSet, columns: &'a [Column]) -> Self {
        let rules = filters
            .rules
            .iter()
            .map(|rule| {
                let column = columns.iter().find(|c| c.key == rule.field);
                PreparedRule {
                    rule,
                    column,
                    comparator: ResolvedComparator::resolve(column),
                    operand: Value::String(rule.value.clone()),
                }
            })
            .collect();
        Self {
            rules,
            logic: filters.logic,
        }
    }

    /// Returns `true` if there are no rules (every row matches).
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tests one row, reporting comparator failures.
    ///
    /// `And` stops at the first non-matching rule, `Or` at the first
    /// matching one.
    pub fn evaluate<R: TableRow + ?Sized>(&self, row: &R) -> Evaluation {
        let mut failures = Vec::new();
        if self.rules.is_empty() {
            return Evaluation {
                matched: true,
                failures,
            };
        }

        let mut matched = match self.logic {
            Logic::And => true,
            Logic::Or => false,
        };

        for (index, prepared) in self.rules.iter().enumerate() {
            let cell = row
                .value(&prepared.rule.field)
                .unwrap_or(Cow::Owned(Value::Null));
            let result = apply_operator(
                &prepared.rule.operator,
                &prepared.comparator,
                &cell,
                &prepared.operand,
            );
            let rule_matched = match result {
                Ok(m) => m,
                Err(error) => {
                    failures.push(RuleFailure {
                        rule_index: index,
                        column: prepared.rule.field.clone(),
                        header: prepared.column.map(|c| c.header.clone()),
                        error,
                    });
                    false
                }
            };

            match self.logic {
                Logic::And if !rule_matched => {
                    matched = false;
                    break;
                }
                Logic::Or if rule_matched => {
                    matched = true;
                    break;
                }
                _ => {}
            }
        }

        Evaluation { matched, failures }
    }

    /// Tests one row, discarding failure details.
    pub fn matches<R: TableRow + ?Sized>(&self, row: &R) -> bool {
        self.evaluate(row).matched
    }
}

/// Summary of every comparator failure in one filter pass.
///
/// A pass produces at most one fault. It names the first column that
/// failed and counts all failures, so the message can be shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFault {
    /// Key of the first failing column.
    pub column: String,
    /// Header of the first failing column, when known.
    pub header: Option<String>,
    /// First error message.
    pub message: String,
    /// Number of `(row, rule)` failures in the pass.
    pub failures: usize,
    /// Number of distinct rows with at least one failure.
    pub rows: usize,
}

impl FilterFault {
    fn from_failure(failure: &RuleFailure) -> Self {
        Self {
            column: failure.column.clone(),
            header: failure.header.clone(),
            message: failure.error.message().to_string(),
            failures: 0,
            rows: 0,
        }
    }

    /// Folds one row's failures into the running fault.
    pub(crate) fn record(fault: &mut Option<FilterFault>, failures: &[RuleFailure]) {
        let Some(first) = failures.first() else {
            return;
        };
        let fault = fault.get_or_insert_with(|| FilterFault::from_failure(first));
        fault.failures += failures.len();
        fault.rows += 1;
    }

    /// Display name of the failing column.
    pub fn column_name(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.column)
    }
}

impl fmt::Display for FilterFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.rows == 1 { "row" } else { "rows" };
        write!(
            f,
            "Filter on \"{}\" failed for {} {}: {}",
            self.column_name(),
            self.rows,
            noun,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    fn truth(op: Operator, cell: Value, operand: &str) -> bool {
        let comparator = ResolvedComparator::default();
        apply_operator(&op, &comparator, &cell, &Value::from(operand)).unwrap()
    }

    #[test]
    fn test_operator_truth_table_numbers() {
        assert!(truth(Operator::Eq, Value::Int(10), "10"));
        assert!(truth(Operator::Neq, Value::Int(5), "10"));
        assert!(truth(Operator::Gt, Value::Int(11), "10"));
        assert!(truth(Operator::Gte, Value::Int(10), "10"));
        assert!(!truth(Operator::Gte, Value::Int(5), "10"));
        assert!(truth(Operator::Lt, Value::Int(5), "10"));
        assert!(!truth(Operator::Lt, Value::Int(10), "10"));
        assert!(truth(Operator::Lte, Value::Int(10), "10"));
        assert!(!truth(Operator::Lte, Value::Int(11), "10"));
    }

    #[test]
    fn test_incomparable_values_fall_into_lt() {
        // "abc" is neither greater than nor equal to 10, so the derived
        // operators place it below every number.
        assert!(!truth(Operator::Gte, Value::from("abc"), "10"));
        assert!(!truth(Operator::Gt, Value::from("abc"), "10"));
        assert!(truth(Operator::Lt, Value::from("abc"), "10"));
        assert!(truth(Operator::Lte, Value::from("abc"), "10"));
    }

    #[test]
    fn test_contains_operators() {
        assert!(truth(Operator::Contains, Value::from("login flow"), "flow"));
        assert!(truth(Operator::NotContains, Value::from("login flow"), "cart"));
    }

    #[test]
    fn test_unrecognized_operator_matches() {
        assert!(truth(
            Operator::Unrecognized("between".to_string()),
            Value::Null,
            "x"
        ));
    }

    #[test]
    fn test_logic_decides_partial_matches() {
        let columns = vec![Column::new("a", "A"), Column::new("b", "B")];
        let rules = [FilterRule::eq("a", "1"), FilterRule::eq("b", "2")];
        let row = Row::new().set("a", "1").set("b", "3");

        let all = FilterSet::all(rules.clone());
        assert!(!FilterEvaluator::new(&all, &columns).matches(&row));

        let any = FilterSet::any(rules);
        assert!(FilterEvaluator::new(&any, &columns).matches(&row));
    }

    #[test]
    fn test_unknown_field_reads_as_null() {
        let columns = vec![Column::new("a", "A")];
        let filters = FilterSet::all([FilterRule::eq("ghost", "")]);
        let evaluator = FilterEvaluator::new(&filters, &columns);
        assert!(evaluator.matches(&Row::new().set("a", 1i64)));
    }

    #[test]
    fn test_and_short_circuits_after_failure() {
        let columns = vec![
            Column::new("a", "A").equal_with(|_, _| Err(ComparatorError::new("bad a"))),
            Column::new("b", "B").equal_with(|_, _| Err(ComparatorError::new("bad b"))),
        ];
        let filters = FilterSet::all([FilterRule::eq("a", "1"), FilterRule::eq("b", "2")]);
        let evaluation = FilterEvaluator::new(&filters, &columns).evaluate(&Row::new());
        assert!(!evaluation.matched);
        assert_eq!(evaluation.failures.len(), 1);
        assert_eq!(evaluation.failures[0].header.as_deref(), Some("A"));
    }

    #[test]
    fn test_fault_message_names_column() {
        let failure = RuleFailure {
            rule_index: 0,
            column: "due".to_string(),
            header: Some("Due date".to_string()),
            error: ComparatorError::new("not a date"),
        };
        let mut fault = None;
        FilterFault::record(&mut fault, std::slice::from_ref(&failure));
        FilterFault::record(&mut fault, std::slice::from_ref(&failure));
        let fault = fault.unwrap();
        assert_eq!(fault.rows, 2);
        assert_eq!(
            fault.to_string(),
            "Filter on \"Due date\" failed for 2 rows: not a date"
        );
    }
}

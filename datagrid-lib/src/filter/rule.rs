//! Filter rules and filter sets

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::Operator;

/// How the rules of a [`FilterSet`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Logic {
    /// Every rule must match.
    #[default]
    And,
    /// At least one rule must match.
    Or,
}

impl Logic {
    /// Returns the persisted form (`AND` / `OR`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Logic {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("and") {
            Ok(Logic::And)
        } else if value.eq_ignore_ascii_case("or") {
            Ok(Logic::Or)
        } else {
            Err(format!("unknown filter logic '{}'", value))
        }
    }
}

impl From<Logic> for String {
    fn from(logic: Logic) -> Self {
        logic.as_str().to_string()
    }
}

/// One `(field, operator, value)` predicate.
///
/// `value` is always the string form of the operand, as typed into the
/// filter editor.
///
/// # Example
///
/// ```
/// use datagrid_lib::filter::{FilterRule, Operator};
///
/// let rule = FilterRule::new("status", Operator::Eq, "1");
/// assert_eq!(rule.operator, Operator::Eq);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterRule {
    /// Key of the column this rule reads.
    pub field: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Operand as entered.
    #[serde(deserialize_with = "scalar_as_string")]
    pub value: String,
}

impl FilterRule {
    /// Creates a new rule.
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Creates an equality rule.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// Creates a contains rule.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Operator::Contains, value)
    }
}

/// Accepts a JSON string, number or bool and keeps its string form.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar rule value, got {}",
            other
        ))),
    }
}

/// An ordered list of rules plus one combination mode.
///
/// Grouping is flat: the same [`Logic`] applies between every pair of rules.
/// An empty set matches every row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    /// Rules in editor order.
    pub rules: Vec<FilterRule>,
    /// Combination mode.
    pub logic: Logic,
}

impl FilterSet {
    /// Creates an empty `AND` set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set whose rules must all match.
    pub fn all(rules: impl IntoIterator<Item = FilterRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            logic: Logic::And,
        }
    }

    /// Creates a set where any rule may match.
    pub fn any(rules: impl IntoIterator<Item = FilterRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            logic: Logic::Or,
        }
    }

    /// Adds a rule (builder pattern).
    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the combination mode (builder pattern).
    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    /// Returns `true` if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

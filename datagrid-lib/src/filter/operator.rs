//! Filter operators

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Comparison operator of one filter rule.
///
/// Every known operator is derived from the three comparator primitives
/// (`equal`, `greater`, `includes`). Codes that are not recognised survive
/// as [`Operator::Unrecognized`] so malformed saved rules round-trip
/// unchanged and never hide rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// `equal(value, operand)`
    #[default]
    Eq,
    /// `!equal(value, operand)`
    Neq,
    /// `!greater && !equal`
    Lt,
    /// `greater(value, operand)`
    Gt,
    /// `!greater`
    Lte,
    /// `greater || equal`
    Gte,
    /// `includes(value, operand)`
    Contains,
    /// `!includes(value, operand)`
    NotContains,
    /// Any other wire code. Always matches.
    Unrecognized(String),
}

const KNOWN: &[Operator] = &[
    Operator::Eq,
    Operator::Neq,
    Operator::Lt,
    Operator::Gt,
    Operator::Lte,
    Operator::Gte,
    Operator::Contains,
    Operator::NotContains,
];

impl Operator {
    /// All known operators in display order.
    pub fn all() -> &'static [Operator] {
        KNOWN
    }

    /// Parses a wire code (`eq`, `neq`, `lt`, ...).
    pub fn parse(code: &str) -> Self {
        match code {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "lt" => Operator::Lt,
            "gt" => Operator::Gt,
            "lte" => Operator::Lte,
            "gte" => Operator::Gte,
            "contains" => Operator::Contains,
            "notcontains" => Operator::NotContains,
            other => Operator::Unrecognized(other.to_string()),
        }
    }

    /// Returns the wire code stored in persisted payloads.
    pub fn code(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Lt => "lt",
            Operator::Gt => "gt",
            Operator::Lte => "lte",
            Operator::Gte => "gte",
            Operator::Contains => "contains",
            Operator::NotContains => "notcontains",
            Operator::Unrecognized(code) => code,
        }
    }

    /// Returns the display label for the operator picker.
    pub fn label(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::Contains => "contains",
            Operator::NotContains => "does not contain",
            Operator::Unrecognized(code) => code,
        }
    }

    /// Returns `true` for operators the engine knows how to evaluate.
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unrecognized(_))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Operator {
    fn from(code: String) -> Self {
        Operator::parse(&code)
    }
}

impl From<&str> for Operator {
    fn from(code: &str) -> Self {
        Operator::parse(code)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.code().to_string()
    }
}

//! Rule-based row filtering.
//!
//! # Types
//!
//! - [`Operator`] - closed set of comparison operators
//! - [`FilterRule`] / [`FilterSet`] / [`Logic`] - what to filter on
//! - [`Comparator`] - per-column overrides for `equal`, `greater`, `includes`
//! - [`FilterEvaluator`] - tests rows against a filter set
//! - [`FilterFault`] - one human-readable summary of comparator failures

mod comparator;
mod evaluate;
mod operator;
mod rule;

pub use comparator::*;
pub use evaluate::*;
pub use operator::Operator;
pub use rule::FilterRule;
pub use rule::FilterSet;
pub use rule::Logic;

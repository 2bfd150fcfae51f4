//! Data table engine
//!
//! Turns an in-memory row collection plus caller-owned view state into the
//! rows of the current page: sort, then rule-based filter with pluggable
//! per-column comparators, then paginate. Selection and expansion are keyed
//! by stable row ids, and filter sets can be persisted per table.

pub mod config;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod selection;

mod table;

pub use config::TableOptions;
pub use table::*;

//! The Sort → Filter → Paginate pipeline.
//!
//! Each stage is a pure function over row indices; none of them reorders
//! or mutates the caller's rows. [`crate::Table`] runs them in this fixed
//! order on every recomputation.

mod filter;
mod page;
mod sort;

pub use filter::FilterOutcome;
pub use filter::filter_indices;
pub use page::*;
pub use sort::*;

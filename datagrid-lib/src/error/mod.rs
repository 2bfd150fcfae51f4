//! Error types

mod comparator;
mod persist;

pub use comparator::*;
pub use persist::*;

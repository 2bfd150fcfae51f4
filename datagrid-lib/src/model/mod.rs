//! Row data model: values, rows, identifiers and column descriptors.

mod column;
mod id;
mod row;
mod value;

pub use column::*;
pub use id::*;
pub use row::*;
pub use value::*;

//! Core domain types.
//!
//! These types describe the input side of a conversion, independent of
//! how the records arrive (HTTP body, stdin, file).

mod record;

pub use record::{MAX_NESTING_LEVELS, NestingLevels, NodeKey, Record};

pub(crate) use record::describe_values;

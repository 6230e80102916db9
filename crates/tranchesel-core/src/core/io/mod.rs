//! Reading the tabular inputs of a selection run and writing its todo list.
//!
//! All inputs are delimited text with a header row. Files ending in `.gz` are
//! decompressed on the fly.

pub mod tables;
pub mod todo;
pub mod traits;

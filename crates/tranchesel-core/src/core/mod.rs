//! # Core Module
//!
//! Stateless building blocks of the selection engine: the library data model and
//! the readers and writers for its tabular inputs and outputs.
//!
//! ## Architecture
//!
//! - **Library Representation** ([`models`]) - Tranches, collections and score tables
//! - **File I/O** ([`io`]) - CSV (optionally gzip-compressed) inputs and the todo-list output

pub mod io;
pub mod models;

//! # Workflows Module
//!
//! Top-level entry points that tie loaded tables, configuration and the engine
//! together.
//!
//! - **Selection Workflow** ([`select`]) - Runs the configured strategy and assembles the
//!   ordered collection list, or runs the dimension-averaged filter search alone.

pub mod select;

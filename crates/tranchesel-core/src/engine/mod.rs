//! # Engine Module
//!
//! The selection engine: everything between loaded tables and an ordered list of
//! selected collections.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Target, scoring mode, eligibility pattern and the
//!   builder that validates them
//! - **Filters** ([`filter`]) - Per-dimension class sets, their pattern rendering, and the
//!   reverse index used to update ligand totals incrementally
//! - **State Tracking** ([`state`]) - Running totals, round history and the assembled
//!   [`state::Selection`]
//! - **Trimming** ([`trim`]) - Greedy prefix trimming of an overshooting group
//! - **Strategies** ([`strategy`], [`strategies`]) - The [`strategy::SelectionStrategy`] seam
//!   and its dimension-averaging and rank-scan implementations
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Every run is synchronous, deterministic and owns its state; tables are only read.

pub mod config;
pub mod error;
pub mod filter;
pub mod progress;
pub mod state;
pub mod strategies;
pub mod strategy;
pub mod trim;

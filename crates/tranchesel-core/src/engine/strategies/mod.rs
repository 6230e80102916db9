//! Interchangeable selection strategies.
//!
//! Each strategy answers the same question: which collections, in which order,
//! cover a ligand target. [`dimension_averaging`] grows a class filter round by
//! round and trims the last-added group; [`rank_scan`] walks collections by
//! merged tranche score.

pub mod dimension_averaging;
pub mod rank_scan;

pub use dimension_averaging::DimensionAveragingSelector;
pub use rank_scan::RankScanSelector;

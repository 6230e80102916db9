//! # tranchesel Core Library
//!
//! Score-guided selection of library subsets for ultra-large virtual screens.
//!
//! A combinatorial ligand library is partitioned into tranches, each named by one
//! class symbol per chemical dimension and split into numbered collections. Given
//! scores from a sparse prescreen and a target ligand count, this crate picks the
//! collections to screen next.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Library`, tranche codes, score
//!   tables) and the readers/writers for the tabular files they come from.
//!
//! - **[`engine`]: The Logic Core.** Selection filters with an incremental class index,
//!   the shared overselection trimmer, and the interchangeable selection strategies
//!   (dimension-averaged filter growth and rank scanning).
//!
//! - **[`workflows`]: The Public API.** Runs a configured strategy end to end and returns
//!   the ordered selection together with its round history.
//!
//! ```
//! use tranchesel::core::models::library::Library;
//! use tranchesel::core::models::manifest::{CollectionManifest, CollectionRecord};
//! use tranchesel::core::models::scores::{ClassScore, DimensionScoreTable};
//! use tranchesel::engine::config::{ScoringMode, SelectionConfigBuilder};
//! use tranchesel::engine::progress::ProgressReporter;
//! use tranchesel::workflows::select::{self, ScoreTable};
//!
//! let manifest = CollectionManifest::new(vec![
//!     CollectionRecord::new("AX", 1, 10),
//!     CollectionRecord::new("AY", 1, 5),
//!     CollectionRecord::new("BX", 1, 7),
//!     CollectionRecord::new("BY", 1, 3),
//! ]);
//! let library = Library::from_manifests(&manifest, None)?;
//! let scores = DimensionScoreTable::new(vec![
//!     ClassScore::new(0, 'A', 1.0),
//!     ClassScore::new(0, 'B', 3.0),
//!     ClassScore::new(1, 'X', 2.0),
//!     ClassScore::new(1, 'Y', 5.0),
//! ]);
//! let config = SelectionConfigBuilder::new()
//!     .target(15)
//!     .scoring_mode(ScoringMode::DimensionAveraging)
//!     .build()?;
//!
//! let result = select::run(&library, ScoreTable::Classes(&scores), &config, &ProgressReporter::new())?;
//! assert_eq!(result.selection.total_ligands(), 17);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;

//! # Core Models Module
//!
//! Data structures describing a partitioned ligand library and the score tables
//! that guide selection over it.
//!
//! ## Key Components
//!
//! - [`tranche`] - Tranche class codes and tranche records
//! - [`collection`] - Numbered collections and their literal keys
//! - [`library`] - The [`library::Library`] arena tying tranches and collections together
//! - [`manifest`] - Raw manifest rows as read from disk
//! - [`scores`] - Per-class and per-tranche score tables
//! - [`ids`] - Slot map keys for tranches
//!
//! ## Usage
//!
//! ```
//! use tranchesel::core::models::library::Library;
//! use tranchesel::core::models::manifest::{CollectionManifest, CollectionRecord};
//!
//! let manifest = CollectionManifest::new(vec![
//!     CollectionRecord::new("AX", 1, 10),
//!     CollectionRecord::new("BY", 1, 3),
//! ]);
//! let library = Library::from_manifests(&manifest, None)?;
//! assert_eq!(library.dimensions(), 2);
//! # Ok::<(), tranchesel::core::models::library::LibraryError>(())
//! ```

pub mod collection;
pub mod ids;
pub mod library;
pub mod manifest;
pub mod scores;
pub mod tranche;

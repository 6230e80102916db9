use super::collection::{Collection, collection_key};
use super::ids::TrancheId;
use super::manifest::{CollectionManifest, TrancheManifest};
use super::tranche::{Tranche, TrancheCode, TrancheCodeError};
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LibraryError {
    #[error("Collection manifest is empty")]
    EmptyManifest,

    #[error("Invalid tranche identifier: {0}")]
    InvalidCode(#[from] TrancheCodeError),

    #[error(
        "Tranche '{code}' has {found} dimensions, but the library uses {expected} dimensions"
    )]
    InconsistentDimensions {
        code: String,
        expected: usize,
        found: usize,
    },

    #[error("Tranche '{0}' is listed more than once in the tranche manifest")]
    DuplicateTranche(String),

    #[error("Collection {number} of tranche '{code}' is listed more than once")]
    DuplicateCollection { code: String, number: u64 },

    #[error("Collection {number} references unknown tranche '{code}'")]
    UnknownTranche { code: String, number: u64 },
}

/// In-memory view of a combinatorial library: its tranches and their collections.
///
/// Tranches live in a slot map addressed by [`TrancheId`]; their manifest order is
/// kept separately so that every traversal is deterministic. Collections are stored
/// in collection-manifest order and referenced by index.
#[derive(Debug, Clone, Default)]
pub struct Library {
    tranches: SlotMap<TrancheId, Tranche>,
    tranche_order: Vec<TrancheId>,
    collections: Vec<Collection>,
    code_index: HashMap<String, TrancheId>,
    dimensions: usize,
}

impl Library {
    /// Builds a library from a collection manifest and, optionally, a tranche-level
    /// manifest.
    ///
    /// With a tranche manifest, tranche ligand counts are taken from it as given and
    /// every collection must reference a tranche it lists. Without one, tranche
    /// counts are summed from their collections.
    pub fn from_manifests(
        collections: &CollectionManifest,
        tranches: Option<&TrancheManifest>,
    ) -> Result<Self, LibraryError> {
        if collections.is_empty() {
            return Err(LibraryError::EmptyManifest);
        }

        let mut library = Self::default();

        if let Some(manifest) = tranches {
            for record in &manifest.records {
                let code = TrancheCode::new(record.tranche.as_str())?;
                if library.code_index.contains_key(code.as_str()) {
                    return Err(LibraryError::DuplicateTranche(record.tranche.clone()));
                }
                library.insert_tranche(code, record.ligand_count)?;
            }
        }

        let aggregate = tranches.is_none();
        let mut seen = HashSet::with_capacity(collections.len());

        for record in &collections.records {
            let tranche_id = match library.code_index.get(record.tranche.as_str()) {
                Some(&id) => id,
                None if aggregate => {
                    let code = TrancheCode::new(record.tranche.as_str())?;
                    library.insert_tranche(code, 0)?
                }
                None => {
                    return Err(LibraryError::UnknownTranche {
                        code: record.tranche.clone(),
                        number: record.collection,
                    });
                }
            };

            if !seen.insert((tranche_id, record.collection)) {
                return Err(LibraryError::DuplicateCollection {
                    code: record.tranche.clone(),
                    number: record.collection,
                });
            }

            let index = library.collections.len();
            library.collections.push(Collection {
                tranche: tranche_id,
                number: record.collection,
                ligand_count: record.ligand_count,
            });

            let tranche = &mut library.tranches[tranche_id];
            tranche.collections.push(index);
            if aggregate {
                tranche.ligand_count += record.ligand_count;
            }
        }

        debug!(
            tranches = library.tranche_order.len(),
            collections = library.collections.len(),
            dimensions = library.dimensions,
            "Library assembled from manifests."
        );
        Ok(library)
    }

    fn insert_tranche(
        &mut self,
        code: TrancheCode,
        ligand_count: u64,
    ) -> Result<TrancheId, LibraryError> {
        if self.tranche_order.is_empty() {
            self.dimensions = code.dimensions();
        } else if code.dimensions() != self.dimensions {
            return Err(LibraryError::InconsistentDimensions {
                code: code.to_string(),
                expected: self.dimensions,
                found: code.dimensions(),
            });
        }

        let key = code.as_str().to_string();
        let id = self.tranches.insert(Tranche::new(code, ligand_count));
        self.code_index.insert(key, id);
        self.tranche_order.push(id);
        Ok(id)
    }

    /// Number of classification dimensions, i.e. the length of every tranche code.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn tranche(&self, id: TrancheId) -> Option<&Tranche> {
        self.tranches.get(id)
    }

    pub fn tranche_id(&self, code: &str) -> Option<TrancheId> {
        self.code_index.get(code).copied()
    }

    /// Iterates tranches in manifest order.
    pub fn tranches(&self) -> impl Iterator<Item = (TrancheId, &Tranche)> {
        self.tranche_order
            .iter()
            .map(move |&id| (id, &self.tranches[id]))
    }

    pub fn tranche_count(&self) -> usize {
        self.tranche_order.len()
    }

    /// All collections in collection-manifest order.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, index: usize) -> Option<&Collection> {
        self.collections.get(index)
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Literal identifier of the collection at `index`, e.g. `AX_0000001`.
    pub fn collection_key(&self, index: usize) -> Option<String> {
        let collection = self.collections.get(index)?;
        let tranche = self.tranches.get(collection.tranche)?;
        Some(collection_key(tranche.code.as_str(), collection.number))
    }

    /// Sum of tranche-level ligand counts.
    pub fn total_ligands(&self) -> u64 {
        self.tranches().map(|(_, t)| t.ligand_count).sum()
    }
}

use crate::config::InputPaths;
use crate::error::Result;
use tracing::{debug, info};
use tranchesel::core::io::traits::TabularFile;
use tranchesel::core::models::library::Library;
use tranchesel::core::models::manifest::{CollectionManifest, TrancheManifest};
use tranchesel::core::models::scores::{DimensionScoreTable, PrescreenTable};
use tranchesel::engine::config::ScoringMode;
use tranchesel::engine::error::EngineError;
use tranchesel::workflows::select::ScoreTable;

/// The score table variant a scoring mode consumes.
#[derive(Debug)]
pub enum LoadedScores {
    Classes(DimensionScoreTable),
    Prescreen(PrescreenTable),
}

impl LoadedScores {
    pub fn as_table(&self) -> ScoreTable<'_> {
        match self {
            LoadedScores::Classes(table) => ScoreTable::Classes(table),
            LoadedScores::Prescreen(table) => ScoreTable::Prescreen(table),
        }
    }
}

#[derive(Debug)]
pub struct LoadedInputs {
    pub library: Library,
    pub scores: LoadedScores,
}

impl LoadedInputs {
    /// Reads the manifests and the score table `mode` needs.
    pub fn load(paths: &InputPaths, mode: ScoringMode) -> Result<Self> {
        info!("Loading collection manifest from {:?}", &paths.collections);
        let collections = CollectionManifest::read_from_path(&paths.collections)?;
        debug!("Read {} collection rows.", collections.len());

        let tranches = match &paths.tranches {
            Some(path) => {
                info!("Loading tranche manifest from {:?}", path);
                let manifest = TrancheManifest::read_from_path(path)?;
                debug!("Read {} tranche rows.", manifest.len());
                Some(manifest)
            }
            None => None,
        };

        let library =
            Library::from_manifests(&collections, tranches.as_ref()).map_err(EngineError::from)?;
        info!(
            "Library has {} tranches over {} dimensions and {} collections.",
            library.tranche_count(),
            library.dimensions(),
            library.collection_count()
        );

        info!("Loading scores from {:?}", &paths.scores);
        let scores = match mode {
            ScoringMode::DimensionAveraging => {
                LoadedScores::Classes(DimensionScoreTable::read_from_path(&paths.scores)?)
            }
            ScoringMode::TrancheScore(_) => {
                LoadedScores::Prescreen(PrescreenTable::read_from_path(&paths.scores)?)
            }
        };

        Ok(Self { library, scores })
    }
}

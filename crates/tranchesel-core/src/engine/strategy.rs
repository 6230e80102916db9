use super::error::EngineError;
use super::filter::SelectionFilter;
use super::progress::ProgressReporter;
use super::state::RoundRecord;
use crate::core::models::library::Library;

/// Filters reached by a dimension-averaged search.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSearch {
    pub seed: SelectionFilter,
    /// Seed-round ligand total.
    pub seed_total: u64,
    pub rounds: Vec<RoundRecord>,
}

impl FilterSearch {
    /// The filter after the last round.
    pub fn current(&self) -> &SelectionFilter {
        self.rounds.last().map_or(&self.seed, |r| &r.current)
    }

    /// The filter before the last round, if any round ran.
    pub fn previous(&self) -> Option<&SelectionFilter> {
        self.rounds.last().map(|r| &r.previous)
    }

    /// The last round's added filter, if any round ran.
    pub fn added(&self) -> Option<&SelectionFilter> {
        self.rounds.last().map(|r| &r.added)
    }

    pub fn total(&self) -> u64 {
        self.rounds.last().map_or(self.seed_total, |r| r.ligands)
    }

    /// Tranche-level total matched by [`FilterSearch::previous`], or zero.
    pub fn previous_total(&self) -> u64 {
        self.rounds.last().map_or(0, |r| r.previous_ligands)
    }
}

/// Collections picked by a strategy, as indices into the library's collection list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutcome {
    /// Included in full, in manifest order.
    pub baseline: Vec<usize>,
    /// Admitted after the baseline, in selection order.
    pub added: Vec<usize>,
    /// Present for filter-growing strategies.
    pub search: Option<FilterSearch>,
}

impl StrategyOutcome {
    pub fn ligand_total(&self, library: &Library) -> u64 {
        self.baseline
            .iter()
            .chain(&self.added)
            .filter_map(|&i| library.collection(i))
            .map(|c| c.ligand_count)
            .sum()
    }
}

/// A way of picking collections until a ligand target is met.
pub trait SelectionStrategy {
    fn name(&self) -> &'static str;

    /// Selects collections from `library` totalling at least `target` ligands.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnreachableTarget`] rather than an under-target result,
    /// and [`EngineError::DataIntegrity`] when the scores do not fit the library.
    fn select(
        &self,
        library: &Library,
        target: u64,
        reporter: &ProgressReporter,
    ) -> Result<StrategyOutcome, EngineError>;
}

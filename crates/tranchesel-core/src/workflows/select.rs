use crate::core::models::library::Library;
use crate::core::models::scores::{DimensionScoreTable, PrescreenTable};
use crate::engine::config::{ScoringMode, SelectionConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::Selection;
use crate::engine::strategies::{DimensionAveragingSelector, RankScanSelector};
use crate::engine::strategy::{FilterSearch, SelectionStrategy};
use tracing::{info, instrument, warn};

/// Scores handed to the workflow; the variant must suit the scoring mode.
#[derive(Debug, Clone, Copy)]
pub enum ScoreTable<'a> {
    Classes(&'a DimensionScoreTable),
    Prescreen(&'a PrescreenTable),
}

impl ScoreTable<'_> {
    fn kind(&self) -> &'static str {
        match self {
            ScoreTable::Classes(_) => "dimension score table",
            ScoreTable::Prescreen(_) => "prescreen ranking table",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionResult {
    pub strategy: &'static str,
    pub selection: Selection,
    /// Round history, for filter-growing strategies.
    pub search: Option<FilterSearch>,
}

#[instrument(skip_all, name = "selection_workflow")]
pub fn run(
    library: &Library,
    scores: ScoreTable,
    config: &SelectionConfig,
    reporter: &ProgressReporter,
) -> Result<SelectionResult, EngineError> {
    info!(
        "Selecting {} ligands from {} tranches / {} collections ({} ligands) using {}.",
        config.target,
        library.tranche_count(),
        library.collection_count(),
        library.total_ligands(),
        config.scoring_mode
    );

    let strategy: Box<dyn SelectionStrategy + '_> = match (config.scoring_mode, scores) {
        (ScoringMode::DimensionAveraging, ScoreTable::Classes(table)) => {
            if config.eligibility.is_some() {
                warn!("Eligibility pattern is ignored in dimension-averaging mode.");
            }
            Box::new(DimensionAveragingSelector::new(
                table,
                library.dimensions(),
                config.seed_overflow,
            )?)
        }
        (ScoringMode::TrancheScore(aggregation), ScoreTable::Prescreen(table)) => Box::new(
            RankScanSelector::new(table, aggregation, config.eligibility.as_ref()),
        ),
        (mode, table) => {
            return Err(EngineError::Configuration(format!(
                "scoring mode '{}' cannot be run on a {}",
                mode,
                table.kind()
            )));
        }
    };

    let outcome = strategy.select(library, config.target, reporter)?;

    reporter.report(Progress::PhaseStart { name: "Assembly" });
    let selection = Selection::assemble(library, config.target, &outcome.baseline, &outcome.added);
    reporter.report(Progress::PhaseFinish);

    let total = selection.total_ligands();
    if total < config.target {
        return Err(EngineError::Internal(format!(
            "{} produced {} ligands for a target of {}",
            strategy.name(),
            total,
            config.target
        )));
    }

    info!(
        "Selected {} collections ({} baseline, {} added) totalling {} ligands, {} over target.",
        selection.len(),
        selection.baseline().count(),
        selection.added().count(),
        total,
        selection.overshoot()
    );

    Ok(SelectionResult {
        strategy: strategy.name(),
        selection,
        search: outcome.search,
    })
}

/// Runs only the dimension-averaged filter search, without trimming.
#[instrument(skip_all, name = "filter_search_workflow")]
pub fn search_filter(
    library: &Library,
    scores: &DimensionScoreTable,
    config: &SelectionConfig,
    reporter: &ProgressReporter,
) -> Result<FilterSearch, EngineError> {
    if config.scoring_mode != ScoringMode::DimensionAveraging {
        return Err(EngineError::Configuration(format!(
            "filter search requires scoring mode 'dimension_averaging', got '{}'",
            config.scoring_mode
        )));
    }
    let selector =
        DimensionAveragingSelector::new(scores, library.dimensions(), config.seed_overflow)?;
    selector.search(library, config.target, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::manifest::{
        CollectionManifest, CollectionRecord, TrancheManifest, TrancheRecord,
    };
    use crate::core::models::scores::{ClassScore, TrancheScore};
    use crate::engine::config::{Aggregation, SelectionConfigBuilder};
    use crate::engine::state::SelectionOrigin;
    use std::sync::Mutex;

    fn library() -> Library {
        let manifest = CollectionManifest::new(vec![
            CollectionRecord::new("AX", 1, 10),
            CollectionRecord::new("AY", 1, 5),
            CollectionRecord::new("BX", 1, 7),
            CollectionRecord::new("BY", 1, 3),
        ]);
        Library::from_manifests(&manifest, None).unwrap()
    }

    fn class_scores() -> DimensionScoreTable {
        DimensionScoreTable::new(vec![
            ClassScore::new(0, 'A', 1.0),
            ClassScore::new(0, 'B', 3.0),
            ClassScore::new(1, 'X', 2.0),
            ClassScore::new(1, 'Y', 5.0),
        ])
    }

    fn config(target: u64, mode: ScoringMode) -> SelectionConfig {
        SelectionConfigBuilder::new()
            .target(target)
            .scoring_mode(mode)
            .build()
            .unwrap()
    }

    #[test]
    fn dimension_averaging_emits_baseline_then_trimmed_rows() {
        let lib = library();
        let scores = class_scores();
        let result = run(
            &lib,
            ScoreTable::Classes(&scores),
            &config(15, ScoringMode::DimensionAveraging),
            &ProgressReporter::new(),
        )
        .unwrap();

        let rows: Vec<_> = result.selection.rows().collect();
        assert_eq!(rows, vec![("AX_0000001", 10), ("BX_0000001", 7)]);
        assert_eq!(result.selection.entries[0].origin, SelectionOrigin::Baseline);
        assert_eq!(result.selection.entries[1].origin, SelectionOrigin::Added);
        assert_eq!(result.strategy, "dimension_averaging");
        assert_eq!(result.search.unwrap().rounds.len(), 1);
    }

    #[test]
    fn rank_scan_applies_eligibility_pattern() {
        let lib = library();
        let scores = PrescreenTable::new(vec![
            TrancheScore::new("AX", 1.0),
            TrancheScore::new("BX", 2.0),
            TrancheScore::new("AY", 3.0),
        ]);
        let config = SelectionConfigBuilder::new()
            .target(12)
            .scoring_mode(ScoringMode::TrancheScore(Aggregation::Min))
            .eligibility_pattern("A.*")
            .build()
            .unwrap();
        let result = run(
            &lib,
            ScoreTable::Prescreen(&scores),
            &config,
            &ProgressReporter::new(),
        )
        .unwrap();
        let rows: Vec<_> = result.selection.rows().collect();
        assert_eq!(rows, vec![("AX_0000001", 10), ("AY_0000001", 5)]);
        assert_eq!(result.selection.total_ligands(), 15);
        assert!(result.search.is_none());
    }

    #[test]
    fn tranche_totals_without_collection_rows_are_unreachable() {
        let collections = CollectionManifest::new(vec![CollectionRecord::new("AX", 1, 10)]);
        let tranches = TrancheManifest::new(vec![
            TrancheRecord::new("AX", 10),
            TrancheRecord::new("BX", 7),
        ]);
        let lib = Library::from_manifests(&collections, Some(&tranches)).unwrap();
        let scores = class_scores();
        let err = run(
            &lib,
            ScoreTable::Classes(&scores),
            &config(15, ScoringMode::DimensionAveraging),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(
            matches!(
                err,
                EngineError::UnreachableTarget {
                    target: 15,
                    reached: 10,
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn mismatched_mode_and_table_is_a_configuration_error() {
        let lib = library();
        let scores = class_scores();
        let err = run(
            &lib,
            ScoreTable::Classes(&scores),
            &config(5, ScoringMode::TrancheScore(Aggregation::Average)),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn filter_search_reports_rounds_through_progress() {
        let lib = library();
        let scores = class_scores();
        let rounds = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::RoundFinished { pattern, ligands, .. } = event {
                rounds.lock().unwrap().push((pattern, ligands));
            }
        }));
        let search = search_filter(
            &lib,
            &scores,
            &config(20, ScoringMode::DimensionAveraging),
            &reporter,
        )
        .unwrap();
        drop(reporter);

        assert_eq!(search.total(), 25);
        assert_eq!(
            rounds.into_inner().unwrap(),
            vec![("[AB][X]".to_string(), 17), ("[AB][XY]".to_string(), 25)]
        );
    }

    #[test]
    fn filter_search_rejects_rank_scan_modes() {
        let lib = library();
        let err = search_filter(
            &lib,
            &class_scores(),
            &config(5, ScoringMode::TrancheScore(Aggregation::Min)),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }
}

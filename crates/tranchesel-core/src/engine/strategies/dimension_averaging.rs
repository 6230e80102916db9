use crate::core::models::library::Library;
use crate::core::models::scores::DimensionScoreTable;
use crate::engine::config::SeedOverflowPolicy;
use crate::engine::error::EngineError;
use crate::engine::filter::{ClassIndex, SelectionFilter, count_ligands, matching_collections};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{RoundRecord, SelectionState};
use crate::engine::strategy::{FilterSearch, SelectionStrategy, StrategyOutcome};
use crate::engine::trim::trim_to_target;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    dimension: usize,
    class: u8,
    diff: f64,
}

/// Grows a per-dimension class filter from dimension-averaged scores.
///
/// Each dimension is seeded with its best-scoring class. Every round then admits
/// the remaining (dimension, class) pair with the smallest distance to its
/// dimension's best score, until the filter covers the target. Equal distances
/// keep score-table order.
#[derive(Debug, Clone)]
pub struct DimensionAveragingSelector {
    seeds: Vec<u8>,
    candidates: Vec<Candidate>,
    seed_overflow: SeedOverflowPolicy,
}

impl DimensionAveragingSelector {
    /// Validates `scores` against a library with `dimensions` dimensions.
    pub fn new(
        scores: &DimensionScoreTable,
        dimensions: usize,
        seed_overflow: SeedOverflowPolicy,
    ) -> Result<Self, EngineError> {
        let mut seen = HashSet::with_capacity(scores.len());
        let mut minima: Vec<Option<f64>> = vec![None; dimensions];

        for row in &scores.rows {
            if row.dimension >= dimensions {
                return Err(EngineError::DataIntegrity(format!(
                    "score row for class '{}' references dimension {}, but the library has {} dimensions",
                    row.class, row.dimension, dimensions
                )));
            }
            if !row.class.is_ascii() {
                return Err(EngineError::DataIntegrity(format!(
                    "class '{}' in dimension {} is not an ASCII symbol",
                    row.class, row.dimension
                )));
            }
            if !row.score.is_finite() {
                return Err(EngineError::DataIntegrity(format!(
                    "class '{}' in dimension {} has a non-finite score",
                    row.class, row.dimension
                )));
            }
            if !seen.insert((row.dimension, row.class)) {
                return Err(EngineError::DataIntegrity(format!(
                    "class '{}' appears more than once in dimension {}",
                    row.class, row.dimension
                )));
            }
            let min = &mut minima[row.dimension];
            *min = Some(min.map_or(row.score, |m| m.min(row.score)));
        }

        let mut seeds: Vec<Option<u8>> = vec![None; dimensions];
        let mut candidates = Vec::with_capacity(scores.len());

        for row in &scores.rows {
            let Some(min) = minima[row.dimension] else {
                continue;
            };
            let class = row.class as u8;
            let diff = row.score - min;
            if diff == 0.0 && seeds[row.dimension].is_none() {
                seeds[row.dimension] = Some(class);
            } else {
                candidates.push(Candidate {
                    dimension: row.dimension,
                    class,
                    diff,
                });
            }
        }

        let seeds = seeds
            .into_iter()
            .enumerate()
            .map(|(dimension, seed)| {
                seed.ok_or_else(|| {
                    EngineError::DataIntegrity(format!(
                        "dimension {} has no scored classes to seed the filter",
                        dimension
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        candidates.sort_by(|a, b| a.diff.total_cmp(&b.diff));

        Ok(Self {
            seeds,
            candidates,
            seed_overflow,
        })
    }

    pub fn seed_filter(&self) -> SelectionFilter {
        SelectionFilter::from_seeds(&self.seeds)
    }

    /// Number of (dimension, class) pairs that can still be admitted after seeding.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Runs the filter search alone, stopping at the first round whose total
    /// reaches `target`.
    pub fn search(
        &self,
        library: &Library,
        target: u64,
        reporter: &ProgressReporter,
    ) -> Result<FilterSearch, EngineError> {
        reporter.report(Progress::PhaseStart { name: "Seeding" });
        let seed = self.seed_filter();
        let seed_total = count_ligands(library, &seed);
        info!(
            "Seed filter {} matches {} ligands (target {}).",
            seed, seed_total, target
        );
        reporter.report(Progress::StatusUpdate {
            text: format!("seed {} -> {} ligands", seed, seed_total),
        });
        reporter.report(Progress::PhaseFinish);

        let mut search = FilterSearch {
            seed: seed.clone(),
            seed_total,
            rounds: Vec::new(),
        };
        if seed_total >= target {
            info!("Seed filter already reaches the target; no rounds needed.");
            return Ok(search);
        }

        reporter.report(Progress::PhaseStart {
            name: "Filter Search",
        });
        reporter.report(Progress::TaskStart {
            total: self.candidates.len() as u64,
        });

        let index = ClassIndex::build(library);
        let mut state = SelectionState::seeded(seed, seed_total);

        for candidate in &self.candidates {
            let added = state
                .filter
                .restricted_to(candidate.dimension, candidate.class);
            let gained: u64 = index
                .tranches_with(candidate.dimension, candidate.class)
                .iter()
                .filter_map(|&id| library.tranche(id))
                .filter(|t| added.matches(t.code.classes()))
                .map(|t| t.ligand_count)
                .sum();

            state.advance(candidate.dimension, candidate.class, gained);

            let record = RoundRecord {
                round: search.rounds.len() + 1,
                dimension: candidate.dimension,
                class: candidate.class as char,
                diff: candidate.diff,
                previous: state.previous.clone().unwrap_or_else(|| search.seed.clone()),
                added,
                current: state.filter.clone(),
                previous_ligands: state.previous_total,
                ligands: state.running_total,
            };
            debug!(
                "Round {}: dimension {} class '{}' (diff {:.4}) adds {} ligands.",
                record.round, record.dimension, record.class, record.diff, gained
            );
            reporter.report(Progress::RoundFinished {
                round: record.round,
                pattern: record.current.to_pattern(),
                ligands: record.ligands,
                target,
            });
            reporter.report(Progress::TaskIncrement { amount: 1 });
            search.rounds.push(record);

            if state.running_total >= target {
                reporter.report(Progress::TaskFinish);
                reporter.report(Progress::PhaseFinish);
                info!(
                    "Filter {} reaches {} ligands after {} round(s).",
                    state.filter,
                    state.running_total,
                    search.rounds.len()
                );
                return Ok(search);
            }
        }

        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
        Err(EngineError::UnreachableTarget {
            target,
            reached: state.running_total,
            state: format!(
                "all {} candidate classes admitted, filter {}",
                self.candidates.len(),
                state.filter
            ),
        })
    }

    /// Splits a finished search into baseline collections and the trimmed prefix
    /// of the added group.
    fn trim(
        &self,
        library: &Library,
        search: &FilterSearch,
        target: u64,
    ) -> Result<(Vec<usize>, Vec<usize>), EngineError> {
        let (baseline, group) = match (search.previous(), search.added()) {
            (Some(previous), Some(added)) => (
                matching_collections(library, previous),
                matching_collections(library, added),
            ),
            _ => {
                let seeded = matching_collections(library, &search.seed);
                if search.seed_total > target && self.seed_overflow == SeedOverflowPolicy::Trim {
                    warn!(
                        "Seed filter {} already holds {} ligands for a target of {}; trimming within its collections.",
                        search.seed, search.seed_total, target
                    );
                    (Vec::new(), seeded)
                } else {
                    (seeded, Vec::new())
                }
            }
        };

        let baseline_total: u64 = baseline
            .iter()
            .filter_map(|&i| library.collection(i))
            .map(|c| c.ligand_count)
            .sum();
        if !search.rounds.is_empty() && baseline_total != search.previous_total() {
            warn!(
                "Collection manifest sums to {} ligands for filter {}, but tranche totals give {}.",
                baseline_total,
                search.previous().map_or_else(String::new, |f| f.to_pattern()),
                search.previous_total()
            );
        }

        let counts = group
            .iter()
            .filter_map(|&i| library.collection(i))
            .map(|c| c.ligand_count);
        let outcome = trim_to_target(baseline_total, counts, target).map_err(|e| match e {
            EngineError::UnreachableTarget {
                target,
                reached,
                state,
            } => EngineError::UnreachableTarget {
                target,
                reached,
                state: format!("{}, filter {}", state, search.current()),
            },
            other => other,
        })?;
        debug!(
            "Trimmed added group to {} of {} collections ({} ligands).",
            outcome.selected,
            group.len(),
            outcome.total
        );

        let mut selected = group;
        selected.truncate(outcome.selected);
        Ok((baseline, selected))
    }
}

impl SelectionStrategy for DimensionAveragingSelector {
    fn name(&self) -> &'static str {
        "dimension_averaging"
    }

    fn select(
        &self,
        library: &Library,
        target: u64,
        reporter: &ProgressReporter,
    ) -> Result<StrategyOutcome, EngineError> {
        let search = self.search(library, target, reporter)?;

        reporter.report(Progress::PhaseStart { name: "Trimming" });
        let (baseline, added) = self.trim(library, &search, target)?;
        reporter.report(Progress::PhaseFinish);

        Ok(StrategyOutcome {
            baseline,
            added,
            search: Some(search),
        })
    }
}

use crate::core::models::library::Library;
use crate::core::models::scores::PrescreenTable;
use crate::engine::config::{Aggregation, EligibilityFilter, EligibilityScope};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::strategy::{SelectionStrategy, StrategyOutcome};
use std::collections::HashMap;
use tracing::{debug, info, warn};

const PROGRESS_BATCH: u64 = 65_536;

/// Walks collections from best to worst merged tranche score, admitting the
/// eligible ones until the target is covered.
#[derive(Debug, Clone)]
pub struct RankScanSelector<'a> {
    scores: &'a PrescreenTable,
    aggregation: Aggregation,
    eligibility: Option<&'a EligibilityFilter>,
}

impl<'a> RankScanSelector<'a> {
    pub fn new(
        scores: &'a PrescreenTable,
        aggregation: Aggregation,
        eligibility: Option<&'a EligibilityFilter>,
    ) -> Self {
        Self {
            scores,
            aggregation,
            eligibility,
        }
    }

    /// One score per scored tranche code.
    pub fn merged_scores(&self) -> HashMap<&'a str, f64> {
        let scores: &'a PrescreenTable = self.scores;
        let mut merged: HashMap<&'a str, (f64, u32)> = HashMap::new();
        for row in &scores.rows {
            merged
                .entry(row.tranche.as_str())
                .and_modify(|(acc, n)| {
                    match self.aggregation {
                        Aggregation::Min => *acc = acc.min(row.score),
                        Aggregation::Average => *acc += row.score,
                    }
                    *n += 1;
                })
                .or_insert((row.score, 1));
        }

        merged
            .into_iter()
            .map(|(code, (acc, n))| match self.aggregation {
                Aggregation::Min => (code, acc),
                Aggregation::Average => (code, acc / f64::from(n)),
            })
            .collect()
    }

    /// Collection indices in scan order: ascending score, manifest order among
    /// equal scores, unscored collections last.
    pub fn scan_order(&self, library: &Library) -> Vec<usize> {
        let merged = self.merged_scores();

        let unknown = merged
            .keys()
            .filter(|code| library.tranche_id(code).is_none())
            .count();
        if unknown > 0 {
            warn!(
                "{} scored tranche(s) are not in the library and will be ignored.",
                unknown
            );
        }

        let mut ranked: Vec<(usize, Option<f64>)> = library
            .collections()
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let score = library
                    .tranche(c.tranche)
                    .and_then(|t| merged.get(t.code.as_str()).copied());
                (idx, score)
            })
            .collect();

        let unscored = ranked.iter().filter(|(_, s)| s.is_none()).count();
        if unscored > 0 {
            debug!("{} collection(s) have no score and are scanned last.", unscored);
        }

        ranked.sort_by(|(_, a), (_, b)| match (a, b) {
            (Some(a), Some(b)) => a.total_cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ranked.into_iter().map(|(idx, _)| idx).collect()
    }

    fn is_eligible(&self, library: &Library, index: usize) -> bool {
        let Some(filter) = self.eligibility else {
            return true;
        };
        let Some(collection) = library.collection(index) else {
            return false;
        };
        match filter.scope() {
            EligibilityScope::Tranche => library
                .tranche(collection.tranche)
                .is_some_and(|t| filter.is_match(t.code.as_str())),
            EligibilityScope::Collection => library
                .collection_key(index)
                .is_some_and(|key| filter.is_match(&key)),
        }
    }
}

impl SelectionStrategy for RankScanSelector<'_> {
    fn name(&self) -> &'static str {
        match self.aggregation {
            Aggregation::Min => "tranche_min_score",
            Aggregation::Average => "tranche_ave_score",
        }
    }

    fn select(
        &self,
        library: &Library,
        target: u64,
        reporter: &ProgressReporter,
    ) -> Result<StrategyOutcome, EngineError> {
        reporter.report(Progress::PhaseStart { name: "Ranking" });
        let order = self.scan_order(library);
        reporter.report(Progress::PhaseFinish);

        reporter.report(Progress::PhaseStart { name: "Rank Scan" });
        reporter.report(Progress::TaskStart {
            total: order.len() as u64,
        });

        let mut selected = Vec::new();
        let mut total = 0u64;
        let mut skipped = 0usize;
        let mut pending = 0u64;

        for (scanned, &index) in order.iter().enumerate() {
            pending += 1;
            if pending == PROGRESS_BATCH {
                reporter.report(Progress::TaskIncrement { amount: pending });
                pending = 0;
            }

            if !self.is_eligible(library, index) {
                skipped += 1;
                continue;
            }
            let Some(collection) = library.collection(index) else {
                continue;
            };
            selected.push(index);
            total += collection.ligand_count;

            if total >= target {
                reporter.report(Progress::TaskIncrement { amount: pending });
                reporter.report(Progress::TaskFinish);
                reporter.report(Progress::PhaseFinish);
                info!(
                    "Rank scan reached {} ligands after scanning {} rows ({} selected, {} ineligible).",
                    total,
                    scanned + 1,
                    selected.len(),
                    skipped
                );
                return Ok(StrategyOutcome {
                    baseline: Vec::new(),
                    added: selected,
                    search: None,
                });
            }
        }

        reporter.report(Progress::TaskIncrement { amount: pending });
        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
        Err(EngineError::UnreachableTarget {
            target,
            reached: total,
            state: format!(
                "scanned all {} rows, {} selected, {} ineligible",
                order.len(),
                selected.len(),
                skipped
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::manifest::{CollectionManifest, CollectionRecord};
    use crate::core::models::scores::TrancheScore;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn library() -> Library {
        let manifest = CollectionManifest::new(vec![
            CollectionRecord::new("AX", 1, 10),
            CollectionRecord::new("AY", 1, 5),
            CollectionRecord::new("BX", 1, 7),
        ]);
        Library::from_manifests(&manifest, None).unwrap()
    }

    fn prescreen(rows: &[(&str, f64)]) -> PrescreenTable {
        PrescreenTable::new(rows.iter().map(|&(t, s)| TrancheScore::new(t, s)).collect())
    }

    fn keys(library: &Library, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| library.collection_key(i).unwrap())
            .collect()
    }

    #[test]
    fn ineligible_rows_are_skipped_without_counting() {
        let lib = library();
        let table = prescreen(&[("AX", 1.0), ("BX", 2.0), ("AY", 3.0)]);
        let pattern = EligibilityFilter::new("A.*", EligibilityScope::Tranche).unwrap();
        let outcome = RankScanSelector::new(&table, Aggregation::Min, Some(&pattern))
            .select(&lib, 12, &ProgressReporter::new())
            .unwrap();
        assert!(outcome.baseline.is_empty());
        assert_eq!(keys(&lib, &outcome.added), vec!["AX_0000001", "AY_0000001"]);
        assert_eq!(outcome.ligand_total(&lib), 15);
    }

    #[test]
    fn collection_scope_matches_the_full_key() {
        let lib = library();
        let table = prescreen(&[("AX", 1.0), ("BX", 2.0), ("AY", 3.0)]);
        let pattern = EligibilityFilter::new(".._0000001", EligibilityScope::Collection).unwrap();
        let outcome = RankScanSelector::new(&table, Aggregation::Min, Some(&pattern))
            .select(&lib, 12, &ProgressReporter::new())
            .unwrap();
        assert_eq!(keys(&lib, &outcome.added), vec!["AX_0000001", "BX_0000001"]);

        let tranche_only = EligibilityFilter::new("AX", EligibilityScope::Collection).unwrap();
        let err = RankScanSelector::new(&table, Aggregation::Min, Some(&tranche_only))
            .select(&lib, 1, &ProgressReporter::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnreachableTarget { reached: 0, .. }));
    }

    #[test]
    fn aggregation_merges_replicates_per_tranche() {
        let table = prescreen(&[("AX", 4.0), ("BX", 3.0), ("AX", 1.0), ("BX", 2.0)]);
        let min = RankScanSelector::new(&table, Aggregation::Min, None).merged_scores();
        assert_eq!(min["AX"], 1.0);
        assert_eq!(min["BX"], 2.0);
        let avg = RankScanSelector::new(&table, Aggregation::Average, None).merged_scores();
        assert_eq!(avg["AX"], 2.5);
        assert_eq!(avg["BX"], 2.5);
    }

    #[test]
    fn average_changes_the_ranking() {
        let lib = library();
        let table = prescreen(&[("AX", 0.0), ("AX", 10.0), ("BX", 2.0), ("AY", 3.0)]);
        let by_min = RankScanSelector::new(&table, Aggregation::Min, None).scan_order(&lib);
        let by_avg = RankScanSelector::new(&table, Aggregation::Average, None).scan_order(&lib);
        assert_eq!(keys(&lib, &by_min)[0], "AX_0000001");
        assert_eq!(keys(&lib, &by_avg), vec!["BX_0000001", "AY_0000001", "AX_0000001"]);
    }

    #[test]
    fn unscored_collections_come_last_and_ties_keep_manifest_order() {
        let lib = library();
        let table = prescreen(&[("BX", 1.0), ("AX", 1.0), ("ZZ", 0.0)]);
        let order = RankScanSelector::new(&table, Aggregation::Min, None).scan_order(&lib);
        assert_eq!(keys(&lib, &order), vec!["AX_0000001", "BX_0000001", "AY_0000001"]);
    }

    #[test]
    fn exhausting_rows_is_unreachable() {
        let lib = library();
        let table = prescreen(&[("AX", 1.0)]);
        let err = RankScanSelector::new(&table, Aggregation::Min, None)
            .select(&lib, 23, &ProgressReporter::new())
            .unwrap_err();
        match err {
            EngineError::UnreachableTarget { reached, state, .. } => {
                assert_eq!(reached, 22);
                assert!(state.contains("3 rows"), "{state}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn min_and_average_agree_on_single_replicate_tables() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut records = Vec::new();
        let mut rows = Vec::new();
        for a in ['A', 'B', 'C', 'D'] {
            for b in ['W', 'X', 'Y', 'Z'] {
                let code = format!("{a}{b}");
                for n in 1..=3 {
                    records.push(CollectionRecord::new(code.clone(), n, rng.gen_range(1..20)));
                }
                rows.push(TrancheScore::new(code, rng.gen_range(-10.0..0.0)));
            }
        }
        let lib = Library::from_manifests(&CollectionManifest::new(records), None).unwrap();
        let table = PrescreenTable::new(rows);
        let pattern = EligibilityFilter::new("[AC].", EligibilityScope::Tranche).unwrap();

        for target in [1, 20, 60, 100] {
            let min = RankScanSelector::new(&table, Aggregation::Min, Some(&pattern))
                .select(&lib, target, &ProgressReporter::new())
                .unwrap();
            let avg = RankScanSelector::new(&table, Aggregation::Average, Some(&pattern))
                .select(&lib, target, &ProgressReporter::new())
                .unwrap();
            assert_eq!(min, avg);

            let total = min.ligand_total(&lib);
            let last = lib.collection(*min.added.last().unwrap()).unwrap().ligand_count;
            assert!(total >= target);
            assert!(total - last < target);
        }
    }
}

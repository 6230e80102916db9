use super::filter::SelectionFilter;
use crate::core::models::library::Library;

/// Where a selected collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// Fully included: matched by the previous round's filter.
    Baseline,
    /// Admitted from the last-added group (or, for rank scans, from the scan).
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCollection {
    pub key: String,
    pub ligand_count: u64,
    pub origin: SelectionOrigin,
}

/// Ordered output of a selection run: baseline rows first, then added rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub target: u64,
    pub entries: Vec<SelectedCollection>,
}

impl Selection {
    /// Materializes collection keys for `baseline` followed by `added`, both given
    /// as collection indices into `library`.
    pub fn assemble(library: &Library, target: u64, baseline: &[usize], added: &[usize]) -> Self {
        let tagged = baseline
            .iter()
            .map(|&i| (i, SelectionOrigin::Baseline))
            .chain(added.iter().map(|&i| (i, SelectionOrigin::Added)));

        let entries = tagged
            .filter_map(|(index, origin)| {
                let collection = library.collection(index)?;
                Some(SelectedCollection {
                    key: library.collection_key(index)?,
                    ligand_count: collection.ligand_count,
                    origin,
                })
            })
            .collect();

        Self { target, entries }
    }

    pub fn total_ligands(&self) -> u64 {
        self.entries.iter().map(|e| e.ligand_count).sum()
    }

    /// Ligands selected beyond the target.
    pub fn overshoot(&self) -> u64 {
        self.total_ligands().saturating_sub(self.target)
    }

    pub fn baseline(&self) -> impl Iterator<Item = &SelectedCollection> {
        self.entries
            .iter()
            .filter(|e| e.origin == SelectionOrigin::Baseline)
    }

    pub fn added(&self) -> impl Iterator<Item = &SelectedCollection> {
        self.entries
            .iter()
            .filter(|e| e.origin == SelectionOrigin::Added)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, ligand count)` pairs in output order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.ligand_count))
    }
}

/// One round of the dimension-averaged search.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    pub round: usize,
    pub dimension: usize,
    pub class: char,
    pub diff: f64,
    pub previous: SelectionFilter,
    pub added: SelectionFilter,
    pub current: SelectionFilter,
    /// Tranche-level ligand total matched by `previous`.
    pub previous_ligands: u64,
    /// Tranche-level ligand total matched by `current`.
    pub ligands: u64,
}

/// Running state of the dimension-averaged search.
#[derive(Debug, Clone)]
pub struct SelectionState {
    pub filter: SelectionFilter,
    pub previous: Option<SelectionFilter>,
    pub running_total: u64,
    pub previous_total: u64,
}

impl SelectionState {
    pub fn seeded(filter: SelectionFilter, running_total: u64) -> Self {
        Self {
            filter,
            previous: None,
            running_total,
            previous_total: 0,
        }
    }

    /// Includes `class` in `dimension`, adding `gained` ligands, and remembers the
    /// filter as it was before.
    pub fn advance(&mut self, dimension: usize, class: u8, gained: u64) {
        self.previous = Some(self.filter.clone());
        self.previous_total = self.running_total;
        self.filter.include(dimension, class);
        self.running_total += gained;
    }
}

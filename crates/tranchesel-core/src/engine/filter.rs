use crate::core::models::ids::TrancheId;
use crate::core::models::library::Library;
use std::collections::HashMap;
use std::fmt;

/// Set of ASCII class symbols included for one dimension.
///
/// Membership is a bit test; insertion order is kept for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    mask: u128,
    order: Vec<u8>,
}

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(class: u8) -> Self {
        let mut set = Self::new();
        set.insert(class);
        set
    }

    /// Adds `class`, returning `false` if it was already present.
    pub fn insert(&mut self, class: u8) -> bool {
        debug_assert!(class.is_ascii(), "class symbols must be ASCII");
        if self.contains(class) {
            return false;
        }
        self.mask |= 1u128 << class;
        self.order.push(class);
        true
    }

    pub fn contains(&self, class: u8) -> bool {
        class.is_ascii() && self.mask & (1u128 << class) != 0
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_subset(&self, other: &ClassSet) -> bool {
        self.mask & !other.mask == 0
    }

    /// Classes in the order they were included.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.order.iter().map(|&b| b as char)
    }

    fn write_pattern(&self, out: &mut String) {
        out.push('[');
        for &class in &self.order {
            if class.is_ascii_punctuation() {
                out.push('\\');
            }
            out.push(class as char);
        }
        out.push(']');
    }
}

/// Per-dimension inclusion filter over tranche codes.
///
/// A code matches iff, at every dimension position, its class belongs to that
/// dimension's included set. This is equivalent to the character-class pattern
/// returned by [`SelectionFilter::to_pattern`], e.g. `[AB][X]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFilter {
    sets: Vec<ClassSet>,
}

impl SelectionFilter {
    /// One included class per dimension, in dimension order.
    pub fn from_seeds(seeds: &[u8]) -> Self {
        Self {
            sets: seeds.iter().map(|&c| ClassSet::singleton(c)).collect(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.sets.len()
    }

    pub fn classes(&self, dimension: usize) -> Option<&ClassSet> {
        self.sets.get(dimension)
    }

    /// Includes `class` in `dimension`, returning `false` if it was already included.
    pub fn include(&mut self, dimension: usize, class: u8) -> bool {
        self.sets
            .get_mut(dimension)
            .is_some_and(|set| set.insert(class))
    }

    pub fn matches(&self, code: &[u8]) -> bool {
        code.len() == self.sets.len()
            && self
                .sets
                .iter()
                .zip(code)
                .all(|(set, &class)| set.contains(class))
    }

    /// The filter with `dimension` narrowed to `class` alone and every other
    /// dimension unchanged.
    pub fn restricted_to(&self, dimension: usize, class: u8) -> Self {
        let mut restricted = self.clone();
        if let Some(set) = restricted.sets.get_mut(dimension) {
            *set = ClassSet::singleton(class);
        }
        restricted
    }

    /// Whether every dimension's set is contained in `other`'s.
    pub fn is_subset_of(&self, other: &SelectionFilter) -> bool {
        self.sets.len() == other.sets.len()
            && self
                .sets
                .iter()
                .zip(&other.sets)
                .all(|(a, b)| a.is_subset(b))
    }

    pub fn to_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.sets.len() * 4);
        for set in &self.sets {
            set.write_pattern(&mut pattern);
        }
        pattern
    }
}

impl fmt::Display for SelectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pattern())
    }
}

/// Reverse index from (dimension, class) to the tranches carrying that class.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    positions: Vec<HashMap<u8, Vec<TrancheId>>>,
}

impl ClassIndex {
    pub fn build(library: &Library) -> Self {
        let mut positions = vec![HashMap::new(); library.dimensions()];
        for (id, tranche) in library.tranches() {
            for (position, &class) in positions.iter_mut().zip(tranche.code.classes()) {
                position.entry(class).or_insert_with(Vec::new).push(id);
            }
        }
        Self { positions }
    }

    /// Tranches with `class` at `dimension`, in manifest order.
    pub fn tranches_with(&self, dimension: usize, class: u8) -> &[TrancheId] {
        self.positions
            .get(dimension)
            .and_then(|p| p.get(&class))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Tranche-level ligand total matched by `filter`, from a full scan.
pub fn count_ligands(library: &Library, filter: &SelectionFilter) -> u64 {
    library
        .tranches()
        .filter(|(_, t)| filter.matches(t.code.classes()))
        .map(|(_, t)| t.ligand_count)
        .sum()
}

/// Indices of collections whose tranche matches `filter`, in collection-manifest
/// order.
pub fn matching_collections(library: &Library, filter: &SelectionFilter) -> Vec<usize> {
    let mut indices: Vec<usize> = library
        .tranches()
        .filter(|(_, t)| filter.matches(t.code.classes()))
        .flat_map(|(_, t)| t.collection_indices().iter().copied())
        .collect();
    indices.sort_unstable();
    indices
}

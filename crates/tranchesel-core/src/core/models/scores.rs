/// Score of one class within one dimension, from the sparse scoring pass.
///
/// Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScore {
    pub dimension: usize,
    pub class: char,
    pub score: f64,
}

impl ClassScore {
    pub fn new(dimension: usize, class: char, score: f64) -> Self {
        Self {
            dimension,
            class,
            score,
        }
    }
}

/// Dimension-averaged class scores spanning every dimension's alphabet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionScoreTable {
    pub rows: Vec<ClassScore>,
}

impl DimensionScoreTable {
    pub fn new(rows: Vec<ClassScore>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single prescreen docking result attributed to a tranche.
#[derive(Debug, Clone, PartialEq)]
pub struct TrancheScore {
    pub tranche: String,
    pub score: f64,
}

impl TrancheScore {
    pub fn new(tranche: impl Into<String>, score: f64) -> Self {
        Self {
            tranche: tranche.into(),
            score,
        }
    }
}

/// Prescreen ranking: any number of scored rows per tranche, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescreenTable {
    pub rows: Vec<TrancheScore>,
}

impl PrescreenTable {
    pub fn new(rows: Vec<TrancheScore>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

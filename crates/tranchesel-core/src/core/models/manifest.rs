use serde::Deserialize;

/// One row of the collection manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CollectionRecord {
    pub tranche: String,
    pub collection: u64,
    pub ligand_count: u64,
}

impl CollectionRecord {
    pub fn new(tranche: impl Into<String>, collection: u64, ligand_count: u64) -> Self {
        Self {
            tranche: tranche.into(),
            collection,
            ligand_count,
        }
    }
}

/// One row of the pre-aggregated, tranche-level manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrancheRecord {
    pub tranche: String,
    pub ligand_count: u64,
}

impl TrancheRecord {
    pub fn new(tranche: impl Into<String>, ligand_count: u64) -> Self {
        Self {
            tranche: tranche.into(),
            ligand_count,
        }
    }
}

/// Full collection manifest of a library, rows kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionManifest {
    pub records: Vec<CollectionRecord>,
}

impl CollectionManifest {
    pub fn new(records: Vec<CollectionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrancheManifest {
    pub records: Vec<TrancheRecord>,
}

impl TrancheManifest {
    pub fn new(records: Vec<TrancheRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

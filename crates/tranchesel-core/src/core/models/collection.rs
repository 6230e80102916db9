use super::ids::TrancheId;

/// Width that collection numbers are zero-padded to in collection keys.
pub const COLLECTION_NUMBER_WIDTH: usize = 7;

/// A numbered sub-partition of a tranche.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub tranche: TrancheId,
    pub number: u64,
    pub ligand_count: u64,
}

/// Formats the literal identifier of a collection, e.g. `AX_0000012`.
///
/// Numbers wider than [`COLLECTION_NUMBER_WIDTH`] digits are written in full.
pub fn collection_key(tranche_code: &str, number: u64) -> String {
    format!(
        "{}_{:0width$}",
        tranche_code,
        number,
        width = COLLECTION_NUMBER_WIDTH
    )
}

use super::error::EngineError;

/// Result of trimming a candidate group down to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimOutcome {
    /// Length of the selected prefix of the group.
    pub selected: usize,
    /// Baseline plus the ligands of the selected prefix.
    pub total: u64,
}

/// Selects the shortest prefix of `group` that lifts `baseline` to at least `target`.
///
/// Rows are taken in the given order and never reordered, so the overshoot can be
/// up to one row's ligand count. A baseline that already meets the target selects
/// nothing.
///
/// # Errors
///
/// Returns [`EngineError::UnreachableTarget`] if the whole group is not enough.
pub fn trim_to_target<I>(baseline: u64, group: I, target: u64) -> Result<TrimOutcome, EngineError>
where
    I: IntoIterator<Item = u64>,
{
    let mut total = baseline;
    let mut selected = 0;

    if total >= target {
        return Ok(TrimOutcome { selected, total });
    }

    for ligand_count in group {
        total += ligand_count;
        selected += 1;
        if total >= target {
            return Ok(TrimOutcome { selected, total });
        }
    }

    Err(EngineError::UnreachableTarget {
        target,
        reached: total,
        state: format!("trimming exhausted all {} rows of the added group", selected),
    })
}

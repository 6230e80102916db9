use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Ligand count cannot be empty.")]
    Empty,

    #[error(
        "Invalid ligand count '{0}'. Expected a whole number with an optional K, M or B suffix (e.g., '250M')."
    )]
    InvalidCount(String),

    #[error("Ligand count '{0}' is too large.")]
    Overflow(String),
}

/// Parses a ligand count such as `15000`, `250K`, `1.5M` or `2B`.
///
/// Underscores and commas are accepted as digit separators. Fractions must
/// resolve to a whole number of ligands.
pub fn parse_ligand_count(input: &str) -> Result<u64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let invalid = || ParseError::InvalidCount(input.to_string());
    let overflow = || ParseError::Overflow(input.to_string());

    let (number, exponent) = match trimmed.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => (&trimmed[..trimmed.len() - 1], 3u32),
        Some('M') => (&trimmed[..trimmed.len() - 1], 6),
        Some('B') | Some('G') => (&trimmed[..trimmed.len() - 1], 9),
        _ => (trimmed, 0),
    };

    let digits: String = number.chars().filter(|c| *c != '_' && *c != ',').collect();
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits.as_str(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() as u32 > exponent {
        return Err(invalid());
    }

    let scale = 10u64.pow(exponent);
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let fraction_value: u64 = if fraction.is_empty() {
        0
    } else {
        let value: u64 = fraction.parse().map_err(|_| invalid())?;
        value * 10u64.pow(exponent - fraction.len() as u32)
    };

    whole
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(overflow)
}

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TrancheCodeError {
    #[error("Tranche identifier is empty")]
    Empty,
    #[error("Tranche identifier '{0}' contains non-ASCII class symbols")]
    NonAscii(String),
}

/// The class string of a tranche: one single-character class per dimension,
/// concatenated in dimension order.
///
/// Codes are restricted to ASCII so that every dimension position is exactly
/// one byte wide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrancheCode(String);

impl TrancheCode {
    pub fn new(code: impl Into<String>) -> Result<Self, TrancheCodeError> {
        let code = code.into();
        if code.is_empty() {
            return Err(TrancheCodeError::Empty);
        }
        if !code.is_ascii() {
            return Err(TrancheCodeError::NonAscii(code));
        }
        Ok(Self(code))
    }

    /// Number of dimensions encoded in this code.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn classes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrancheCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrancheCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A library partition together with its aggregate ligand count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tranche {
    pub code: TrancheCode,
    pub ligand_count: u64,
    /// Indices into the library's collection list, in manifest order.
    pub(crate) collections: Vec<usize>,
}

impl Tranche {
    pub fn new(code: TrancheCode, ligand_count: u64) -> Self {
        Self {
            code,
            ligand_count,
            collections: Vec::new(),
        }
    }

    pub fn collection_indices(&self) -> &[usize] {
        &self.collections
    }
}

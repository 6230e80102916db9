use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::traits::TableError;
use crate::core::models::library::LibraryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error(
        "Target of {target} ligands is unreachable: only {reached} ligands selected ({state})"
    )]
    UnreachableTarget {
        target: u64,
        reached: u64,
        state: String,
    },

    #[error("Failed to load input table: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Configuration(e.to_string())
    }
}

impl From<LibraryError> for EngineError {
    fn from(e: LibraryError) -> Self {
        EngineError::DataIntegrity(e.to_string())
    }
}

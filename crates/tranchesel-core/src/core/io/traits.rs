use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid value on line {line}: {message}")]
    InvalidValue { line: usize, message: String },

    #[error("Failed to read table '{path}': {source}")]
    InFile {
        path: String,
        #[source]
        source: Box<TableError>,
    },
}

impl TableError {
    pub(crate) fn in_file(self, path: &Path) -> Self {
        match self {
            e @ (TableError::Io { .. } | TableError::InFile { .. }) => e,
            other => TableError::InFile {
                path: path.to_string_lossy().to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// Defines the interface for tabular inputs read from delimited text.
///
/// Implementors parse a complete table from any reader. Path-based reading is
/// provided on top of it and transparently decompresses files ending in `.gz`.
pub trait TabularFile: Sized {
    /// Parses a complete table from a reader positioned at the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not valid CSV or a field cannot be
    /// interpreted.
    fn read_from<R: Read>(reader: R) -> Result<Self, TableError>;

    /// Reads a table from a file path, decompressing gzip input by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails. Parsing
    /// errors are wrapped with the offending path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let reader = open_table(path)?;
        Self::read_from(reader).map_err(|e| e.in_file(path))
    }
}

pub(crate) fn open_table(path: &Path) -> Result<Box<dyn Read>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);
    if is_gzip_path(path) {
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

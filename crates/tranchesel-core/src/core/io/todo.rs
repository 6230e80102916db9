use super::traits::TableError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer for the selection todo list: one `<key> <ligand count>` line per
/// selected collection, space separated, no header.
pub struct TodoFile;

impl TodoFile {
    pub fn write_to<'a, I, W>(rows: I, writer: W) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
        W: Write,
    {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .from_writer(writer);
        for (key, ligand_count) in rows {
            csv.write_record([key, ligand_count.to_string().as_str()])?;
        }
        csv.flush().map_err(|e| TableError::Csv(e.into()))?;
        Ok(())
    }

    pub fn write_to_path<'a, I, P>(rows: I, path: P) -> Result<(), TableError>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| TableError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        Self::write_to(rows, BufWriter::new(file)).map_err(|e| e.in_file(path))
    }
}

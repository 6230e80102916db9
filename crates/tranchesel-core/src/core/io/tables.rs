use super::traits::{TableError, TabularFile, csv_reader};
use crate::core::models::manifest::{
    CollectionManifest, CollectionRecord, TrancheManifest, TrancheRecord,
};
use crate::core::models::scores::{ClassScore, DimensionScoreTable, PrescreenTable, TrancheScore};
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

/// Header row plus 1-based numbering.
const FIRST_DATA_LINE: usize = 2;

#[derive(Debug, Deserialize)]
struct ClassScoreRow {
    #[serde(rename = "Tranche", alias = "Dimension")]
    dimension: Option<usize>,
    #[serde(rename = "Class")]
    class: Option<String>,
    #[serde(rename = "Score")]
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PrescreenRow {
    #[serde(rename = "Tranche")]
    tranche: Option<String>,
    #[serde(rename = "ScoreMin")]
    score_min: Option<f64>,
}

fn single_class(value: &str, line: usize) -> Result<char, TableError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(TableError::InvalidValue {
            line,
            message: format!("class '{}' must be exactly one character", value),
        }),
    }
}

impl TabularFile for DimensionScoreTable {
    /// Rows with any missing field, or a `NaN` score, are dropped.
    fn read_from<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv = csv_reader(reader);
        let mut rows = Vec::new();
        let mut dropped = 0usize;

        for (idx, result) in csv.deserialize::<ClassScoreRow>().enumerate() {
            let row = result?;
            let (Some(dimension), Some(class), Some(score)) = (row.dimension, row.class, row.score)
            else {
                dropped += 1;
                continue;
            };
            if score.is_nan() || class.is_empty() {
                dropped += 1;
                continue;
            }
            let class = single_class(&class, idx + FIRST_DATA_LINE)?;
            rows.push(ClassScore::new(dimension, class, score));
        }

        debug!(
            rows = rows.len(),
            dropped, "Loaded dimension-averaged class scores."
        );
        Ok(Self::new(rows))
    }
}

impl TabularFile for PrescreenTable {
    /// Only the `Tranche` and `ScoreMin` columns are read; rows lacking either are
    /// dropped.
    fn read_from<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv = csv_reader(reader);
        let mut rows = Vec::new();
        let mut dropped = 0usize;

        for result in csv.deserialize::<PrescreenRow>() {
            let row = result?;
            match (row.tranche, row.score_min) {
                (Some(tranche), Some(score)) if !tranche.is_empty() && !score.is_nan() => {
                    rows.push(TrancheScore::new(tranche, score));
                }
                _ => dropped += 1,
            }
        }

        debug!(rows = rows.len(), dropped, "Loaded prescreen ranking.");
        Ok(Self::new(rows))
    }
}

impl TabularFile for CollectionManifest {
    fn read_from<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv = csv_reader(reader);
        let records = csv
            .deserialize::<CollectionRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = records.len(), "Loaded collection manifest.");
        Ok(Self::new(records))
    }
}

impl TabularFile for TrancheManifest {
    fn read_from<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv = csv_reader(reader);
        let records = csv
            .deserialize::<TrancheRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = records.len(), "Loaded tranche manifest.");
        Ok(Self::new(records))
    }
}

//! CSV loading for dimension tables
//!
//! Expected header: `Dimension,Weight,ExScore,CurScore` (any column order,
//! extra columns ignored). `Ex_score_raw` / `Cur_score_raw` are accepted when
//! the canonical score column is absent. Weights that do not sum to 1 are
//! normalized with a warning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use relsense_core::model::WEIGHT_SUM_TOLERANCE;
use relsense_core::{DimensionRow, DimensionTable, TableError};

pub const DIMENSION_COLUMN: &str = "Dimension";
pub const WEIGHT_COLUMN: &str = "Weight";
pub const EX_SCORE_COLUMN: &str = "ExScore";
pub const CUR_SCORE_COLUMN: &str = "CurScore";

const EX_SCORE_ALIAS: &str = "Ex_score_raw";
const CUR_SCORE_ALIAS: &str = "Cur_score_raw";

/// Error types for table loading
#[derive(Debug)]
pub enum LoadError {
    Io(String),
    Csv(String),
    /// Required columns absent from the header
    MissingColumns(Vec<String>),
    /// A numeric cell could not be parsed (row is 1-based, header excluded)
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    Table(TableError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "IO error: {}", msg),
            LoadError::Csv(msg) => write!(f, "CSV error: {}", msg),
            LoadError::MissingColumns(cols) => write!(
                f,
                "CSV must contain columns {}, {}, {}, {}; missing: {}",
                DIMENSION_COLUMN,
                WEIGHT_COLUMN,
                EX_SCORE_COLUMN,
                CUR_SCORE_COLUMN,
                cols.join(", ")
            ),
            LoadError::InvalidNumber { row, column, value } => {
                write!(f, "row {}: {} value '{}' is not a number", row, column, value)
            }
            LoadError::Table(e) => write!(f, "invalid table: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err.to_string())
    }
}

impl From<TableError> for LoadError {
    fn from(err: TableError) -> Self {
        LoadError::Table(err)
    }
}

/// A loaded table plus what the loader had to do to it
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: DimensionTable,
    /// Weight sum as read from the file, before normalization
    pub original_weight_sum: f64,
}

impl LoadedTable {
    pub fn was_normalized(&self) -> bool {
        (self.original_weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE
    }
}

/// Load a dimension table from a CSV file
pub fn load_table(path: &Path) -> Result<LoadedTable, LoadError> {
    tracing::debug!("Loading dimension table from {}", path.display());

    let file = File::open(path)
        .map_err(|e| LoadError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let loaded = load_table_from_reader(file)?;

    tracing::info!(
        "Loaded {} dimensions from {}",
        loaded.table.len(),
        path.display()
    );
    Ok(loaded)
}

/// Load a dimension table from any CSV source
pub fn load_table_from_reader<R: Read>(reader: R) -> Result<LoadedTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h == name);

    let dimension_idx = find(DIMENSION_COLUMN);
    let weight_idx = find(WEIGHT_COLUMN);
    let ex_idx = find(EX_SCORE_COLUMN).or_else(|| find(EX_SCORE_ALIAS));
    let cur_idx = find(CUR_SCORE_COLUMN).or_else(|| find(CUR_SCORE_ALIAS));

    let (Some(dimension_idx), Some(weight_idx), Some(ex_idx), Some(cur_idx)) =
        (dimension_idx, weight_idx, ex_idx, cur_idx)
    else {
        let missing = [
            (DIMENSION_COLUMN, dimension_idx),
            (WEIGHT_COLUMN, weight_idx),
            (EX_SCORE_COLUMN, ex_idx),
            (CUR_SCORE_COLUMN, cur_idx),
        ]
        .iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
        return Err(LoadError::MissingColumns(missing));
    };

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        rows.push(DimensionRow::new(
            cell(dimension_idx),
            parse_number(cell(weight_idx), row, WEIGHT_COLUMN)?,
            parse_number(cell(ex_idx), row, EX_SCORE_COLUMN)?,
            parse_number(cell(cur_idx), row, CUR_SCORE_COLUMN)?,
        ));
    }

    let original_weight_sum: f64 = rows.iter().map(|r| r.weight).sum();
    if (original_weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        tracing::warn!(
            "Weight sum = {:.4} is not 1, normalizing",
            original_weight_sum
        );
    }

    Ok(LoadedTable {
        table: DimensionTable::normalized(rows)?,
        original_weight_sum,
    })
}

fn parse_number(value: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    value.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        row,
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
Dimension,Weight,ExScore,CurScore
Love,0.5,8,7
Trust,0.3,9,6
Fun,0.2,6,9
";

    #[test]
    fn test_load_sample() {
        let loaded = load_table_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(loaded.table.len(), 3);
        assert!(!loaded.was_normalized());

        let trust = loaded.table.get("Trust").unwrap();
        assert_eq!(trust.weight, 0.3);
        assert_eq!(trust.ex_score, 9.0);
        assert_eq!(trust.cur_score, 6.0);
    }

    #[test]
    fn test_load_trims_names_and_reorders_columns() {
        let csv = "CurScore, Dimension ,Weight,ExScore,Notes\n7,  Emotional connection ,1,8,x\n";
        let loaded = load_table_from_reader(csv.as_bytes()).unwrap();
        let row = &loaded.table.rows()[0];
        assert_eq!(row.name, "Emotional connection");
        assert_eq!(row.ex_score, 8.0);
        assert_eq!(row.cur_score, 7.0);
    }

    #[test]
    fn test_load_accepts_raw_score_aliases() {
        let csv = "Dimension,Weight,Ex_score_raw,Cur_score_raw\nA,0.5,1,2\nB,0.5,3,4\n";
        let loaded = load_table_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(loaded.table.get("B").unwrap().cur_score, 4.0);
    }

    #[test]
    fn test_load_normalizes_weights() {
        let csv = "Dimension,Weight,ExScore,CurScore\nA,2,1,1\nB,6,1,1\n";
        let loaded = load_table_from_reader(csv.as_bytes()).unwrap();

        assert!(loaded.was_normalized());
        assert_eq!(loaded.original_weight_sum, 8.0);
        assert!((loaded.table.get("A").unwrap().weight - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_load_missing_columns() {
        let csv = "Dimension,Weight\nA,1\n";
        match load_table_from_reader(csv.as_bytes()) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["ExScore".to_string(), "CurScore".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_number() {
        let csv = "Dimension,Weight,ExScore,CurScore\nA,0.5,1,2\nB,half,3,4\n";
        match load_table_from_reader(csv.as_bytes()) {
            Err(LoadError::InvalidNumber { row, column, value }) => {
                assert_eq!(row, 2);
                assert_eq!(column, WEIGHT_COLUMN);
                assert_eq!(value, "half");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_load_duplicate_dimension() {
        let csv = "Dimension,Weight,ExScore,CurScore\nA,0.5,1,2\nA,0.5,3,4\n";
        assert!(matches!(
            load_table_from_reader(csv.as_bytes()),
            Err(LoadError::Table(TableError::DuplicateName(_)))
        ));
    }

    #[test]
    fn test_load_table_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relationship.csv");
        fs::write(&path, SAMPLE).unwrap();

        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded.table.len(), 3);

        let missing = load_table(&dir.path().join("nope.csv"));
        assert!(matches!(missing, Err(LoadError::Io(_))));
    }
}

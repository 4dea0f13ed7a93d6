//! Decision dimensions and the validated table that holds them
//!
//! A `DimensionTable` can only be obtained through validation, so every
//! table the engine sees has unique names, finite values and weights that
//! sum to 1. Input within [`WEIGHT_SUM_TOLERANCE`] of 1 is accepted and
//! rescaled onto the exact unit sum.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Allowed distance between the weight sum and 1
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// One named criterion with its weight and both candidates' raw scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRow {
    pub name: String,
    pub weight: f64,
    pub ex_score: f64,
    pub cur_score: f64,
}

impl DimensionRow {
    pub fn new(name: impl Into<String>, weight: f64, ex_score: f64, cur_score: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            ex_score,
            cur_score,
        }
    }
}

/// Ordered, validated set of dimensions
///
/// Row order only matters for display. The table is immutable once built;
/// sweeps copy the weight vector before touching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DimensionRow>", into = "Vec<DimensionRow>")]
pub struct DimensionTable {
    rows: Vec<DimensionRow>,
}

impl DimensionTable {
    /// Build a table whose weights must already sum to 1
    pub fn new(mut rows: Vec<DimensionRow>) -> Result<Self, TableError> {
        validate_rows(&rows)?;

        let sum: f64 = rows.iter().map(|r| r.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(TableError::WeightSumMismatch { sum });
        }
        scale_to_unit_sum(&mut rows, sum);

        Ok(Self { rows })
    }

    /// Build a table, dividing every weight by the total
    pub fn normalized(mut rows: Vec<DimensionRow>) -> Result<Self, TableError> {
        validate_rows(&rows)?;

        let sum: f64 = rows.iter().map(|r| r.weight).sum();
        if sum <= 0.0 {
            return Err(TableError::ZeroWeightSum);
        }
        scale_to_unit_sum(&mut rows, sum);

        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[DimensionRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.name.as_str())
    }

    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.weight).collect()
    }

    #[must_use]
    pub fn ex_scores(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ex_score).collect()
    }

    #[must_use]
    pub fn cur_scores(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.cur_score).collect()
    }

    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.rows.iter().map(|r| r.weight).sum()
    }

    /// Row with this exact name, if any
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DimensionRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Index of the row with this exact name
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.name == name)
    }

    /// All row indices whose name is exactly `name`
    pub(crate) fn matching_indices(&self, name: &str) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.name == name)
            .map(|(i, _)| i)
            .collect()
    }
}

impl TryFrom<Vec<DimensionRow>> for DimensionTable {
    type Error = TableError;

    fn try_from(rows: Vec<DimensionRow>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<DimensionTable> for Vec<DimensionRow> {
    fn from(table: DimensionTable) -> Self {
        table.rows
    }
}

// Sweeps rescale the undriven weights against this sum, so any residue
// here shows up as drift from the baseline totals.
fn scale_to_unit_sum(rows: &mut [DimensionRow], sum: f64) {
    if sum != 1.0 {
        for row in rows {
            row.weight /= sum;
        }
    }
}

fn validate_rows(rows: &[DimensionRow]) -> Result<(), TableError> {
    if rows.is_empty() {
        return Err(TableError::Empty);
    }

    let mut seen = FxHashSet::default();
    for row in rows {
        if !seen.insert(row.name.as_str()) {
            return Err(TableError::DuplicateName(row.name.clone()));
        }

        for (field, value) in [
            ("weight", row.weight),
            ("ex_score", row.ex_score),
            ("cur_score", row.cur_score),
        ] {
            if !value.is_finite() {
                return Err(TableError::NonFiniteValue {
                    name: row.name.clone(),
                    field,
                });
            }
        }

        if row.weight < 0.0 {
            return Err(TableError::NegativeWeight {
                name: row.name.clone(),
                weight: row.weight,
            });
        }
    }

    Ok(())
}

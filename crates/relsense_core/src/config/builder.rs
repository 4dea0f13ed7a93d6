//! Table Builder
//!
//! Fluent construction of a [`DimensionTable`], mostly for tests, benches and
//! callers that assemble tables in code rather than loading them.
//!
//! # Example
//!
//! ```ignore
//! use relsense_core::config::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .dimension("Love", 5.0, 8.0, 7.0)
//!     .dimension("Trust", 3.0, 9.0, 6.0)
//!     .dimension("Fun", 2.0, 6.0, 9.0)
//!     .normalize_weights()
//!     .build()?;
//! ```

use crate::error::TableError;
use crate::model::{DimensionRow, DimensionTable};

/// Builder for dimension tables
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    rows: Vec<DimensionRow>,
    normalize: bool,
}

impl TableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dimension
    #[must_use]
    pub fn dimension(
        mut self,
        name: impl Into<String>,
        weight: f64,
        ex_score: f64,
        cur_score: f64,
    ) -> Self {
        self.rows
            .push(DimensionRow::new(name, weight, ex_score, cur_score));
        self
    }

    /// Append an already-built row
    #[must_use]
    pub fn row(mut self, row: DimensionRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Divide weights by their sum on build instead of requiring a unit sum
    #[must_use]
    pub fn normalize_weights(mut self) -> Self {
        self.normalize = true;
        self
    }

    pub fn build(self) -> Result<DimensionTable, TableError> {
        if self.normalize {
            DimensionTable::normalized(self.rows)
        } else {
            DimensionTable::new(self.rows)
        }
    }
}

//! Weighted decision and weight-sensitivity library
//!
//! This crate compares two candidates ("Ex" and "Current") across a set of
//! weighted decision dimensions and explores how the outcome moves when the
//! weighting changes. It provides:
//! - Validated dimension tables whose weights sum to 1
//! - Linear weighted totals and per-dimension breakdowns
//! - A 1D boundary sweep over one dimension's weight
//! - A 3D grid sweep over three dimensions' weights
//! - Proportional renormalization of the undriven dimensions
//! - Consumer-side boundary classification (`|diff| <= eps`, zero crossings)
//!
//! Everything here is pure: no I/O, no logging, no shared state.
//!
//! # Example
//!
//! ```ignore
//! use relsense_core::{TableBuilder, scoring::weighted_total, sensitivity::sweep_1d};
//!
//! let table = TableBuilder::new()
//!     .dimension("Love", 0.5, 8.0, 7.0)
//!     .dimension("Trust", 0.3, 9.0, 6.0)
//!     .dimension("Fun", 0.2, 6.0, 9.0)
//!     .build()?;
//!
//! let baseline = weighted_total(&table);
//! let sweep = sweep_1d(&table, "Love", 0.0, 1.0, 3)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod scoring;
pub mod sensitivity;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{SweepRange, TableBuilder};
pub use error::{SweepError, TableError};
pub use model::{
    DimensionRow, DimensionTable, GridRecord, GridResult, SweepRecord, SweepResult, Totals,
};

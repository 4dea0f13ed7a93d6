//! Three-dimensional grid sweep
//!
//! Every combination of `steps` samples for three driven dimensions is
//! evaluated, except where the driven weights leave the others too little
//! room (see [`GRID_EXCLUSION_THRESHOLD`]). The search is exhaustive: the
//! grid is meant to be visualized as a whole.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::SweepError;
use crate::model::{DimensionTable, GridRecord, GridResult};
use crate::scoring::weighted_totals_for;

use super::renormalize::Rescaler;
use super::{linspace, resolve_index, validate_range};

/// Grid points whose driven weights sum to this or more are dropped
pub const GRID_EXCLUSION_THRESHOLD: f64 = 0.95;

/// Sweep three dimensions' weights together over a shared `[low, high]` grid
///
/// Records come out in row-major order: the first dimension varies slowest,
/// the third fastest. Points with `w0 + w1 + w2 >= 0.95` are skipped, not
/// clamped.
///
/// # Errors
/// - `DuplicateDimension` when the three names are not all different
/// - `NotFound` / `AmbiguousName` for a name that does not match exactly one row
/// - `InvalidRange` / `InvalidSteps` for bad sweep parameters
/// - `DegenerateWeights` when the remaining dimensions carry no base weight
pub fn sweep_3d(
    table: &DimensionTable,
    dim_names: [&str; 3],
    low: f64,
    high: f64,
    steps: usize,
) -> Result<GridResult, SweepError> {
    let [a, b, c] = dim_names;
    if a == b || b == c || a == c {
        return Err(SweepError::DuplicateDimension {
            names: dim_names.map(str::to_string),
        });
    }

    let indices = [
        resolve_index(table, a)?,
        resolve_index(table, b)?,
        resolve_index(table, c)?,
    ];
    validate_range(low, high, steps)?;

    let base = table.weights();
    let ex_scores = table.ex_scores();
    let cur_scores = table.cur_scores();

    let rescaler =
        Rescaler::new(&base, &indices).ok_or_else(|| SweepError::DegenerateWeights {
            driven: dim_names.iter().map(|s| s.to_string()).collect(),
        })?;

    let samples = linspace(low, high, steps);

    // One slab per sample of the first dimension, concatenated in order.
    let slab = |w0: f64| -> Vec<GridRecord> {
        let mut records = Vec::new();
        for &w1 in &samples {
            for &w2 in &samples {
                if w0 + w1 + w2 >= GRID_EXCLUSION_THRESHOLD {
                    continue;
                }
                let weights = rescaler.apply(&[w0, w1, w2]);
                let totals = weighted_totals_for(&weights, &ex_scores, &cur_scores);
                records.push(GridRecord::new([w0, w1, w2], totals));
            }
        }
        records
    };

    #[cfg(feature = "parallel")]
    let slabs: Vec<Vec<GridRecord>> = samples.par_iter().map(|&w0| slab(w0)).collect();

    #[cfg(not(feature = "parallel"))]
    let slabs: Vec<Vec<GridRecord>> = samples.iter().map(|&w0| slab(w0)).collect();

    Ok(GridResult {
        dimensions: dim_names.map(str::to_string),
        records: slabs.into_iter().flatten().collect(),
    })
}

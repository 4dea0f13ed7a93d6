//! One-dimensional boundary sweep

use crate::error::SweepError;
use crate::model::{DimensionTable, SweepRecord, SweepResult};
use crate::scoring::weighted_totals_for;

use super::renormalize::Rescaler;
use super::{linspace, resolve_index, validate_range};

/// Sweep the weight of `dim_name` across `[low, high]`
///
/// Each of the `steps` samples drives the named dimension to that weight,
/// rescales every other dimension proportionally and records both totals.
/// Every sample is emitted, in ascending weight order.
///
/// # Errors
/// - `NotFound` / `AmbiguousName` when `dim_name` does not match exactly one row
/// - `InvalidRange` / `InvalidSteps` for bad sweep parameters
/// - `DegenerateWeights` when the other dimensions carry no base weight
pub fn sweep_1d(
    table: &DimensionTable,
    dim_name: &str,
    low: f64,
    high: f64,
    steps: usize,
) -> Result<SweepResult, SweepError> {
    let index = resolve_index(table, dim_name)?;
    validate_range(low, high, steps)?;

    let base = table.weights();
    let ex_scores = table.ex_scores();
    let cur_scores = table.cur_scores();

    let rescaler =
        Rescaler::new(&base, &[index]).ok_or_else(|| SweepError::DegenerateWeights {
            driven: vec![dim_name.to_string()],
        })?;

    let records = linspace(low, high, steps)
        .into_iter()
        .map(|w| {
            let weights = rescaler.apply(&[w]);
            SweepRecord::new(w, weighted_totals_for(&weights, &ex_scores, &cur_scores))
        })
        .collect();

    Ok(SweepResult {
        dimension: dim_name.to_string(),
        records,
    })
}

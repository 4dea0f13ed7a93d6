//! Linear weighted totals
//!
//! Each candidate's total is the dot product of the weight vector with that
//! candidate's score vector.

use crate::model::{DimensionTable, Totals, WeightedBreakdown};

/// Baseline totals for a table
#[must_use]
pub fn weighted_total(table: &DimensionTable) -> Totals {
    table.rows().iter().fold(Totals { ex: 0.0, cur: 0.0 }, |acc, row| Totals {
        ex: acc.ex + row.weight * row.ex_score,
        cur: acc.cur + row.weight * row.cur_score,
    })
}

/// Totals for an explicit weight vector over the given score vectors
///
/// All three slices are indexed by dimension position and must have the
/// same length.
#[must_use]
pub fn weighted_totals_for(weights: &[f64], ex_scores: &[f64], cur_scores: &[f64]) -> Totals {
    debug_assert_eq!(weights.len(), ex_scores.len());
    debug_assert_eq!(weights.len(), cur_scores.len());

    let mut totals = Totals { ex: 0.0, cur: 0.0 };
    for ((w, ex), cur) in weights.iter().zip(ex_scores).zip(cur_scores) {
        totals.ex += w * ex;
        totals.cur += w * cur;
    }
    totals
}

/// Per-dimension weighted contributions, in table order
#[must_use]
pub fn weighted_breakdown(table: &DimensionTable) -> Vec<WeightedBreakdown> {
    table
        .rows()
        .iter()
        .map(|row| WeightedBreakdown {
            name: row.name.clone(),
            weight: row.weight,
            ex_score: row.ex_score,
            cur_score: row.cur_score,
            ex_weighted: row.weight * row.ex_score,
            cur_weighted: row.weight * row.cur_score,
        })
        .collect()
}

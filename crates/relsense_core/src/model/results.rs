//! Result types produced by scoring and the sensitivity sweeps

use serde::{Deserialize, Serialize};

/// Aggregate scores of both candidates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub ex: f64,
    pub cur: f64,
}

impl Totals {
    /// `cur - ex`; positive means "Current" is ahead
    #[must_use]
    pub fn diff(&self) -> f64 {
        self.cur - self.ex
    }
}

/// Weighted contribution of one dimension to both totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedBreakdown {
    pub name: String,
    pub weight: f64,
    pub ex_score: f64,
    pub cur_score: f64,
    pub ex_weighted: f64,
    pub cur_weighted: f64,
}

/// One sample of a 1D sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub weight: f64,
    pub ex_total: f64,
    pub cur_total: f64,
    pub diff: f64,
}

impl SweepRecord {
    pub(crate) fn new(weight: f64, totals: Totals) -> Self {
        Self {
            weight,
            ex_total: totals.ex,
            cur_total: totals.cur,
            diff: totals.diff(),
        }
    }
}

/// Output of a 1D sweep, one record per sample in ascending weight order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Name of the swept dimension
    pub dimension: String,
    pub records: Vec<SweepRecord>,
}

impl SweepResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.weight)
    }

    pub fn diffs(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.diff)
    }
}

/// One surviving point of a 3D grid sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    /// Driven weights, in the order the dimensions were given
    pub weights: [f64; 3],
    pub ex_total: f64,
    pub cur_total: f64,
    pub diff: f64,
}

impl GridRecord {
    pub(crate) fn new(weights: [f64; 3], totals: Totals) -> Self {
        Self {
            weights,
            ex_total: totals.ex,
            cur_total: totals.cur,
            diff: totals.diff(),
        }
    }

    /// Sum of the three driven weights
    #[must_use]
    pub fn driven_sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Output of a 3D grid sweep in row-major order (first dimension outermost)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResult {
    pub dimensions: [String; 3],
    pub records: Vec<GridRecord>,
}

impl GridResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

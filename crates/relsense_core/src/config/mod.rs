//! Table construction and sweep parameter presets

mod builder;

pub use builder::TableBuilder;

use serde::{Deserialize, Serialize};

use crate::error::SweepError;

/// Weight range and sample count for a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub low: f64,
    pub high: f64,
    pub steps: usize,
}

impl SweepRange {
    #[must_use]
    pub const fn new(low: f64, high: f64, steps: usize) -> Self {
        Self { low, high, steps }
    }

    /// Default range for a single-dimension sweep
    #[must_use]
    pub const fn default_1d() -> Self {
        Self::new(0.0, 0.5, 101)
    }

    /// Default per-dimension range for the 3D grid
    #[must_use]
    pub const fn default_3d() -> Self {
        Self::new(0.05, 0.40, 16)
    }

    /// Same checks the sweeps perform before generating samples
    pub fn validate(&self) -> Result<(), SweepError> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(SweepError::InvalidRange {
                low: self.low,
                high: self.high,
            });
        }
        if self.steps == 0 {
            return Err(SweepError::InvalidSteps);
        }
        Ok(())
    }

    /// Number of candidate points for a grid over this range
    #[must_use]
    pub fn grid_candidates(&self) -> usize {
        self.steps.pow(3)
    }
}

mod dimension;
mod results;

pub use dimension::{DimensionRow, DimensionTable, WEIGHT_SUM_TOLERANCE};
pub use results::{GridRecord, GridResult, SweepRecord, SweepResult, Totals, WeightedBreakdown};

//! Weight sensitivity sweeps
//!
//! Two sweeps share one renormalization rule: the driven dimension(s) take
//! explicit weights and every other dimension is rescaled proportionally so
//! the vector keeps summing to 1.
//!
//! ```ignore
//! use relsense_core::sensitivity::{sweep_1d, sweep_3d};
//!
//! let line = sweep_1d(&table, "Trust", 0.0, 0.5, 101)?;
//! if let Some(best) = line.closest_to_zero() {
//!     println!("closest to a tie at w={:.3}", best.weight);
//! }
//!
//! let grid = sweep_3d(&table, ["Trust", "Fun", "Love"], 0.05, 0.40, 16)?;
//! println!("{} boundary points", grid.boundary_points(0.02).count());
//! ```

mod boundary;
mod grid_3d;
mod renormalize;
mod sweep_1d;

pub use boundary::{Crossing, CrossingDirection, Preference, is_boundary};
pub use grid_3d::{GRID_EXCLUSION_THRESHOLD, sweep_3d};
pub use renormalize::renormalize;
pub use sweep_1d::sweep_1d;

use crate::config::SweepRange;
use crate::error::SweepError;
use crate::model::DimensionTable;

/// `steps` evenly spaced samples over `[low, high]`, both ends included
///
/// A single step yields just `low`. The last sample is exactly `high`.
#[must_use]
pub fn linspace(low: f64, high: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let last = steps - 1;
            (0..steps)
                .map(|i| {
                    if i == last {
                        high
                    } else {
                        low + (high - low) * (i as f64) / (last as f64)
                    }
                })
                .collect()
        }
    }
}

/// Exact-name lookup that refuses anything but a single match
fn resolve_index(table: &DimensionTable, name: &str) -> Result<usize, SweepError> {
    match table.matching_indices(name).as_slice() {
        [] => Err(SweepError::NotFound(name.to_string())),
        [index] => Ok(*index),
        many => Err(SweepError::AmbiguousName {
            name: name.to_string(),
            matches: many.len(),
        }),
    }
}

fn validate_range(low: f64, high: f64, steps: usize) -> Result<(), SweepError> {
    SweepRange::new(low, high, steps).validate()
}

//! Boundary classification of sweep output
//!
//! Sweeps never filter their output. These helpers classify records after
//! the fact: a record is a boundary point when `|diff| <= eps`.

use serde::{Deserialize, Serialize};

use crate::model::{GridRecord, GridResult, SweepRecord, SweepResult};

/// True when `diff` is within `eps` of a tie
#[must_use]
pub fn is_boundary(diff: f64, eps: f64) -> bool {
    diff.abs() <= eps
}

/// Which candidate a signed difference favors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    Ex,
    Current,
    Tie,
}

impl Preference {
    #[must_use]
    pub fn of(diff: f64) -> Self {
        if diff > 0.0 {
            Preference::Current
        } else if diff < 0.0 {
            Preference::Ex
        } else {
            Preference::Tie
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Preference::Ex => "Ex",
            Preference::Current => "Current",
            Preference::Tie => "Tie",
        }
    }
}

/// Which way `diff` moves as the swept weight increases through zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingDirection {
    /// `diff` rises through zero: "Current" takes the lead
    TowardCurrent,
    /// `diff` falls through zero: "Ex" takes the lead
    TowardEx,
}

/// Interpolated weight at which a 1D sweep's `diff` reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub weight: f64,
    pub direction: CrossingDirection,
}

impl SweepResult {
    /// Records with `|diff| <= eps`, in sweep order
    pub fn boundary_points(&self, eps: f64) -> impl Iterator<Item = &SweepRecord> + '_ {
        self.records.iter().filter(move |r| is_boundary(r.diff, eps))
    }

    /// The record with the smallest `|diff|`; the earliest one wins ties
    #[must_use]
    pub fn closest_to_zero(&self) -> Option<&SweepRecord> {
        self.records.iter().reduce(|best, r| {
            if r.diff.abs() < best.diff.abs() {
                r
            } else {
                best
            }
        })
    }

    /// Zero crossings between adjacent samples, linearly interpolated
    ///
    /// A pair counts when the first diff is non-zero and the second is zero
    /// or of the opposite sign.
    #[must_use]
    pub fn crossings(&self) -> Vec<Crossing> {
        self.records
            .windows(2)
            .filter_map(|pair| {
                let (a, b) = (pair[0], pair[1]);
                if a.diff == 0.0 || (b.diff != 0.0 && a.diff.signum() == b.diff.signum()) {
                    return None;
                }

                let t = a.diff / (a.diff - b.diff);
                let direction = if b.diff > a.diff {
                    CrossingDirection::TowardCurrent
                } else {
                    CrossingDirection::TowardEx
                };
                Some(Crossing {
                    weight: a.weight + (b.weight - a.weight) * t,
                    direction,
                })
            })
            .collect()
    }
}

impl GridResult {
    /// Records with `|diff| <= eps`, in grid order
    pub fn boundary_points(&self, eps: f64) -> impl Iterator<Item = &GridRecord> + '_ {
        self.records.iter().filter(move |r| is_boundary(r.diff, eps))
    }

    /// Count of records favoring (Ex, Current, Tie)
    #[must_use]
    pub fn preference_counts(&self) -> (usize, usize, usize) {
        self.records
            .iter()
            .fold((0, 0, 0), |(ex, cur, tie), r| match Preference::of(r.diff) {
                Preference::Ex => (ex + 1, cur, tie),
                Preference::Current => (ex, cur + 1, tie),
                Preference::Tie => (ex, cur, tie + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(weight: f64, diff: f64) -> SweepRecord {
        SweepRecord {
            weight,
            ex_total: 5.0,
            cur_total: 5.0 + diff,
            diff,
        }
    }

    fn result(points: &[(f64, f64)]) -> SweepResult {
        SweepResult {
            dimension: "X".into(),
            records: points.iter().map(|&(w, d)| record(w, d)).collect(),
        }
    }

    #[test]
    fn test_is_boundary_inclusive() {
        assert!(is_boundary(0.02, 0.02));
        assert!(is_boundary(-0.01, 0.02));
        assert!(!is_boundary(0.021, 0.02));
        assert!(is_boundary(0.0, 0.0));
    }

    #[test]
    fn test_preference() {
        assert_eq!(Preference::of(0.3), Preference::Current);
        assert_eq!(Preference::of(-0.3), Preference::Ex);
        assert_eq!(Preference::of(0.0), Preference::Tie);
    }

    #[test]
    fn test_closest_to_zero() {
        let r = result(&[(0.0, -0.4), (0.1, -0.05), (0.2, 0.05), (0.3, 0.2)]);
        let best = r.closest_to_zero().unwrap();
        assert_eq!(best.weight, 0.1);

        assert!(result(&[]).closest_to_zero().is_none());
    }

    #[test]
    fn test_crossings_interpolate() {
        let r = result(&[(0.0, -0.4), (0.1, -0.1), (0.2, 0.3), (0.3, 0.1), (0.4, -0.1)]);
        let crossings = r.crossings();

        assert_eq!(crossings.len(), 2);
        assert!((crossings[0].weight - 0.125).abs() < 1e-12);
        assert_eq!(crossings[0].direction, CrossingDirection::TowardCurrent);
        assert!((crossings[1].weight - 0.35).abs() < 1e-12);
        assert_eq!(crossings[1].direction, CrossingDirection::TowardEx);
    }

    #[test]
    fn test_crossings_exact_zero_counted_once() {
        let r = result(&[(0.0, -0.2), (0.1, 0.0), (0.2, 0.2)]);
        let crossings = r.crossings();
        assert_eq!(crossings.len(), 1);
        assert!((crossings[0].weight - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_boundary_points_filter() {
        let r = result(&[(0.0, -0.4), (0.1, -0.01), (0.2, 0.015), (0.3, 0.2)]);
        let weights: Vec<f64> = r.boundary_points(0.02).map(|p| p.weight).collect();
        assert_eq!(weights, vec![0.1, 0.2]);
    }

    #[test]
    fn test_grid_preference_counts() {
        let grid = GridResult {
            dimensions: ["A".into(), "B".into(), "C".into()],
            records: [-0.5, 0.2, 0.0, 0.01]
                .iter()
                .map(|&d| GridRecord {
                    weights: [0.1, 0.1, 0.1],
                    ex_total: 1.0,
                    cur_total: 1.0 + d,
                    diff: d,
                })
                .collect(),
        };

        assert_eq!(grid.preference_counts(), (1, 2, 1));
        assert_eq!(grid.boundary_points(0.01).count(), 2);
    }
}

//! Proportional weight renormalization
//!
//! When some dimensions are driven to explicit weights summing to `s`, every
//! other dimension `k` gets `base[k] * (1 - s) / O`, where `O` is the base
//! weight sum of those others. Ratios among the others are preserved and the
//! full vector keeps summing to 1.

use crate::error::SweepError;

/// Rescaling plan for a fixed set of driven indices
///
/// Sweeps build one of these up front so that a degenerate base table is
/// rejected before any record is produced, then call [`Rescaler::apply`]
/// once per sample.
#[derive(Debug, Clone)]
pub(crate) struct Rescaler<'a> {
    base: &'a [f64],
    driven: Vec<usize>,
    others: Vec<usize>,
    others_sum: f64,
}

impl<'a> Rescaler<'a> {
    /// `None` when the others carry no base weight
    ///
    /// `driven` must hold distinct in-range indices.
    pub(crate) fn new(base: &'a [f64], driven: &[usize]) -> Option<Self> {
        let others: Vec<usize> = (0..base.len()).filter(|k| !driven.contains(k)).collect();
        let others_sum: f64 = others.iter().map(|&k| base[k]).sum();

        // An empty "others" set sums to zero as well: nothing could absorb the rest.
        if others_sum <= 0.0 || !others_sum.is_finite() {
            return None;
        }

        Some(Self {
            base,
            driven: driven.to_vec(),
            others,
            others_sum,
        })
    }

    /// Full weight vector with the driven indices set to `values`
    ///
    /// `values` is parallel to the driven indices given at construction.
    pub(crate) fn apply(&self, values: &[f64]) -> Vec<f64> {
        debug_assert_eq!(values.len(), self.driven.len());

        let driven_sum: f64 = values.iter().sum();
        let scale = (1.0 - driven_sum) / self.others_sum;

        let mut weights = self.base.to_vec();
        for (&i, &v) in self.driven.iter().zip(values) {
            weights[i] = v;
        }
        for &k in &self.others {
            weights[k] = self.base[k] * scale;
        }
        weights
    }
}

/// Renormalize `base` with the given `(index, value)` pairs held fixed
///
/// Returns a fresh vector; `base` is untouched. Fails with
/// `IndexOutOfRange` or `RepeatedIndex` on bad indices, and with
/// `DegenerateWeights` when the undriven dimensions have zero base weight
/// (or when every dimension is driven).
pub fn renormalize(base: &[f64], driven: &[(usize, f64)]) -> Result<Vec<f64>, SweepError> {
    let indices: Vec<usize> = driven.iter().map(|&(i, _)| i).collect();
    for (pos, &index) in indices.iter().enumerate() {
        if index >= base.len() {
            return Err(SweepError::IndexOutOfRange {
                index,
                len: base.len(),
            });
        }
        if indices[..pos].contains(&index) {
            return Err(SweepError::RepeatedIndex(index));
        }
    }
    let values: Vec<f64> = driven.iter().map(|&(_, v)| v).collect();

    let rescaler =
        Rescaler::new(base, &indices).ok_or_else(|| SweepError::DegenerateWeights {
            driven: indices.iter().map(|i| format!("#{i}")).collect(),
        })?;
    Ok(rescaler.apply(&values))
}

use std::fmt;

/// Errors raised while constructing or validating a dimension table
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// The table has no rows
    Empty,
    /// Two rows share the same dimension name
    DuplicateName(String),
    /// A weight is below zero
    NegativeWeight { name: String, weight: f64 },
    /// A weight or score is NaN or infinite
    NonFiniteValue { name: String, field: &'static str },
    /// All weights are zero, so the table cannot be normalized
    ZeroWeightSum,
    /// Weights do not sum to 1 and normalization was not requested
    WeightSumMismatch { sum: f64 },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Empty => write!(f, "dimension table is empty"),
            TableError::DuplicateName(name) => {
                write!(f, "dimension '{name}' appears more than once")
            }
            TableError::NegativeWeight { name, weight } => {
                write!(f, "dimension '{name}' has negative weight {weight}")
            }
            TableError::NonFiniteValue { name, field } => {
                write!(f, "dimension '{name}' has a non-finite {field}")
            }
            TableError::ZeroWeightSum => write!(f, "weights sum to zero"),
            TableError::WeightSumMismatch { sum } => {
                write!(f, "weights sum to {sum:.6}, expected 1")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Errors raised by the sensitivity sweeps
///
/// All of these are deterministic functions of the input; a failed sweep
/// produces no records at all.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    /// No row carries the requested dimension name
    NotFound(String),
    /// More than one row carries the requested dimension name
    AmbiguousName { name: String, matches: usize },
    /// The 3D sweep was given fewer than three distinct names
    DuplicateDimension { names: [String; 3] },
    /// The undriven dimensions carry no base weight, so they cannot absorb the rescale
    DegenerateWeights { driven: Vec<String> },
    /// `low`/`high` are non-finite or out of order
    InvalidRange { low: f64, high: f64 },
    /// `steps` was zero
    InvalidSteps,
    /// A driven index lies outside the weight vector
    IndexOutOfRange { index: usize, len: usize },
    /// The same index was driven twice
    RepeatedIndex(usize),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::NotFound(name) => write!(f, "dimension '{name}' not found"),
            SweepError::AmbiguousName { name, matches } => {
                write!(f, "dimension '{name}' matches {matches} rows")
            }
            SweepError::DuplicateDimension { names } => write!(
                f,
                "three different dimensions are required, got '{}', '{}', '{}'",
                names[0], names[1], names[2]
            ),
            SweepError::DegenerateWeights { driven } => write!(
                f,
                "cannot rescale: all base weight sits on the driven dimensions ({})",
                driven.join(", ")
            ),
            SweepError::InvalidRange { low, high } => {
                write!(f, "invalid weight range [{low}, {high}]")
            }
            SweepError::InvalidSteps => write!(f, "steps must be at least 1"),
            SweepError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} weights")
            }
            SweepError::RepeatedIndex(index) => write!(f, "index {index} is driven more than once"),
        }
    }
}

impl std::error::Error for SweepError {}


use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyDataset,
    InvalidSplit {
        test_ratio: f64,
        len: usize,
    },
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
    },
    MalformedRecord {
        line: u64,
        reason: String,
    },
    ClassOutOfRange {
        class: usize,
        n_classes: usize,
    },
    /// The model produced a non-finite value for the sample at `row`.
    NonFiniteOutput {
        row: usize,
    },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::EmptyDataset => write!(f, "The dataset has no samples"),
            MlErr::InvalidSplit { test_ratio, len } => write!(
                f,
                "A test ratio of {test_ratio} over {len} samples leaves one of the partitions empty"
            ),
            MlErr::InvalidHyperparameter { name, value } => {
                write!(f, "The hyperparameter {name} must be positive, got {value}")
            }
            MlErr::MalformedRecord { line, reason } => {
                write!(f, "Malformed dataset record at line {line}: {reason}")
            }
            MlErr::ClassOutOfRange { class, n_classes } => write!(
                f,
                "Class index {class} is out of range for a model with {n_classes} classes"
            ),
            MlErr::NonFiniteOutput { row } => write!(
                f,
                "The sample at row {row} is too large in magnitude, the model output overflowed"
            ),
        }
    }
}

impl Error for MlErr {}

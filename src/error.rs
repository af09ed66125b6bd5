use std::error::Error;
use std::fmt;

/// Errors reported by classifier construction, training, and prediction.
///
/// The crate runs in strict mode: every public entry point validates its
/// inputs up front and returns one of these variants instead of indexing out
/// of bounds or silently mapping unknown labels to class 0.
#[derive(Debug, Clone, PartialEq)]
pub enum SvmError {
    /// The classifier was constructed with an empty class list.
    EmptyClassList,
    /// The classifier was constructed with a feature dimension of zero.
    ZeroFeatureDim,
    /// A feature vector or matrix does not match the expected feature dimension.
    ShapeMismatch { expected: usize, got: usize },
    /// The number of training rows and the number of labels differ.
    LengthMismatch { rows: usize, labels: usize },
    /// A training label is not present in the class list.
    UnknownLabel(String),
}

impl fmt::Display for SvmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SvmError::EmptyClassList => write!(f, "class list must not be empty"),
            SvmError::ZeroFeatureDim => write!(f, "feature dimension must be positive"),
            SvmError::ShapeMismatch { expected, got } => {
                write!(f, "expected {} features per sample, got {}", expected, got)
            }
            SvmError::LengthMismatch { rows, labels } => {
                write!(f, "got {} samples but {} labels", rows, labels)
            }
            SvmError::UnknownLabel(label) => {
                write!(f, "label '{}' is not in the class list", label)
            }
        }
    }
}

impl Error for SvmError {}

use serde::{Deserialize, Serialize};

/// Hyperparameters for the linear SVM trainer.
///
/// Values are stored verbatim; the trainer does not second-guess them. A zero
/// epoch budget simply trains nothing, and a zero tolerance disables early
/// stopping in practice.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SvmConfig {
    /// Step size for every sub-gradient update.
    pub learning_rate: f64,
    /// L2 regularization strength (weight decay factor).
    pub lambda: f64,
    /// Minimum change in average epoch loss below which training halts.
    pub tolerance: f64,
    /// Upper bound on the number of training epochs.
    pub epochs: usize,
}

impl SvmConfig {
    pub fn new(learning_rate: f64, lambda: f64, tolerance: f64, epochs: usize) -> Self {
        Self {
            learning_rate,
            lambda,
            tolerance,
            epochs,
        }
    }
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            lambda: 0.01,
            tolerance: 1e-6,
            epochs: 1000,
        }
    }
}

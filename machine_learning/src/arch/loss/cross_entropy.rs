use ndarray::{Array2, ArrayView2, Zip};

use super::LossFn;

/// Probabilities are clipped to this value before taking the logarithm.
const MIN_PROBA: f64 = 1e-15;

/// Categorical cross entropy over one-hot targets, averaged over the samples.
///
/// `y_pred` must hold softmax outputs: `loss_prime` is the derivative with respect to the logits
/// that went into the softmax, not with respect to the probabilities.
#[derive(Default, Clone, Copy)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Returns a new `CrossEntropy`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for CrossEntropy {
    fn loss(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> f64 {
        let n = y_pred.nrows().max(1) as f64;

        let total = Zip::from(&y_pred)
            .and(&y)
            .fold(0.0, |acc, &p, &t| acc - t * p.max(MIN_PROBA).ln());

        total / n
    }

    fn loss_prime(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64> {
        let n = y_pred.nrows().max(1) as f64;
        (&y_pred - &y) / n
    }
}

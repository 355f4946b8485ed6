use crate::{MlErr, Result};

/// Computes the fraction of predictions that match the true labels.
///
/// # Arguments
/// * `y_true` - The expected class indices.
/// * `y_pred` - The predicted class indices.
///
/// # Returns
/// The accuracy in [0, 1] or an error if the inputs are empty or of different lengths.
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    if y_true.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

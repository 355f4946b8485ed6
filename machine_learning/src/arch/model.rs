use ndarray::ArrayView2;

use crate::{Result, arch::loss::LossFn};

/// A model that can be trained by gradient based optimizers. Its parameters live in a single
/// flat buffer so optimizers don't need to know the model's layout.
pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// Returns the model's parameters for the optimizer to update.
    fn params_mut(&mut self) -> &mut [f64];

    /// Computes the loss over the given batch and the gradient of that loss with respect to the
    /// parameters of the model.
    ///
    /// # Arguments
    /// * `loss_fn` - The loss function.
    /// * `x` - The input samples, one per row.
    /// * `y` - The expected outputs, one per row.
    /// * `grad` - A buffer of `size()` values where the gradient is written.
    ///
    /// # Returns
    /// The loss of the batch or an error if the shapes don't match the model.
    fn backprop<L>(
        &self,
        loss_fn: &L,
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
        grad: &mut [f64],
    ) -> Result<f64>
    where
        L: LossFn;
}

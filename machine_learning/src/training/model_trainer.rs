use std::num::NonZeroUsize;

use log::debug;
use ndarray::ArrayView2;

use crate::{
    Result,
    arch::{Model, loss::LossFn},
    optimization::Optimizer,
};

/// The outcome of a `ModelTrainer::fit` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// The amount of optimizer steps taken.
    pub iterations: usize,
    /// The loss at the last evaluated point.
    pub loss: f64,
    /// Whether the gradient fell under the tolerance before running out of iterations.
    pub converged: bool,
}

/// A model `Trainer`. Runs full batch optimization of a model's parameters until the largest
/// gradient component drops under `tol` or `max_iter` steps have been taken.
pub struct ModelTrainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    optimizer: O,
    loss_fn: L,
    max_iter: NonZeroUsize,
    tol: f64,
}

impl<O, L> ModelTrainer<O, L>
where
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `optimizer` - The optimizer that dictates how to update the parameters on each step.
    /// * `loss_fn` - The loss function to minimize.
    /// * `max_iter` - The cap on optimizer steps.
    /// * `tol` - The gradient magnitude under which the fit is considered converged.
    pub fn new(optimizer: O, loss_fn: L, max_iter: NonZeroUsize, tol: f64) -> Self {
        Self {
            optimizer,
            loss_fn,
            max_iter,
            tol,
        }
    }

    /// Fits `model` to the given samples. Running out of iterations is not an error, the model
    /// keeps the parameters of the last step and the report says it did not converge.
    ///
    /// # Arguments
    /// * `model` - The model whose parameters get updated.
    /// * `x` - The input samples, one per row.
    /// * `y` - The expected outputs, one per row.
    ///
    /// # Returns
    /// A summary of the fit or an error if the shapes don't match the model.
    pub fn fit<M: Model>(
        &mut self,
        model: &mut M,
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
    ) -> Result<FitReport> {
        let mut grad = vec![0.0; model.size()];
        let max_iter = self.max_iter.get();

        for iteration in 0..max_iter {
            let loss = model.backprop(&self.loss_fn, x, y, &mut grad)?;
            let norm = grad.iter().fold(0.0_f64, |max, g| max.max(g.abs()));

            if norm < self.tol {
                debug!(iteration = iteration, loss = loss; "converged");
                return Ok(FitReport {
                    iterations: iteration,
                    loss,
                    converged: true,
                });
            }

            self.optimizer.update_params(&grad, model.params_mut())?;
        }

        let loss = model.backprop(&self.loss_fn, x, y, &mut grad)?;
        let norm = grad.iter().fold(0.0_f64, |max, g| max.max(g.abs()));

        Ok(FitReport {
            iterations: max_iter,
            loss,
            converged: norm < self.tol,
        })
    }
}

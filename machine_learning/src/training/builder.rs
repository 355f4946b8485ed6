use super::{ModelTrainer, OptimizerSpec, TrainerSpec};
use crate::{
    MlErr, Result,
    arch::loss::CrossEntropy,
    optimization::{Adam, GradientDescent, GradientDescentWithMomentum, Optimizer},
};

/// Builds `ModelTrainer`s given a specification.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `ModelTrainer` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the trainer.
    /// * `size` - The amount of parameters of the model that will be trained.
    ///
    /// # Returns
    /// The trainer or an error if a hyperparameter is out of its domain.
    pub fn build(
        &self,
        spec: &TrainerSpec,
        size: usize,
    ) -> Result<ModelTrainer<Box<dyn Optimizer>, CrossEntropy>> {
        if !(spec.tol >= 0.0) {
            return Err(MlErr::InvalidHyperparameter {
                name: "tol",
                value: spec.tol,
            });
        }

        let optimizer = self.resolve_optimizer(spec.optimizer, size)?;
        Ok(ModelTrainer::new(
            optimizer,
            CrossEntropy::new(),
            spec.max_iter,
            spec.tol,
        ))
    }

    fn resolve_optimizer(&self, spec: OptimizerSpec, size: usize) -> Result<Box<dyn Optimizer>> {
        let optimizer: Box<dyn Optimizer> = match spec {
            OptimizerSpec::GradientDescent { learning_rate } => {
                positive("learning_rate", learning_rate)?;
                Box::new(GradientDescent::new(learning_rate))
            }
            OptimizerSpec::GradientDescentWithMomentum {
                learning_rate,
                momentum,
            } => {
                positive("learning_rate", learning_rate)?;
                unit_interval("momentum", momentum)?;
                Box::new(GradientDescentWithMomentum::new(
                    size,
                    learning_rate,
                    momentum,
                ))
            }
            OptimizerSpec::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
            } => {
                positive("learning_rate", learning_rate)?;
                unit_interval("beta1", beta1)?;
                unit_interval("beta2", beta2)?;
                positive("epsilon", epsilon)?;
                Box::new(Adam::new(size, learning_rate, beta1, beta2, epsilon))
            }
        };

        Ok(optimizer)
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !(value > 0.0) {
        return Err(MlErr::InvalidHyperparameter { name, value });
    }

    Ok(())
}

fn unit_interval(name: &'static str, value: f64) -> Result<()> {
    if !(0.0..1.0).contains(&value) {
        return Err(MlErr::InvalidHyperparameter { name, value });
    }

    Ok(())
}

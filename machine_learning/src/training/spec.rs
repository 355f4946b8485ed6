use std::num::NonZeroUsize;

/// The specification for the `Optimizer` trait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimizerSpec {
    Adam {
        learning_rate: f64,
        beta1: f64,
        beta2: f64,
        epsilon: f64,
    },
    GradientDescent {
        learning_rate: f64,
    },
    GradientDescentWithMomentum {
        learning_rate: f64,
        momentum: f64,
    },
}

/// The specification for the `ModelTrainer` struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerSpec {
    pub optimizer: OptimizerSpec,
    pub max_iter: NonZeroUsize,
    pub tol: f64,
}

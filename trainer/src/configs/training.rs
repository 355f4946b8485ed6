use std::{num::NonZeroUsize, path::PathBuf};

use model::DEFAULT_MODEL_PATH;

const DEFAULT_MAX_ITER: NonZeroUsize = NonZeroUsize::new(200).unwrap();

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimizerConfig {
    Adam { lr: f64, b1: f64, b2: f64, eps: f64 },
    GradientDescent { lr: f64 },
    GradientDescentWithMomentum { lr: f64, mu: f64 },
}

/// Everything a training run needs. `Default` is the canonical configuration: an 80/20 split
/// seeded with 42 and at most 200 Adam steps.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Where the artifact is written.
    pub model_path: PathBuf,
    /// The fraction of samples held out for evaluation.
    pub test_ratio: f64,
    pub seed: u64,
    pub max_iter: NonZeroUsize,
    /// The gradient magnitude under which the fit is considered converged.
    pub tol: f64,
    /// The inverse of the regularization strength.
    pub c: f64,
    pub optimizer: OptimizerConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            test_ratio: 0.2,
            seed: 42,
            max_iter: DEFAULT_MAX_ITER,
            tol: 1e-4,
            c: 1.0,
            optimizer: OptimizerConfig::Adam {
                lr: 0.1,
                b1: 0.9,
                b2: 0.999,
                eps: 1e-8,
            },
        }
    }
}

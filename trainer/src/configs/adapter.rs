use machine_learning::training::{OptimizerSpec, TrainerSpec};

use super::{OptimizerConfig, TrainingConfig};
use crate::error::TrainerErr;

pub struct Adapter;

impl Adapter {
    pub fn new() -> Self {
        Self
    }

    pub fn adapt_config(&self, training: &TrainingConfig) -> Result<TrainerSpec, TrainerErr> {
        self.validate_training(training)?;
        Ok(self.adapt_trainer(training))
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    fn validate_training(&self, training: &TrainingConfig) -> Result<(), TrainerErr> {
        if !(training.test_ratio > 0.0 && training.test_ratio < 1.0) {
            return Err(TrainerErr::InvalidConfig(format!(
                "test_ratio ({}) must be in (0, 1)",
                training.test_ratio
            )));
        }

        if !(training.c > 0.0) {
            return Err(TrainerErr::InvalidConfig(format!(
                "c ({}) must be greater than 0",
                training.c
            )));
        }

        if !(training.tol >= 0.0) {
            return Err(TrainerErr::InvalidConfig(format!(
                "tol ({}) must not be negative",
                training.tol
            )));
        }

        let lr = match training.optimizer {
            OptimizerConfig::Adam { lr, .. }
            | OptimizerConfig::GradientDescent { lr }
            | OptimizerConfig::GradientDescentWithMomentum { lr, .. } => lr,
        };

        if !(lr > 0.0) {
            return Err(TrainerErr::InvalidConfig(format!(
                "learning rate ({lr}) must be greater than 0"
            )));
        }

        if training.model_path.as_os_str().is_empty() {
            return Err(TrainerErr::InvalidConfig(
                "model_path must not be empty".into(),
            ));
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Adaptation
    // -------------------------------------------------------------------------

    fn adapt_trainer(&self, training: &TrainingConfig) -> TrainerSpec {
        TrainerSpec {
            optimizer: self.adapt_optimizer(training.optimizer),
            max_iter: training.max_iter,
            tol: training.tol,
        }
    }

    fn adapt_optimizer(&self, optimizer: OptimizerConfig) -> OptimizerSpec {
        match optimizer {
            OptimizerConfig::Adam { lr, b1, b2, eps } => OptimizerSpec::Adam {
                learning_rate: lr,
                beta1: b1,
                beta2: b2,
                epsilon: eps,
            },
            OptimizerConfig::GradientDescent { lr } => {
                OptimizerSpec::GradientDescent { learning_rate: lr }
            }
            OptimizerConfig::GradientDescentWithMomentum { lr, mu } => {
                OptimizerSpec::GradientDescentWithMomentum {
                    learning_rate: lr,
                    momentum: mu,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_adapts_to_adam() {
        let spec = Adapter::new()
            .adapt_config(&TrainingConfig::default())
            .unwrap();

        assert_eq!(spec.max_iter.get(), 200);
        assert_eq!(
            spec.optimizer,
            OptimizerSpec::Adam {
                learning_rate: 0.1,
                beta1: 0.9,
                beta2: 0.999,
                epsilon: 1e-8,
            }
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let adapter = Adapter::new();

        let configs = [
            TrainingConfig {
                test_ratio: 1.0,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                c: 0.0,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                tol: -1.0,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                optimizer: OptimizerConfig::GradientDescent { lr: -0.1 },
                ..TrainingConfig::default()
            },
            TrainingConfig {
                model_path: "".into(),
                ..TrainingConfig::default()
            },
        ];

        for config in configs {
            assert!(matches!(
                adapter.adapt_config(&config),
                Err(TrainerErr::InvalidConfig(_))
            ));
        }
    }
}

//! Trains the iris classifier and persists it as a `ModelArtifact`.

mod configs;
mod error;

use std::path::PathBuf;

use log::{info, warn};
use machine_learning::{
    arch::{Classifier, LogisticRegression, Model},
    dataset::Dataset,
    metrics,
    training::{FitReport, TrainerBuilder},
};
use model::ModelArtifact;
use rand::{SeedableRng, rngs::StdRng};

pub use configs::{OptimizerConfig, TrainingConfig};
pub use error::TrainerErr;

use configs::Adapter;

/// The outcome of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub train_samples: usize,
    pub test_samples: usize,
    pub fit: FitReport,
    /// The fraction of correctly classified held-out samples.
    pub accuracy: f64,
    pub model_path: PathBuf,
}

/// Trains a classifier on the bundled iris dataset and writes the artifact to
/// `config.model_path`, replacing any previous one.
///
/// # Arguments
/// * `config` - The training configuration.
///
/// # Returns
/// A report of the run or an error if the config is invalid, the dataset can't be loaded or
/// the artifact can't be written.
pub fn train_and_save_model(config: &TrainingConfig) -> Result<TrainingReport, TrainerErr> {
    let iris = Dataset::iris().map_err(TrainerErr::Dataset)?;
    train_and_save_model_on(&iris, config)
}

/// Same as `train_and_save_model` but over an arbitrary labelled dataset.
pub fn train_and_save_model_on(
    dataset: &Dataset,
    config: &TrainingConfig,
) -> Result<TrainingReport, TrainerErr> {
    info!("adapting configs");
    let spec = Adapter::new().adapt_config(config)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let (train, test) = dataset
        .split(config.test_ratio, &mut rng)
        .map_err(TrainerErr::Dataset)?;

    info!(
        train = train.len(), test = test.len(), seed = config.seed;
        "split dataset"
    );

    let mut model = LogisticRegression::new(train.n_features(), train.n_classes(), config.c)
        .map_err(TrainerErr::Training)?;
    let mut trainer = TrainerBuilder::new()
        .build(&spec, model.size())
        .map_err(TrainerErr::Training)?;

    let targets = train.one_hot();
    let fit = trainer
        .fit(&mut model, train.x(), targets.view())
        .map_err(TrainerErr::Training)?;

    if fit.converged {
        info!(iterations = fit.iterations, loss = fit.loss; "training converged");
    } else {
        warn!(
            "training did not converge within {} iterations (loss {:.4}), consider raising max_iter",
            fit.iterations, fit.loss
        );
    }

    let y_pred = model.predict(test.x()).map_err(TrainerErr::Training)?;
    let accuracy = metrics::accuracy(test.labels(), &y_pred).map_err(TrainerErr::Training)?;
    info!("test accuracy: {accuracy:.4}");

    let artifact = ModelArtifact::new(
        model,
        dataset.target_names().to_vec(),
        dataset.feature_names().to_vec(),
    );
    artifact.save(&config.model_path)?;

    Ok(TrainingReport {
        train_samples: train.len(),
        test_samples: test.len(),
        fit,
        accuracy,
        model_path: config.model_path.clone(),
    })
}

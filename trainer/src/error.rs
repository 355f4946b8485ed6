use std::fmt;

use machine_learning::MlErr;
use model::ArtifactErr;

/// All errors that can occur while training.
#[derive(Debug)]
pub enum TrainerErr {
    /// Invalid configuration, caught before touching the dataset.
    InvalidConfig(String),
    /// The dataset could not be loaded or partitioned.
    Dataset(MlErr),
    /// Fitting or evaluating the model failed.
    Training(MlErr),
    /// The artifact could not be written.
    Artifact(ArtifactErr),
}

impl fmt::Display for TrainerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Dataset(e) => write!(f, "dataset error: {e}"),
            Self::Training(e) => write!(f, "training error: {e}"),
            Self::Artifact(e) => write!(f, "artifact error: {e}"),
        }
    }
}

impl std::error::Error for TrainerErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(_) => None,
            Self::Dataset(e) | Self::Training(e) => Some(e),
            Self::Artifact(e) => Some(e),
        }
    }
}

impl From<ArtifactErr> for TrainerErr {
    fn from(e: ArtifactErr) -> Self {
        Self::Artifact(e)
    }
}

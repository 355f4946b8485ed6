use std::{fs, path::Path};

use log::{debug, info};
use machine_learning::{
    Result as MlResult,
    arch::{Classifier, LogisticRegression},
};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{ArtifactErr, Result};

/// Where training writes the artifact and serving reads it unless told otherwise.
pub const DEFAULT_MODEL_PATH: &str = "models/iris_model.json";

/// A fitted classifier as persisted in the artifact, tagged by algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FittedModel {
    LogisticRegression(LogisticRegression),
}

impl From<LogisticRegression> for FittedModel {
    fn from(model: LogisticRegression) -> Self {
        Self::LogisticRegression(model)
    }
}

impl Classifier for FittedModel {
    fn n_features(&self) -> usize {
        match self {
            Self::LogisticRegression(m) => m.n_features(),
        }
    }

    fn n_classes(&self) -> usize {
        match self {
            Self::LogisticRegression(m) => m.n_classes(),
        }
    }

    fn predict_proba(&self, x: ArrayView2<f64>) -> MlResult<Array2<f64>> {
        match self {
            Self::LogisticRegression(m) => m.predict_proba(x),
        }
    }
}

/// A fitted model plus the names needed to interpret it. `target_names[i]` names class `i` and
/// `feature_names[j]` names input column `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: FittedModel,
    pub target_names: Vec<String>,
    pub feature_names: Vec<String>,
}

impl ModelArtifact {
    /// Creates a new `ModelArtifact`.
    ///
    /// # Arguments
    /// * `model` - The fitted classifier.
    /// * `target_names` - The class names, ordered by class index.
    /// * `feature_names` - The input feature names, ordered by column.
    pub fn new<M>(model: M, target_names: Vec<String>, feature_names: Vec<String>) -> Self
    where
        M: Into<FittedModel>,
    {
        Self {
            model: model.into(),
            target_names,
            feature_names,
        }
    }

    /// Writes the artifact as JSON to `path`, creating the parent directory if it's missing and
    /// replacing any previous artifact.
    ///
    /// # Arguments
    /// * `path` - Where to write the artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| ArtifactErr::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(self).map_err(|source| ArtifactErr::Format {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, json).map_err(io_err)?;
        info!("model saved to {}", path.display());
        Ok(())
    }

    /// Reads an artifact previously written by `save`.
    ///
    /// # Arguments
    /// * `path` - Where the artifact lives.
    ///
    /// # Returns
    /// The artifact exactly as written, or `ArtifactErr::NotFound` if there's no file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ArtifactErr::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|source| ArtifactErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: Self =
            serde_json::from_slice(&bytes).map_err(|source| ArtifactErr::Format {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            classes = artifact.target_names.len(),
            features = artifact.feature_names.len();
            "artifact read"
        );

        Ok(artifact)
    }
}

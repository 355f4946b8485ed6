use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use machine_learning::arch::Classifier;
use model::ModelArtifact;

use crate::Result;

/// The in-memory form of a model artifact. Built once at startup and only read afterwards.
pub struct ModelContext {
    pub model: Box<dyn Classifier + Send + Sync>,
    pub target_names: Vec<String>,
    pub feature_names: Vec<String>,
}

impl std::fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelContext")
            .field("target_names", &self.target_names)
            .field("feature_names", &self.feature_names)
            .finish_non_exhaustive()
    }
}

impl ModelContext {
    pub fn new<C>(model: C, target_names: Vec<String>, feature_names: Vec<String>) -> Self
    where
        C: Classifier + Send + Sync + 'static,
    {
        Self {
            model: Box::new(model),
            target_names,
            feature_names,
        }
    }
}

impl From<ModelArtifact> for ModelContext {
    fn from(artifact: ModelArtifact) -> Self {
        Self::new(
            artifact.model,
            artifact.target_names,
            artifact.feature_names,
        )
    }
}

/// Loads the artifact at `path` into a `ModelContext`.
///
/// # Returns
/// The context, `ServeErr::ModelMissing` if there's no artifact at `path`, or
/// `ServeErr::Artifact` if it can't be read.
pub fn load_model(path: &Path) -> Result<ModelContext> {
    let artifact = ModelArtifact::load(path)?;

    info!(
        classes = artifact.target_names.len(),
        features = artifact.feature_names.len();
        "model loaded from {}", path.display()
    );

    Ok(artifact.into())
}

/// The state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<ModelContext>>,
    pub ui_path: PathBuf,
}

impl AppState {
    pub fn new(model: Option<ModelContext>, ui_path: PathBuf) -> Self {
        Self {
            model: model.map(Arc::new),
            ui_path,
        }
    }
}

//! The model artifact shared by training and serving: a fitted classifier together with the
//! names of its classes and input features, persisted as a single JSON file.

mod artifact;
mod error;

pub use artifact::{DEFAULT_MODEL_PATH, FittedModel, ModelArtifact};
pub use error::{ArtifactErr, Result};

use std::{error::Error, fmt, io, path::PathBuf};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use model::ArtifactErr;
use serde_json::json;

/// The server module's result type.
pub type Result<T> = std::result::Result<T, ServeErr>;

#[derive(Debug)]
pub enum ServeErr {
    /// There's no artifact to serve, fatal at startup.
    ModelMissing { path: PathBuf },
    /// The artifact exists but couldn't be read.
    Artifact(ArtifactErr),
    /// A prediction was requested but no model is loaded.
    ModelNotLoaded,
    /// The request can't be turned into a prediction.
    InvalidInput(String),
    InvalidConfig(String),
    Io(io::Error),
}

impl ServeErr {
    fn status(&self) -> StatusCode {
        match self {
            ServeErr::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            ServeErr::ModelNotLoaded => "Model not loaded".to_string(),
            ServeErr::InvalidInput(msg) => msg.clone(),
            e => e.to_string(),
        }
    }
}

impl fmt::Display for ServeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeErr::ModelMissing { path } => write!(
                f,
                "model file not found at {}, make sure the model was trained",
                path.display()
            ),
            ServeErr::Artifact(e) => write!(f, "failed to load the model: {e}"),
            ServeErr::ModelNotLoaded => write!(f, "model not loaded"),
            ServeErr::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ServeErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            ServeErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for ServeErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServeErr::Artifact(e) => Some(e),
            ServeErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArtifactErr> for ServeErr {
    fn from(e: ArtifactErr) -> Self {
        match e {
            ArtifactErr::NotFound { path } => ServeErr::ModelMissing { path },
            e => ServeErr::Artifact(e),
        }
    }
}

impl From<io::Error> for ServeErr {
    fn from(e: io::Error) -> Self {
        ServeErr::Io(e)
    }
}

impl IntoResponse for ServeErr {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_client_error() {
            warn!("rejected request: {detail}");
        } else {
            error!("request failed: {detail}");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_maps_to_model_missing() {
        let err = ServeErr::from(ArtifactErr::NotFound {
            path: "models/iris_model.json".into(),
        });

        assert!(matches!(err, ServeErr::ModelMissing { .. }));
        assert!(err.to_string().contains("models/iris_model.json"));
    }

    #[test]
    fn only_input_errors_are_client_errors() {
        assert_eq!(
            ServeErr::InvalidInput("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServeErr::ModelNotLoaded.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ServeErr::ModelNotLoaded.detail(), "Model not loaded");
    }
}

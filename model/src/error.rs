use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The artifact module's result type.
pub type Result<T> = std::result::Result<T, ArtifactErr>;

/// Failures reading or writing a model artifact.
#[derive(Debug)]
pub enum ArtifactErr {
    /// There's no artifact at the given path.
    NotFound { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    /// The file exists but doesn't hold a valid artifact.
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ArtifactErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErr::NotFound { path } => write!(
                f,
                "model file not found at {}, make sure the model was trained",
                path.display()
            ),
            ArtifactErr::Io { path, source } => write!(f, "io error on {}: {source}", path.display()),
            ArtifactErr::Format { path, source } => {
                write!(f, "invalid model file {}: {source}", path.display())
            }
        }
    }
}

impl Error for ArtifactErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArtifactErr::NotFound { .. } => None,
            ArtifactErr::Io { source, .. } => Some(source),
            ArtifactErr::Format { source, .. } => Some(source),
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("directory can not be created: {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error reading manifest of {coordinate} ({}): {reason}", path.display())]
    ArchiveRead {
        coordinate: String,
        path: PathBuf,
        reason: String,
    },
    #[error(
        "failure during copying of {} to {}: {source}",
        source_path.display(),
        destination.display()
    )]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact {coordinate} not found at {}", path.display())]
    ArtifactNotFound { coordinate: String, path: PathBuf },
    #[error("invalid artifact coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

use std::io;
use std::path::PathBuf;

/// Errors that can occur during pod-testing operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("No podspec found in {}", .0.display())]
    NoManifestError(PathBuf),

    #[error("No suitable test targets found")]
    NoTestTargetsError,

    #[error("Failed to parse scheme {}: {message}", path.display())]
    SchemeParseError { path: PathBuf, message: String },

    #[error("Failed to parse workspace {}: {message}", path.display())]
    WorkspaceParseError { path: PathBuf, message: String },

    #[error("Failed to read project {}: {message}", path.display())]
    ProjectError { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{driver} failed for scheme '{scheme}' (exit code {})", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    BuildFailedError {
        driver: String,
        scheme: String,
        code: Option<i32>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for pod-testing operations
pub type Result<T> = std::result::Result<T, Error>;

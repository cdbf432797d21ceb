//! Error types for scene publishing.

use scenepub_encoding::EncodingError;
use thiserror::Error;

/// Result type for scene publishing.
pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    /// Failure raised by a loader, passed through unchanged.
    #[error(transparent)]
    Loader(scenepub_types::Error),

    #[error("encoding error: {0}")]
    Encoding(EncodingError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<scenepub_types::Error> for BuildError {
    fn from(e: scenepub_types::Error) -> Self {
        Self::Loader(e)
    }
}

impl From<EncodingError> for BuildError {
    fn from(e: EncodingError) -> Self {
        match e {
            EncodingError::Loader(e) => Self::Loader(e),
            other => Self::Encoding(other),
        }
    }
}

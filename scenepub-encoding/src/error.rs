//! Error types for encoding.

use scenepub_types::ValueType;
use thiserror::Error;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors that abort an export.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Failure raised by a layer, property or dataset loader.
    #[error(transparent)]
    Loader(#[from] scenepub_types::Error),

    /// A sealed field holds a value of the wrong type for its role.
    #[error("invalid value type for field {field}: expected {expected}")]
    InvalidValueType { field: String, expected: ValueType },

    /// A color string is not `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// IO error from the output sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed shapefile data.
    #[error("shapefile error: {0}")]
    Shapefile(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EncodingError {
    pub(crate) fn invalid_type(field: &str, expected: ValueType) -> Self {
        Self::InvalidValueType {
            field: field.to_string(),
            expected,
        }
    }
}

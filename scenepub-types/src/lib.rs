//! Core type definitions for the scene publishing pipeline.
//!
//! This crate defines the plugin-agnostic types every other crate shares:
//! - Layer, property, dataset and scene identifiers (UUID v7)
//! - Plugin, extension and schema identifiers (plain strings)
//! - The typed [`Value`] model stored in property and dataset fields
//! - The collaborator [`Error`] returned by layer/property/dataset loaders

mod ids;
mod value;

pub use ids::{
    ClusterId, DatasetFieldId, DatasetId, DatasetSchemaId, ExtensionId, FieldId, InfoboxFieldId,
    ItemId, LayerId, PluginId, PropertyId, PropertySchemaId, SceneId, SchemaGroupId, WidgetId,
};
pub use value::{
    Camera, Coordinates, LatLng, LatLngHeight, Polygon, Rect, Typography, Value, ValueType,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by loaders and propagated unchanged through the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage or codec failure inside a collaborator.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}

impl Error {
    /// Shorthand for a `NotFound` naming the kind of record and its id.
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }

    /// Returns true for `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

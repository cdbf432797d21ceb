//! Identifier types used throughout the pipeline.
//!
//! Records owned by the CMS (layers, properties, datasets, scenes) use UUID v7
//! for time-ordered, globally unique identifiers. Plugin, extension and schema
//! identifiers are human-readable strings declared by plugin manifests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new ID with the current timestamp.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Parses an ID from a string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a layer (item or group).
    LayerId
);
uuid_id!(
    /// Unique identifier for a property document.
    PropertyId
);
uuid_id!(
    /// Unique identifier for a group or group list inside a property.
    ItemId
);
uuid_id!(
    /// Unique identifier for a dataset row.
    DatasetId
);
uuid_id!(
    /// Unique identifier for a dataset schema.
    DatasetSchemaId
);
uuid_id!(
    /// Unique identifier for a field declared by a dataset schema.
    DatasetFieldId
);
uuid_id!(
    /// Unique identifier for a field of a layer's infobox.
    InfoboxFieldId
);
uuid_id!(
    /// Unique identifier for a scene.
    SceneId
);
uuid_id!(
    /// Unique identifier for a widget installed in a scene.
    WidgetId
);
uuid_id!(
    /// Unique identifier for a marker cluster.
    ClusterId
);

string_id!(
    /// Identifier of a plugin (e.g. `"reearth"`).
    PluginId
);
string_id!(
    /// Identifier of an extension within a plugin (e.g. `"marker"`).
    ExtensionId
);
string_id!(
    /// Identifier of a property schema (e.g. `"reearth/marker"`).
    PropertySchemaId
);
string_id!(
    /// Identifier of a group declared by a property schema (e.g. `"default"`).
    SchemaGroupId
);
string_id!(
    /// Identifier of a field declared by a property schema group (e.g. `"location"`).
    FieldId
);

impl PluginId {
    /// Id of the built-in plugin supplying marker/polygon/polyline primitives.
    pub const OFFICIAL: &'static str = "reearth";

    #[must_use]
    pub fn official() -> Self {
        Self(Self::OFFICIAL.to_string())
    }

    #[must_use]
    pub fn is_official(&self) -> bool {
        self.0 == Self::OFFICIAL
    }
}

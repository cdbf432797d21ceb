//! Typed values stored in property and dataset fields.
//!
//! On the wire (fixtures, loaders) a value is tagged with its type:
//! `{"type": "latlng", "value": {"lat": 35.0, "lng": 139.0}}`. In publish output
//! it is rendered untagged through [`Value::to_json`].

use crate::DatasetId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    Number,
    String,
    /// Reference to another dataset. Only produced by dataset fields.
    Ref,
    Url,
    LatLng,
    LatLngHeight,
    Camera,
    Typography,
    Coordinates,
    Polygon,
    Rect,
}

impl ValueType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Ref => "ref",
            Self::Url => "url",
            Self::LatLng => "latlng",
            Self::LatLngHeight => "latlngheight",
            Self::Camera => "camera",
            Self::Typography => "typography",
            Self::Coordinates => "coordinates",
            Self::Polygon => "polygon",
            Self::Rect => "rect",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngHeight {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub height: f64,
}

impl From<LatLng> for LatLngHeight {
    fn from(l: LatLng) -> Self {
        Self {
            lat: l.lat,
            lng: l.lng,
            height: 0.0,
        }
    }
}

/// Camera pose: position in degrees/meters, orientation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    pub fov: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// One of `left`, `center`, `right`, `justify`, `justify_all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

/// Geographic rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// An ordered line of positions.
pub type Coordinates = Vec<LatLngHeight>;

/// A list of rings; the first is the outer boundary.
pub type Polygon = Vec<Coordinates>;

/// A concrete field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    Ref(DatasetId),
    Url(String),
    LatLng(LatLng),
    LatLngHeight(LatLngHeight),
    Camera(Camera),
    Typography(Typography),
    Coordinates(Coordinates),
    Polygon(Polygon),
    Rect(Rect),
}

impl Value {
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Ref(_) => ValueType::Ref,
            Self::Url(_) => ValueType::Url,
            Self::LatLng(_) => ValueType::LatLng,
            Self::LatLngHeight(_) => ValueType::LatLngHeight,
            Self::Camera(_) => ValueType::Camera,
            Self::Typography(_) => ValueType::Typography,
            Self::Coordinates(_) => ValueType::Coordinates,
            Self::Polygon(_) => ValueType::Polygon,
            Self::Rect(_) => ValueType::Rect,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload of `String` and `Url` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Url(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ref_id(&self) -> Option<DatasetId> {
        match self {
            Self::Ref(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_latlng(&self) -> Option<LatLng> {
        match self {
            Self::LatLng(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_coordinates(&self) -> Option<&Coordinates> {
        match self {
            Self::Coordinates(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Converts the value to the untagged JSON used by publish output.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            Self::Bool(b) => json!(b),
            Self::Number(n) => json!(n),
            Self::String(s) | Self::Url(s) => json!(s),
            Self::Ref(id) => json!(id.to_string()),
            Self::LatLng(v) => json!(v),
            Self::LatLngHeight(v) => json!(v),
            Self::Camera(v) => json!(v),
            Self::Typography(v) => json!(v),
            Self::Coordinates(v) => json!(v),
            Self::Polygon(v) => json!(v),
            Self::Rect(v) => json!(v),
        }
    }
}

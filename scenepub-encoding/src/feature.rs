//! Geometry and style extraction from sealed item properties.

use crate::{EncodingError, EncodingResult, Rgba};
use scenepub_layer::merging::SealedLayerItem;
use scenepub_property::SealedProperty;
use scenepub_types::{Coordinates, LatLng, Polygon, Value, ValueType};
use tracing::debug;

pub(crate) const MARKER: &str = "marker";
pub(crate) const POLYGON: &str = "polygon";
pub(crate) const POLYLINE: &str = "polyline";

/// The drawable content of one item.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Marker(MarkerFeature),
    Polygon(PolygonFeature),
    Polyline(PolylineFeature),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerFeature {
    pub location: LatLng,
    pub height: Option<f64>,
    pub point_color: Option<Rgba>,
    /// The color string as stored, for formats that echo it.
    pub point_color_hex: Option<String>,
    pub point_size: Option<f64>,
    pub image: Option<String>,
    pub image_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFeature {
    pub polygon: Polygon,
    pub fill: Option<bool>,
    pub stroke: Option<bool>,
    pub fill_color: Option<Rgba>,
    pub fill_color_hex: Option<String>,
    pub stroke_color: Option<Rgba>,
    pub stroke_color_hex: Option<String>,
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineFeature {
    pub coordinates: Coordinates,
    pub stroke_color: Option<Rgba>,
    pub stroke_color_hex: Option<String>,
    pub stroke_width: Option<f64>,
}

impl Feature {
    /// Reads the feature of an item.
    ///
    /// Returns `Ok(None)` for layers not drawn by an official geometry
    /// extension and for items whose geometry field is unset. A field holding
    /// a value of the wrong type is an error.
    pub fn from_item(item: &SealedLayerItem) -> EncodingResult<Option<Self>> {
        let common = &item.common;
        let official = common.plugin.as_ref().is_some_and(|p| p.is_official());
        let extension = common.extension.as_ref().map(|e| e.as_str());

        let fields = Fields {
            property: common.property.as_ref(),
        };
        let feature = match (official, extension) {
            (true, Some(MARKER)) => fields.marker()?.map(Self::Marker),
            (true, Some(POLYGON)) => fields.polygon()?.map(Self::Polygon),
            (true, Some(POLYLINE)) => fields.polyline()?.map(Self::Polyline),
            _ => {
                debug!(layer_id = %common.id, extension = ?extension, "Skipping layer without geometry extension");
                return Ok(None);
            }
        };
        if feature.is_none() {
            debug!(layer_id = %common.id, "Skipping layer with unset geometry");
        }
        Ok(feature)
    }
}

/// Typed access to the fields of a sealed property.
struct Fields<'a> {
    property: Option<&'a SealedProperty>,
}

impl Fields<'_> {
    fn get(&self, field: &str) -> Option<&Value> {
        self.property?.value(field)
    }

    fn typed<T>(
        &self,
        field: &str,
        expected: ValueType,
        cast: impl FnOnce(&Value) -> Option<T>,
    ) -> EncodingResult<Option<T>> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => cast(v)
                .map(Some)
                .ok_or_else(|| EncodingError::invalid_type(field, expected)),
        }
    }

    fn number(&self, field: &str) -> EncodingResult<Option<f64>> {
        self.typed(field, ValueType::Number, Value::as_number)
    }

    fn bool(&self, field: &str) -> EncodingResult<Option<bool>> {
        self.typed(field, ValueType::Bool, Value::as_bool)
    }

    fn string(&self, field: &str) -> EncodingResult<Option<String>> {
        self.typed(field, ValueType::String, |v| v.as_str().map(str::to_string))
    }

    fn color(&self, field: &str) -> EncodingResult<(Option<Rgba>, Option<String>)> {
        match self.string(field)? {
            Some(hex) => Ok((Some(Rgba::parse(&hex)?), Some(hex))),
            None => Ok((None, None)),
        }
    }

    fn marker(&self) -> EncodingResult<Option<MarkerFeature>> {
        let Some(location) = self.typed("location", ValueType::LatLng, Value::as_latlng)? else {
            return Ok(None);
        };
        let (point_color, point_color_hex) = self.color("pointColor")?;
        Ok(Some(MarkerFeature {
            location,
            height: self.number("height")?,
            point_color,
            point_color_hex,
            point_size: self.number("pointSize")?,
            image: self.string("image")?,
            image_size: self.number("imageSize")?,
        }))
    }

    fn polygon(&self) -> EncodingResult<Option<PolygonFeature>> {
        let Some(polygon) = self.typed("polygon", ValueType::Polygon, |v| v.as_polygon().cloned())? else {
            return Ok(None);
        };
        let (fill_color, fill_color_hex) = self.color("fillColor")?;
        let (stroke_color, stroke_color_hex) = self.color("strokeColor")?;
        Ok(Some(PolygonFeature {
            polygon,
            fill: self.bool("fill")?,
            stroke: self.bool("stroke")?,
            fill_color,
            fill_color_hex,
            stroke_color,
            stroke_color_hex,
            stroke_width: self.number("strokeWidth")?,
        }))
    }

    fn polyline(&self) -> EncodingResult<Option<PolylineFeature>> {
        let Some(coordinates) =
            self.typed("coordinates", ValueType::Coordinates, |v| v.as_coordinates().cloned())?
        else {
            return Ok(None);
        };
        let (stroke_color, stroke_color_hex) = self.color("strokeColor")?;
        Ok(Some(PolylineFeature {
            coordinates,
            stroke_color,
            stroke_color_hex,
            stroke_width: self.number("strokeWidth")?,
        }))
    }
}

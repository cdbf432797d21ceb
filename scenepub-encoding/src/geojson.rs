use crate::feature::{Feature, MarkerFeature, PolygonFeature, PolylineFeature};
use crate::{Encoder, EncodingResult};
use scenepub_layer::merging::{SealedLayer, SealedLayerItem};
use scenepub_types::LatLngHeight;
use serde_json::{Map, Value as JsonValue, json};
use std::io::Write;

/// Writes RFC 7946 GeoJSON with simplestyle properties.
///
/// An item becomes a `Feature`; a group becomes a `FeatureCollection` of every
/// descendant item, nesting flattened. An ineligible item writes nothing.
pub struct GeoJsonEncoder<W> {
    writer: W,
}

impl<W: Write> GeoJsonEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Encoder for GeoJsonEncoder<W> {
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()> {
        let document = match layer {
            SealedLayer::Item(item) => match feature(item)? {
                Some(f) => f,
                None => return Ok(()),
            },
            SealedLayer::Group(_) => {
                let mut features = Vec::new();
                for item in layer.flatten_items() {
                    features.extend(feature(item)?);
                }
                json!({ "type": "FeatureCollection", "features": features })
            }
        };
        serde_json::to_writer(&mut self.writer, &document)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn feature(item: &SealedLayerItem) -> EncodingResult<Option<JsonValue>> {
    let Some(feature) = Feature::from_item(item)? else {
        return Ok(None);
    };

    let mut properties = Map::new();
    properties.insert("name".into(), json!(item.common.name));

    let geometry = match &feature {
        Feature::Marker(m) => marker(m, &mut properties),
        Feature::Polygon(p) => polygon(p, &mut properties),
        Feature::Polyline(l) => polyline(l, &mut properties),
    };

    Ok(Some(json!({
        "type": "Feature",
        "id": item.common.id.to_string(),
        "geometry": geometry,
        "properties": properties,
    })))
}

fn marker(m: &MarkerFeature, properties: &mut Map<String, JsonValue>) -> JsonValue {
    if let Some(color) = &m.point_color_hex {
        properties.insert("marker-color".into(), json!(color));
    }
    let mut position = vec![m.location.lng, m.location.lat];
    position.extend(m.height);
    json!({ "type": "Point", "coordinates": position })
}

fn polygon(p: &PolygonFeature, properties: &mut Map<String, JsonValue>) -> JsonValue {
    if let Some(color) = &p.fill_color_hex {
        properties.insert("fill".into(), json!(color));
    }
    stroke(properties, p.stroke_color_hex.as_deref(), p.stroke_width);
    let rings: Vec<Vec<[f64; 3]>> = p.polygon.iter().map(|ring| positions(ring)).collect();
    json!({ "type": "Polygon", "coordinates": rings })
}

fn polyline(l: &PolylineFeature, properties: &mut Map<String, JsonValue>) -> JsonValue {
    stroke(properties, l.stroke_color_hex.as_deref(), l.stroke_width);
    json!({ "type": "LineString", "coordinates": positions(&l.coordinates) })
}

fn stroke(properties: &mut Map<String, JsonValue>, color: Option<&str>, width: Option<f64>) {
    if let Some(color) = color {
        properties.insert("stroke".into(), json!(color));
    }
    if let Some(width) = width {
        properties.insert("stroke-width".into(), json!(width));
    }
}

fn positions(coords: &[LatLngHeight]) -> Vec<[f64; 3]> {
    coords.iter().map(|c| [c.lng, c.lat, c.height]).collect()
}

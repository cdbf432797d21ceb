use crate::feature::{Feature, MarkerFeature, PolygonFeature, PolylineFeature};
use crate::{Encoder, EncodingResult, Rgba};
use scenepub_layer::merging::{SealedLayer, SealedLayerItem};
use scenepub_types::LatLngHeight;
use serde::Serialize;
use std::io::Write;

/// Writes a CZML packet array.
///
/// An item writes `[packet]`. A group writes the document packet followed by
/// one packet per direct child item; nested groups are not descended into.
pub struct CzmlEncoder<W> {
    writer: W,
}

impl<W: Write> CzmlEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Encoder for CzmlEncoder<W> {
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()> {
        let mut packets = Vec::new();
        match layer {
            SealedLayer::Item(item) => packets.extend(packet(item)?),
            SealedLayer::Group(group) => {
                packets.push(Packet::document());
                for child in &group.children {
                    if let SealedLayer::Item(item) = child {
                        packets.extend(packet(item)?);
                    }
                }
            }
        }
        serde_json::to_writer(&mut self.writer, &packets)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
struct Packet {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Positions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    point: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    polygon: Option<PolygonGraphics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    polyline: Option<PolylineGraphics>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Positions {
    cartographic_degrees: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct Color {
    rgba: [u8; 4],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Material {
    solid_color: SolidColor,
}

#[derive(Debug, Serialize)]
struct SolidColor {
    color: Color,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Point {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pixel_size: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PolygonGraphics {
    positions: Positions,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    material: Option<Material>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_width: Option<f64>,
}

#[derive(Debug, Serialize)]
struct PolylineGraphics {
    positions: Positions,
    #[serde(skip_serializing_if = "Option::is_none")]
    material: Option<Material>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
}

impl Packet {
    fn document() -> Self {
        Self {
            id: "document".into(),
            name: Some("CZML Geometries".into()),
            version: Some("1.0"),
            ..Self::default()
        }
    }
}

fn color(c: Option<Rgba>) -> Option<Color> {
    c.map(|c| Color { rgba: c.to_array() })
}

fn material(c: Option<Rgba>) -> Option<Material> {
    color(c).map(|color| Material {
        solid_color: SolidColor { color },
    })
}

fn degrees(coords: &[LatLngHeight]) -> Positions {
    Positions {
        cartographic_degrees: coords.iter().flat_map(|c| [c.lng, c.lat, c.height]).collect(),
    }
}

fn packet(item: &SealedLayerItem) -> EncodingResult<Option<Packet>> {
    let Some(feature) = Feature::from_item(item)? else {
        return Ok(None);
    };
    let mut packet = Packet {
        id: item.common.id.to_string(),
        name: Some(item.common.name.clone()),
        ..Packet::default()
    };
    match feature {
        Feature::Marker(m) => marker(&mut packet, &m),
        Feature::Polygon(p) => polygon(&mut packet, &p),
        Feature::Polyline(l) => polyline(&mut packet, &l),
    }
    Ok(Some(packet))
}

fn marker(packet: &mut Packet, m: &MarkerFeature) {
    packet.position = Some(Positions {
        cartographic_degrees: vec![m.location.lng, m.location.lat, m.height.unwrap_or(0.0)],
    });
    packet.point = Some(Point {
        color: color(m.point_color),
        pixel_size: m.point_size,
    });
}

fn polygon(packet: &mut Packet, p: &PolygonFeature) {
    // CZML polygons take the outer ring only.
    let outer = p.polygon.first().map(Vec::as_slice).unwrap_or_default();
    packet.polygon = Some(PolygonGraphics {
        positions: degrees(outer),
        fill: p.fill,
        material: material(p.fill_color),
        stroke: p.stroke,
        stroke_color: color(p.stroke_color),
        stroke_width: p.stroke_width,
    });
}

fn polyline(packet: &mut Packet, l: &PolylineFeature) {
    packet.polyline = Some(PolylineGraphics {
        positions: degrees(&l.coordinates),
        material: material(l.stroke_color),
        width: l.stroke_width,
    });
}

use crate::feature::Feature;
use crate::shp::{MultiPart, Point, Shape, Writer};
use crate::{Encoder, EncodingResult};
use scenepub_layer::merging::SealedLayer;
use scenepub_types::LatLngHeight;
use std::io::{Seek, Write};
use tracing::warn;

/// Writes drawn items as shapefile records, depth-first.
///
/// Markers become points, polylines single-part polylines and polygons one
/// part per ring. The first shape fixes the file's type; items drawing a
/// different kind of shape are left out. Each `encode` call finishes with a
/// header backpatch, so the sink always holds a complete file.
pub struct ShpEncoder<W: Write + Seek> {
    writer: Writer<W>,
}

impl<W: Write + Seek> ShpEncoder<W> {
    pub fn new(inner: W) -> EncodingResult<Self> {
        Ok(Self {
            writer: Writer::new(inner)?,
        })
    }

    pub fn writer(&self) -> &Writer<W> {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Seek> Encoder for ShpEncoder<W> {
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()> {
        for item in layer.flatten_items() {
            let Some(feature) = Feature::from_item(item)? else {
                continue;
            };
            let shape = shape(&feature);
            if !self.writer.accepts(shape.shape_type()) {
                warn!(
                    layer_id = %item.common.id,
                    shape_type = ?shape.shape_type(),
                    file_type = ?self.writer.shape_type(),
                    "Skipping shape that does not match the file's shape type"
                );
                continue;
            }
            self.writer.write(&shape)?;
        }
        self.writer.close()
    }
}

fn point(c: &LatLngHeight) -> Point {
    Point { x: c.lng, y: c.lat }
}

fn shape(feature: &Feature) -> Shape {
    match feature {
        Feature::Marker(m) => Shape::Point(Point {
            x: m.location.lng,
            y: m.location.lat,
        }),
        Feature::Polyline(l) => {
            Shape::PolyLine(MultiPart::new(vec![l.coordinates.iter().map(point).collect()]))
        }
        Feature::Polygon(p) => Shape::Polygon(MultiPart::new(
            p.polygon
                .iter()
                .map(|ring| ring.iter().map(point).collect())
                .collect(),
        )),
    }
}

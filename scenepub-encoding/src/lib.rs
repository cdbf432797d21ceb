//! Output formats for sealed layer trees.
//!
//! Every format implements [`Encoder`]: it takes one [`SealedLayer`] (an item
//! or a whole group) and writes a complete document to its sink.
//!
//! | Encoder | Item | Group |
//! |---|---|---|
//! | [`GeoJsonEncoder`] | `Feature` | `FeatureCollection` of all descendant items |
//! | [`CzmlEncoder`] | `[packet]` | `[document, packet per direct child item]` |
//! | [`KmlEncoder`] | `Placemark` | `Folder` per sub-group, styles hoisted to the `Document` |
//! | [`ShpEncoder`] | one shape | every descendant item, depth-first |
//!
//! Only layers drawn by the official plugin's `marker`, `polygon` and
//! `polyline` extensions carry geometry; anything else is skipped silently.
//! [`Exporter`] runs merge, seal and encode for a layer id.

mod color;
mod czml;
mod error;
mod exporter;
mod feature;
mod geojson;
mod kml;
mod shapefile;
pub mod shp;

pub use color::Rgba;
pub use czml::CzmlEncoder;
pub use error::{EncodingError, EncodingResult};
pub use exporter::Exporter;
pub use feature::{Feature, MarkerFeature, PolygonFeature, PolylineFeature};
pub use geojson::GeoJsonEncoder;
pub use kml::KmlEncoder;
pub use shapefile::ShpEncoder;

use scenepub_layer::merging::SealedLayer;

/// Writes a sealed layer in one output format.
pub trait Encoder {
    /// Encodes `layer` and everything below it into the encoder's sink.
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()>;
}

impl<E: Encoder + ?Sized> Encoder for &mut E {
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()> {
        (**self).encode(layer)
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()> {
        (**self).encode(layer)
    }
}

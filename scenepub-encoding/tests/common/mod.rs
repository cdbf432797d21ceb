//! Builders for sealed layers, bypassing merge and seal.

#![allow(dead_code)]

use scenepub_layer::merging::{SealedLayer, SealedLayerCommon, SealedLayerGroup, SealedLayerItem};
use scenepub_property::{Field, Property, SealedProperty};
use scenepub_types::{
    ExtensionId, LatLng, LatLngHeight, LayerId, PluginId, SceneId, Value,
};

pub fn common(name: &str, plugin: &str, extension: &str, fields: Vec<Field>) -> SealedLayerCommon {
    let property = Property::new(format!("{plugin}/{extension}")).with_group("default", fields);
    SealedLayerCommon {
        id: LayerId::new(),
        parent: None,
        scene: SceneId::new(),
        name: name.to_string(),
        visible: true,
        plugin: Some(PluginId::new(plugin)),
        extension: Some(ExtensionId::new(extension)),
        property: Some(SealedProperty::from_property(&property)),
        infobox: None,
    }
}

pub fn item(name: &str, extension: &str, fields: Vec<Field>) -> SealedLayer {
    SealedLayer::Item(SealedLayerItem {
        common: common(name, "reearth", extension, fields),
    })
}

pub fn foreign_item(name: &str, plugin: &str, extension: &str) -> SealedLayer {
    SealedLayer::Item(SealedLayerItem {
        common: common(name, plugin, extension, vec![]),
    })
}

pub fn group(name: &str, children: Vec<SealedLayer>) -> SealedLayer {
    let mut common = common(name, "reearth", "marker", vec![]);
    common.property = None;
    SealedLayer::Group(SealedLayerGroup { common, children })
}

pub fn marker(name: &str, lat: f64, lng: f64) -> SealedLayer {
    item(name, "marker", vec![Field::new("location", Value::LatLng(LatLng { lat, lng }))])
}

pub fn llh(lat: f64, lng: f64, height: f64) -> LatLngHeight {
    LatLngHeight { lat, lng, height }
}

pub fn square() -> Vec<LatLngHeight> {
    vec![
        llh(0.0, 0.0, 0.0),
        llh(0.0, 1.0, 0.0),
        llh(1.0, 1.0, 0.0),
        llh(1.0, 0.0, 0.0),
        llh(0.0, 0.0, 0.0),
    ]
}

pub fn polygon(name: &str, extra: Vec<Field>) -> SealedLayer {
    let mut fields = vec![Field::new("polygon", Value::Polygon(vec![square()]))];
    fields.extend(extra);
    item(name, "polygon", fields)
}

pub fn polyline(name: &str, extra: Vec<Field>) -> SealedLayer {
    let mut fields = vec![Field::new(
        "coordinates",
        Value::Coordinates(vec![llh(1.0, 2.0, 3.0), llh(4.0, 5.0, 6.0)]),
    )];
    fields.extend(extra);
    item(name, "polyline", fields)
}

//! Shared builders for layer merging tests.

#![allow(dead_code)]

use scenepub_dataset::memory::MemoryDatasetLoader;
use scenepub_dataset::{Dataset, DatasetField};
use scenepub_layer::memory::MemoryLayerLoader;
use scenepub_layer::{Infobox, InfoboxField, Layer, LayerCommon, LayerItem};
use scenepub_property::memory::MemoryPropertyLoader;
use scenepub_property::{Field, Property};
use scenepub_types::{
    DatasetFieldId, DatasetId, DatasetSchemaId, InfoboxFieldId, LatLng, LayerId, PropertyId,
    SceneId, Value,
};

/// In-memory stores for one scene.
#[derive(Default)]
pub struct World {
    pub scene: SceneId,
    pub layers: MemoryLayerLoader,
    pub properties: MemoryPropertyLoader,
    pub datasets: MemoryDatasetLoader,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&mut self, property: Property) -> PropertyId {
        self.properties.insert(property)
    }

    /// An official marker item with the given property.
    pub fn marker(&mut self, name: &str, property: Option<PropertyId>) -> LayerId {
        let mut common = LayerCommon::new(self.scene, name).with_extension("reearth", "marker");
        common.property = property;
        self.layers.insert(Layer::item(common))
    }

    /// A marker item bound to a dataset row.
    pub fn linked_marker(&mut self, name: &str, dataset: DatasetId) -> LayerId {
        let common = LayerCommon::new(self.scene, name).with_extension("reearth", "marker");
        self.layers.insert(Layer::Item(LayerItem {
            common,
            linked_dataset: Some(dataset),
        }))
    }

    pub fn group(&mut self, name: &str, property: Option<PropertyId>, children: Vec<LayerId>) -> LayerId {
        let mut common = LayerCommon::new(self.scene, name).with_extension("reearth", "marker");
        common.property = property;
        self.layers.insert(Layer::group(common, children))
    }

    pub fn set_infobox(&mut self, layer: LayerId, infobox: Infobox) {
        let mut stored = self.layers.get(&layer).cloned().unwrap();
        stored.common_mut().infobox = Some(infobox);
        self.layers.insert(stored);
    }

    pub fn dataset(&mut self, schema: DatasetSchemaId, fields: Vec<(DatasetFieldId, Value)>) -> DatasetId {
        let id = DatasetId::new();
        self.datasets.insert(Dataset {
            id,
            schema,
            source: String::new(),
            fields: fields
                .into_iter()
                .map(|(field, value)| DatasetField {
                    field,
                    value: Some(value),
                    source: String::new(),
                })
                .collect(),
        });
        id
    }
}

pub fn marker_property(fields: Vec<Field>) -> Property {
    Property::new("reearth/marker").with_group("default", fields)
}

pub fn location(lat: f64, lng: f64) -> Value {
    Value::LatLng(LatLng { lat, lng })
}

pub fn infobox(property: PropertyId, fields: Vec<(&str, PropertyId)>) -> Infobox {
    Infobox {
        property,
        fields: fields
            .into_iter()
            .map(|(extension, property)| InfoboxField {
                id: InfoboxFieldId::new(),
                plugin: "reearth".into(),
                extension: extension.into(),
                property,
            })
            .collect(),
    }
}

pub fn text_block(text: &str) -> Property {
    Property::new("reearth/textblock")
        .with_group("default", vec![Field::new("text", Value::String(text.into()))])
}

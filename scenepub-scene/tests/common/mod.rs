//! A small published-scene fixture.

#![allow(dead_code)]

use scenepub_dataset::memory::MemoryDatasetLoader;
use scenepub_layer::memory::MemoryLayerLoader;
use scenepub_layer::{Infobox, InfoboxField, Layer, LayerCommon};
use scenepub_property::memory::MemoryPropertyLoader;
use scenepub_property::{Field, Property};
use scenepub_scene::Scene;
use scenepub_types::{InfoboxFieldId, LatLng, LayerId, PropertyId, SceneId, Value};

pub struct Fixture {
    pub scene_id: SceneId,
    pub layers: MemoryLayerLoader,
    pub properties: MemoryPropertyLoader,
    pub datasets: MemoryDatasetLoader,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            scene_id: SceneId::new(),
            layers: MemoryLayerLoader::new(),
            properties: MemoryPropertyLoader::new(),
            datasets: MemoryDatasetLoader::new(),
        }
    }

    pub fn property(&mut self, schema: &str, fields: Vec<Field>) -> PropertyId {
        self.properties
            .insert(Property::new(schema).with_group("default", fields))
    }

    pub fn marker(&mut self, name: &str, lat: f64, lng: f64) -> LayerId {
        let p = self.property(
            "reearth/marker",
            vec![Field::new("location", Value::LatLng(LatLng { lat, lng }))],
        );
        self.layers.insert(Layer::item(
            LayerCommon::new(self.scene_id, name)
                .with_extension("reearth", "marker")
                .with_property(p),
        ))
    }

    pub fn hidden_marker(&mut self, name: &str) -> LayerId {
        let id = self.marker(name, 0.0, 0.0);
        self.hide(id)
    }

    pub fn hide(&mut self, id: LayerId) -> LayerId {
        let mut layer = self.layers.get(&id).cloned().unwrap();
        layer.common_mut().visible = false;
        self.layers.insert(layer)
    }

    pub fn with_text_infobox(&mut self, layer: LayerId, text: &str) {
        let box_property = self.property("reearth/infobox", vec![Field::new("title", Value::String("Info".into()))]);
        let block = self.property("reearth/textblock", vec![Field::new("text", Value::String(text.into()))]);
        let mut stored = self.layers.get(&layer).cloned().unwrap();
        stored.common_mut().infobox = Some(Infobox {
            property: box_property,
            fields: vec![InfoboxField {
                id: InfoboxFieldId::new(),
                plugin: "reearth".into(),
                extension: "textblock".into(),
                property: block,
            }],
        });
        self.layers.insert(stored);
    }

    pub fn group(&mut self, name: &str, children: Vec<LayerId>) -> LayerId {
        self.layers
            .insert(Layer::group(LayerCommon::new(self.scene_id, name), children))
    }

    pub fn scene(&mut self, root: LayerId) -> Scene {
        let property = self.property("reearth/cesium", vec![Field::new("bgcolor", Value::String("#000".into()))]);
        let mut scene = Scene::new(root, property);
        scene.id = self.scene_id;
        scene
    }
}

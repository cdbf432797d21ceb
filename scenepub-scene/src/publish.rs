use scenepub_encoding::{Encoder, EncodingResult};
use scenepub_layer::merging::{SealedInfobox, SealedLayer, SealedLayerItem};
use scenepub_property::SealedProperty;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// A layer as it appears in the published scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedLayer {
    pub id: String,
    pub plugin_id: Option<String>,
    pub extension_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Map<String, JsonValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infobox: Option<PublishedInfobox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedInfobox {
    pub blocks: Vec<PublishedBlock>,
    pub property: Map<String, JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedBlock {
    pub id: String,
    pub plugin_id: String,
    pub extension_id: String,
    pub property: Map<String, JsonValue>,
}

/// Collects the published form of every visible item, depth-first.
///
/// Group nodes are dropped: published scenes carry a flat layer list. A hidden
/// group hides everything below it.
#[derive(Debug, Default)]
pub struct PublishEncoder {
    layers: Vec<PublishedLayer>,
}

impl PublishEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[PublishedLayer] {
        &self.layers
    }

    pub fn into_layers(self) -> Vec<PublishedLayer> {
        self.layers
    }
}

impl Encoder for PublishEncoder {
    fn encode(&mut self, layer: &SealedLayer) -> EncodingResult<()> {
        collect_visible(layer, &mut self.layers);
        Ok(())
    }
}

fn collect_visible(layer: &SealedLayer, out: &mut Vec<PublishedLayer>) {
    if !layer.common().visible {
        return;
    }
    match layer {
        SealedLayer::Item(item) => out.push(published_layer(item)),
        SealedLayer::Group(group) => {
            for child in &group.children {
                collect_visible(child, out);
            }
        }
    }
}

fn interface(property: Option<&SealedProperty>) -> Map<String, JsonValue> {
    property.map(SealedProperty::interface).unwrap_or_default()
}

fn published_layer(item: &SealedLayerItem) -> PublishedLayer {
    let common = &item.common;
    PublishedLayer {
        id: common.id.to_string(),
        plugin_id: common.plugin.as_ref().map(ToString::to_string),
        extension_id: common.extension.as_ref().map(ToString::to_string),
        name: common.name.clone(),
        property: common.property.as_ref().map(SealedProperty::interface),
        infobox: common.infobox.as_ref().map(published_infobox),
    }
}

fn published_infobox(infobox: &SealedInfobox) -> PublishedInfobox {
    PublishedInfobox {
        blocks: infobox
            .fields
            .iter()
            .map(|f| PublishedBlock {
                id: f.id.to_string(),
                plugin_id: f.plugin.to_string(),
                extension_id: f.extension.to_string(),
                property: interface(f.property.as_ref()),
            })
            .collect(),
        property: interface(infobox.property.as_ref()),
    }
}

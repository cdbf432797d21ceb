use scenepub_types::{
    DatasetId, DatasetSchemaId, ExtensionId, InfoboxFieldId, LayerId, PluginId, PropertyId, SceneId,
};
use serde::{Deserialize, Serialize};

/// A node of a scene's layer tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Item(LayerItem),
    Group(LayerGroup),
}

/// Fields shared by items and groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerCommon {
    pub id: LayerId,
    pub scene: SceneId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub plugin: Option<PluginId>,
    #[serde(default)]
    pub extension: Option<ExtensionId>,
    #[serde(default)]
    pub property: Option<PropertyId>,
    #[serde(default)]
    pub infobox: Option<Infobox>,
}

fn default_visible() -> bool {
    true
}

/// A leaf layer, optionally bound to one dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerItem {
    #[serde(flatten)]
    pub common: LayerCommon,
    #[serde(default)]
    pub linked_dataset: Option<DatasetId>,
}

/// An ordered group of child layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerGroup {
    #[serde(flatten)]
    pub common: LayerCommon,
    #[serde(default)]
    pub layers: Vec<LayerId>,
    /// Set when the children were generated one per row of a dataset schema.
    #[serde(default)]
    pub linked_dataset_schema: Option<DatasetSchemaId>,
    /// True for a scene's root group.
    #[serde(default)]
    pub root: bool,
}

/// Popup content attached to a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infobox {
    pub property: PropertyId,
    #[serde(default)]
    pub fields: Vec<InfoboxField>,
}

/// One block of an infobox, rendered by a plugin extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoboxField {
    pub id: InfoboxFieldId,
    pub plugin: PluginId,
    pub extension: ExtensionId,
    pub property: PropertyId,
}

impl LayerCommon {
    pub fn new(scene: SceneId, name: impl Into<String>) -> Self {
        Self {
            id: LayerId::new(),
            scene,
            name: name.into(),
            visible: true,
            plugin: None,
            extension: None,
            property: None,
            infobox: None,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, plugin: impl Into<PluginId>, extension: impl Into<ExtensionId>) -> Self {
        self.plugin = Some(plugin.into());
        self.extension = Some(extension.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyId) -> Self {
        self.property = Some(property);
        self
    }

    #[must_use]
    pub fn with_infobox(mut self, infobox: Infobox) -> Self {
        self.infobox = Some(infobox);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl Layer {
    /// A leaf layer with no linked dataset.
    pub fn item(common: LayerCommon) -> Self {
        Self::Item(LayerItem {
            common,
            linked_dataset: None,
        })
    }

    /// A group layer listing its children in order.
    pub fn group(common: LayerCommon, layers: Vec<LayerId>) -> Self {
        Self::Group(LayerGroup {
            common,
            layers,
            linked_dataset_schema: None,
            root: false,
        })
    }

    pub fn common(&self) -> &LayerCommon {
        match self {
            Self::Item(i) => &i.common,
            Self::Group(g) => &g.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut LayerCommon {
        match self {
            Self::Item(i) => &mut i.common,
            Self::Group(g) => &mut g.common,
        }
    }

    pub fn id(&self) -> LayerId {
        self.common().id
    }

    pub fn property(&self) -> Option<PropertyId> {
        self.common().property
    }

    pub fn infobox(&self) -> Option<&Infobox> {
        self.common().infobox.as_ref()
    }

    /// The item's own linked dataset; groups never carry one.
    pub fn linked_dataset(&self) -> Option<DatasetId> {
        match self {
            Self::Item(i) => i.linked_dataset,
            Self::Group(_) => None,
        }
    }

    /// Child ids of a group; empty for items.
    pub fn children(&self) -> &[LayerId] {
        match self {
            Self::Item(_) => &[],
            Self::Group(g) => &g.layers,
        }
    }
}

use scenepub_property::SealedProperty;
use scenepub_types::{ExtensionId, InfoboxFieldId, LayerId, PluginId, SceneId};

/// A fully resolved layer: encoders read it without touching any loader.
#[derive(Debug, Clone, PartialEq)]
pub enum SealedLayer {
    Item(SealedLayerItem),
    Group(SealedLayerGroup),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedLayerItem {
    pub common: SealedLayerCommon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedLayerGroup {
    pub common: SealedLayerCommon,
    pub children: Vec<SealedLayer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedLayerCommon {
    pub id: LayerId,
    pub parent: Option<LayerId>,
    pub scene: SceneId,
    pub name: String,
    pub visible: bool,
    pub plugin: Option<PluginId>,
    pub extension: Option<ExtensionId>,
    pub property: Option<SealedProperty>,
    pub infobox: Option<SealedInfobox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedInfobox {
    pub property: Option<SealedProperty>,
    pub fields: Vec<SealedInfoboxField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SealedInfoboxField {
    pub id: InfoboxFieldId,
    pub plugin: PluginId,
    pub extension: ExtensionId,
    pub property: Option<SealedProperty>,
}

impl SealedLayer {
    pub fn common(&self) -> &SealedLayerCommon {
        match self {
            Self::Item(i) => &i.common,
            Self::Group(g) => &g.common,
        }
    }

    pub fn id(&self) -> LayerId {
        self.common().id
    }

    /// Every item below (or at) this node, depth-first, group nodes dropped.
    pub fn flatten_items(&self) -> Vec<&SealedLayerItem> {
        let mut items = Vec::new();
        collect_items(self, &mut items);
        items
    }
}

fn collect_items<'a>(layer: &'a SealedLayer, out: &mut Vec<&'a SealedLayerItem>) {
    match layer {
        SealedLayer::Item(item) => out.push(item),
        SealedLayer::Group(group) => {
            for child in &group.children {
                collect_items(child, out);
            }
        }
    }
}

impl SealedLayerCommon {
    /// True when the layer is drawn by the given plugin extension.
    pub fn is_extension(&self, plugin: &str, extension: &str) -> bool {
        self.plugin.as_ref().is_some_and(|p| p.as_str() == plugin)
            && self.extension.as_ref().is_some_and(|e| e.as_str() == extension)
    }
}

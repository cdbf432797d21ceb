use scenepub_property::{MergedMetadata, MergedProperty};
use scenepub_types::{ExtensionId, InfoboxFieldId, LayerId, PluginId, PropertyId, SceneId};

/// A layer merged over its nearest ancestor.
#[derive(Debug, Clone, PartialEq)]
pub enum MergedLayer {
    Item(MergedLayerItem),
    Group(MergedLayerGroup),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedLayerItem {
    pub common: MergedLayerCommon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedLayerGroup {
    pub common: MergedLayerCommon,
    /// Merged children in the group's declared order.
    pub children: Vec<MergedLayer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedLayerCommon {
    pub original: LayerId,
    pub parent: Option<LayerId>,
    pub scene: SceneId,
    pub name: String,
    pub visible: bool,
    pub plugin: Option<PluginId>,
    pub extension: Option<ExtensionId>,
    pub property_meta: MergedMetadata,
    pub property: Option<MergedProperty>,
    pub infobox: Option<MergedInfobox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedInfobox {
    pub meta: MergedMetadata,
    pub property: Option<MergedProperty>,
    pub fields: Vec<MergedInfoboxField>,
    /// False when the whole infobox was inherited from the parent.
    pub overridden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedInfoboxField {
    pub id: InfoboxFieldId,
    pub plugin: PluginId,
    pub extension: ExtensionId,
    pub overridden: bool,
    pub meta: MergedMetadata,
    pub property: Option<MergedProperty>,
}

impl MergedLayer {
    pub fn common(&self) -> &MergedLayerCommon {
        match self {
            Self::Item(i) => &i.common,
            Self::Group(g) => &g.common,
        }
    }

    pub fn id(&self) -> LayerId {
        self.common().original
    }

    pub fn children(&self) -> &[MergedLayer] {
        match self {
            Self::Item(_) => &[],
            Self::Group(g) => &g.children,
        }
    }
}

/// The property a merge level exposes to the level below it: its own
/// property when it has one, else the one it inherited.
pub(crate) fn effective_property(meta: &MergedMetadata) -> Option<PropertyId> {
    meta.original.or(meta.parent)
}

impl MergedLayerCommon {
    /// Every property id this layer's merge needs, original side first.
    pub fn property_ids(&self) -> Vec<PropertyId> {
        let mut ids: Vec<PropertyId> = self.property_meta.property_ids().collect();
        if let Some(infobox) = &self.infobox {
            ids.extend(infobox.meta.property_ids());
            for field in &infobox.fields {
                ids.extend(field.meta.property_ids());
            }
        }
        ids
    }
}

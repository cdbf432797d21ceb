use crate::WidgetAlignSystem;
use scenepub_types::{ClusterId, ExtensionId, LayerId, PluginId, PropertyId, SceneId, WidgetId};
use serde::{Deserialize, Serialize};

/// A publishable scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: SceneId,
    pub root_layer: LayerId,
    pub property: PropertyId,
    #[serde(default)]
    pub plugins: Vec<ScenePlugin>,
    #[serde(default)]
    pub widgets: Vec<SceneWidget>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub widget_align_system: Option<WidgetAlignSystem>,
}

/// An installed plugin and its scene-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlugin {
    pub plugin: PluginId,
    #[serde(default)]
    pub property: Option<PropertyId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneWidget {
    pub id: WidgetId,
    pub plugin: PluginId,
    pub extension: ExtensionId,
    pub property: PropertyId,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub extended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    #[serde(default)]
    pub name: String,
    pub property: PropertyId,
}

impl Scene {
    pub fn new(root_layer: LayerId, property: PropertyId) -> Self {
        Self {
            id: SceneId::new(),
            root_layer,
            property,
            plugins: Vec::new(),
            widgets: Vec::new(),
            clusters: Vec::new(),
            widget_align_system: None,
        }
    }

    /// Every property the scene document needs, apart from layer properties.
    /// Disabled widgets are included; they are filtered at build time.
    pub fn properties(&self) -> Vec<PropertyId> {
        let mut ids = vec![self.property];
        ids.extend(self.plugins.iter().filter_map(|p| p.property));
        ids.extend(self.widgets.iter().map(|w| w.property));
        ids.extend(self.clusters.iter().map(|c| c.property));
        ids.sort();
        ids.dedup();
        ids
    }
}

use crate::{BuildResult, PublishEncoder, PublishedLayer, Scene};
use chrono::{DateTime, Utc};
use scenepub_dataset::GraphLoader;
use scenepub_encoding::Exporter;
use scenepub_layer::LayerLoader;
use scenepub_property::{Property, PropertyLoader, SealedProperty};
use scenepub_types::{Error, PropertyId, SceneId};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::io::Write;
use tracing::info;

/// Version of the published document layout.
pub const SCHEMA_VERSION: u32 = 1;

/// The published scene document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedScene {
    pub schema_version: u32,
    pub id: SceneId,
    pub published_at: DateTime<Utc>,
    pub property: Map<String, JsonValue>,
    pub plugins: Map<String, JsonValue>,
    pub layers: Vec<PublishedLayer>,
    pub widgets: Vec<PublishedWidget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_align_system: Option<JsonValue>,
    pub clusters: Vec<PublishedCluster>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedWidget {
    pub id: String,
    pub plugin_id: String,
    pub extension_id: String,
    pub property: Map<String, JsonValue>,
    pub extended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedCluster {
    pub id: String,
    pub name: String,
    pub property: Map<String, JsonValue>,
}

/// Assembles published scene documents.
pub struct SceneBuilder<'a> {
    exporter: Exporter<'a>,
    properties: &'a dyn PropertyLoader,
    pretty: bool,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(
        layers: &'a dyn LayerLoader,
        properties: &'a dyn PropertyLoader,
        graph: &'a dyn GraphLoader,
    ) -> Self {
        Self {
            exporter: Exporter::new(layers, properties, graph),
            properties,
            pretty: false,
        }
    }

    /// Indent the written document.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Builds the document and writes it to `sink` as JSON.
    pub async fn build_scene<W: Write>(
        &self,
        mut sink: W,
        scene: &Scene,
        published_at: DateTime<Utc>,
    ) -> BuildResult<()> {
        let document = self.build(scene, published_at).await?;
        if self.pretty {
            serde_json::to_writer_pretty(&mut sink, &document)?;
        } else {
            serde_json::to_writer(&mut sink, &document)?;
        }
        sink.flush()?;
        Ok(())
    }

    /// Builds the document without serializing it.
    pub async fn build(&self, scene: &Scene, published_at: DateTime<Utc>) -> BuildResult<PublishedScene> {
        let ids = scene.properties();
        let loaded: HashMap<PropertyId, Property> = self
            .properties
            .load_properties(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        let resolve = |id: PropertyId| -> BuildResult<Map<String, JsonValue>> {
            let property = loaded
                .get(&id)
                .ok_or_else(|| Error::not_found("property", id))?;
            Ok(SealedProperty::from_property(property).interface())
        };

        let mut encoder = PublishEncoder::new();
        self.exporter
            .export_layer_by_id(scene.root_layer, &mut encoder)
            .await?;

        let mut plugins = Map::new();
        for plugin in &scene.plugins {
            if let Some(id) = plugin.property {
                plugins.insert(plugin.plugin.to_string(), JsonValue::Object(resolve(id)?));
            }
        }

        let mut widgets = Vec::new();
        for widget in scene.widgets.iter().filter(|w| w.enabled) {
            widgets.push(PublishedWidget {
                id: widget.id.to_string(),
                plugin_id: widget.plugin.to_string(),
                extension_id: widget.extension.to_string(),
                property: resolve(widget.property)?,
                extended: widget.extended,
            });
        }

        let mut clusters = Vec::with_capacity(scene.clusters.len());
        for cluster in &scene.clusters {
            clusters.push(PublishedCluster {
                id: cluster.id.to_string(),
                name: cluster.name.clone(),
                property: resolve(cluster.property)?,
            });
        }

        let document = PublishedScene {
            schema_version: SCHEMA_VERSION,
            id: scene.id,
            published_at,
            property: resolve(scene.property)?,
            plugins,
            layers: encoder.into_layers(),
            widgets,
            widget_align_system: scene.widget_align_system.as_ref().and_then(|w| w.to_json()),
            clusters,
        };

        info!(
            scene_id = %scene.id,
            layers = document.layers.len(),
            widgets = document.widgets.len(),
            clusters = document.clusters.len(),
            "Published scene"
        );
        Ok(document)
    }
}

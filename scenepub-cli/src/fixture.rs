//! JSON fixtures: a whole workspace of layers, properties, datasets and
//! scenes in one file, loaded into the in-memory stores.

use anyhow::{Context, Result};
use scenepub_dataset::Dataset;
use scenepub_dataset::memory::MemoryDatasetLoader;
use scenepub_layer::Layer;
use scenepub_layer::memory::MemoryLayerLoader;
use scenepub_property::Property;
use scenepub_property::memory::MemoryPropertyLoader;
use scenepub_scene::Scene;
use scenepub_types::SceneId;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub layers: Vec<Layer>,
    pub properties: Vec<Property>,
    pub datasets: Vec<Dataset>,
    pub scenes: Vec<Scene>,
}

/// Loaders populated from a fixture.
#[derive(Debug, Default)]
pub struct Stores {
    pub layers: MemoryLayerLoader,
    pub properties: MemoryPropertyLoader,
    pub datasets: MemoryDatasetLoader,
    pub scenes: HashMap<SceneId, Scene>,
}

impl Fixture {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))
    }

    pub fn into_stores(self) -> Stores {
        Stores {
            layers: self.layers.into_iter().collect(),
            properties: self.properties.into_iter().collect(),
            datasets: self.datasets.into_iter().collect(),
            scenes: self.scenes.into_iter().map(|s| (s.id, s)).collect(),
        }
    }
}

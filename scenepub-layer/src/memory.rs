//! In-memory layer loader for tests and offline exports.

use crate::{Layer, LayerLoader};
use async_trait::async_trait;
use scenepub_types::{Error, LayerId, Result};
use std::collections::HashMap;

/// A [`LayerLoader`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayerLoader {
    layers: HashMap<LayerId, Layer>,
}

impl MemoryLayerLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a layer and returns its id.
    pub fn insert(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        self.layers.insert(id, layer);
        id
    }

    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl FromIterator<Layer> for MemoryLayerLoader {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().map(|l| (l.id(), l)).collect(),
        }
    }
}

#[async_trait]
impl LayerLoader for MemoryLayerLoader {
    async fn load_layers(&self, ids: &[LayerId]) -> Result<Vec<Layer>> {
        ids.iter()
            .map(|id| {
                self.layers
                    .get(id)
                    .cloned()
                    .ok_or_else(|| Error::not_found("layer", id))
            })
            .collect()
    }
}

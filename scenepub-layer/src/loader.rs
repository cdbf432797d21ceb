use crate::Layer;
use async_trait::async_trait;
use scenepub_types::{LayerId, Result};
use std::sync::Arc;

/// Batch loader for layers.
#[async_trait]
pub trait LayerLoader: Send + Sync {
    /// Loads layers in request order. A missing id is a `NotFound` error.
    async fn load_layers(&self, ids: &[LayerId]) -> Result<Vec<Layer>>;
}

#[async_trait]
impl<T: LayerLoader + ?Sized> LayerLoader for &T {
    async fn load_layers(&self, ids: &[LayerId]) -> Result<Vec<Layer>> {
        (**self).load_layers(ids).await
    }
}

#[async_trait]
impl<T: LayerLoader + ?Sized> LayerLoader for Arc<T> {
    async fn load_layers(&self, ids: &[LayerId]) -> Result<Vec<Layer>> {
        (**self).load_layers(ids).await
    }
}

use crate::Property;
use async_trait::async_trait;
use scenepub_types::{PropertyId, Result};
use std::sync::Arc;

/// Batch loader for property documents.
#[async_trait]
pub trait PropertyLoader: Send + Sync {
    /// Loads properties in request order. A missing id is a `NotFound` error.
    async fn load_properties(&self, ids: &[PropertyId]) -> Result<Vec<Property>>;
}

#[async_trait]
impl<T: PropertyLoader + ?Sized> PropertyLoader for &T {
    async fn load_properties(&self, ids: &[PropertyId]) -> Result<Vec<Property>> {
        (**self).load_properties(ids).await
    }
}

#[async_trait]
impl<T: PropertyLoader + ?Sized> PropertyLoader for Arc<T> {
    async fn load_properties(&self, ids: &[PropertyId]) -> Result<Vec<Property>> {
        (**self).load_properties(ids).await
    }
}

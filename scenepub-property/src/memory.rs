//! In-memory property loader for tests and offline exports.

use crate::{Property, PropertyLoader};
use async_trait::async_trait;
use scenepub_types::{Error, PropertyId, Result};
use std::collections::HashMap;

/// A [`PropertyLoader`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryPropertyLoader {
    properties: HashMap<PropertyId, Property>,
}

impl MemoryPropertyLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a property and returns its id.
    pub fn insert(&mut self, property: Property) -> PropertyId {
        let id = property.id;
        self.properties.insert(id, property);
        id
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.properties.get(id)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<Property> for MemoryPropertyLoader {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}

#[async_trait]
impl PropertyLoader for MemoryPropertyLoader {
    async fn load_properties(&self, ids: &[PropertyId]) -> Result<Vec<Property>> {
        ids.iter()
            .map(|id| {
                self.properties
                    .get(id)
                    .cloned()
                    .ok_or_else(|| Error::not_found("property", id))
            })
            .collect()
    }
}

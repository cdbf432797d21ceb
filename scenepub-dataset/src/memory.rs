//! In-memory dataset loader for tests and offline exports.

use crate::{Dataset, DatasetLoader};
use async_trait::async_trait;
use scenepub_types::{DatasetId, Error, Result};
use std::collections::HashMap;

/// A [`DatasetLoader`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatasetLoader {
    datasets: HashMap<DatasetId, Dataset>,
}

impl MemoryDatasetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a dataset.
    pub fn insert(&mut self, dataset: Dataset) {
        self.datasets.insert(dataset.id, dataset);
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl FromIterator<Dataset> for MemoryDatasetLoader {
    fn from_iter<I: IntoIterator<Item = Dataset>>(iter: I) -> Self {
        Self {
            datasets: iter.into_iter().map(|d| (d.id, d)).collect(),
        }
    }
}

#[async_trait]
impl DatasetLoader for MemoryDatasetLoader {
    async fn load_datasets(&self, ids: &[DatasetId]) -> Result<Vec<Dataset>> {
        ids.iter()
            .map(|id| {
                self.datasets
                    .get(id)
                    .cloned()
                    .ok_or_else(|| Error::not_found("dataset", id))
            })
            .collect()
    }
}

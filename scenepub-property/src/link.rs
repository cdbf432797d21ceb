//! Links from property fields to dataset fields.

use scenepub_dataset::GraphHop;
use scenepub_types::{DatasetFieldId, DatasetId, DatasetSchemaId};
use serde::{Deserialize, Serialize};

/// One hop of a link chain: a dataset schema field, optionally pinned to a
/// concrete dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetId>,
    pub schema: DatasetSchemaId,
    pub field: DatasetFieldId,
}

impl Link {
    pub fn new(schema: DatasetSchemaId, field: DatasetFieldId) -> Self {
        Self {
            dataset: None,
            schema,
            field,
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: DatasetId) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn hop(&self) -> GraphHop {
        GraphHop::new(self.schema, self.field)
    }
}

/// An ordered chain of links: "follow a reference field through N hops".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new(links: Vec<Link>) -> Self {
        Self(links)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&Link> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Link> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }

    /// The (schema, field) of every hop, in order.
    pub fn hops(&self) -> Vec<GraphHop> {
        self.0.iter().map(Link::hop).collect()
    }

    /// Returns a copy whose first link is pinned to `dataset` when it has no
    /// dataset of its own.
    #[must_use]
    pub fn apply_dataset(&self, dataset: Option<DatasetId>) -> Self {
        let mut links = self.clone();
        if let (Some(first), Some(ds)) = (links.0.first_mut(), dataset) {
            first.dataset.get_or_insert(ds);
        }
        links
    }
}

impl From<Vec<Link>> for Links {
    fn from(links: Vec<Link>) -> Self {
        Self(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_dataset_fills_only_missing_first_link() {
        let (s, f) = (DatasetSchemaId::new(), DatasetFieldId::new());
        let ds = DatasetId::new();
        let pinned = DatasetId::new();

        let links = Links::new(vec![Link::new(s, f), Link::new(s, f)]);
        let applied = links.apply_dataset(Some(ds));
        assert_eq!(applied.first().unwrap().dataset, Some(ds));
        assert_eq!(applied.last().unwrap().dataset, None);

        let links = Links::new(vec![Link::new(s, f).with_dataset(pinned)]);
        assert_eq!(links.apply_dataset(Some(ds)).first().unwrap().dataset, Some(pinned));
    }

    #[test]
    fn apply_dataset_none_is_identity() {
        let links = Links::new(vec![Link::new(DatasetSchemaId::new(), DatasetFieldId::new())]);
        assert_eq!(links.apply_dataset(None), links);
    }
}

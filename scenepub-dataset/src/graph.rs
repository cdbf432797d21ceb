//! Dataset loading and reference-graph traversal.

use crate::{Dataset, DatasetField};
use async_trait::async_trait;
use scenepub_types::{DatasetFieldId, DatasetId, DatasetSchemaId, Result, Value};
use std::sync::Arc;
use tracing::debug;

/// Batch loader for dataset rows.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Loads datasets in request order. A missing id is a `NotFound` error.
    async fn load_datasets(&self, ids: &[DatasetId]) -> Result<Vec<Dataset>>;
}

#[async_trait]
impl<T: DatasetLoader + ?Sized> DatasetLoader for &T {
    async fn load_datasets(&self, ids: &[DatasetId]) -> Result<Vec<Dataset>> {
        (**self).load_datasets(ids).await
    }
}

#[async_trait]
impl<T: DatasetLoader + ?Sized> DatasetLoader for Arc<T> {
    async fn load_datasets(&self, ids: &[DatasetId]) -> Result<Vec<Dataset>> {
        (**self).load_datasets(ids).await
    }
}

/// The rows visited while following a field chain, and the field it ended on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetGraph {
    /// Datasets in hop order, starting with the root.
    pub datasets: Vec<Dataset>,
    /// The terminal field. `None` when the walk stopped early.
    pub field: Option<DatasetField>,
}

impl DatasetGraph {
    /// Value stored in the terminal field, if the walk reached one.
    pub fn value(&self) -> Option<&Value> {
        self.field.as_ref().and_then(|f| f.value.as_ref())
    }
}

/// One step of a graph walk: the schema the row must have, and the field to
/// read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphHop {
    pub schema: DatasetSchemaId,
    pub field: DatasetFieldId,
}

impl GraphHop {
    pub fn new(schema: DatasetSchemaId, field: DatasetFieldId) -> Self {
        Self { schema, field }
    }
}

/// Resolves a dataset id plus a chain of hops into a [`DatasetGraph`].
///
/// Every field but the last must hold a `ref` value naming the next dataset.
/// An incomplete walk (missing row, row of another schema, missing field,
/// non-reference hop) is not an error: it yields a graph whose `field` is
/// `None`. Only loader failures other than `NotFound` are returned as errors.
#[async_trait]
pub trait GraphLoader: Send + Sync {
    async fn load_graph(&self, root: DatasetId, hops: &[GraphHop]) -> Result<DatasetGraph>;
}

#[async_trait]
impl<T: GraphLoader + ?Sized> GraphLoader for &T {
    async fn load_graph(&self, root: DatasetId, hops: &[GraphHop]) -> Result<DatasetGraph> {
        (**self).load_graph(root, hops).await
    }
}

/// [`GraphLoader`] that walks references one hop at a time through a
/// [`DatasetLoader`]. The walk performs at most `hops.len()` loads, so
/// cyclic references cannot keep it running.
#[derive(Debug, Clone)]
pub struct GraphWalker<L> {
    loader: L,
}

impl<L: DatasetLoader> GraphWalker<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl<L: DatasetLoader> GraphLoader for GraphWalker<L> {
    async fn load_graph(&self, root: DatasetId, hops: &[GraphHop]) -> Result<DatasetGraph> {
        let mut graph = DatasetGraph::default();
        let mut current = root;

        for (hop, step) in hops.iter().enumerate() {
            let dataset = match self.loader.load_datasets(&[current]).await {
                Ok(mut found) => match found.pop() {
                    Some(d) => d,
                    None => return Ok(graph),
                },
                Err(e) if e.is_not_found() => {
                    debug!(dataset_id = %current, hop, "Dataset graph walk stopped: dataset missing");
                    return Ok(graph);
                }
                Err(e) => return Err(e),
            };

            if dataset.schema != step.schema {
                debug!(
                    dataset_id = %current,
                    schema_id = %dataset.schema,
                    expected = %step.schema,
                    hop,
                    "Dataset graph walk stopped: schema mismatch"
                );
                return Ok(graph);
            }

            let field = dataset.field(step.field).cloned();
            graph.datasets.push(dataset);

            let Some(field) = field else {
                debug!(dataset_id = %current, field_id = %step.field, hop, "Dataset graph walk stopped: field missing");
                return Ok(graph);
            };

            if hop + 1 == hops.len() {
                graph.field = Some(field);
                break;
            }

            match field.value.as_ref().and_then(Value::as_ref_id) {
                Some(next) => current = next,
                None => {
                    debug!(dataset_id = %current, field_id = %step.field, hop, "Dataset graph walk stopped: hop is not a reference");
                    return Ok(graph);
                }
            }
        }

        Ok(graph)
    }
}

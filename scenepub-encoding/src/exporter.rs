use crate::{Encoder, EncodingResult};
use scenepub_dataset::GraphLoader;
use scenepub_layer::LayerLoader;
use scenepub_layer::merging::{Merger, Sealer};
use scenepub_property::PropertyLoader;
use scenepub_types::{Error, LayerId};
use tracing::debug;

/// Merge, seal and encode in one call.
pub struct Exporter<'a> {
    merger: Merger<'a>,
    sealer: Sealer<'a>,
}

impl<'a> Exporter<'a> {
    pub fn new(
        layers: &'a dyn LayerLoader,
        properties: &'a dyn PropertyLoader,
        graph: &'a dyn GraphLoader,
    ) -> Self {
        Self {
            merger: Merger::new(layers, properties),
            sealer: Sealer::new(graph),
        }
    }

    /// Exports the layer (and, for a group, its whole subtree) through
    /// `encoder`. Loader failures abort the export unchanged.
    pub async fn export_layer_by_id<E: Encoder + ?Sized>(
        &self,
        id: LayerId,
        encoder: &mut E,
    ) -> EncodingResult<()> {
        let merged = self.merger.merge_layer_by_id(Some(id), None).await?;
        let sealed = self
            .sealer
            .seal(merged.as_ref())
            .await?
            .ok_or_else(|| Error::not_found("layer", id))?;
        debug!(layer_id = %id, "Encoding sealed layer");
        encoder.encode(&sealed)
    }
}

use super::merged::effective_property;
use super::{MergedInfobox, MergedInfoboxField, MergedLayer, MergedLayerCommon, MergedLayerGroup, MergedLayerItem};
use crate::{Infobox, Layer, LayerLoader};
use futures::FutureExt;
use futures::future::BoxFuture;
use scenepub_property::{MergedMetadata, Overridden, PropertyLoader};
use scenepub_types::{DatasetId, LayerId, PropertyId, Result};
use std::collections::HashMap;
use tracing::debug;

/// Builds [`MergedLayer`] trees from stored layers.
///
/// Each layer is merged against its nearest ancestor: the ancestor's property
/// and infobox act as templates, and an item's linked dataset (or the one
/// inherited from above) is carried down to every merged property.
pub struct Merger<'a> {
    layers: &'a dyn LayerLoader,
    properties: &'a dyn PropertyLoader,
}

impl<'a> Merger<'a> {
    pub fn new(layers: &'a dyn LayerLoader, properties: &'a dyn PropertyLoader) -> Self {
        Self { layers, properties }
    }

    /// Loads and merges the layer with the given id.
    ///
    /// `None` yields `None`. Loader failures are returned unchanged.
    pub async fn merge_layer_by_id(
        &self,
        id: Option<LayerId>,
        parent: Option<&MergedLayer>,
    ) -> Result<Option<MergedLayer>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let layers = self.layers.load_layers(&[id]).await?;
        self.merge_layer(layers.first(), parent).await
    }

    /// Merges an already loaded layer, recursing into group children.
    pub async fn merge_layer(
        &self,
        layer: Option<&Layer>,
        parent: Option<&MergedLayer>,
    ) -> Result<Option<MergedLayer>> {
        let Some(layer) = layer else {
            return Ok(None);
        };
        self.merge(layer, parent.map(MergedLayer::common))
            .await
            .map(Some)
    }

    fn merge<'b>(
        &'b self,
        layer: &'b Layer,
        parent: Option<&'b MergedLayerCommon>,
    ) -> BoxFuture<'b, Result<MergedLayer>> {
        async move {
            let common = self.merge_common(layer, parent).await?;
            match layer {
                Layer::Item(_) => Ok(MergedLayer::Item(MergedLayerItem { common })),
                Layer::Group(group) => {
                    let child_layers = if group.layers.is_empty() {
                        Vec::new()
                    } else {
                        self.layers.load_layers(&group.layers).await?
                    };
                    let mut children = Vec::with_capacity(child_layers.len());
                    for child in &child_layers {
                        children.push(self.merge(child, Some(&common)).await?);
                    }
                    Ok(MergedLayer::Group(MergedLayerGroup { common, children }))
                }
            }
        }
        .boxed()
    }

    async fn merge_common(
        &self,
        layer: &Layer,
        parent: Option<&MergedLayerCommon>,
    ) -> Result<MergedLayerCommon> {
        let own = layer.common();
        let linked_dataset = layer
            .linked_dataset()
            .or_else(|| parent.and_then(|p| p.property_meta.linked_dataset));

        let mut common = MergedLayerCommon {
            original: own.id,
            parent: parent.map(|p| p.original),
            scene: own.scene,
            name: own.name.clone(),
            visible: own.visible,
            plugin: own.plugin.clone(),
            extension: own.extension.clone(),
            property_meta: MergedMetadata {
                original: own.property,
                parent: parent.and_then(|p| effective_property(&p.property_meta)),
                linked_dataset,
            },
            property: None,
            infobox: merge_infobox(
                own.infobox.as_ref(),
                parent.and_then(|p| p.infobox.as_ref()),
                linked_dataset,
            ),
        };

        let mut ids = common.property_ids();
        ids.sort();
        ids.dedup();
        let loaded: HashMap<_, _> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.properties
                .load_properties(&ids)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        common.property = common.property_meta.merge(&loaded);
        if let Some(infobox) = &mut common.infobox {
            infobox.property = infobox.meta.merge(&loaded);
            for field in &mut infobox.fields {
                field.property = field.meta.merge(&loaded);
            }
        }

        debug!(
            layer_id = %common.original,
            parent_id = ?common.parent,
            properties = loaded.len(),
            "Merged layer"
        );
        Ok(common)
    }
}

/// Merges infobox metadata; properties are filled in once loaded.
///
/// Original fields are matched to the parent's by (plugin, extension) and
/// always win. A layer without an infobox inherits the parent's blocks with
/// `overridden = false`.
fn merge_infobox(
    original: Option<&Infobox>,
    parent: Option<&MergedInfobox>,
    linked_dataset: Option<DatasetId>,
) -> Option<MergedInfobox> {
    let parent_property = parent.and_then(|p| effective_property(&p.meta));

    let Some(original) = original else {
        let parent = parent?;
        return Some(MergedInfobox {
            meta: meta(None, parent_property, linked_dataset),
            property: None,
            fields: parent
                .fields
                .iter()
                .map(|f| MergedInfoboxField {
                    id: f.id,
                    plugin: f.plugin.clone(),
                    extension: f.extension.clone(),
                    overridden: false,
                    meta: meta(None, effective_property(&f.meta), linked_dataset),
                    property: None,
                })
                .collect(),
            overridden: false,
        });
    };

    let fields = original
        .fields
        .iter()
        .map(|field| {
            let inherited = parent.and_then(|p| {
                p.fields
                    .iter()
                    .find(|pf| pf.plugin == field.plugin && pf.extension == field.extension)
            });
            let property = Overridden::merge(
                Some(field.property),
                inherited.and_then(|pf| effective_property(&pf.meta)),
            );
            MergedInfoboxField {
                id: field.id,
                plugin: field.plugin.clone(),
                extension: field.extension.clone(),
                overridden: property.is_some_and(|p| p.overridden),
                meta: meta(
                    Some(field.property),
                    inherited.and_then(|pf| effective_property(&pf.meta)),
                    linked_dataset,
                ),
                property: None,
            }
        })
        .collect();

    Some(MergedInfobox {
        meta: meta(Some(original.property), parent_property, linked_dataset),
        property: None,
        fields,
        overridden: true,
    })
}

fn meta(
    original: Option<PropertyId>,
    parent: Option<PropertyId>,
    linked_dataset: Option<DatasetId>,
) -> MergedMetadata {
    MergedMetadata {
        original,
        parent,
        linked_dataset,
    }
}

use super::{
    MergedInfobox, MergedLayer, MergedLayerCommon, SealedInfobox, SealedInfoboxField, SealedLayer,
    SealedLayerCommon, SealedLayerGroup, SealedLayerItem,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use scenepub_dataset::GraphLoader;
use scenepub_property::{MergedProperty, SealedProperty, seal};
use scenepub_types::Result;

/// Resolves every dataset link of a [`MergedLayer`] tree.
///
/// Unresolvable links seal to nil; only loader failures other than a miss
/// abort the walk.
pub struct Sealer<'a> {
    graph: &'a dyn GraphLoader,
}

impl<'a> Sealer<'a> {
    pub fn new(graph: &'a dyn GraphLoader) -> Self {
        Self { graph }
    }

    pub async fn seal(&self, merged: Option<&MergedLayer>) -> Result<Option<SealedLayer>> {
        match merged {
            Some(layer) => self.seal_layer(layer).await.map(Some),
            None => Ok(None),
        }
    }

    fn seal_layer<'b>(&'b self, layer: &'b MergedLayer) -> BoxFuture<'b, Result<SealedLayer>> {
        async move {
            match layer {
                MergedLayer::Item(item) => Ok(SealedLayer::Item(SealedLayerItem {
                    common: self.seal_common(&item.common).await?,
                })),
                MergedLayer::Group(group) => {
                    let common = self.seal_common(&group.common).await?;
                    let mut children = Vec::with_capacity(group.children.len());
                    for child in &group.children {
                        children.push(self.seal_layer(child).await?);
                    }
                    Ok(SealedLayer::Group(SealedLayerGroup { common, children }))
                }
            }
        }
        .boxed()
    }

    async fn seal_common(&self, common: &MergedLayerCommon) -> Result<SealedLayerCommon> {
        let infobox = match &common.infobox {
            Some(infobox) => Some(self.seal_infobox(infobox).await?),
            None => None,
        };
        Ok(SealedLayerCommon {
            id: common.original,
            parent: common.parent,
            scene: common.scene,
            name: common.name.clone(),
            visible: common.visible,
            plugin: common.plugin.clone(),
            extension: common.extension.clone(),
            property: self.seal_property(common.property.as_ref()).await?,
            infobox,
        })
    }

    async fn seal_infobox(&self, infobox: &MergedInfobox) -> Result<SealedInfobox> {
        let mut fields = Vec::with_capacity(infobox.fields.len());
        for field in &infobox.fields {
            fields.push(SealedInfoboxField {
                id: field.id,
                plugin: field.plugin.clone(),
                extension: field.extension.clone(),
                property: self.seal_property(field.property.as_ref()).await?,
            });
        }
        Ok(SealedInfobox {
            property: self.seal_property(infobox.property.as_ref()).await?,
            fields,
        })
    }

    async fn seal_property(&self, property: Option<&MergedProperty>) -> Result<Option<SealedProperty>> {
        match property {
            Some(p) => seal(p, self.graph).await.map(Some),
            None => Ok(None),
        }
    }
}

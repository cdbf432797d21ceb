//! Layer trees for the scene publishing pipeline.
//!
//! A scene's content is a tree of layers: [`LayerItem`] leaves that draw one
//! thing, and [`LayerGroup`] nodes that order children and act as templates
//! for them. Groups pass their property, infobox and linked dataset down to
//! their children.
//!
//! The [`merging`] module turns a stored tree into an export-ready snapshot:
//! [`merging::Merger`] resolves inheritance into a [`merging::MergedLayer`]
//! tree, and [`merging::Sealer`] resolves every dataset link into a
//! [`merging::SealedLayer`] tree that needs no further loading.

mod layer;
mod loader;
pub mod memory;
pub mod merging;

pub use layer::{Infobox, InfoboxField, Layer, LayerCommon, LayerGroup, LayerItem};
pub use loader::LayerLoader;

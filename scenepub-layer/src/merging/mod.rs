//! Inheritance merging and link sealing over layer trees.
//!
//! ```text
//! LayerLoader + PropertyLoader ──▶ Merger ──▶ MergedLayer
//!                    GraphLoader ──▶ Sealer ──▶ SealedLayer ──▶ encoders
//! ```

mod merged;
mod merger;
mod sealed;
mod sealer;

pub use merged::{
    MergedInfobox, MergedInfoboxField, MergedLayer, MergedLayerCommon, MergedLayerGroup,
    MergedLayerItem,
};
pub use merger::Merger;
pub use sealed::{
    SealedInfobox, SealedInfoboxField, SealedLayer, SealedLayerCommon, SealedLayerGroup,
    SealedLayerItem,
};
pub use sealer::Sealer;

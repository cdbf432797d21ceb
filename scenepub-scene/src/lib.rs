//! Scene publishing.
//!
//! [`SceneBuilder`] turns a [`Scene`] into the published scene document: the
//! root layer tree is merged, sealed and flattened by [`PublishEncoder`], and
//! scene, plugin, widget and cluster properties are resolved alongside it.

mod builder;
mod error;
mod publish;
mod scene;
mod widget_align;

pub use builder::{PublishedCluster, PublishedScene, PublishedWidget, SceneBuilder, SCHEMA_VERSION};
pub use error::{BuildError, BuildResult};
pub use publish::{PublishEncoder, PublishedBlock, PublishedInfobox, PublishedLayer};
pub use scene::{Cluster, Scene, ScenePlugin, SceneWidget};
pub use widget_align::{WidgetAlignSystem, WidgetAlignment, WidgetArea, WidgetSection, WidgetZone};

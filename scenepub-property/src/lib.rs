//! Property documents for the scene publishing pipeline.
//!
//! A property is the typed configuration attached to a layer, infobox, widget,
//! plugin, cluster or scene. This crate covers its whole lifecycle inside an
//! export:
//! - [`Property`]: the stored document (groups, group lists, fields, links)
//! - [`Overridden`]: the two-level override combinator shared by every merge
//! - [`MergedProperty`]: an original property merged over its parent's
//! - [`SealedProperty`]: the merged property with every dataset link resolved
//! - [`PropertyLoader`]: batch loading of properties (external collaborator)

mod link;
mod loader;
mod merged;
pub mod memory;
mod overridable;
mod property;
mod sealed;

pub use link::{Link, Links};
pub use loader::PropertyLoader;
pub use merged::{MergedField, MergedGroup, MergedMetadata, MergedProperty, merge};
pub use overridable::Overridden;
pub use property::{Field, Group, GroupList, Item, Property};
pub use sealed::{SealedField, SealedItem, SealedProperty, seal};

//! Support code for the `scenepub` binary: configuration, fixture loading and
//! the export / publish commands.

pub mod commands;
pub mod config;
pub mod fixture;

pub use config::{Config, Format, PublishConfig};
pub use fixture::{Fixture, Stores};

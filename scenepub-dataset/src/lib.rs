//! Datasets for the scene publishing pipeline.
//!
//! A dataset is a row of typed fields imported from an external source (CSV,
//! Google Sheets, ...). Property fields link to dataset fields; a field of type
//! `ref` points at another dataset, which makes the rows a graph.
//!
//! - [`Dataset`] / [`DatasetField`]: the row model
//! - [`DatasetLoader`]: batch loading of rows by id (external collaborator)
//! - [`GraphLoader`]: follows a chain of fields through reference hops
//! - [`GraphWalker`]: the bounded [`GraphLoader`] built on any [`DatasetLoader`]

mod dataset;
mod graph;
pub mod memory;

pub use dataset::{Dataset, DatasetField};
pub use graph::{DatasetGraph, DatasetLoader, GraphHop, GraphLoader, GraphWalker};

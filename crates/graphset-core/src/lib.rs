//! # graphset-core
//!
//! Core layer for Graphset: the graph collection data model and the
//! building blocks the collection algebra is written in.
//!
//! This crate provides the fundamental data structures for storing and
//! combining property graphs that share vertices and edges. It depends only
//! on `graphset-common`.
//!
//! ## Modules
//!
//! - [`graph`] - Entity store, logical graphs, graph collections
//! - [`canonical`] - Canonical labeling for isomorphism-based equality
//! - [`aggregation`] - Aggregate functions over logical graphs
//! - [`execution`] - Data-parallel primitives (map, filter, group, co-group)

pub mod aggregation;
pub mod canonical;
pub mod execution;
pub mod graph;

// Re-export commonly used types
pub use aggregation::AggregateFunction;
pub use canonical::{CanonicalLabeler, RefinementLabeler};
pub use execution::Executor;
pub use graph::model::{Edge, EntityStore, GraphCollection, GraphHead, LogicalGraph, Vertex};

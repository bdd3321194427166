//! Property graph collections.
//!
//! Vertices and edges are stored once and carry the set of graphs they
//! belong to. A graph is never an owner of its elements: it is the view
//! obtained by filtering the elements by membership.
//!
//! - [`element`] - Vertex, edge and graph head records
//! - [`store`] - The entity store that owns the records
//! - [`logical`] - A single materialized graph
//! - [`collection`] - An immutable snapshot of several graphs

mod collection;
mod element;
mod logical;
mod store;

pub use collection::GraphCollection;
pub use element::{Edge, ElementRef, GraphHead, Vertex};
pub use logical::LogicalGraph;
pub use store::{EntityStore, EntityStoreConfig};

//! Built-in algorithms.
//!
//! - [`components`] - Weakly connected components
//! - [`filter`] - Label filtering

pub mod components;
pub mod filter;

pub use components::{LargestComponent, SplitComponents, UnionFind, weakly_connected_components};
pub use filter::VertexLabelFilter;

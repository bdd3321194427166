//! # graphset-common
//!
//! Foundation layer for Graphset: identifiers, property values, and errors.
//!
//! This crate provides the fundamental building blocks used by all other
//! Graphset crates. It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (GraphId, VertexId, EdgeId, Value, etc.)
//! - [`utils`] - Utility functions and helpers (hashing, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{
    EdgeId, EntityRef, GraphId, GraphIdSet, IdGenerator, PropertyKey, PropertyMap, Value, VertexId,
};
pub use utils::error::{Error, Result};

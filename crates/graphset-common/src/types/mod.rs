//! Core type definitions for Graphset.
//!
//! This module contains all fundamental types shared by the data model:
//! - Identifier types ([`GraphId`], [`VertexId`], [`EdgeId`], [`EntityRef`])
//! - Membership sets ([`GraphIdSet`])
//! - Property types ([`Value`], [`PropertyKey`], [`PropertyMap`])

mod graph_ids;
mod id;
mod value;

pub use graph_ids::GraphIdSet;
pub use id::{EdgeId, EntityRef, GraphId, IdGenerator, VertexId};
pub use value::{PropertyKey, PropertyMap, Value};

//! Graph model implementations.
//!
//! - [`model`] - Property graph collections with shared membership

pub mod model;

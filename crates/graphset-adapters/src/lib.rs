//! # graphset-adapters
//!
//! Adapters layer for Graphset: the algorithm plugin interface, built-in
//! algorithms, and a fixture builder for tests and tools.
//!
//! ## Modules
//!
//! - [`plugins`] - Algorithm traits, parameters, registry, built-ins
//! - [`fixture`] - Variable-name based construction of stores and collections

pub mod fixture;
pub mod plugins;

//! Plugin system for Graphset.
//!
//! Algorithms are registered by name and dispatched by the engine's
//! `call_for_graph` and `call_for_collection` operators.
//!
//! ## Modules
//!
//! - [`algorithms`] - Built-in algorithms (components, filters)

pub mod algorithms;
mod parameters;
mod registry;
mod traits;

pub use parameters::{ParameterDef, ParameterType, Parameters};
pub use registry::{AlgorithmRegistry, RegisteredAlgorithm};
pub use traits::{AlgorithmContext, CancellationToken, CollectionAlgorithm, GraphAlgorithm};

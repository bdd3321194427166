//! # graphset-engine
//!
//! The main entry point for Graphset: the collection algebra.
//!
//! ## Modules
//!
//! - [`engine`] - The [`Engine`] that owns executor, labeler and registry
//! - [`config`] - Configuration options
//! - [`algebra`] - Operators: set operations, selection, distinct, sorting,
//!   apply/reduce, algorithm calls, aggregation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algebra;
pub mod config;
pub mod engine;

pub use algebra::{GraphTransform, PreserveIdentity, SortOrder};
pub use config::{Config, MissingKeyOrder};
pub use engine::Engine;

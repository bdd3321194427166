//! The collection algebra.
//!
//! Every operator is a method on [`Engine`](crate::Engine), takes its input
//! collections by reference and returns a new collection. Inputs are never
//! modified. Operators are written in terms of the executor's bulk
//! primitives, so results do not depend on the number of threads.
//!
//! - [`set_ops`] - `union`, `intersect`, `difference`
//! - [`select`] - `select`
//! - [`distinct`] - `distinct` by canonical label
//! - [`sort`] - `sort_by`, `sort_by_aggregate`, `top`, `top_by`
//! - [`apply`] - `apply`, `reduce`
//! - [`call`] - `call_for_graph`, `call_for_collection`
//! - [`aggregate`] - `aggregate`, `aggregate_partitioned`

pub mod aggregate;
pub mod apply;
pub mod call;
pub mod distinct;
pub mod select;
pub mod set_ops;
pub mod sort;

pub use apply::{GraphTransform, PreserveIdentity};
pub use sort::SortOrder;

//! Aggregate functions over logical graphs.
//!
//! An aggregate maps each vertex and edge to a contribution and folds the
//! contributions with an associative, commutative `combine` whose identity
//! is [`AggregateFunction::identity`]. Because of those laws an aggregate
//! can be computed per partition and merged in any order.
//!
//! - [`property`] - Max, min, sum and count over a property key
//! - [`count`] - Vertex and edge counts

pub mod count;
pub mod property;

pub use count::{EdgeCount, VertexCount};
pub use property::{CountProperty, ElementScope, MaxProperty, MinProperty, SumProperty};

use graphset_common::types::{PropertyKey, Value};

use crate::graph::model::{ElementRef, LogicalGraph};

/// An aggregate over the elements of a logical graph.
pub trait AggregateFunction: Send + Sync {
    /// Property key the result is stored under on the graph head.
    fn result_key(&self) -> PropertyKey;

    /// The neutral element of [`combine`](Self::combine).
    fn identity(&self) -> Value;

    /// The value one element contributes. Elements outside the function's
    /// scope contribute the identity.
    fn contribution(&self, element: ElementRef<'_>) -> Value;

    /// Merges two partial results.
    fn combine(&self, left: Value, right: Value) -> Value;

    /// Aggregates a whole graph.
    fn aggregate(&self, graph: &LogicalGraph) -> Value {
        graph
            .elements()
            .fold(self.identity(), |acc, element| {
                self.combine(acc, self.contribution(element))
            })
    }
}

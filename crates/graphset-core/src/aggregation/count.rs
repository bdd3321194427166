//! Element counts.

use graphset_common::types::{PropertyKey, Value};

use super::AggregateFunction;
use crate::graph::model::{ElementRef, LogicalGraph};

fn add(left: Value, right: Value) -> Value {
    left.add_numeric(&right).unwrap_or(left)
}

/// Number of vertices, stored as `vertexCount`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexCount;

impl AggregateFunction for VertexCount {
    fn result_key(&self) -> PropertyKey {
        PropertyKey::new("vertexCount")
    }

    fn identity(&self) -> Value {
        Value::Int64(0)
    }

    fn contribution(&self, element: ElementRef<'_>) -> Value {
        Value::Int64(i64::from(element.is_vertex()))
    }

    fn combine(&self, left: Value, right: Value) -> Value {
        add(left, right)
    }

    fn aggregate(&self, graph: &LogicalGraph) -> Value {
        Value::from(graph.vertex_count())
    }
}

/// Number of edges, stored as `edgeCount`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeCount;

impl AggregateFunction for EdgeCount {
    fn result_key(&self) -> PropertyKey {
        PropertyKey::new("edgeCount")
    }

    fn identity(&self) -> Value {
        Value::Int64(0)
    }

    fn contribution(&self, element: ElementRef<'_>) -> Value {
        Value::Int64(i64::from(!element.is_vertex()))
    }

    fn combine(&self, left: Value, right: Value) -> Value {
        add(left, right)
    }

    fn aggregate(&self, graph: &LogicalGraph) -> Value {
        Value::from(graph.edge_count())
    }
}

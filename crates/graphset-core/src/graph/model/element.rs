//! Vertex, edge and graph head records.

use std::sync::Arc;

use graphset_common::types::{EdgeId, GraphId, GraphIdSet, PropertyKey, PropertyMap, Value, VertexId};
use serde::{Deserialize, Serialize};

/// A vertex.
///
/// `graph_ids` lists every graph the vertex belongs to. An empty set is a
/// legal transient state: the vertex exists but is not assigned yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier.
    pub id: VertexId,
    /// Vertex label.
    pub label: Arc<str>,
    /// Properties, ordered by key.
    #[serde(default)]
    pub properties: PropertyMap,
    /// Membership set.
    #[serde(default, rename = "graphs")]
    pub graph_ids: GraphIdSet,
}

impl Vertex {
    /// Creates an unassigned vertex without properties.
    #[must_use]
    pub fn new(id: VertexId, label: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            label: label.into(),
            properties: PropertyMap::new(),
            graph_ids: GraphIdSet::new(),
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adds graph memberships.
    #[must_use]
    pub fn with_graphs(mut self, graphs: impl IntoIterator<Item = GraphId>) -> Self {
        for id in graphs {
            self.graph_ids.insert(id);
        }
        self
    }

    /// Returns true if the vertex has the given label.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        &*self.label == label
    }

    /// Gets a property value.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Compares everything except the membership set.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.id == other.id && self.label == other.label && self.properties == other.properties
    }

    /// Returns a copy with the membership set replaced.
    #[must_use]
    pub fn with_membership(&self, graph_ids: GraphIdSet) -> Self {
        Self {
            graph_ids,
            ..self.clone()
        }
    }
}

/// A directed edge.
///
/// Parallel edges and self-loops are allowed. Endpoints are checked when a
/// graph is projected, not when the edge is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier.
    pub id: EdgeId,
    /// Source vertex.
    #[serde(rename = "source")]
    pub source_id: VertexId,
    /// Target vertex.
    #[serde(rename = "target")]
    pub target_id: VertexId,
    /// Edge label.
    pub label: Arc<str>,
    /// Properties, ordered by key.
    #[serde(default)]
    pub properties: PropertyMap,
    /// Membership set.
    #[serde(default, rename = "graphs")]
    pub graph_ids: GraphIdSet,
}

impl Edge {
    /// Creates an unassigned edge without properties.
    #[must_use]
    pub fn new(
        id: EdgeId,
        source_id: VertexId,
        target_id: VertexId,
        label: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id,
            source_id,
            target_id,
            label: label.into(),
            properties: PropertyMap::new(),
            graph_ids: GraphIdSet::new(),
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Adds graph memberships.
    #[must_use]
    pub fn with_graphs(mut self, graphs: impl IntoIterator<Item = GraphId>) -> Self {
        for id in graphs {
            self.graph_ids.insert(id);
        }
        self
    }

    /// Gets a property value.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Returns true if the edge belongs to at least one of the given graphs.
    #[must_use]
    pub fn in_any_graph(&self, graphs: &GraphIdSet) -> bool {
        self.graph_ids.intersects(graphs)
    }

    /// Compares everything except the membership set.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.id == other.id
            && self.source_id == other.source_id
            && self.target_id == other.target_id
            && self.label == other.label
            && self.properties == other.properties
    }

    /// Returns a copy with the membership set replaced.
    #[must_use]
    pub fn with_membership(&self, graph_ids: GraphIdSet) -> Self {
        Self {
            graph_ids,
            ..self.clone()
        }
    }
}

/// The head of a logical graph: its identity, label and graph-level
/// properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphHead {
    /// Graph identifier.
    pub id: GraphId,
    /// Graph label.
    pub label: Arc<str>,
    /// Graph properties, ordered by key.
    #[serde(default)]
    pub properties: PropertyMap,
}

impl GraphHead {
    /// Creates a graph head without properties.
    #[must_use]
    pub fn new(id: GraphId, label: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            label: label.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Gets a property value.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Returns a copy carrying a different identifier.
    #[must_use]
    pub fn with_id(&self, id: GraphId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

/// A borrowed vertex or edge.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    /// A vertex.
    Vertex(&'a Vertex),
    /// An edge.
    Edge(&'a Edge),
}

impl<'a> ElementRef<'a> {
    /// Returns the element label.
    #[must_use]
    pub fn label(&self) -> &'a str {
        match self {
            Self::Vertex(v) => &v.label,
            Self::Edge(e) => &e.label,
        }
    }

    /// Gets a property value.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&'a Value> {
        match self {
            Self::Vertex(v) => v.properties.get(key),
            Self::Edge(e) => e.properties.get(key),
        }
    }

    /// Returns true for vertices.
    #[must_use]
    pub fn is_vertex(&self) -> bool {
        matches!(self, Self::Vertex(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_builder() {
        let v = Vertex::new(VertexId::new(1), "Person")
            .with_property("name", "Alice")
            .with_graphs([GraphId::new(2), GraphId::new(1)]);

        assert!(v.has_label("Person"));
        assert_eq!(v.get_property("name").and_then(|p| p.as_str()), Some("Alice"));
        assert_eq!(v.graph_ids.len(), 2);
    }

    #[test]
    fn test_same_content_ignores_membership() {
        let a = Vertex::new(VertexId::new(1), "Person").with_graphs([GraphId::new(1)]);
        let b = a.with_membership(GraphIdSet::single(GraphId::new(5)));
        assert!(a.same_content(&b));
        assert_ne!(a, b);

        let c = a.clone().with_property("age", 3i64);
        assert!(!a.same_content(&c));
    }

    #[test]
    fn test_edge_in_any_graph() {
        let e = Edge::new(EdgeId::new(0), VertexId::new(0), VertexId::new(1), "knows")
            .with_graphs([GraphId::new(3)]);
        assert!(e.in_any_graph(&GraphIdSet::from([GraphId::new(1), GraphId::new(3)])));
        assert!(!e.in_any_graph(&GraphIdSet::single(GraphId::new(1))));
    }

    #[test]
    fn test_element_ref() {
        let v = Vertex::new(VertexId::new(1), "Person").with_property("age", 41i64);
        let r = ElementRef::Vertex(&v);
        assert!(r.is_vertex());
        assert_eq!(r.label(), "Person");
        assert_eq!(r.get_property("age"), Some(&Value::from(41i64)));
    }
}

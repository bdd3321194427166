//! Logical graphs.

use std::collections::BTreeMap;
use std::sync::Arc;

use graphset_common::types::{EdgeId, GraphId, PropertyKey, Value, VertexId};
use graphset_common::utils::error::{Error, Result};

use super::{Edge, ElementRef, GraphHead, Vertex};

/// A single materialized graph: a head plus the vertices and edges that
/// belong to it.
///
/// Logical graphs are derived, never stored. Every edge's endpoints are
/// vertices of the same graph. Elements keep the membership sets they had
/// in their source collection; operators that emit new graphs rewrite them.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalGraph {
    head: Arc<GraphHead>,
    vertices: BTreeMap<VertexId, Arc<Vertex>>,
    edges: BTreeMap<EdgeId, Arc<Edge>>,
}

impl LogicalGraph {
    /// Builds a logical graph from owned parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] if an edge endpoint is not among the
    /// given vertices.
    pub fn new(
        head: GraphHead,
        vertices: impl IntoIterator<Item = Vertex>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        Self::from_shared(
            Arc::new(head),
            vertices.into_iter().map(|v| (v.id, Arc::new(v))).collect(),
            edges.into_iter().map(|e| (e.id, Arc::new(e))).collect(),
        )
    }

    /// Builds a logical graph from shared records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] if an edge endpoint is not among the
    /// given vertices.
    pub fn from_shared(
        head: Arc<GraphHead>,
        vertices: BTreeMap<VertexId, Arc<Vertex>>,
        edges: BTreeMap<EdgeId, Arc<Edge>>,
    ) -> Result<Self> {
        for edge in edges.values() {
            for endpoint in [edge.source_id, edge.target_id] {
                if !vertices.contains_key(&endpoint) {
                    return Err(Error::DanglingEdge {
                        edge: edge.id,
                        vertex: endpoint,
                    });
                }
            }
        }
        Ok(Self {
            head,
            vertices,
            edges,
        })
    }

    /// Projects the graph identified by `head` out of a pool of entities.
    ///
    /// Vertices and edges are selected by membership. An edge whose endpoint
    /// does not exist at all is a [`Error::DanglingEdge`]; an edge whose
    /// endpoints exist but are not members of this graph is left out.
    pub(crate) fn project<'a>(
        head: Arc<GraphHead>,
        vertices: impl Iterator<Item = &'a Arc<Vertex>>,
        edges: impl Iterator<Item = &'a Arc<Edge>>,
        vertex_exists: impl Fn(VertexId) -> bool,
    ) -> Result<Self> {
        let gid = head.id;
        let vertices: BTreeMap<_, _> = vertices
            .filter(|v| v.graph_ids.contains(gid))
            .map(|v| (v.id, Arc::clone(v)))
            .collect();

        let mut selected = BTreeMap::new();
        for edge in edges.filter(|e| e.graph_ids.contains(gid)) {
            for endpoint in [edge.source_id, edge.target_id] {
                if !vertex_exists(endpoint) {
                    return Err(Error::DanglingEdge {
                        edge: edge.id,
                        vertex: endpoint,
                    });
                }
            }
            if vertices.contains_key(&edge.source_id) && vertices.contains_key(&edge.target_id) {
                selected.insert(edge.id, Arc::clone(edge));
            }
        }

        Ok(Self {
            head,
            vertices,
            edges: selected,
        })
    }

    /// Returns the graph identifier.
    #[must_use]
    pub fn id(&self) -> GraphId {
        self.head.id
    }

    /// Returns the graph head.
    #[must_use]
    pub fn head(&self) -> &GraphHead {
        &self.head
    }

    /// Returns the shared graph head.
    #[must_use]
    pub fn shared_head(&self) -> &Arc<GraphHead> {
        &self.head
    }

    /// Iterates vertices in ascending identifier order.
    pub fn vertices(&self) -> impl Iterator<Item = &Arc<Vertex>> {
        self.vertices.values()
    }

    /// Iterates edges in ascending identifier order.
    pub fn edges(&self) -> impl Iterator<Item = &Arc<Edge>> {
        self.edges.values()
    }

    /// Iterates vertices, then edges.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.vertices
            .values()
            .map(|v| ElementRef::Vertex(v))
            .chain(self.edges.values().map(|e| ElementRef::Edge(e)))
    }

    /// Gets a vertex by identifier.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id).map(AsRef::as_ref)
    }

    /// Gets an edge by identifier.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id).map(AsRef::as_ref)
    }

    /// Returns true if the vertex is part of this graph.
    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has neither vertices nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    /// Iterates the outgoing edges of a vertex.
    pub fn out_edges(&self, id: VertexId) -> impl Iterator<Item = &Arc<Edge>> {
        self.edges.values().filter(move |e| e.source_id == id)
    }

    /// Replaces the graph head.
    #[must_use]
    pub fn with_head(mut self, head: GraphHead) -> Self {
        self.head = Arc::new(head);
        self
    }

    /// Sets a property on the graph head.
    #[must_use]
    pub fn with_head_property(mut self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.head)
            .properties
            .insert(key.into(), value.into());
        self
    }

    /// Keeps the vertices accepted by `keep` and the edges between them.
    #[must_use]
    pub fn retain_vertices(mut self, keep: impl Fn(&Vertex) -> bool) -> Self {
        self.vertices.retain(|_, v| keep(v));
        let vertices = &self.vertices;
        self.edges.retain(|_, e| {
            vertices.contains_key(&e.source_id) && vertices.contains_key(&e.target_id)
        });
        self
    }

    /// Keeps the edges accepted by `keep`. Vertices are untouched.
    #[must_use]
    pub fn retain_edges(mut self, keep: impl Fn(&Edge) -> bool) -> Self {
        self.edges.retain(|_, e| keep(e));
        self
    }

    /// Adds or replaces a vertex.
    pub fn insert_vertex(&mut self, vertex: Vertex) {
        self.vertices.insert(vertex.id, Arc::new(vertex));
    }

    /// Adds or replaces an edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] if an endpoint is not in the graph.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<()> {
        for endpoint in [edge.source_id, edge.target_id] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(Error::DanglingEdge {
                    edge: edge.id,
                    vertex: endpoint,
                });
            }
        }
        self.edges.insert(edge.id, Arc::new(edge));
        Ok(())
    }

    /// Splits the graph into its parts.
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Arc<GraphHead>,
        BTreeMap<VertexId, Arc<Vertex>>,
        BTreeMap<EdgeId, Arc<Edge>>,
    ) {
        (self.head, self.vertices, self.edges)
    }
}

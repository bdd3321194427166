//! Graph collections.

use std::collections::BTreeMap;
use std::sync::Arc;

use graphset_common::types::{EdgeId, EntityRef, GraphId, GraphIdSet, VertexId};
use graphset_common::utils::error::{Error, Result};
use graphset_common::utils::hash::FxHashMap;
use indexmap::IndexMap;

use super::{Edge, GraphHead, LogicalGraph, Vertex};

/// An immutable snapshot of several logical graphs that share elements.
///
/// Heads keep an order: insertion order by default, or the order produced
/// by `sort_by`. Vertices and edges are kept in ascending identifier order
/// and are shared with the store or collection they came from; an operator
/// that changes an element's membership replaces that element's record
/// instead of mutating it.
///
/// Invariant: every graph identifier in a vertex's or edge's membership set
/// has a head in the same collection. Every constructor checks it.
///
/// Equality compares heads as a set and ignores their order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphCollection {
    heads: IndexMap<GraphId, Arc<GraphHead>>,
    vertices: BTreeMap<VertexId, Arc<Vertex>>,
    edges: BTreeMap<EdgeId, Arc<Edge>>,
}

impl GraphCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a collection from owned records.
    ///
    /// Records repeated with identical content are merged (memberships are
    /// unioned).
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateIdentifier`] if an identifier repeats with
    ///   different content
    /// - [`Error::DanglingMembership`] if an element references a graph
    ///   without head
    pub fn new(
        heads: impl IntoIterator<Item = GraphHead>,
        vertices: impl IntoIterator<Item = Vertex>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        let mut head_map: IndexMap<GraphId, Arc<GraphHead>> = IndexMap::new();
        for head in heads {
            if let Some(existing) = head_map.get(&head.id) {
                if **existing != head {
                    return Err(Error::DuplicateIdentifier(EntityRef::GraphHead(head.id)));
                }
                continue;
            }
            head_map.insert(head.id, Arc::new(head));
        }

        let mut vertex_map: BTreeMap<VertexId, Arc<Vertex>> = BTreeMap::new();
        for vertex in vertices {
            match vertex_map.get_mut(&vertex.id) {
                Some(existing) if existing.same_content(&vertex) => {
                    let merged = existing.graph_ids.union(&vertex.graph_ids);
                    Arc::make_mut(existing).graph_ids = merged;
                }
                Some(_) => return Err(Error::DuplicateIdentifier(EntityRef::Vertex(vertex.id))),
                None => {
                    vertex_map.insert(vertex.id, Arc::new(vertex));
                }
            }
        }

        let mut edge_map: BTreeMap<EdgeId, Arc<Edge>> = BTreeMap::new();
        for edge in edges {
            match edge_map.get_mut(&edge.id) {
                Some(existing) if existing.same_content(&edge) => {
                    let merged = existing.graph_ids.union(&edge.graph_ids);
                    Arc::make_mut(existing).graph_ids = merged;
                }
                Some(_) => return Err(Error::DuplicateIdentifier(EntityRef::Edge(edge.id))),
                None => {
                    edge_map.insert(edge.id, Arc::new(edge));
                }
            }
        }

        Self::from_shared(head_map, vertex_map, edge_map)
    }

    /// Builds a collection from shared records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingMembership`] if an element references a graph
    /// without head.
    pub fn from_shared(
        heads: IndexMap<GraphId, Arc<GraphHead>>,
        vertices: BTreeMap<VertexId, Arc<Vertex>>,
        edges: BTreeMap<EdgeId, Arc<Edge>>,
    ) -> Result<Self> {
        let collection = Self {
            heads,
            vertices,
            edges,
        };
        collection.check_membership()?;
        Ok(collection)
    }

    /// Merges logical graphs into a collection.
    ///
    /// Each element's membership becomes exactly the set of given graphs
    /// that contain it. Heads keep the order of the input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentMerge`] if two graphs carry the same
    /// head, vertex or edge identifier with different content.
    pub fn from_graphs(graphs: impl IntoIterator<Item = LogicalGraph>) -> Result<Self> {
        let mut heads: IndexMap<GraphId, Arc<GraphHead>> = IndexMap::new();
        let mut vertices: BTreeMap<VertexId, (Arc<Vertex>, GraphIdSet)> = BTreeMap::new();
        let mut edges: BTreeMap<EdgeId, (Arc<Edge>, GraphIdSet)> = BTreeMap::new();

        for graph in graphs {
            let gid = graph.id();
            let (head, graph_vertices, graph_edges) = graph.into_parts();
            match heads.get(&gid) {
                Some(existing) if **existing != *head => {
                    return Err(Error::InconsistentMerge(EntityRef::GraphHead(gid)));
                }
                Some(_) => {}
                None => {
                    heads.insert(gid, head);
                }
            }

            for (id, vertex) in graph_vertices {
                match vertices.get_mut(&id) {
                    Some((existing, members)) => {
                        if !existing.same_content(&vertex) {
                            return Err(Error::InconsistentMerge(EntityRef::Vertex(id)));
                        }
                        members.insert(gid);
                    }
                    None => {
                        vertices.insert(id, (vertex, GraphIdSet::single(gid)));
                    }
                }
            }

            for (id, edge) in graph_edges {
                match edges.get_mut(&id) {
                    Some((existing, members)) => {
                        if !existing.same_content(&edge) {
                            return Err(Error::InconsistentMerge(EntityRef::Edge(id)));
                        }
                        members.insert(gid);
                    }
                    None => {
                        edges.insert(id, (edge, GraphIdSet::single(gid)));
                    }
                }
            }
        }

        let vertices = vertices
            .into_iter()
            .map(|(id, (vertex, members))| (id, reuse_or_rewrite_vertex(&vertex, members)))
            .collect();
        let edges = edges
            .into_iter()
            .map(|(id, (edge, members))| (id, reuse_or_rewrite_edge(&edge, members)))
            .collect();

        Self::from_shared(heads, vertices, edges)
    }

    /// Returns the number of graphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    /// Returns true if the collection holds no graphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Returns the number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates graph identifiers in collection order.
    pub fn head_ids(&self) -> impl Iterator<Item = GraphId> + '_ {
        self.heads.keys().copied()
    }

    /// Iterates graph heads in collection order.
    pub fn heads(&self) -> impl Iterator<Item = &Arc<GraphHead>> {
        self.heads.values()
    }

    /// Gets a graph head.
    #[must_use]
    pub fn head(&self, id: GraphId) -> Option<&GraphHead> {
        self.heads.get(&id).map(AsRef::as_ref)
    }

    /// Returns true if the collection has a head with this identifier.
    #[must_use]
    pub fn contains_head(&self, id: GraphId) -> bool {
        self.heads.contains_key(&id)
    }

    /// Returns the largest graph identifier, if any.
    #[must_use]
    pub fn max_graph_id(&self) -> Option<GraphId> {
        self.heads.keys().copied().max()
    }

    /// Iterates vertices in ascending identifier order.
    pub fn vertices(&self) -> impl Iterator<Item = &Arc<Vertex>> {
        self.vertices.values()
    }

    /// Iterates edges in ascending identifier order.
    pub fn edges(&self) -> impl Iterator<Item = &Arc<Edge>> {
        self.edges.values()
    }

    /// Gets a vertex.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id).map(AsRef::as_ref)
    }

    /// Gets an edge.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id).map(AsRef::as_ref)
    }

    /// Projects one graph.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingHead`] if the collection has no such head
    /// - [`Error::DanglingEdge`] if a member edge references a vertex that
    ///   does not exist
    pub fn graph(&self, id: GraphId) -> Result<LogicalGraph> {
        let head = self.heads.get(&id).ok_or(Error::MissingHead(id))?;
        LogicalGraph::project(
            Arc::clone(head),
            self.vertices.values(),
            self.edges.values(),
            |v| self.vertices.contains_key(&v),
        )
    }

    /// Projects every graph, in collection order.
    ///
    /// Elements are bucketed by membership in a single pass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] if a member edge references a vertex
    /// that does not exist.
    pub fn graphs(&self) -> Result<Vec<LogicalGraph>> {
        let mut vertex_buckets: FxHashMap<GraphId, Vec<&Arc<Vertex>>> = FxHashMap::default();
        for vertex in self.vertices.values() {
            for gid in vertex.graph_ids.iter() {
                vertex_buckets.entry(gid).or_default().push(vertex);
            }
        }
        let mut edge_buckets: FxHashMap<GraphId, Vec<&Arc<Edge>>> = FxHashMap::default();
        for edge in self.edges.values() {
            for gid in edge.graph_ids.iter() {
                edge_buckets.entry(gid).or_default().push(edge);
            }
        }

        self.heads
            .values()
            .map(|head| {
                LogicalGraph::project(
                    Arc::clone(head),
                    vertex_buckets.get(&head.id).into_iter().flatten().copied(),
                    edge_buckets.get(&head.id).into_iter().flatten().copied(),
                    |v| self.vertices.contains_key(&v),
                )
            })
            .collect()
    }

    /// Returns the sub-collection made of the given graphs, in the given
    /// order.
    ///
    /// Identifiers without a head in this collection are ignored. Element
    /// memberships are restricted to the kept graphs; elements left without
    /// membership are dropped, and so are edges whose endpoint was dropped.
    #[must_use]
    pub fn restrict(&self, keep: impl IntoIterator<Item = GraphId>) -> Self {
        let heads: IndexMap<GraphId, Arc<GraphHead>> = keep
            .into_iter()
            .filter_map(|id| self.heads.get(&id).map(|h| (id, Arc::clone(h))))
            .collect();

        let vertices: BTreeMap<VertexId, Arc<Vertex>> = self
            .vertices
            .iter()
            .filter_map(|(id, v)| {
                restrict_membership(&v.graph_ids, &heads)
                    .map(|members| (*id, reuse_or_rewrite_vertex(v, members)))
            })
            .collect();
        // An endpoint missing from `self` already is left for projection to
        // report.
        let dropped = |id: &VertexId| self.vertices.contains_key(id) && !vertices.contains_key(id);
        let edges = self
            .edges
            .iter()
            .filter(|(_, e)| !dropped(&e.source_id) && !dropped(&e.target_id))
            .filter_map(|(id, e)| {
                restrict_membership(&e.graph_ids, &heads)
                    .map(|members| (*id, reuse_or_rewrite_edge(e, members)))
            })
            .collect();

        Self {
            heads,
            vertices,
            edges,
        }
    }

    /// Rewrites every graph head.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `f` changes a head's identifier.
    pub fn map_heads(&self, mut f: impl FnMut(&GraphHead) -> GraphHead) -> Result<Self> {
        let mut heads = IndexMap::with_capacity(self.heads.len());
        for (id, head) in &self.heads {
            let updated = f(head);
            if updated.id != *id {
                return Err(Error::invalid_argument(format!(
                    "head rewrite changed identifier {id} to {}",
                    updated.id
                )));
            }
            heads.insert(*id, Arc::new(updated));
        }
        Ok(Self {
            heads,
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
        })
    }

    /// Checks the collection invariants: no dangling membership, and every
    /// edge endpoint exists.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        self.check_membership()?;
        for edge in self.edges.values() {
            for endpoint in [edge.source_id, edge.target_id] {
                if !self.vertices.contains_key(&endpoint) {
                    return Err(Error::DanglingEdge {
                        edge: edge.id,
                        vertex: endpoint,
                    });
                }
            }
        }
        Ok(())
    }

    /// Splits the collection into its parts.
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        IndexMap<GraphId, Arc<GraphHead>>,
        BTreeMap<VertexId, Arc<Vertex>>,
        BTreeMap<EdgeId, Arc<Edge>>,
    ) {
        (self.heads, self.vertices, self.edges)
    }

    fn check_membership(&self) -> Result<()> {
        let dangling = |element: EntityRef, members: &GraphIdSet| {
            members
                .iter()
                .find(|gid| !self.heads.contains_key(gid))
                .map(|graph| Error::DanglingMembership { element, graph })
        };
        for vertex in self.vertices.values() {
            if let Some(err) = dangling(EntityRef::Vertex(vertex.id), &vertex.graph_ids) {
                return Err(err);
            }
        }
        for edge in self.edges.values() {
            if let Some(err) = dangling(EntityRef::Edge(edge.id), &edge.graph_ids) {
                return Err(err);
            }
        }
        Ok(())
    }
}

fn restrict_membership(
    members: &GraphIdSet,
    heads: &IndexMap<GraphId, Arc<GraphHead>>,
) -> Option<GraphIdSet> {
    let kept = members.filtered(|gid| heads.contains_key(&gid));
    (!kept.is_empty()).then_some(kept)
}

pub(crate) fn reuse_or_rewrite_vertex(vertex: &Arc<Vertex>, members: GraphIdSet) -> Arc<Vertex> {
    if vertex.graph_ids == members {
        Arc::clone(vertex)
    } else {
        Arc::new(vertex.with_membership(members))
    }
}

pub(crate) fn reuse_or_rewrite_edge(edge: &Arc<Edge>, members: GraphIdSet) -> Arc<Edge> {
    if edge.graph_ids == members {
        Arc::clone(edge)
    } else {
        Arc::new(edge.with_membership(members))
    }
}

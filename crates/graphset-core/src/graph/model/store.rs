//! The entity store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use graphset_common::types::{
    EdgeId, EntityRef, GraphId, GraphIdSet, PropertyKey, Value, VertexId,
};
use graphset_common::utils::error::{Error, Result};
use graphset_common::utils::hash::{FxHashMap, FxHashSet};
use indexmap::IndexMap;
use parking_lot::RwLock;

use super::collection::{reuse_or_rewrite_edge, reuse_or_rewrite_vertex};
use super::{Edge, GraphCollection, GraphHead, LogicalGraph, Vertex};

/// Configuration for the entity store.
#[derive(Debug, Clone)]
pub struct EntityStoreConfig {
    /// Initial capacity for vertices.
    pub initial_vertex_capacity: usize,
    /// Initial capacity for edges.
    pub initial_edge_capacity: usize,
    /// Initial capacity for graph heads.
    pub initial_head_capacity: usize,
}

impl Default for EntityStoreConfig {
    fn default() -> Self {
        Self {
            initial_vertex_capacity: 1024,
            initial_edge_capacity: 4096,
            initial_head_capacity: 64,
        }
    }
}

/// Owner of every vertex, edge and graph head record.
///
/// Records are shared out as `Arc`s; readers (projections, collections)
/// never see a record change underneath them because the store replaces a
/// record instead of mutating it in place. The only mutation the store
/// performs on an existing vertex or edge is a change of membership.
///
/// Entities whose last graph is removed are collected immediately, unless an
/// edge that is still stored uses them as an endpoint.
pub struct EntityStore {
    /// Graph heads indexed by GraphId.
    heads: RwLock<FxHashMap<GraphId, Arc<GraphHead>>>,

    /// Vertex records indexed by VertexId.
    vertices: RwLock<FxHashMap<VertexId, Arc<Vertex>>>,

    /// Edge records indexed by EdgeId.
    edges: RwLock<FxHashMap<EdgeId, Arc<Edge>>>,

    /// Next graph ID.
    next_graph_id: AtomicU64,

    /// Next vertex ID.
    next_vertex_id: AtomicU64,

    /// Next edge ID.
    next_edge_id: AtomicU64,
}

impl EntityStore {
    /// Creates a new store with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EntityStoreConfig::default())
    }

    /// Creates a new store with custom configuration.
    #[must_use]
    pub fn with_config(config: EntityStoreConfig) -> Self {
        Self {
            heads: RwLock::new(FxHashMap::with_capacity_and_hasher(
                config.initial_head_capacity,
                Default::default(),
            )),
            vertices: RwLock::new(FxHashMap::with_capacity_and_hasher(
                config.initial_vertex_capacity,
                Default::default(),
            )),
            edges: RwLock::new(FxHashMap::with_capacity_and_hasher(
                config.initial_edge_capacity,
                Default::default(),
            )),
            next_graph_id: AtomicU64::new(0),
            next_vertex_id: AtomicU64::new(0),
            next_edge_id: AtomicU64::new(0),
        }
    }

    // === Graph Head Operations ===

    /// Creates a new graph head with a fresh identifier.
    pub fn create_graph_head(
        &self,
        label: &str,
        properties: impl IntoIterator<Item = (impl Into<PropertyKey>, impl Into<Value>)>,
    ) -> GraphId {
        let id = GraphId::new(self.next_graph_id.fetch_add(1, Ordering::Relaxed));
        let mut head = GraphHead::new(id, label);
        for (key, value) in properties {
            head.properties.insert(key.into(), value.into());
        }
        self.heads.write().insert(id, Arc::new(head));
        id
    }

    /// Adds a graph head with an explicit identifier.
    ///
    /// Adding a head that is already stored with identical content is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for [`GraphId::NULL`]
    /// - [`Error::DuplicateIdentifier`] if the id is taken by a different head
    pub fn add_graph_head(&self, head: GraphHead) -> Result<()> {
        if head.id.is_null() {
            return Err(Error::invalid_argument("the null graph id cannot name a graph head"));
        }
        let mut heads = self.heads.write();
        if let Some(existing) = heads.get(&head.id) {
            if **existing != head {
                return Err(Error::DuplicateIdentifier(EntityRef::GraphHead(head.id)));
            }
            return Ok(());
        }
        bump(&self.next_graph_id, head.id.as_u64());
        heads.insert(head.id, Arc::new(head));
        Ok(())
    }

    /// Gets a graph head.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such head exists.
    pub fn head_by_id(&self, id: GraphId) -> Result<Arc<GraphHead>> {
        self.heads
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(EntityRef::GraphHead(id)))
    }

    /// Removes a graph head and its memberships.
    ///
    /// Vertices and edges that belonged only to this graph are removed too,
    /// except vertices still used as an endpoint by a remaining edge.
    /// Returns the number of collected entities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such head exists.
    pub fn remove_graph_head(&self, id: GraphId) -> Result<usize> {
        let mut heads = self.heads.write();
        let mut vertices = self.vertices.write();
        let mut edges = self.edges.write();

        if heads.remove(&id).is_none() {
            return Err(Error::NotFound(EntityRef::GraphHead(id)));
        }

        let mut orphaned_edges = Vec::new();
        for edge in edges.values_mut() {
            if edge.graph_ids.contains(id) {
                Arc::make_mut(edge).graph_ids.remove(id);
                if edge.graph_ids.is_empty() {
                    orphaned_edges.push(edge.id);
                }
            }
        }
        for edge_id in &orphaned_edges {
            edges.remove(edge_id);
        }

        let mut orphaned_vertices = Vec::new();
        for vertex in vertices.values_mut() {
            if vertex.graph_ids.contains(id) {
                Arc::make_mut(vertex).graph_ids.remove(id);
                if vertex.graph_ids.is_empty() {
                    orphaned_vertices.push(vertex.id);
                }
            }
        }
        let referenced = endpoints(&edges);
        let mut collected = orphaned_edges.len();
        for vertex_id in orphaned_vertices {
            if !referenced.contains(&vertex_id) {
                vertices.remove(&vertex_id);
                collected += 1;
            }
        }

        tracing::debug!(graph = %id, collected, "removed graph head");
        Ok(collected)
    }

    /// Returns the number of graph heads.
    #[must_use]
    pub fn head_count(&self) -> usize {
        self.heads.read().len()
    }

    // === Vertex Operations ===

    /// Creates a new unassigned vertex with a fresh identifier.
    pub fn create_vertex(
        &self,
        label: &str,
        properties: impl IntoIterator<Item = (impl Into<PropertyKey>, impl Into<Value>)>,
    ) -> VertexId {
        let id = VertexId::new(self.next_vertex_id.fetch_add(1, Ordering::Relaxed));
        let mut vertex = Vertex::new(id, label);
        for (key, value) in properties {
            vertex.properties.insert(key.into(), value.into());
        }
        self.vertices.write().insert(id, Arc::new(vertex));
        id
    }

    /// Adds a vertex with an explicit identifier.
    ///
    /// If a vertex with identical content is already stored, the memberships
    /// are merged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the membership contains [`GraphId::NULL`]
    /// - [`Error::DuplicateIdentifier`] if the id is taken by a different vertex
    pub fn add_vertex(&self, vertex: Vertex) -> Result<()> {
        reject_null_membership(EntityRef::Vertex(vertex.id), &vertex.graph_ids)?;
        let mut vertices = self.vertices.write();
        match vertices.get_mut(&vertex.id) {
            Some(existing) if existing.same_content(&vertex) => {
                let merged = existing.graph_ids.union(&vertex.graph_ids);
                Arc::make_mut(existing).graph_ids = merged;
            }
            Some(_) => return Err(Error::DuplicateIdentifier(EntityRef::Vertex(vertex.id))),
            None => {
                bump(&self.next_vertex_id, vertex.id.as_u64());
                vertices.insert(vertex.id, Arc::new(vertex));
            }
        }
        Ok(())
    }

    /// Gets a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such vertex exists.
    pub fn vertex_by_id(&self, id: VertexId) -> Result<Arc<Vertex>> {
        self.vertices
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(EntityRef::Vertex(id)))
    }

    /// Adds a vertex to a graph.
    ///
    /// Returns false if it was already a member.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingHead`] if the graph has no head
    /// - [`Error::NotFound`] if the vertex does not exist
    pub fn assign_vertex(&self, id: VertexId, graph: GraphId) -> Result<bool> {
        let heads = self.heads.read();
        if !heads.contains_key(&graph) {
            return Err(Error::MissingHead(graph));
        }
        let mut vertices = self.vertices.write();
        let vertex = vertices
            .get_mut(&id)
            .ok_or(Error::NotFound(EntityRef::Vertex(id)))?;
        if vertex.graph_ids.contains(graph) {
            return Ok(false);
        }
        Arc::make_mut(vertex).graph_ids.insert(graph);
        Ok(true)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.read().len()
    }

    // === Edge Operations ===

    /// Creates a new unassigned edge with a fresh identifier.
    ///
    /// Endpoints are not checked here; projection reports edges whose
    /// endpoints are missing.
    pub fn create_edge(
        &self,
        source: VertexId,
        target: VertexId,
        label: &str,
        properties: impl IntoIterator<Item = (impl Into<PropertyKey>, impl Into<Value>)>,
    ) -> EdgeId {
        let id = EdgeId::new(self.next_edge_id.fetch_add(1, Ordering::Relaxed));
        let mut edge = Edge::new(id, source, target, label);
        for (key, value) in properties {
            edge.properties.insert(key.into(), value.into());
        }
        self.edges.write().insert(id, Arc::new(edge));
        id
    }

    /// Adds an edge with an explicit identifier.
    ///
    /// If an edge with identical content is already stored, the memberships
    /// are merged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the membership contains [`GraphId::NULL`]
    /// - [`Error::DuplicateIdentifier`] if the id is taken by a different edge
    pub fn add_edge(&self, edge: Edge) -> Result<()> {
        reject_null_membership(EntityRef::Edge(edge.id), &edge.graph_ids)?;
        let mut edges = self.edges.write();
        match edges.get_mut(&edge.id) {
            Some(existing) if existing.same_content(&edge) => {
                let merged = existing.graph_ids.union(&edge.graph_ids);
                Arc::make_mut(existing).graph_ids = merged;
            }
            Some(_) => return Err(Error::DuplicateIdentifier(EntityRef::Edge(edge.id))),
            None => {
                bump(&self.next_edge_id, edge.id.as_u64());
                edges.insert(edge.id, Arc::new(edge));
            }
        }
        Ok(())
    }

    /// Gets an edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such edge exists.
    pub fn edge_by_id(&self, id: EdgeId) -> Result<Arc<Edge>> {
        self.edges
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(EntityRef::Edge(id)))
    }

    /// Adds an edge to a graph.
    ///
    /// Returns false if it was already a member.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingHead`] if the graph has no head
    /// - [`Error::NotFound`] if the edge does not exist
    pub fn assign_edge(&self, id: EdgeId, graph: GraphId) -> Result<bool> {
        let heads = self.heads.read();
        if !heads.contains_key(&graph) {
            return Err(Error::MissingHead(graph));
        }
        let mut edges = self.edges.write();
        let edge = edges
            .get_mut(&id)
            .ok_or(Error::NotFound(EntityRef::Edge(id)))?;
        if edge.graph_ids.contains(graph) {
            return Ok(false);
        }
        Arc::make_mut(edge).graph_ids.insert(graph);
        Ok(true)
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.read().len()
    }

    // === Membership ===

    /// Returns the vertices and edges that belong to a graph, in ascending
    /// identifier order.
    ///
    /// With [`GraphId::NULL`], returns the entities that belong to no graph.
    #[must_use]
    pub fn entities_with_graph_id(&self, graph: GraphId) -> (Vec<Arc<Vertex>>, Vec<Arc<Edge>>) {
        let member = |ids: &GraphIdSet| {
            if graph.is_null() {
                ids.is_empty()
            } else {
                ids.contains(graph)
            }
        };

        let mut vertices: Vec<_> = self
            .vertices
            .read()
            .values()
            .filter(|v| member(&v.graph_ids))
            .cloned()
            .collect();
        vertices.sort_unstable_by_key(|v| v.id);

        let mut edges: Vec<_> = self
            .edges
            .read()
            .values()
            .filter(|e| member(&e.graph_ids))
            .cloned()
            .collect();
        edges.sort_unstable_by_key(|e| e.id);

        (vertices, edges)
    }

    /// Removes every vertex and edge that belongs to no graph, except
    /// vertices still used as an endpoint by a remaining edge.
    ///
    /// Returns the number of removed entities.
    pub fn collect_garbage(&self) -> usize {
        let mut vertices = self.vertices.write();
        let mut edges = self.edges.write();

        let before = vertices.len() + edges.len();
        edges.retain(|_, e| !e.graph_ids.is_empty());
        let referenced = endpoints(&edges);
        vertices.retain(|id, v| !v.graph_ids.is_empty() || referenced.contains(id));
        let removed = before - vertices.len() - edges.len();

        tracing::debug!(removed, "collected unassigned entities");
        removed
    }

    // === Projection ===

    /// Projects one logical graph.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingHead`] if the graph has no head
    /// - [`Error::DanglingEdge`] if a member edge references a vertex that
    ///   does not exist
    pub fn project(&self, graph: GraphId) -> Result<LogicalGraph> {
        let head = self
            .heads
            .read()
            .get(&graph)
            .cloned()
            .ok_or(Error::MissingHead(graph))?;
        let vertices = self.vertices.read();
        let edges = self.edges.read();
        LogicalGraph::project(head, vertices.values(), edges.values(), |id| {
            vertices.contains_key(&id)
        })
    }

    /// Projects several graphs into a collection, in the given order.
    ///
    /// Memberships are restricted to the requested graphs. Edges that can
    /// not appear in any requested graph because an endpoint is outside the
    /// selection are left out.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingHead`] if a requested graph has no head
    /// - [`Error::DanglingEdge`] if a selected edge references a vertex that
    ///   does not exist
    pub fn project_collection(
        &self,
        graphs: impl IntoIterator<Item = GraphId>,
    ) -> Result<GraphCollection> {
        let heads = self.heads.read();
        let vertices = self.vertices.read();
        let edges = self.edges.read();

        let mut selected_heads = IndexMap::new();
        for id in graphs {
            let head = heads.get(&id).ok_or(Error::MissingHead(id))?;
            selected_heads.insert(id, Arc::clone(head));
        }

        let restrict = |members: &GraphIdSet| {
            let kept = members.filtered(|gid| selected_heads.contains_key(&gid));
            (!kept.is_empty()).then_some(kept)
        };

        let mut selected_vertices = BTreeMap::new();
        for vertex in vertices.values() {
            if let Some(members) = restrict(&vertex.graph_ids) {
                selected_vertices.insert(vertex.id, reuse_or_rewrite_vertex(vertex, members));
            }
        }

        let mut selected_edges = BTreeMap::new();
        for edge in edges.values() {
            let Some(members) = restrict(&edge.graph_ids) else {
                continue;
            };
            let mut visible = true;
            for endpoint in [edge.source_id, edge.target_id] {
                if !vertices.contains_key(&endpoint) {
                    return Err(Error::DanglingEdge {
                        edge: edge.id,
                        vertex: endpoint,
                    });
                }
                visible &= selected_vertices.contains_key(&endpoint);
            }
            if visible {
                selected_edges.insert(edge.id, reuse_or_rewrite_edge(edge, members));
            }
        }

        GraphCollection::from_shared(selected_heads, selected_vertices, selected_edges)
    }

    /// Projects every graph in the store, in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] if a member edge references a vertex
    /// that does not exist.
    pub fn snapshot(&self) -> Result<GraphCollection> {
        let mut ids: Vec<GraphId> = self.heads.read().keys().copied().collect();
        ids.sort_unstable();
        self.project_collection(ids)
    }

    /// Writes a collection into the store.
    ///
    /// Heads and elements are added; elements already stored with identical
    /// content gain the collection's memberships. Either everything is
    /// written or, on error, nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateIdentifier`] if any record conflicts with a
    /// stored one.
    pub fn insert_collection(&self, collection: &GraphCollection) -> Result<()> {
        let mut heads = self.heads.write();
        let mut vertices = self.vertices.write();
        let mut edges = self.edges.write();

        for head in collection.heads() {
            if let Some(existing) = heads.get(&head.id) {
                if existing != head {
                    return Err(Error::DuplicateIdentifier(EntityRef::GraphHead(head.id)));
                }
            }
        }
        for vertex in collection.vertices() {
            if let Some(existing) = vertices.get(&vertex.id) {
                if !existing.same_content(vertex) {
                    return Err(Error::DuplicateIdentifier(EntityRef::Vertex(vertex.id)));
                }
            }
        }
        for edge in collection.edges() {
            if let Some(existing) = edges.get(&edge.id) {
                if !existing.same_content(edge) {
                    return Err(Error::DuplicateIdentifier(EntityRef::Edge(edge.id)));
                }
            }
        }

        for head in collection.heads() {
            bump(&self.next_graph_id, head.id.as_u64());
            heads.entry(head.id).or_insert_with(|| Arc::clone(head));
        }
        for vertex in collection.vertices() {
            bump(&self.next_vertex_id, vertex.id.as_u64());
            match vertices.get_mut(&vertex.id) {
                Some(existing) => {
                    let merged = existing.graph_ids.union(&vertex.graph_ids);
                    Arc::make_mut(existing).graph_ids = merged;
                }
                None => {
                    vertices.insert(vertex.id, Arc::clone(vertex));
                }
            }
        }
        for edge in collection.edges() {
            bump(&self.next_edge_id, edge.id.as_u64());
            match edges.get_mut(&edge.id) {
                Some(existing) => {
                    let merged = existing.graph_ids.union(&edge.graph_ids);
                    Arc::make_mut(existing).graph_ids = merged;
                }
                None => {
                    edges.insert(edge.id, Arc::clone(edge));
                }
            }
        }

        tracing::debug!(
            heads = collection.len(),
            vertices = collection.vertex_count(),
            edges = collection.edge_count(),
            "inserted collection"
        );
        Ok(())
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves an id counter past an explicitly chosen identifier.
fn bump(counter: &AtomicU64, used: u64) {
    counter.fetch_max(used.saturating_add(1), Ordering::AcqRel);
}

fn reject_null_membership(element: EntityRef, members: &GraphIdSet) -> Result<()> {
    if members.contains(GraphId::NULL) {
        return Err(Error::invalid_argument(format!(
            "{element} lists the null graph id as a membership"
        )));
    }
    Ok(())
}

fn endpoints(edges: &FxHashMap<EdgeId, Arc<Edge>>) -> FxHashSet<VertexId> {
    edges
        .values()
        .flat_map(|e| [e.source_id, e.target_id])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_props() -> [(&'static str, Value); 0] {
        []
    }

    #[test]
    fn test_create_and_lookup() {
        let store = EntityStore::new();

        let g = store.create_graph_head("Community", [("name", "Leipzig")]);
        let a = store.create_vertex("Person", [("name", Value::from("Alice"))]);
        let b = store.create_vertex("Person", no_props());
        let e = store.create_edge(a, b, "knows", no_props());

        assert_eq!(store.head_by_id(g).unwrap().label.as_ref(), "Community");
        assert_eq!(
            store
                .vertex_by_id(a)
                .unwrap()
                .get_property("name")
                .and_then(|v| v.as_str()),
            Some("Alice")
        );
        assert_eq!(store.edge_by_id(e).unwrap().target_id, b);
        assert!(matches!(
            store.vertex_by_id(VertexId::new(99)),
            Err(Error::NotFound(EntityRef::Vertex(_)))
        ));
    }

    #[test]
    fn test_add_duplicate_identifier() {
        let store = EntityStore::new();
        let v = Vertex::new(VertexId::new(1), "Person");
        store.add_vertex(v.clone()).unwrap();
        // Identical content is accepted.
        store.add_vertex(v).unwrap();
        assert_eq!(store.vertex_count(), 1);

        let clash = Vertex::new(VertexId::new(1), "Animal");
        assert!(matches!(
            store.add_vertex(clash),
            Err(Error::DuplicateIdentifier(EntityRef::Vertex(_)))
        ));
    }

    #[test]
    fn test_add_rejects_null_membership() {
        let store = EntityStore::new();
        let v = Vertex::new(VertexId::new(1), "Person").with_graphs([GraphId::NULL]);
        assert!(matches!(store.add_vertex(v), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_explicit_ids_advance_counters() {
        let store = EntityStore::new();
        store
            .add_vertex(Vertex::new(VertexId::new(10), "Person"))
            .unwrap();
        let next = store.create_vertex("Person", no_props());
        assert_eq!(next, VertexId::new(11));
    }

    #[test]
    fn test_entities_with_graph_id() {
        let store = EntityStore::new();
        let g = store.create_graph_head("G", no_props());
        let a = store.create_vertex("A", no_props());
        let b = store.create_vertex("B", no_props());
        let e = store.create_edge(a, b, "x", no_props());
        store.assign_vertex(a, g).unwrap();
        store.assign_edge(e, g).unwrap();

        let (vertices, edges) = store.entities_with_graph_id(g);
        assert_eq!(vertices.len(), 1);
        assert_eq!(edges.len(), 1);

        let (unassigned, _) = store.entities_with_graph_id(GraphId::NULL);
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].id, b);
    }

    #[test]
    fn test_assign_requires_head() {
        let store = EntityStore::new();
        let a = store.create_vertex("A", no_props());
        assert!(matches!(
            store.assign_vertex(a, GraphId::new(5)),
            Err(Error::MissingHead(_))
        ));
        let g = store.create_graph_head("G", no_props());
        assert!(store.assign_vertex(a, g).unwrap());
        assert!(!store.assign_vertex(a, g).unwrap());
    }

    #[test]
    fn test_project_missing_head() {
        let store = EntityStore::new();
        assert!(matches!(
            store.project(GraphId::new(3)),
            Err(Error::MissingHead(_))
        ));
    }

    #[test]
    fn test_project_reports_dangling_edge() {
        let store = EntityStore::new();
        let g = store.create_graph_head("G", no_props());
        let a = store.create_vertex("A", no_props());
        let e = store.create_edge(a, VertexId::new(42), "x", no_props());
        store.assign_vertex(a, g).unwrap();
        store.assign_edge(e, g).unwrap();

        assert!(matches!(
            store.project(g),
            Err(Error::DanglingEdge { vertex, .. }) if vertex == VertexId::new(42)
        ));
    }

    #[test]
    fn test_remove_graph_head_collects_exclusive_entities() {
        let store = EntityStore::new();
        let g1 = store.create_graph_head("G", no_props());
        let g2 = store.create_graph_head("G", no_props());
        let shared = store.create_vertex("A", no_props());
        let only_g1 = store.create_vertex("B", no_props());
        let e = store.create_edge(shared, only_g1, "x", no_props());
        store.assign_vertex(shared, g1).unwrap();
        store.assign_vertex(shared, g2).unwrap();
        store.assign_vertex(only_g1, g1).unwrap();
        store.assign_edge(e, g1).unwrap();

        let collected = store.remove_graph_head(g1).unwrap();
        assert_eq!(collected, 2);
        assert_eq!(store.vertex_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(
            store.vertex_by_id(shared).unwrap().graph_ids,
            GraphIdSet::single(g2)
        );
        assert!(matches!(
            store.remove_graph_head(g1),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_collect_garbage_keeps_endpoints() {
        let store = EntityStore::new();
        let g = store.create_graph_head("G", no_props());
        let a = store.create_vertex("A", no_props());
        let b = store.create_vertex("B", no_props());
        let _loose = store.create_vertex("C", no_props());
        let e = store.create_edge(a, b, "x", no_props());
        store.assign_vertex(a, g).unwrap();
        store.assign_edge(e, g).unwrap();

        // b is unassigned but still an endpoint of e.
        assert_eq!(store.collect_garbage(), 1);
        assert!(store.vertex_by_id(b).is_ok());
    }

    #[test]
    fn test_project_collection_restricts_membership() {
        let store = EntityStore::new();
        let g1 = store.create_graph_head("G", no_props());
        let g2 = store.create_graph_head("G", no_props());
        let a = store.create_vertex("A", no_props());
        let b = store.create_vertex("B", no_props());
        let e = store.create_edge(a, b, "x", no_props());
        store.assign_vertex(a, g1).unwrap();
        store.assign_vertex(a, g2).unwrap();
        store.assign_vertex(b, g2).unwrap();
        // The edge is in g1, but b is not.
        store.assign_edge(e, g1).unwrap();
        store.assign_edge(e, g2).unwrap();

        let only_g1 = store.project_collection([g1]).unwrap();
        assert_eq!(only_g1.len(), 1);
        assert_eq!(only_g1.vertex_count(), 1);
        assert_eq!(only_g1.edge_count(), 0);
        assert_eq!(only_g1.vertex(a).unwrap().graph_ids, GraphIdSet::single(g1));
        only_g1.validate().unwrap();

        let both = store.snapshot().unwrap();
        assert_eq!(both.head_ids().collect::<Vec<_>>(), vec![g1, g2]);
        assert_eq!(both.edge_count(), 1);
    }

    #[test]
    fn test_insert_collection_is_all_or_nothing() {
        let source = EntityStore::new();
        let g = source.create_graph_head("G", no_props());
        let a = source.create_vertex("A", no_props());
        source.assign_vertex(a, g).unwrap();
        let collection = source.snapshot().unwrap();

        let target = EntityStore::new();
        target
            .add_graph_head(GraphHead::new(GraphId::new(7), "Other"))
            .unwrap();
        target.insert_collection(&collection).unwrap();
        assert_eq!(target.head_count(), 2);
        assert_eq!(target.project(g).unwrap().vertex_count(), 1);

        let clashing = EntityStore::new();
        clashing
            .add_vertex(Vertex::new(a, "Different"))
            .unwrap();
        assert!(clashing.insert_collection(&collection).is_err());
        assert_eq!(clashing.head_count(), 0);
    }
}

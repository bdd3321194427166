//! Fixture builder.
//!
//! Builds an [`EntityStore`] from named pieces and hands out vertices,
//! heads, logical graphs and collections by those names. Identifiers are
//! allocated in creation order starting at zero, so fixtures are
//! reproducible.
//!
//! ```ignore
//! let mut fixture = FixtureBuilder::new();
//! fixture
//!     .graph("g1", "Community")?
//!     .vertex("alice", "Person", &["g1"])?
//!     .vertex("bob", "Person", &["g1"])?
//!     .edge("knows", "alice", "bob", "knows", &["g1"])?;
//! let g1 = fixture.logical_graph_by_variable("g1")?;
//! ```

use std::sync::Arc;

use graphset_common::types::{EdgeId, GraphId, PropertyKey, Value, VertexId};
use graphset_common::utils::error::{Error, Result};
use graphset_core::graph::model::{
    Edge, EntityStore, GraphCollection, GraphHead, LogicalGraph, Vertex,
};
use indexmap::IndexMap;

/// Property list accepted by the builder.
pub type Props<'a> = &'a [(&'a str, Value)];

/// Builds fixtures by variable name.
#[derive(Default)]
pub struct FixtureBuilder {
    store: EntityStore,
    graphs: IndexMap<String, GraphId>,
    vertices: IndexMap<String, VertexId>,
    edges: IndexMap<String, EdgeId>,
}

impl FixtureBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a graph head.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is taken.
    pub fn graph(&mut self, var: &str, label: &str) -> Result<&mut Self> {
        self.graph_with(var, label, &[])
    }

    /// Adds a graph head with properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is taken.
    pub fn graph_with(&mut self, var: &str, label: &str, props: Props<'_>) -> Result<&mut Self> {
        reject_taken(var, self.graphs.contains_key(var))?;
        let id = self.store.create_graph_head(label, owned(props));
        self.graphs.insert(var.to_string(), id);
        Ok(self)
    }

    /// Adds a vertex to the named graphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is taken or a
    /// graph variable is unknown.
    pub fn vertex(&mut self, var: &str, label: &str, graphs: &[&str]) -> Result<&mut Self> {
        self.vertex_with(var, label, &[], graphs)
    }

    /// Adds a vertex with properties to the named graphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is taken or a
    /// graph variable is unknown.
    pub fn vertex_with(
        &mut self,
        var: &str,
        label: &str,
        props: Props<'_>,
        graphs: &[&str],
    ) -> Result<&mut Self> {
        reject_taken(var, self.vertices.contains_key(var))?;
        let graph_ids = self.resolve_graphs(graphs)?;
        let id = self.store.create_vertex(label, owned(props));
        for graph in graph_ids {
            self.store.assign_vertex(id, graph)?;
        }
        self.vertices.insert(var.to_string(), id);
        Ok(self)
    }

    /// Adds an edge between two named vertices to the named graphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is taken or any
    /// referenced variable is unknown.
    pub fn edge(
        &mut self,
        var: &str,
        source: &str,
        target: &str,
        label: &str,
        graphs: &[&str],
    ) -> Result<&mut Self> {
        self.edge_with(var, source, target, label, &[], graphs)
    }

    /// Adds an edge with properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is taken or any
    /// referenced variable is unknown.
    pub fn edge_with(
        &mut self,
        var: &str,
        source: &str,
        target: &str,
        label: &str,
        props: Props<'_>,
        graphs: &[&str],
    ) -> Result<&mut Self> {
        reject_taken(var, self.edges.contains_key(var))?;
        let source = lookup(&self.vertices, source)?;
        let target = lookup(&self.vertices, target)?;
        let graph_ids = self.resolve_graphs(graphs)?;
        let id = self.store.create_edge(source, target, label, owned(props));
        for graph in graph_ids {
            self.store.assign_edge(id, graph)?;
        }
        self.edges.insert(var.to_string(), id);
        Ok(self)
    }

    /// Adds an existing vertex to one more graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a variable is unknown.
    pub fn assign_vertex(&mut self, var: &str, graph: &str) -> Result<&mut Self> {
        let id = lookup(&self.vertices, var)?;
        let graph = lookup(&self.graphs, graph)?;
        self.store.assign_vertex(id, graph)?;
        Ok(self)
    }

    fn resolve_graphs(&self, graphs: &[&str]) -> Result<Vec<GraphId>> {
        graphs.iter().map(|g| lookup(&self.graphs, g)).collect()
    }

    /// Returns the identifier of a named graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is unknown.
    pub fn graph_id(&self, var: &str) -> Result<GraphId> {
        lookup(&self.graphs, var)
    }

    /// Returns the identifier of a named vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is unknown.
    pub fn vertex_id(&self, var: &str) -> Result<VertexId> {
        lookup(&self.vertices, var)
    }

    /// Returns a named vertex as currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is unknown.
    pub fn vertex_by_variable(&self, var: &str) -> Result<Arc<Vertex>> {
        self.store.vertex_by_id(lookup(&self.vertices, var)?)
    }

    /// Returns a named edge as currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is unknown.
    pub fn edge_by_variable(&self, var: &str) -> Result<Arc<Edge>> {
        self.store.edge_by_id(lookup(&self.edges, var)?)
    }

    /// Returns a named graph head.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is unknown.
    pub fn graph_head_by_variable(&self, var: &str) -> Result<Arc<GraphHead>> {
        self.store.head_by_id(lookup(&self.graphs, var)?)
    }

    /// Projects a named graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the variable is unknown.
    pub fn logical_graph_by_variable(&self, var: &str) -> Result<LogicalGraph> {
        self.store.project(lookup(&self.graphs, var)?)
    }

    /// Projects the named graphs, in the given order, into a collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a variable is unknown.
    pub fn collection_by_variables(&self, vars: &[&str]) -> Result<GraphCollection> {
        self.store.project_collection(self.resolve_graphs(vars)?)
    }

    /// Projects every graph, in creation order.
    ///
    /// # Errors
    ///
    /// Propagates projection errors.
    pub fn collection(&self) -> Result<GraphCollection> {
        self.store.project_collection(self.graphs.values().copied())
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Consumes the builder and returns the store.
    #[must_use]
    pub fn into_store(self) -> EntityStore {
        self.store
    }
}

fn owned(props: Props<'_>) -> impl Iterator<Item = (PropertyKey, Value)> + '_ {
    props.iter().map(|(k, v)| (PropertyKey::from(*k), v.clone()))
}

fn reject_taken(var: &str, taken: bool) -> Result<()> {
    if taken {
        Err(Error::invalid_argument(format!("variable '{var}' is already defined")))
    } else {
        Ok(())
    }
}

fn lookup<T: Copy>(map: &IndexMap<String, T>, var: &str) -> Result<T> {
    map.get(var)
        .copied()
        .ok_or_else(|| Error::invalid_argument(format!("unknown variable '{var}'")))
}

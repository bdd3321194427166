//! Per-graph transformation and folding.

use graphset_common::types::GraphId;
use graphset_common::utils::error::{Error, Result};
use graphset_core::graph::model::{GraphCollection, LogicalGraph};

use crate::engine::Engine;

/// A function from one logical graph to another, used by
/// [`Engine::apply`].
///
/// Any `Fn(LogicalGraph) -> Result<LogicalGraph>` is a transform. Wrap it
/// in [`PreserveIdentity`] to keep the input graph identifiers.
pub trait GraphTransform: Send + Sync {
    /// Transforms one graph.
    ///
    /// # Errors
    ///
    /// Any failure aborts the whole `apply`.
    fn transform(&self, graph: LogicalGraph) -> Result<LogicalGraph>;

    /// Whether output graphs keep the identifier of their input.
    fn preserves_identity(&self) -> bool {
        false
    }
}

impl<F> GraphTransform for F
where
    F: Fn(LogicalGraph) -> Result<LogicalGraph> + Send + Sync,
{
    fn transform(&self, graph: LogicalGraph) -> Result<LogicalGraph> {
        self(graph)
    }
}

/// Marks a transform whose outputs keep the input graph identifiers.
#[derive(Debug, Clone, Copy)]
pub struct PreserveIdentity<T>(pub T);

impl<T: GraphTransform> GraphTransform for PreserveIdentity<T> {
    fn transform(&self, graph: LogicalGraph) -> Result<LogicalGraph> {
        self.0.transform(graph)
    }

    fn preserves_identity(&self) -> bool {
        true
    }
}

impl Engine {
    /// Maps every graph through `f`.
    ///
    /// Output graphs get fresh identifiers, above both the configured base
    /// and every input identifier, assigned in collection order. With
    /// [`PreserveIdentity`] they keep the input identifier instead. Element
    /// memberships of the result are exactly the output graphs containing
    /// each element.
    ///
    /// # Errors
    ///
    /// - whatever `f` returns, for the first failing graph in collection
    ///   order
    /// - [`Error::InconsistentMerge`] if two outputs carry the same element
    ///   identifier with different content
    /// - [`Error::Internal`] if no fresh graph identifier is left
    pub fn apply<T: GraphTransform>(
        &self,
        collection: &GraphCollection,
        f: &T,
    ) -> Result<GraphCollection> {
        let graphs = collection.graphs()?;
        let keep_ids = f.preserves_identity();
        let floor = collection.max_graph_id().unwrap_or(GraphId::NULL);

        // Ids are handed out before the parallel step so they follow
        // collection order.
        let jobs = graphs
            .into_iter()
            .map(|g| -> Result<(LogicalGraph, GraphId)> {
                let id = if keep_ids {
                    g.id()
                } else {
                    self.ids().next_graph_id(floor)?
                };
                Ok((g, id))
            })
            .collect::<Result<Vec<_>>>()?;

        let outputs = self.executor().try_map_each(&jobs, |(graph, id)| {
            let output = f.transform(graph.clone())?;
            let head = output.head().with_id(*id);
            Ok(output.with_head(head))
        })?;

        let result = GraphCollection::from_graphs(outputs)?;
        self.log_operator("apply", collection.len(), result.len());
        Ok(result)
    }

    /// Folds the graphs with `f`, in ascending identifier order.
    ///
    /// A single graph is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCollection`] if the collection has no graphs
    /// - whatever `f` returns
    pub fn reduce<F>(&self, collection: &GraphCollection, f: F) -> Result<LogicalGraph>
    where
        F: Fn(LogicalGraph, LogicalGraph) -> Result<LogicalGraph>,
    {
        let mut graphs = collection.graphs()?;
        graphs.sort_by_key(LogicalGraph::id);
        let mut graphs = graphs.into_iter();
        let first = graphs.next().ok_or(Error::EmptyCollection("reduce"))?;
        let result = graphs.try_fold(first, f)?;
        self.log_operator("reduce", collection.len(), 1);
        Ok(result)
    }
}

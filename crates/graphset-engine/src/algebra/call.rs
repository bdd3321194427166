//! Dispatch to registered algorithms.

use std::time::Instant;

use graphset_adapters::plugins::{
    AlgorithmContext, CancellationToken, Parameters, RegisteredAlgorithm,
};
use graphset_common::utils::error::{Error, Result};
use graphset_core::graph::model::{GraphCollection, LogicalGraph};

use crate::engine::Engine;

impl Engine {
    /// Runs the graph algorithm registered under `name`.
    ///
    /// # Errors
    ///
    /// See [`call_for_graph_with_cancel`](Self::call_for_graph_with_cancel).
    pub fn call_for_graph(
        &self,
        graph: &LogicalGraph,
        name: &str,
        params: &Parameters,
    ) -> Result<LogicalGraph> {
        self.call_for_graph_with_cancel(graph, name, params, &CancellationToken::new())
    }

    /// Runs the graph algorithm registered under `name`, observing `cancel`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownAlgorithm`] if nothing is registered under `name`
    /// - [`Error::InvalidArgument`] if `name` is a collection algorithm or
    ///   `params` do not match its declared parameters
    /// - [`Error::Cancelled`] if `cancel` fires before the result is returned
    /// - [`Error::AlgorithmFailure`] wrapping anything the algorithm raises
    pub fn call_for_graph_with_cancel(
        &self,
        graph: &LogicalGraph,
        name: &str,
        params: &Parameters,
        cancel: &CancellationToken,
    ) -> Result<LogicalGraph> {
        let RegisteredAlgorithm::Graph(algorithm) = self.registry().get(name)? else {
            return Err(Error::invalid_argument(format!(
                "'{name}' is a collection algorithm"
            )));
        };
        let params = params.resolve(algorithm.parameters())?;
        cancel.check()?;

        let start = Instant::now();
        let ctx = AlgorithmContext::new(self.ids(), cancel);
        let output = algorithm
            .execute(graph, &params, &ctx)
            .map_err(|e| algorithm_error(name, e))?;
        cancel.check()?;

        tracing::debug!(algorithm = name, elapsed = ?start.elapsed(), "graph algorithm finished");
        self.log_operator("call_for_graph", 1, 1);
        Ok(output)
    }

    /// Runs the collection algorithm registered under `name`.
    ///
    /// # Errors
    ///
    /// See [`call_for_collection_with_cancel`](Self::call_for_collection_with_cancel).
    pub fn call_for_collection(
        &self,
        collection: &GraphCollection,
        name: &str,
        params: &Parameters,
    ) -> Result<GraphCollection> {
        self.call_for_collection_with_cancel(collection, name, params, &CancellationToken::new())
    }

    /// Runs the collection algorithm registered under `name`, observing
    /// `cancel`.
    ///
    /// The algorithm's output is validated before it is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownAlgorithm`] if nothing is registered under `name`
    /// - [`Error::InvalidArgument`] if `name` is a graph algorithm or
    ///   `params` do not match its declared parameters
    /// - [`Error::Cancelled`] if `cancel` fires before the result is returned
    /// - [`Error::AlgorithmFailure`] wrapping anything the algorithm raises
    /// - a structural error if the output breaks a collection invariant
    pub fn call_for_collection_with_cancel(
        &self,
        collection: &GraphCollection,
        name: &str,
        params: &Parameters,
        cancel: &CancellationToken,
    ) -> Result<GraphCollection> {
        let RegisteredAlgorithm::Collection(algorithm) = self.registry().get(name)? else {
            return Err(Error::invalid_argument(format!("'{name}' is a graph algorithm")));
        };
        let params = params.resolve(algorithm.parameters())?;
        cancel.check()?;

        let start = Instant::now();
        let ctx = AlgorithmContext::new(self.ids(), cancel);
        let output = algorithm
            .execute(collection, &params, &ctx)
            .map_err(|e| algorithm_error(name, e))?;
        cancel.check()?;
        output.validate()?;

        tracing::debug!(
            algorithm = name,
            elapsed = ?start.elapsed(),
            "collection algorithm finished"
        );
        self.log_operator("call_for_collection", collection.len(), output.len());
        Ok(output)
    }
}

/// Wraps an algorithm's error. Cancellation passes through unwrapped.
fn algorithm_error(name: &str, error: anyhow::Error) -> Error {
    match error.downcast::<Error>() {
        Ok(Error::Cancelled) => Error::Cancelled,
        Ok(other) => Error::AlgorithmFailure {
            algorithm: name.to_string(),
            source: other.into(),
        },
        Err(source) => {
            tracing::warn!(algorithm = name, error = %source, "algorithm failed");
            Error::AlgorithmFailure {
                algorithm: name.to_string(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::algebra::test_support::fixture;
    use crate::config::Config;
    use graphset_adapters::plugins::{AlgorithmRegistry, GraphAlgorithm};
    use graphset_common::types::Value;

    struct Failing;

    impl GraphAlgorithm for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn execute(
            &self,
            _graph: &LogicalGraph,
            _params: &Parameters,
            _ctx: &AlgorithmContext<'_>,
        ) -> anyhow::Result<LogicalGraph> {
            anyhow::bail!("disk on fire")
        }
    }

    /// Fires its own token and then polls it.
    struct SelfCancelling;

    impl GraphAlgorithm for SelfCancelling {
        fn name(&self) -> &str {
            "self_cancelling"
        }

        fn description(&self) -> &str {
            "Cancels itself"
        }

        fn execute(
            &self,
            graph: &LogicalGraph,
            _params: &Parameters,
            ctx: &AlgorithmContext<'_>,
        ) -> anyhow::Result<LogicalGraph> {
            ctx.cancel.cancel();
            ctx.check_cancelled()?;
            Ok(graph.clone())
        }
    }

    fn engine() -> Engine {
        let mut registry = AlgorithmRegistry::with_builtins();
        registry.register_graph(Arc::new(Failing)).unwrap();
        registry.register_graph(Arc::new(SelfCancelling)).unwrap();
        Engine::with_config(Config::sequential())
            .unwrap()
            .with_registry(Arc::new(registry))
    }

    #[test]
    fn test_call_for_graph() {
        let mut f = fixture();
        f.vertex("d", "Robot", &["g1"]).unwrap();
        let g1 = f.logical_graph_by_variable("g1").unwrap();

        let people = engine()
            .call_for_graph(
                &g1,
                "vertex_label_filter",
                &Parameters::new().with("label", "Person"),
            )
            .unwrap();
        assert_eq!(people.vertex_count(), 2);
        assert_eq!(people.edge_count(), 1);

        let largest = engine()
            .call_for_graph(&g1, "largest_component", &Parameters::new())
            .unwrap();
        assert_eq!(largest.vertex_count(), 2);
    }

    #[test]
    fn test_call_unknown_and_mismatched() {
        let f = fixture();
        let g1 = f.logical_graph_by_variable("g1").unwrap();
        let all = f.collection().unwrap();

        assert!(matches!(
            engine().call_for_graph(&g1, "pagerank", &Parameters::new()),
            Err(Error::UnknownAlgorithm(name)) if name == "pagerank"
        ));
        assert!(matches!(
            engine().call_for_graph(&g1, "split_components", &Parameters::new()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            engine().call_for_collection(&all, "largest_component", &Parameters::new()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_call_rejects_bad_parameters() {
        let g1 = fixture().logical_graph_by_variable("g1").unwrap();
        assert!(matches!(
            engine().call_for_graph(&g1, "vertex_label_filter", &Parameters::new()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            engine().call_for_graph(
                &g1,
                "vertex_label_filter",
                &Parameters::new().with("label", 3i64)
            ),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_call_wraps_failures() {
        let g1 = fixture().logical_graph_by_variable("g1").unwrap();
        let err = engine()
            .call_for_graph(&g1, "failing", &Parameters::new())
            .unwrap_err();
        match err {
            Error::AlgorithmFailure { algorithm, source } => {
                assert_eq!(algorithm, "failing");
                assert_eq!(source.to_string(), "disk on fire");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_call_cancellation() {
        let f = fixture();
        let g1 = f.logical_graph_by_variable("g1").unwrap();
        assert!(matches!(
            engine().call_for_graph(&g1, "self_cancelling", &Parameters::new()),
            Err(Error::Cancelled)
        ));

        let token = CancellationToken::new();
        token.cancel();
        let all = f.collection().unwrap();
        let before = all.clone();
        assert!(matches!(
            engine().call_for_collection_with_cancel(
                &all,
                "split_components",
                &Parameters::new(),
                &token
            ),
            Err(Error::Cancelled)
        ));
        assert_eq!(all, before);
    }

    #[test]
    fn test_call_for_collection() {
        let f = fixture();
        let pair = f.collection_by_variables(&["g1", "g4"]).unwrap();
        let split = engine()
            .call_for_collection(&pair, "split_components", &Parameters::new())
            .unwrap();
        // g1 is one component; g4 has none.
        assert_eq!(split.len(), 1);
        let head = split.heads().next().unwrap();
        assert_eq!(head.get_property("component"), Some(&Value::from(0i64)));
        assert!(split.head_ids().all(|id| !pair.contains_head(id)));
        split.validate().unwrap();
    }
}

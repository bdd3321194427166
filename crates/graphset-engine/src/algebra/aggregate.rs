//! Aggregation onto graph heads.

use graphset_common::types::{GraphId, Value};
use graphset_common::utils::error::Result;
use graphset_core::graph::model::{ElementRef, GraphCollection};
use graphset_core::AggregateFunction;

use crate::engine::Engine;

impl Engine {
    /// Computes each function over every graph and stores the result on the
    /// graph head under the function's result key.
    ///
    /// Existing properties with the same key are overwritten. Elements are
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DanglingEdge`](graphset_common::utils::error::Error::DanglingEdge)
    /// if a graph cannot be projected.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use graphset_core::aggregation::{MaxProperty, VertexCount};
    ///
    /// let out = engine.aggregate(&collection, &[&VertexCount, &MaxProperty::new("age")])?;
    /// // every head now carries `vertexCount` and `max_age`
    /// ```
    pub fn aggregate(
        &self,
        collection: &GraphCollection,
        functions: &[&dyn AggregateFunction],
    ) -> Result<GraphCollection> {
        let graphs = collection.graphs()?;
        let results: Vec<(GraphId, Vec<Value>)> = self.executor().map_each(&graphs, |g| {
            (g.id(), functions.iter().map(|f| f.aggregate(g)).collect())
        });
        let result = write_results(collection, functions, results)?;
        self.log_operator("aggregate", collection.len(), result.len());
        Ok(result)
    }

    /// Computes one function over every graph by grouping element
    /// contributions across the whole collection.
    ///
    /// Each (graph, element) pair is a separate item, so one graph's
    /// contributions may be folded on different workers and merged in any
    /// order. Graphs without elements get the function's identity.
    ///
    /// # Errors
    ///
    /// Returns [`DanglingEdge`](graphset_common::utils::error::Error::DanglingEdge)
    /// if a graph cannot be projected.
    pub fn aggregate_partitioned(
        &self,
        collection: &GraphCollection,
        function: &dyn AggregateFunction,
    ) -> Result<GraphCollection> {
        let graphs = collection.graphs()?;
        let items: Vec<(GraphId, ElementRef<'_>)> = graphs
            .iter()
            .flat_map(|g| g.elements().map(move |element| (g.id(), element)))
            .collect();

        let mut grouped = self.executor().group_by_and_aggregate(
            &items,
            |(gid, _)| *gid,
            |(_, element)| function.contribution(*element),
            || function.identity(),
            |left, right| function.combine(left, right),
        );

        let results: Vec<(GraphId, Vec<Value>)> = collection
            .head_ids()
            .map(|gid| {
                let value = grouped.remove(&gid).unwrap_or_else(|| function.identity());
                (gid, vec![value])
            })
            .collect();
        let result = write_results(collection, &[function], results)?;
        self.log_operator("aggregate_partitioned", collection.len(), result.len());
        Ok(result)
    }
}

fn write_results(
    collection: &GraphCollection,
    functions: &[&dyn AggregateFunction],
    results: Vec<(GraphId, Vec<Value>)>,
) -> Result<GraphCollection> {
    let mut results: graphset_common::utils::hash::FxHashMap<GraphId, Vec<Value>> =
        results.into_iter().collect();
    collection.map_heads(|head| {
        let mut head = head.clone();
        if let Some(values) = results.remove(&head.id) {
            for (function, value) in functions.iter().zip(values) {
                head.properties.insert(function.result_key(), value);
            }
        }
        head
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use graphset_adapters::fixture::FixtureBuilder;
    use graphset_core::aggregation::{
        CountProperty, EdgeCount, ElementScope, MaxProperty, SumProperty, VertexCount,
    };

    fn weighted() -> FixtureBuilder {
        let mut f = FixtureBuilder::new();
        f.graph("g1", "Community")
            .unwrap()
            .graph("g2", "Community")
            .unwrap()
            .graph("empty", "Community")
            .unwrap()
            .vertex_with("a", "Person", &[("age", Value::from(30i64))], &["g1", "g2"])
            .unwrap()
            .vertex_with("b", "Person", &[("age", Value::from(41i64))], &["g1"])
            .unwrap()
            .vertex("c", "Person", &["g2"])
            .unwrap()
            .edge_with("ab", "a", "b", "knows", &[("since", Value::from(2014i64))], &["g1"])
            .unwrap()
            .edge_with("ac", "a", "c", "knows", &[("since", Value::from(2020i64))], &["g2"])
            .unwrap();
        f
    }

    fn head_value(collection: &GraphCollection, f: &FixtureBuilder, var: &str, key: &str) -> Value {
        collection
            .head(f.graph_id(var).unwrap())
            .and_then(|h| h.get_property(key).cloned())
            .unwrap_or(Value::Null)
    }

    #[test]
    fn test_aggregate_writes_result_keys() {
        let f = weighted();
        let all = f.collection().unwrap();
        let engine = Engine::with_config(Config::sequential()).unwrap();
        let max_age = MaxProperty::new("age").with_scope(ElementScope::Vertices);
        let out = engine
            .aggregate(&all, &[&VertexCount, &EdgeCount, &max_age])
            .unwrap();

        assert_eq!(head_value(&out, &f, "g1", "vertexCount"), Value::from(2i64));
        assert_eq!(head_value(&out, &f, "g2", "edgeCount"), Value::from(1i64));
        assert_eq!(head_value(&out, &f, "g1", "max_age"), Value::from(41i64));
        assert_eq!(head_value(&out, &f, "g2", "max_age"), Value::from(30i64));
        assert_eq!(head_value(&out, &f, "empty", "vertexCount"), Value::from(0i64));
        assert_eq!(out.vertex_count(), all.vertex_count());
        // The input is untouched.
        assert!(all.heads().all(|h| h.properties.is_empty()));
    }

    #[test]
    fn test_aggregate_partitioned_matches_whole_graph() {
        let f = weighted();
        let all = f.collection().unwrap();
        let functions: Vec<Box<dyn AggregateFunction>> = vec![
            Box::new(VertexCount),
            Box::new(EdgeCount),
            Box::new(SumProperty::new("since")),
            Box::new(CountProperty::new("age")),
            Box::new(MaxProperty::new("age")),
        ];
        for threads in [1, 3] {
            let engine = Engine::with_config(Config::default().with_threads(threads)).unwrap();
            for function in &functions {
                let whole = engine.aggregate(&all, &[function.as_ref()]).unwrap();
                let partitioned = engine
                    .aggregate_partitioned(&all, function.as_ref())
                    .unwrap();
                for head in whole.heads() {
                    assert_eq!(
                        partitioned.head(head.id).map(|h| &h.properties),
                        Some(&head.properties),
                        "{} on {}",
                        function.result_key(),
                        head.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_aggregate_partitioned_sum_survives_overflowing_partials() {
        let mut f = FixtureBuilder::new();
        f.graph("g", "Ledger").unwrap();
        for (var, score) in [("a", i64::MAX), ("b", 1), ("c", -1), ("d", 1), ("e", -1)] {
            f.vertex_with(var, "Entry", &[("score", Value::from(score))], &["g"])
                .unwrap();
        }
        let all = f.collection().unwrap();
        let sum = SumProperty::new("score");
        for threads in [1, 2, 4] {
            let engine = Engine::with_config(Config::default().with_threads(threads)).unwrap();
            let whole = engine.aggregate(&all, &[&sum]).unwrap();
            let partitioned = engine.aggregate_partitioned(&all, &sum).unwrap();
            assert_eq!(head_value(&whole, &f, "g", "sum_score"), Value::from(i64::MAX));
            assert_eq!(
                head_value(&partitioned, &f, "g", "sum_score"),
                Value::from(i64::MAX)
            );
        }
    }

    #[test]
    fn test_aggregate_partitioned_identity_for_empty_graphs() {
        let f = weighted();
        let all = f.collection().unwrap();
        let engine = Engine::with_config(Config::sequential()).unwrap();
        let out = engine
            .aggregate_partitioned(&all, &SumProperty::new("since"))
            .unwrap();
        assert_eq!(head_value(&out, &f, "g1", "sum_since"), Value::from(2014i64));
        assert_eq!(
            head_value(&out, &f, "empty", "sum_since"),
            SumProperty::new("since").identity()
        );
    }
}

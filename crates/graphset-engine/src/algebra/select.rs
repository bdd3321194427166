//! Selection by predicate.

use graphset_common::utils::error::Result;
use graphset_core::graph::model::{GraphCollection, LogicalGraph};

use crate::engine::Engine;

impl Engine {
    /// Keeps the graphs whose projection satisfies `predicate`.
    ///
    /// Heads keep their order. Elements survive if at least one surviving
    /// graph contains them.
    ///
    /// # Errors
    ///
    /// Returns [`DanglingEdge`](graphset_common::utils::error::Error::DanglingEdge)
    /// if a graph cannot be projected.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let large = engine.select(&collection, |g| g.vertex_count() > 1)?;
    /// ```
    pub fn select<P>(&self, collection: &GraphCollection, predicate: P) -> Result<GraphCollection>
    where
        P: Fn(&LogicalGraph) -> bool + Sync + Send,
    {
        let graphs = collection.graphs()?;
        let kept = self.executor().filter_each(&graphs, predicate);
        let result = collection.restrict(kept.into_iter().map(LogicalGraph::id));
        self.log_operator("select", collection.len(), result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::test_support::fixture;
    use crate::config::Config;

    #[test]
    fn test_select_keeps_matching_graphs() {
        let f = fixture();
        let all = f.collection().unwrap();
        for threads in [1, 4] {
            let engine = Engine::with_config(Config::default().with_threads(threads)).unwrap();
            let non_empty = engine.select(&all, |g| !g.is_empty()).unwrap();
            let ids: Vec<_> = non_empty.head_ids().collect();
            let expected: Vec<_> = ["g1", "g2", "g3"]
                .iter()
                .map(|v| f.graph_id(v).unwrap())
                .collect();
            assert_eq!(ids, expected);
            assert_eq!(non_empty.vertex_count(), 5);
        }
    }

    #[test]
    fn test_select_drops_exclusive_elements() {
        let f = fixture();
        let pair = f.collection_by_variables(&["g1", "g2"]).unwrap();
        let engine = Engine::with_config(Config::sequential()).unwrap();
        let g2 = f.graph_id("g2").unwrap();

        let only_g2 = engine.select(&pair, |g| g.id() == g2).unwrap();
        assert_eq!(only_g2.len(), 1);
        assert!(only_g2.vertex(f.vertex_id("b").unwrap()).is_none());
        assert_eq!(only_g2.edge_count(), 1);
        only_g2.validate().unwrap();
    }

    #[test]
    fn test_select_everything_or_nothing() {
        let f = fixture();
        let pair = f.collection_by_variables(&["g1", "g2"]).unwrap();
        let engine = Engine::with_config(Config::sequential()).unwrap();
        assert_eq!(engine.select(&pair, |g| g.vertex_count() > 1).unwrap(), pair);
        assert!(engine.select(&pair, |_| false).unwrap().is_empty());
    }
}

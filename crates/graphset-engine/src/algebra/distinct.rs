//! Duplicate elimination by canonical label.

use graphset_common::types::GraphId;
use graphset_common::utils::error::Result;
use graphset_common::utils::hash::FxHashSet;
use graphset_core::graph::model::GraphCollection;

use crate::engine::Engine;

impl Engine {
    /// Keeps one graph per isomorphism class.
    ///
    /// Graphs are grouped by the canonical label of their projection; each
    /// group keeps the graph with the smallest identifier. Survivors keep
    /// their relative order. Elements of eliminated graphs lose that
    /// membership and are dropped when nothing else contains them.
    ///
    /// # Errors
    ///
    /// Returns [`DanglingEdge`](graphset_common::utils::error::Error::DanglingEdge)
    /// if a graph cannot be projected.
    pub fn distinct(&self, collection: &GraphCollection) -> Result<GraphCollection> {
        let graphs = collection.graphs()?;
        let labeler = self.labeler();
        let labeled = self
            .executor()
            .map_each(&graphs, |g| (labeler.label(g), g.id()));

        let representatives = self.executor().group_by_and_aggregate(
            &labeled,
            |(label, _)| label.clone(),
            |(_, id)| *id,
            || GraphId::NULL,
            std::cmp::min,
        );

        let representatives: FxHashSet<GraphId> = representatives.into_values().collect();
        let survivors: Vec<GraphId> = collection
            .head_ids()
            .filter(|id| representatives.contains(id))
            .collect();
        let result = collection.restrict(survivors);
        self.log_operator("distinct", collection.len(), result.len());
        Ok(result)
    }
}

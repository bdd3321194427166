//! Label filtering.

use graphset_core::graph::model::LogicalGraph;

use crate::plugins::parameters::{ParameterDef, ParameterType, Parameters};
use crate::plugins::traits::{AlgorithmContext, GraphAlgorithm};

/// Keeps the vertices with a given label and the edges between them.
#[derive(Debug, Clone)]
pub struct VertexLabelFilter {
    params: Vec<ParameterDef>,
}

impl VertexLabelFilter {
    /// Creates the algorithm.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: vec![ParameterDef::required(
                "label",
                ParameterType::String,
                "Vertex label to keep",
            )],
        }
    }
}

impl Default for VertexLabelFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphAlgorithm for VertexLabelFilter {
    fn name(&self) -> &str {
        "vertex_label_filter"
    }

    fn description(&self) -> &str {
        "Keeps vertices with the given label"
    }

    fn parameters(&self) -> &[ParameterDef] {
        &self.params
    }

    fn execute(
        &self,
        graph: &LogicalGraph,
        params: &Parameters,
        ctx: &AlgorithmContext<'_>,
    ) -> anyhow::Result<LogicalGraph> {
        ctx.check_cancelled()?;
        let label = params
            .get_str("label")
            .ok_or_else(|| anyhow::anyhow!("parameter 'label' is required"))?;
        Ok(graph.clone().retain_vertices(|v| v.has_label(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::traits::CancellationToken;
    use graphset_common::types::{EdgeId, GraphId, IdGenerator, VertexId};
    use graphset_core::graph::model::{Edge, GraphHead, Vertex};

    #[test]
    fn test_keeps_matching_vertices() {
        let graph = LogicalGraph::new(
            GraphHead::new(GraphId::new(1), "G"),
            [
                Vertex::new(VertexId::new(0), "Person"),
                Vertex::new(VertexId::new(1), "Person"),
                Vertex::new(VertexId::new(2), "Tag"),
            ],
            [
                Edge::new(EdgeId::new(0), VertexId::new(0), VertexId::new(1), "knows"),
                Edge::new(EdgeId::new(1), VertexId::new(0), VertexId::new(2), "likes"),
            ],
        )
        .unwrap();

        let ids = IdGenerator::default();
        let cancel = CancellationToken::new();
        let ctx = AlgorithmContext::new(&ids, &cancel);
        let params = Parameters::new().with("label", "Person");

        let people = VertexLabelFilter::new()
            .execute(&graph, &params, &ctx)
            .unwrap();
        assert_eq!(people.vertex_count(), 2);
        assert_eq!(people.edge_count(), 1);

        let missing = VertexLabelFilter::new().execute(&graph, &Parameters::new(), &ctx);
        assert!(missing.is_err());
    }
}

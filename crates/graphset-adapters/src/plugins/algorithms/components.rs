//! Weakly connected components.

use std::collections::BTreeMap;

use graphset_common::types::{GraphId, Value, VertexId};
use graphset_common::utils::hash::FxHashMap;
use graphset_core::graph::model::{GraphCollection, LogicalGraph};

use crate::plugins::parameters::Parameters;
use crate::plugins::traits::{AlgorithmContext, CollectionAlgorithm, GraphAlgorithm};

/// Disjoint sets with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the representative of `x`'s set.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns false if they were already
    /// one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Returns the weakly connected components of a graph.
///
/// Each component lists its vertices in ascending order; components are
/// ordered by their smallest vertex.
#[must_use]
pub fn weakly_connected_components(graph: &LogicalGraph) -> Vec<Vec<VertexId>> {
    let ids: Vec<VertexId> = graph.vertices().map(|v| v.id).collect();
    let index: FxHashMap<VertexId, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

    let mut sets = UnionFind::new(ids.len());
    for edge in graph.edges() {
        if let (Some(&s), Some(&t)) = (index.get(&edge.source_id), index.get(&edge.target_id)) {
            sets.union(s, t);
        }
    }

    // Vertices are visited in ascending order, so both the members and the
    // components come out sorted.
    let mut by_root: BTreeMap<usize, usize> = BTreeMap::new();
    let mut components: Vec<Vec<VertexId>> = Vec::new();
    for (i, id) in ids.iter().enumerate() {
        let root = sets.find(i);
        let slot = *by_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(*id);
    }
    components
}

fn keep_component(graph: &LogicalGraph, component: &[VertexId]) -> LogicalGraph {
    graph
        .clone()
        .retain_vertices(|v| component.binary_search(&v.id).is_ok())
}

/// Keeps the largest weakly connected component of a graph.
///
/// Ties go to the component with the smallest vertex. The graph head is
/// kept as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestComponent;

impl GraphAlgorithm for LargestComponent {
    fn name(&self) -> &str {
        "largest_component"
    }

    fn description(&self) -> &str {
        "Keeps the largest weakly connected component"
    }

    fn execute(
        &self,
        graph: &LogicalGraph,
        _params: &Parameters,
        ctx: &AlgorithmContext<'_>,
    ) -> anyhow::Result<LogicalGraph> {
        ctx.check_cancelled()?;
        let components = weakly_connected_components(graph);
        let mut largest: Option<&Vec<VertexId>> = None;
        for component in &components {
            if largest.is_none_or(|l| component.len() > l.len()) {
                largest = Some(component);
            }
        }
        Ok(match largest {
            Some(component) => keep_component(graph, component),
            None => graph.clone(),
        })
    }
}

/// Splits every graph of a collection into one graph per weakly connected
/// component.
///
/// New graphs get fresh identifiers, copy the source head's label and
/// properties, and record their position among the source graph's
/// components under `component`. Graphs without vertices produce nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitComponents;

impl CollectionAlgorithm for SplitComponents {
    fn name(&self) -> &str {
        "split_components"
    }

    fn description(&self) -> &str {
        "Splits each graph into its weakly connected components"
    }

    fn execute(
        &self,
        collection: &GraphCollection,
        _params: &Parameters,
        ctx: &AlgorithmContext<'_>,
    ) -> anyhow::Result<GraphCollection> {
        let floor = collection.max_graph_id().unwrap_or(GraphId::new(0));
        let mut parts = Vec::new();
        for graph in collection.graphs()? {
            ctx.check_cancelled()?;
            for (position, component) in weakly_connected_components(&graph).iter().enumerate() {
                let head = graph
                    .head()
                    .with_id(ctx.next_graph_id(floor)?)
                    .with_property("component", Value::from(position));
                parts.push(keep_component(&graph, component).with_head(head));
            }
        }
        tracing::debug!(
            graphs = collection.len(),
            components = parts.len(),
            "split collection into components"
        );
        Ok(GraphCollection::from_graphs(parts)?)
    }
}

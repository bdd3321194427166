//! Identifier-based set operators.

use std::collections::BTreeMap;
use std::sync::Arc;

use graphset_common::types::{EntityRef, GraphIdSet};
use graphset_common::utils::error::{Error, Result};
use graphset_core::graph::model::{Edge, GraphCollection, Vertex};
use indexmap::IndexMap;

use crate::engine::Engine;

/// Records that carry a membership set.
trait Member: Sized {
    fn entity(&self) -> EntityRef;
    fn same_content(&self, other: &Self) -> bool;
    fn members(&self) -> &GraphIdSet;
    fn with_members(&self, graph_ids: GraphIdSet) -> Self;
}

impl Member for Vertex {
    fn entity(&self) -> EntityRef {
        EntityRef::Vertex(self.id)
    }
    fn same_content(&self, other: &Self) -> bool {
        Vertex::same_content(self, other)
    }
    fn members(&self) -> &GraphIdSet {
        &self.graph_ids
    }
    fn with_members(&self, graph_ids: GraphIdSet) -> Self {
        self.with_membership(graph_ids)
    }
}

impl Member for Edge {
    fn entity(&self) -> EntityRef {
        EntityRef::Edge(self.id)
    }
    fn same_content(&self, other: &Self) -> bool {
        Edge::same_content(self, other)
    }
    fn members(&self) -> &GraphIdSet {
        &self.graph_ids
    }
    fn with_members(&self, graph_ids: GraphIdSet) -> Self {
        self.with_membership(graph_ids)
    }
}

/// Merges the records that share an identifier across two inputs.
///
/// Records present on both sides must agree on everything but membership;
/// memberships are unioned.
fn merge_pair<T: Member>(left: Option<&Arc<T>>, right: Option<&Arc<T>>) -> Result<Option<Arc<T>>> {
    match (left, right) {
        (Some(l), Some(r)) => {
            if !l.same_content(r) {
                return Err(Error::InconsistentMerge(l.entity()));
            }
            let merged = l.members().union(r.members());
            if &merged == l.members() {
                Ok(Some(Arc::clone(l)))
            } else {
                Ok(Some(Arc::new(l.with_members(merged))))
            }
        }
        (Some(only), None) | (None, Some(only)) => Ok(Some(Arc::clone(only))),
        (None, None) => Ok(None),
    }
}

/// Merges two keyed element sets with the executor's co-group.
fn merge_elements<K, T>(
    engine: &Engine,
    left: &[&Arc<T>],
    right: &[&Arc<T>],
    key: impl Fn(&T) -> K + Sync + Send + Copy,
) -> Result<BTreeMap<K, Arc<T>>>
where
    K: Ord + Send,
    T: Member + Send + Sync,
{
    let mut merged = BTreeMap::new();
    for (id, l, r) in engine
        .executor()
        .co_group_by_key(
            left,
            right,
            |e: &&Arc<T>| key(&***e),
            |e: &&Arc<T>| key(&***e),
        )
    {
        if let Some(element) = merge_pair(l.first().map(|e| **e), r.first().map(|e| **e))? {
            merged.insert(id, element);
        }
    }
    Ok(merged)
}

impl Engine {
    /// Returns the graphs of `a` and `b`.
    ///
    /// Heads keep the order of `a`, followed by the heads only `b` has.
    /// Vertices and edges present in both inputs belong to every graph they
    /// belong to in either.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentMerge`] if a head, vertex or edge
    /// identifier appears in both inputs with different content.
    pub fn union(&self, a: &GraphCollection, b: &GraphCollection) -> Result<GraphCollection> {
        let mut heads = IndexMap::with_capacity(a.len() + b.len());
        for head in a.heads().chain(b.heads()) {
            match heads.get(&head.id) {
                Some(existing) if existing != head => {
                    return Err(Error::InconsistentMerge(EntityRef::GraphHead(head.id)));
                }
                Some(_) => {}
                None => {
                    heads.insert(head.id, Arc::clone(head));
                }
            }
        }

        let left: Vec<&Arc<Vertex>> = a.vertices().collect();
        let right: Vec<&Arc<Vertex>> = b.vertices().collect();
        let vertices = merge_elements(self, &left, &right, |v: &Vertex| v.id)?;

        let left: Vec<&Arc<Edge>> = a.edges().collect();
        let right: Vec<&Arc<Edge>> = b.edges().collect();
        let edges = merge_elements(self, &left, &right, |e: &Edge| e.id)?;

        let result = GraphCollection::from_shared(heads, vertices, edges)?;
        self.log_operator("union", a.len() + b.len(), result.len());
        Ok(result)
    }

    /// Returns the graphs whose identifier is in both `a` and `b`, in the
    /// order of `a`.
    ///
    /// Memberships come from both inputs, restricted to the kept graphs.
    /// Elements of dropped graphs are never compared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentMerge`] if a kept graph, or an element of
    /// one, appears in both inputs with different content.
    pub fn intersect(&self, a: &GraphCollection, b: &GraphCollection) -> Result<GraphCollection> {
        let keep: Vec<_> = a.head_ids().filter(|id| b.contains_head(*id)).collect();
        let result = self.union(&a.restrict(keep.clone()), &b.restrict(keep))?;
        self.log_operator("intersect", a.len() + b.len(), result.len());
        Ok(result)
    }

    /// Returns the graphs of `a` whose identifier is not in `b`.
    ///
    /// Only identifiers are compared; the content of `b` is not read.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other set operators.
    pub fn difference(&self, a: &GraphCollection, b: &GraphCollection) -> Result<GraphCollection> {
        let keep: Vec<_> = a.head_ids().filter(|id| !b.contains_head(*id)).collect();
        let result = a.restrict(keep);
        self.log_operator("difference", a.len() + b.len(), result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::test_support::fixture;
    use crate::config::Config;
    use graphset_common::types::{GraphId, VertexId};
    use graphset_core::graph::model::GraphHead;

    fn engine() -> Engine {
        Engine::with_config(Config::sequential()).unwrap()
    }

    #[test]
    fn test_union_merges_membership() {
        let f = fixture();
        let a = f.collection_by_variables(&["g1"]).unwrap();
        let b = f.collection_by_variables(&["g2"]).unwrap();

        let union = engine().union(&a, &b).unwrap();
        assert_eq!(union.len(), 2);
        assert_eq!(union.vertex_count(), 3);
        assert_eq!(union.edge_count(), 2);
        let shared = union.vertex(f.vertex_id("a").unwrap()).unwrap();
        assert_eq!(
            shared.graph_ids,
            GraphIdSet::from([f.graph_id("g1").unwrap(), f.graph_id("g2").unwrap()])
        );
        union.validate().unwrap();
    }

    #[test]
    fn test_union_keeps_order_of_first_input() {
        let f = fixture();
        let a = f.collection_by_variables(&["g2", "g1"]).unwrap();
        let b = f.collection_by_variables(&["g3", "g1"]).unwrap();
        let union = engine().union(&a, &b).unwrap();
        let order: Vec<_> = union.head_ids().collect();
        let expected: Vec<_> = ["g2", "g1", "g3"]
            .iter()
            .map(|v| f.graph_id(v).unwrap())
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_union_detects_conflicts() {
        let g = GraphId::new(1);
        let a = GraphCollection::new(
            [GraphHead::new(g, "G")],
            [Vertex::new(VertexId::new(0), "A").with_graphs([g])],
            [],
        )
        .unwrap();
        let b = GraphCollection::new(
            [GraphHead::new(g, "G")],
            [Vertex::new(VertexId::new(0), "B").with_graphs([g])],
            [],
        )
        .unwrap();
        assert!(matches!(
            engine().union(&a, &b),
            Err(Error::InconsistentMerge(EntityRef::Vertex(_)))
        ));

        let c = GraphCollection::new([GraphHead::new(g, "Other")], [], []).unwrap();
        assert!(matches!(
            engine().union(&a, &c),
            Err(Error::InconsistentMerge(EntityRef::GraphHead(_)))
        ));
    }

    #[test]
    fn test_intersect() {
        let f = fixture();
        let a = f.collection_by_variables(&["g1", "g2"]).unwrap();
        let b = f.collection_by_variables(&["g2", "g3"]).unwrap();

        let both = engine().intersect(&a, &b).unwrap();
        assert_eq!(both.head_ids().collect::<Vec<_>>(), vec![f.graph_id("g2").unwrap()]);
        assert_eq!(both.vertex_count(), 2);
        assert_eq!(both.edge_count(), 1);
        assert_eq!(
            both.vertex(f.vertex_id("a").unwrap()).unwrap().graph_ids,
            GraphIdSet::single(f.graph_id("g2").unwrap())
        );
        assert_eq!(both, engine().intersect(&b, &a).unwrap());
    }

    #[test]
    fn test_intersect_ignores_conflicts_in_dropped_graphs() {
        let (g1, g2) = (GraphId::new(1), GraphId::new(2));
        let a = GraphCollection::new(
            [GraphHead::new(g1, "G")],
            [Vertex::new(VertexId::new(0), "A").with_graphs([g1])],
            [],
        )
        .unwrap();
        let b = GraphCollection::new(
            [GraphHead::new(g2, "G")],
            [Vertex::new(VertexId::new(0), "B").with_graphs([g2])],
            [],
        )
        .unwrap();

        let none = engine().intersect(&a, &b).unwrap();
        assert!(none.is_empty());
        assert_eq!(none.vertex_count(), 0);
        assert_eq!(engine().difference(&a, &b).unwrap(), a);

        // The same vertex in a shared graph still has to agree.
        let a2 = GraphCollection::new(
            [GraphHead::new(g1, "G"), GraphHead::new(g2, "G")],
            [Vertex::new(VertexId::new(0), "A").with_graphs([g1, g2])],
            [],
        )
        .unwrap();
        assert!(matches!(
            engine().intersect(&a2, &b),
            Err(Error::InconsistentMerge(EntityRef::Vertex(_)))
        ));
    }

    #[test]
    fn test_difference() {
        let f = fixture();
        let a = f.collection_by_variables(&["g1", "g2"]).unwrap();
        let b = f.collection_by_variables(&["g2", "g3"]).unwrap();

        let only_a = engine().difference(&a, &b).unwrap();
        assert_eq!(only_a.head_ids().collect::<Vec<_>>(), vec![f.graph_id("g1").unwrap()]);
        assert_eq!(only_a.vertex_count(), 2);
        assert!(only_a.vertex(f.vertex_id("c").unwrap()).is_none());

        let only_b = engine().difference(&b, &a).unwrap();
        assert!(only_a.head_ids().all(|id| !only_b.contains_head(id)));
    }
}

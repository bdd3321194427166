//! Property tests for the collection algebra.

use graphset_common::types::{EdgeId, GraphId, GraphIdSet, VertexId};
use graphset_common::utils::hash::FxHashSet;
use graphset_core::graph::model::{Edge, GraphCollection, GraphHead, Vertex};
use graphset_core::CanonicalLabeler;
use graphset_engine::{Config, Engine, SortOrder};
use proptest::prelude::*;

const MAX_GRAPHS: usize = 6;
const MAX_VERTICES: usize = 10;
const MAX_EDGES: usize = 14;
const LABELS: [&str; 2] = ["Person", "Tag"];

fn members(mask: u8, graphs: usize) -> Vec<GraphId> {
    (0..graphs)
        .filter(|g| mask & (1 << g) != 0)
        .map(|g| GraphId::new(g as u64))
        .collect()
}

/// A collection whose graphs share vertices and edges at random.
fn collection_strategy() -> impl Strategy<Value = GraphCollection> {
    (1usize..=MAX_GRAPHS, 0usize..=MAX_VERTICES).prop_flat_map(|(graphs, vertices)| {
        let max_mask = (1u8 << graphs) - 1;
        (
            Just(graphs),
            prop::collection::vec((0..LABELS.len(), 0..=max_mask), vertices),
            prop::collection::vec(
                (0..vertices.max(1), 0..vertices.max(1), 0..=max_mask),
                if vertices == 0 { 0..=0 } else { 0..=MAX_EDGES },
            ),
            prop::collection::vec(prop::option::of(0i64..4), graphs),
        )
            .prop_map(|(graphs, vertex_specs, edge_specs, ranks)| {
                let heads = ranks.iter().enumerate().map(|(g, rank)| {
                    let head = GraphHead::new(GraphId::new(g as u64), "G");
                    match rank {
                        Some(rank) => head.with_property("rank", *rank),
                        None => head,
                    }
                });
                let vertex_masks: Vec<u8> = vertex_specs.iter().map(|(_, mask)| *mask).collect();
                let vertices = vertex_specs.iter().enumerate().map(|(i, (label, mask))| {
                    Vertex::new(VertexId::new(i as u64), LABELS[*label])
                        .with_graphs(members(*mask, graphs))
                });
                // An edge only joins graphs that contain both endpoints.
                let edges = edge_specs
                    .iter()
                    .enumerate()
                    .map(|(i, (s, t, mask))| {
                        let mask = mask & vertex_masks[*s] & vertex_masks[*t];
                        Edge::new(
                            EdgeId::new(i as u64),
                            VertexId::new(*s as u64),
                            VertexId::new(*t as u64),
                            "knows",
                        )
                        .with_graphs(members(mask, graphs))
                    })
                    .collect::<Vec<_>>();
                GraphCollection::new(heads, vertices, edges).unwrap()
            })
    })
}

/// Two sub-collections of one random collection.
fn pair_strategy() -> impl Strategy<Value = (GraphCollection, GraphCollection)> {
    (collection_strategy(), any::<u8>(), any::<u8>()).prop_map(|(all, a, b)| {
        let pick = |mask: u8| {
            let ids: Vec<GraphId> = all
                .head_ids()
                .filter(|id| mask & (1 << id.as_u64()) != 0)
                .collect();
            all.restrict(ids)
        };
        (pick(a), pick(b))
    })
}

fn head_set(collection: &GraphCollection) -> FxHashSet<GraphId> {
    collection.head_ids().collect()
}

fn engine() -> Engine {
    Engine::with_config(Config::sequential()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn union_has_both_head_sets_and_merged_membership((a, b) in pair_strategy()) {
        let union = engine().union(&a, &b).unwrap();
        let expected: FxHashSet<GraphId> = head_set(&a).union(&head_set(&b)).copied().collect();
        prop_assert_eq!(head_set(&union), expected);

        for vertex in union.vertices() {
            let mut membership = GraphIdSet::new();
            for side in [&a, &b] {
                if let Some(v) = side.vertex(vertex.id) {
                    membership = membership.union(&v.graph_ids);
                }
            }
            prop_assert_eq!(&vertex.graph_ids, &membership);
        }
        prop_assert_eq!(
            union.vertex_count(),
            a.vertices().chain(b.vertices()).map(|v| v.id).collect::<FxHashSet<_>>().len()
        );
        prop_assert!(union.validate().is_ok());
    }

    #[test]
    fn intersect_is_commutative((a, b) in pair_strategy()) {
        let ab = engine().intersect(&a, &b).unwrap();
        let ba = engine().intersect(&b, &a).unwrap();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn differences_are_disjoint((a, b) in pair_strategy()) {
        let ab = engine().difference(&a, &b).unwrap();
        let ba = engine().difference(&b, &a).unwrap();
        prop_assert!(head_set(&ab).is_disjoint(&head_set(&ba)));
        prop_assert!(ab.validate().is_ok());
    }

    #[test]
    fn distinct_is_idempotent_with_unique_labels(all in collection_strategy()) {
        let engine = engine();
        let once = engine.distinct(&all).unwrap();
        prop_assert_eq!(&engine.distinct(&once).unwrap(), &once);

        let labels: Vec<String> = once
            .graphs()
            .unwrap()
            .iter()
            .map(|g| engine.labeler().label(g))
            .collect();
        let unique: FxHashSet<&String> = labels.iter().collect();
        prop_assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn distinct_does_not_depend_on_threads(all in collection_strategy()) {
        let parallel = Engine::with_config(Config::default().with_threads(3)).unwrap();
        prop_assert_eq!(parallel.distinct(&all).unwrap(), engine().distinct(&all).unwrap());
    }

    #[test]
    fn top_of_top_is_top(all in collection_strategy(), n in 0i64..8, m in 0i64..8) {
        let (m, n) = (m.min(n), m.max(n));
        let engine = engine();
        let sorted = engine.sort_by(&all, "rank", SortOrder::Descending).unwrap();
        let nested = engine.top(&engine.top(&sorted, n).unwrap(), m).unwrap();
        let direct = engine.top(&sorted, m).unwrap();
        prop_assert_eq!(
            nested.head_ids().collect::<Vec<_>>(),
            direct.head_ids().collect::<Vec<_>>()
        );
        prop_assert_eq!(nested, direct);
    }

    #[test]
    fn reduce_of_single_graph_is_identity(all in collection_strategy()) {
        let first = all.head_ids().next().unwrap();
        let single = all.restrict([first]);
        let reduced = engine().reduce(&single, |a, _| Ok(a)).unwrap();
        prop_assert_eq!(reduced, single.graph(first).unwrap());
    }
}

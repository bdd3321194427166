//! A full pass over the algebra on a small social network.

use graphset_adapters::fixture::FixtureBuilder;
use graphset_adapters::plugins::Parameters;
use graphset_common::types::{GraphIdSet, Value};
use graphset_core::aggregation::{MaxProperty, VertexCount};
use graphset_engine::{Config, Engine, SortOrder};

/// G1 = {a -> b} and G2 = {a -> c} share `a`. G3 is a copy of G1 built
/// from different vertices and edges. G_empty has no elements.
fn network() -> FixtureBuilder {
    let mut f = FixtureBuilder::new();
    f.graph("G1", "Community")
        .unwrap()
        .graph("G2", "Community")
        .unwrap()
        .graph("G3", "Community")
        .unwrap()
        .graph("G_empty", "Community")
        .unwrap()
        .vertex_with("a", "Person", &[("age", Value::from(30i64))], &["G1", "G2"])
        .unwrap()
        .vertex_with("b", "Person", &[("age", Value::from(25i64))], &["G1"])
        .unwrap()
        .vertex_with("c", "Person", &[("age", Value::from(25i64))], &["G2"])
        .unwrap()
        .vertex_with("x", "Person", &[("age", Value::from(30i64))], &["G3"])
        .unwrap()
        .vertex_with("y", "Person", &[("age", Value::from(25i64))], &["G3"])
        .unwrap()
        .edge("ab", "a", "b", "knows", &["G1"])
        .unwrap()
        .edge("ac", "a", "c", "knows", &["G2"])
        .unwrap()
        .edge("xy", "x", "y", "knows", &["G3"])
        .unwrap();
    f
}

fn engines() -> Vec<Engine> {
    vec![
        Engine::with_config(Config::sequential()).unwrap(),
        Engine::with_config(Config::default().with_threads(4)).unwrap(),
    ]
}

#[test]
fn union_shares_vertex_between_graphs() {
    let f = network();
    let g1 = f.collection_by_variables(&["G1"]).unwrap();
    let g2 = f.collection_by_variables(&["G2"]).unwrap();
    for engine in engines() {
        let union = engine.union(&g1, &g2).unwrap();
        assert_eq!(union.len(), 2);
        assert_eq!(union.vertex_count(), 3);
        assert_eq!(union.edge_count(), 2);
        assert_eq!(
            union.vertex(f.vertex_id("a").unwrap()).unwrap().graph_ids,
            GraphIdSet::from([f.graph_id("G1").unwrap(), f.graph_id("G2").unwrap()])
        );
    }
}

#[test]
fn distinct_collapses_isomorphic_copy() {
    let f = network();
    let g1_g3 = f.collection_by_variables(&["G1", "G3"]).unwrap();
    for engine in engines() {
        let unique = engine.distinct(&g1_g3).unwrap();
        assert_eq!(unique.len(), 1);
        assert!(unique.contains_head(f.graph_id("G1").unwrap()));
    }
}

#[test]
fn select_keeps_graphs_with_more_than_one_vertex() {
    let f = network();
    let pair = f.collection_by_variables(&["G1", "G2"]).unwrap();
    for engine in engines() {
        let selected = engine.select(&pair, |g| g.vertex_count() > 1).unwrap();
        assert_eq!(selected, pair);
    }
}

#[test]
fn top_by_vertex_count_descending() {
    let f = network();
    let input = f.collection_by_variables(&["G_empty", "G1"]).unwrap();
    for engine in engines() {
        let sorted = engine
            .sort_by_aggregate(&input, &VertexCount, SortOrder::Descending)
            .unwrap();
        let top = engine.top(&sorted, 1).unwrap();
        assert_eq!(
            top.head_ids().collect::<Vec<_>>(),
            vec![f.graph_id("G1").unwrap()]
        );
    }
}

#[test]
fn pipeline_with_aggregation_and_algorithms() {
    let f = network();
    let all = f.collection().unwrap();
    let engine = Engine::with_config(Config::sequential()).unwrap();

    let unique = engine.distinct(&all).unwrap();
    // G1, G2 and G3 are isomorphic, G_empty stands alone.
    assert_eq!(unique.len(), 2);

    let max_age = MaxProperty::new("age");
    let annotated = engine.aggregate(&unique, &[&VertexCount, &max_age]).unwrap();
    let ranked = engine
        .top_by(&annotated, "vertexCount", SortOrder::Descending, 1)
        .unwrap();
    let head = ranked.heads().next().unwrap();
    assert_eq!(head.id, f.graph_id("G1").unwrap());
    assert_eq!(head.get_property("max_age"), Some(&Value::from(30i64)));

    let split = engine
        .call_for_collection(&ranked, "split_components", &Parameters::new())
        .unwrap();
    assert_eq!(split.len(), 1);
    assert_eq!(split.vertex_count(), 2);

    let g1 = f.logical_graph_by_variable("G1").unwrap();
    let filtered = engine
        .call_for_graph(&g1, "vertex_label_filter", &Parameters::new().with("label", "Tag"))
        .unwrap();
    assert!(filtered.is_empty());

    // Write the result back and read it from the store.
    f.store().insert_collection(&split).unwrap();
    let new_id = split.head_ids().next().unwrap();
    assert_eq!(f.store().project(new_id).unwrap().vertex_count(), 2);
}

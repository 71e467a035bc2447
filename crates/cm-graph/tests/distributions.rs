use std::collections::BTreeMap;

use cm_core::errors::{codes, CmError};
use cm_core::rng::RngHandle;
use cm_core::{Graph, VertexId};
use cm_graph::{
    build, degree_distribution, degree_distribution_tail, friend_degree_distribution,
    friend_degree_distribution_tail, power_law_sequence, size_biased_degree_distribution,
    size_biased_degree_distribution_tail, DegreeSequence, MultiGraph, Pmf, TailDistribution,
    NORMALIZATION_TOLERANCE,
};
use proptest::prelude::*;

fn star(leaves: u64) -> MultiGraph {
    let mut graph = MultiGraph::with_vertices(leaves as usize + 1);
    for leaf in 1..=leaves {
        graph
            .add_edge(VertexId::from_raw(0), VertexId::from_raw(leaf))
            .unwrap();
    }
    graph
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn star_degree_distribution_and_tail() {
    let graph = star(3);
    let pmf = degree_distribution(&graph).unwrap();
    assert!(close(pmf.probability(1), 0.75));
    assert!(close(pmf.probability(3), 0.25));
    assert_eq!(pmf.support().collect::<Vec<_>>(), vec![1, 3]);
    assert!(close(pmf.mean(), 1.5));

    let tail = degree_distribution_tail(&graph).unwrap();
    assert!(close(tail.at(1).unwrap(), 1.0));
    assert!(close(tail.at(3).unwrap(), 0.25));
}

#[test]
fn star_size_biased_weights_by_degree() {
    let graph = star(3);
    let pmf = size_biased_degree_distribution(&graph).unwrap();
    assert!(close(pmf.probability(1), 0.5));
    assert!(close(pmf.probability(3), 0.5));

    let tail = size_biased_degree_distribution_tail(&graph).unwrap();
    assert!(close(tail.at(3).unwrap(), 0.5));
}

#[test]
fn star_friend_distribution_differs_from_size_biased() {
    // Each leaf only sees the hub; the hub sees three leaves.
    let graph = star(3);
    let pmf = friend_degree_distribution(&graph).unwrap();
    assert!(close(pmf.probability(3), 0.75));
    assert!(close(pmf.probability(1), 0.25));

    let tail = friend_degree_distribution_tail(&graph).unwrap();
    assert!(close(tail.at(1).unwrap(), 1.0));
    assert!(close(tail.at(3).unwrap(), 0.75));
}

#[test]
fn self_loops_count_twice_in_degree() {
    let mut graph = MultiGraph::with_vertices(2);
    let a = VertexId::from_raw(0);
    let b = VertexId::from_raw(1);
    graph.add_edge(a, a).unwrap();
    graph.add_edge(a, b).unwrap();
    graph.add_edge(b, b).unwrap();
    graph.add_edge(b, b).unwrap();

    let pmf = degree_distribution(&graph).unwrap();
    assert!(close(pmf.probability(3), 0.5));
    assert!(close(pmf.probability(5), 0.5));

    // a: slots [a, a, b] -> 2/3 on degree 3, 1/3 on degree 5.
    // b: slots [a, b, b, b, b] -> 1/5 on degree 3, 4/5 on degree 5.
    let friend = friend_degree_distribution(&graph).unwrap();
    assert!(close(friend.probability(3), (2.0 / 3.0 + 1.0 / 5.0) / 2.0));
    assert!(close(friend.probability(5), (1.0 / 3.0 + 4.0 / 5.0) / 2.0));
}

#[test]
fn isolated_vertices_are_skipped_by_friend_distribution() {
    let mut graph = star(2);
    graph.add_vertex().unwrap();
    let friend = friend_degree_distribution(&graph).unwrap();
    assert!(close(friend.total_mass(), 1.0));
    assert!(close(friend.probability(2), 2.0 / 3.0));

    let plain = degree_distribution(&graph).unwrap();
    assert!(close(plain.probability(0), 0.25));
}

#[test]
fn empty_graph_has_no_degree_statistics() {
    let graph = MultiGraph::new();
    let err = degree_distribution(&graph).unwrap_err();
    assert_eq!(err.code(), codes::EMPTY_GRAPH);
    assert!(friend_degree_distribution(&graph).is_err());
}

#[test]
fn unnormalized_masses_are_a_distribution_error() {
    let err = Pmf::from_masses(BTreeMap::from([(1, 0.4), (2, 0.4)])).unwrap_err();
    match err {
        CmError::Distribution(info) => {
            assert_eq!(info.code, codes::NORMALIZATION);
            assert!(info.context.contains_key("total"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let err = Pmf::from_masses(BTreeMap::from([(1, 1.5), (2, -0.5)])).unwrap_err();
    assert_eq!(err.code(), codes::NORMALIZATION);

    assert!(Pmf::from_masses(BTreeMap::from([(1, 0.9995)])).is_ok());
}

#[test]
fn power_law_graph_distributions_normalize() {
    let sequence = power_law_sequence(1001, 3.5).unwrap();
    let outcome = build(sequence, &mut RngHandle::from_seed(6)).unwrap();
    for pmf in [
        degree_distribution(&outcome.graph).unwrap(),
        size_biased_degree_distribution(&outcome.graph).unwrap(),
        friend_degree_distribution(&outcome.graph).unwrap(),
    ] {
        assert!((pmf.total_mass() - 1.0).abs() <= NORMALIZATION_TOLERANCE);
        let tail = pmf.tail();
        let first = *tail.values().values().next().unwrap();
        assert!(close(first, 1.0) || (first - 1.0).abs() <= NORMALIZATION_TOLERANCE);
        let survival: Vec<f64> = tail.values().values().copied().collect();
        assert!(survival.windows(2).all(|pair| pair[0] >= pair[1]));
    }
    let max_degree = *outcome.assigned.iter().max().unwrap();
    assert_eq!(
        degree_distribution(&outcome.graph).unwrap().support().last(),
        Some(max_degree)
    );
}

proptest! {
    #[test]
    fn every_distribution_sums_to_one(
        seed in any::<u64>(),
        mut degrees in prop::collection::vec(1usize..10, 1..50),
    ) {
        if degrees.iter().sum::<usize>() % 2 != 0 {
            degrees[0] += 1;
        }
        let outcome = build(DegreeSequence::new(degrees).unwrap(), &mut RngHandle::from_seed(seed)).unwrap();
        let graph = &outcome.graph;
        for pmf in [
            degree_distribution(graph).unwrap(),
            size_biased_degree_distribution(graph).unwrap(),
            friend_degree_distribution(graph).unwrap(),
        ] {
            prop_assert!((pmf.total_mass() - 1.0).abs() <= NORMALIZATION_TOLERANCE);
        }
        prop_assert_eq!(graph.vertex_count(), outcome.assigned.len());
    }
}

#[test]
fn serialized_distributions_decode_back() {
    let pmf = degree_distribution(&star(3)).unwrap();
    let json = serde_json::to_string(&pmf).unwrap();
    assert_eq!(json, r#"{"1":0.75,"3":0.25}"#);
    assert_eq!(serde_json::from_str::<Pmf>(&json).unwrap(), pmf);

    let tail = pmf.tail();
    let json = serde_json::to_string(&tail).unwrap();
    assert_eq!(serde_json::from_str::<TailDistribution>(&json).unwrap(), tail);
}

#[test]
fn decoding_rejects_unnormalized_masses() {
    let err = serde_json::from_str::<Pmf>(r#"{"1":0.5,"2":0.2}"#).unwrap_err();
    assert!(err.to_string().contains("masses do not sum to one"));
    assert!(serde_json::from_str::<Pmf>(r#"{"1":1.5,"2":-0.5}"#).is_err());
    assert!(serde_json::from_str::<Pmf>("{}").is_err());
}

#[test]
fn decoding_rejects_malformed_tails() {
    for raw in [
        r#"{"1":1.0,"2":0.4,"3":0.6}"#,
        r#"{"1":0.5,"2":0.25}"#,
        r#"{"1":1.0,"2":1.2}"#,
        "{}",
    ] {
        assert!(
            serde_json::from_str::<TailDistribution>(raw).is_err(),
            "{raw} should be rejected"
        );
    }
}

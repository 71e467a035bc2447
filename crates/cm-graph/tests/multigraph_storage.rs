use cm_core::errors::codes;
use cm_core::{Graph, VertexId};
use cm_graph::{canonical_hash, Edge, MultiGraph};

fn v(raw: u64) -> VertexId {
    VertexId::from_raw(raw)
}

#[test]
fn parallel_edges_and_self_loops_are_kept() {
    let mut graph = MultiGraph::with_vertices(3);
    graph.add_edge(v(0), v(1)).unwrap();
    graph.add_edge(v(1), v(0)).unwrap();
    graph.add_edge(v(2), v(2)).unwrap();

    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.degree(v(0)).unwrap(), 2);
    assert_eq!(graph.degree(v(2)).unwrap(), 2);
    assert_eq!(graph.neighbors(v(1)).unwrap(), &[v(0), v(0)]);
    assert_eq!(graph.parallel_edge_count(), 1);
    assert_eq!(graph.self_loop_count(), 1);
    assert_eq!(graph.edge_multiset()[&Edge::new(v(1), v(0))], 2);
    assert_eq!(graph.degrees(), vec![2, 2, 2]);
}

#[test]
fn edge_endpoints_are_ordered() {
    let edge = Edge::new(v(5), v(2));
    assert_eq!(edge.endpoints(), (v(2), v(5)));
    assert!(!edge.is_self_loop());
    assert_eq!(edge, Edge::new(v(2), v(5)));
}

#[test]
fn unknown_endpoints_leave_graph_untouched() {
    let mut graph = MultiGraph::new();
    let a = graph.add_vertex().unwrap();
    let err = graph.add_edge(a, v(7)).unwrap_err();
    assert_eq!(err.code(), codes::UNKNOWN_VERTEX);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.neighbors(a).unwrap().is_empty());
}

#[test]
fn hash_ignores_insertion_order_but_not_multiplicity() {
    let mut first = MultiGraph::with_vertices(3);
    first.add_edge(v(0), v(1)).unwrap();
    first.add_edge(v(1), v(2)).unwrap();

    let mut second = MultiGraph::with_vertices(3);
    second.add_edge(v(2), v(1)).unwrap();
    second.add_edge(v(1), v(0)).unwrap();
    assert_eq!(canonical_hash(&first).unwrap(), canonical_hash(&second).unwrap());

    second.add_edge(v(0), v(1)).unwrap();
    assert_ne!(canonical_hash(&first).unwrap(), canonical_hash(&second).unwrap());

    let wider = MultiGraph::with_vertices(4);
    assert_ne!(
        canonical_hash(&MultiGraph::with_vertices(3)).unwrap(),
        canonical_hash(&wider).unwrap()
    );
}

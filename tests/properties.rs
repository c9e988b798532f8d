//! Property tests over small random graphs.

use itertools::Itertools;
use proptest::prelude::*;

use wayfinder::{error::GraphError, graph::Graph};

/// Up to seven vertices with integer weights, so path sums compare exactly.
fn arb_graph() -> impl Strategy<Value = Graph<u8>> {
    (
        1u8..8,
        prop::collection::vec((0u8..8, 0u8..8, 0u8..10), 0..16),
    )
        .prop_map(|(n, edges)| {
            let mut graph = Graph::new();
            graph.add_nodes_from(0..n);

            for (a, b, weight) in edges {
                let (a, b) = (a % n, b % n);
                if a != b {
                    graph.add_edge(a, b, f64::from(weight)).unwrap();
                }
            }

            graph
        })
}

proptest! {
    #[test]
    fn shortest_path_is_minimal(graph in arb_graph()) {
        for (s, t) in graph.nodes().iter().tuple_combinations() {
            let routes: Vec<Vec<u8>> = graph.all_simple_paths(s, t).unwrap().collect();

            match graph.shortest_path(s, t) {
                Ok(path) => {
                    prop_assert_eq!(graph.path_weight(path.nodes()), Ok(path.length()));
                    prop_assert_eq!(graph.shortest_path_length(s, t), Ok(path.length()));
                    prop_assert!(routes.iter().any(|route| route.as_slice() == path.nodes()));

                    for route in &routes {
                        prop_assert!(graph.path_weight(route).unwrap() >= path.length());
                    }
                }
                Err(GraphError::NoPath { .. }) => prop_assert!(routes.is_empty()),
                Err(err) => prop_assert!(false, "unexpected error: {}", err),
            }
        }
    }

    #[test]
    fn simple_paths_never_repeat_a_vertex(graph in arb_graph()) {
        let nodes = graph.nodes();
        let (s, t) = (nodes[0], nodes[nodes.len() - 1]);

        for route in graph.all_simple_paths(&s, &t).unwrap() {
            prop_assert_eq!(route.first(), Some(&s));
            prop_assert_eq!(route.last(), Some(&t));
            prop_assert!(route.iter().all_unique());
        }
    }

    #[test]
    fn trivial_simple_path(graph in arb_graph()) {
        for s in graph.nodes() {
            let routes: Vec<Vec<u8>> = graph.all_simple_paths(s, s).unwrap().collect();
            prop_assert_eq!(routes, vec![vec![*s]]);
        }
    }

    #[test]
    fn remove_node_drops_exactly_incident_edges(graph in arb_graph(), pick in any::<prop::sample::Index>()) {
        let vertex = *pick.get(graph.nodes());
        let mut removed_from = graph.copy();

        let removed = removed_from.remove_node(&vertex).unwrap();

        let incident: Vec<_> = graph.edges().iter().filter(|e| e.contains(&vertex)).cloned().collect();
        let others: Vec<_> = graph.edges().iter().filter(|e| !e.contains(&vertex)).cloned().collect();

        prop_assert_eq!(removed, incident);
        prop_assert_eq!(removed_from.edges(), others.as_slice());
        prop_assert!(!removed_from.contains_node(&vertex));
        prop_assert_eq!(removed_from.node_count(), graph.node_count() - 1);
    }

    #[test]
    fn copy_is_independent(graph in arb_graph()) {
        let before = graph.edges().to_vec();
        let mut copy = graph.copy();

        for vertex in graph.nodes() {
            copy.remove_node(vertex).unwrap();
        }

        prop_assert_eq!(graph.edges(), before.as_slice());
        prop_assert_eq!(copy.node_count(), 0);
    }

    #[test]
    fn isolated_vertex_has_zero_betweenness(graph in arb_graph()) {
        let mut graph = graph;
        graph.add_node(u8::MAX);

        prop_assert_eq!(graph.betweenness_centrality()[&u8::MAX], 0.0);
    }

    #[test]
    fn normalized_betweenness_is_bounded(graph in arb_graph()) {
        for score in graph.normalized_betweenness_centrality().values() {
            prop_assert!((0.0..=1.0 + 1e-9).contains(score));
        }
    }

    #[test]
    fn average_matches_pairwise_lengths(graph in arb_graph()) {
        let nodes = graph.nodes();

        match graph.average_shortest_path_length() {
            Ok(average) => {
                prop_assert!(graph.is_connected());

                let lengths: Vec<f64> = nodes
                    .iter()
                    .tuple_combinations()
                    .map(|(s, t)| graph.shortest_path_length(s, t).unwrap())
                    .collect();
                let expected = if lengths.is_empty() {
                    0.0
                } else {
                    lengths.iter().sum::<f64>() / lengths.len() as f64
                };

                prop_assert!((average - expected).abs() < 1e-9);
            }
            Err(err) => {
                prop_assert_eq!(err, GraphError::DisconnectedGraph);
                prop_assert!(!graph.is_connected());
            }
        }
    }
}

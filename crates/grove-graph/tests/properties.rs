//! Property tests over randomly generated graphs and networks.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use grove_graph::prelude::*;
use grove_graph::{graphs_equal, transpose, GraphError, StandardGraph, StandardNetwork};
use proptest::prelude::*;

fn arb_edges() -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0u8..8, 0u8..8), 0..32)
}

fn graph_of(directed: bool, edges: &[(u8, u8)]) -> StandardGraph<u8> {
    let builder = if directed {
        GraphBuilder::directed()
    } else {
        GraphBuilder::undirected()
    };
    let mut graph = builder.allows_self_loops(true).build();
    for &(u, v) in edges {
        graph.put_edge(u, v).unwrap();
    }
    graph
}

fn network_of(directed: bool, edges: &[(u8, u8)]) -> StandardNetwork<u8, usize> {
    let builder = if directed {
        NetworkBuilder::directed()
    } else {
        NetworkBuilder::undirected()
    };
    let mut network = builder
        .allows_parallel_edges(true)
        .allows_self_loops(true)
        .build();
    for (id, &(u, v)) in edges.iter().enumerate() {
        network.add_edge(id, u, v).unwrap();
    }
    network
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn test_degree_sum_is_twice_edge_count(directed in any::<bool>(), edges in arb_edges()) {
        let graph = graph_of(directed, &edges);

        let degree_sum: usize = graph.nodes().iter().map(|n| graph.degree(n).unwrap()).sum();
        prop_assert_eq!(degree_sum, 2 * graph.edge_count());
        prop_assert_eq!(graph.edges().len(), graph.edge_count());
    }

    #[test]
    fn test_undirected_adjacency_is_symmetric(edges in arb_edges()) {
        let graph = graph_of(false, &edges);

        for u in graph.nodes() {
            for v in graph.nodes() {
                prop_assert_eq!(graph.has_edge_connecting(u, v), graph.has_edge_connecting(v, u));
            }
            prop_assert_eq!(graph.successors(u).unwrap(), graph.predecessors(u).unwrap());
        }
    }

    #[test]
    fn test_directed_successors_mirror_predecessors(edges in arb_edges()) {
        let graph = graph_of(true, &edges);

        for u in graph.nodes() {
            for v in graph.successors(u).unwrap() {
                prop_assert!(graph.predecessors(v).unwrap().contains(u));
            }
            for v in graph.predecessors(u).unwrap() {
                prop_assert!(graph.successors(v).unwrap().contains(u));
            }
        }
    }

    #[test]
    fn test_transpose_reverses_every_edge(edges in arb_edges()) {
        let graph = graph_of(true, &edges);
        let transposed = transpose(&graph);

        prop_assert_eq!(transposed.edge_count(), graph.edge_count());
        for &(u, v) in &edges {
            prop_assert!(transposed.has_edge_connecting(&v, &u));
        }
    }

    #[test]
    fn test_remove_node_drops_incident_edges(
        directed in any::<bool>(),
        edges in arb_edges(),
        victim in 0u8..8,
    ) {
        let mut graph = graph_of(directed, &edges);
        prop_assume!(graph.nodes().contains(&victim));

        let before = graph.edge_count();
        let incident = graph.incident_edges(&victim).unwrap().len();
        prop_assert!(graph.remove_node(&victim));

        prop_assert_eq!(graph.edge_count(), before - incident);
        prop_assert!(!graph.nodes().contains(&victim));
        for edge in graph.edges() {
            prop_assert!(edge.adjacent_node(&victim).is_none());
        }
    }

    #[test]
    fn test_equality_ignores_insertion_order(directed in any::<bool>(), edges in arb_edges()) {
        let forward = graph_of(directed, &edges);
        let reversed: Vec<_> = edges.iter().rev().copied().collect();
        let backward = graph_of(directed, &reversed);

        prop_assert!(graphs_equal(&forward, &backward));
        prop_assert_eq!(hash_of(&forward), hash_of(&backward));
    }

    #[test]
    fn test_immutable_copy_equals_source(directed in any::<bool>(), edges in arb_edges()) {
        let graph = graph_of(directed, &edges);
        let frozen = ImmutableGraph::copy_of(&graph);

        prop_assert!(frozen == graph);
        prop_assert_eq!(frozen.nodes().to_vec(), graph.nodes().to_vec());
        prop_assert_eq!(hash_of(&frozen), hash_of(&graph));

        let network = network_of(directed, &edges);
        let frozen_network = ImmutableNetwork::copy_of(&network);
        prop_assert!(frozen_network == network);
        prop_assert_eq!(frozen_network.edges().to_vec(), network.edges().to_vec());
    }

    #[test]
    fn test_parallel_edges_are_counted(directed in any::<bool>(), edges in arb_edges()) {
        let network = network_of(directed, &edges);
        prop_assert_eq!(network.edge_count(), edges.len());

        for u in network.nodes() {
            for v in network.nodes() {
                let expected = edges
                    .iter()
                    .filter(|&&(a, b)| (a == *u && b == *v) || (!directed && a == *v && b == *u))
                    .count();
                prop_assert_eq!(network.edges_connecting(u, v).unwrap().len(), expected);
                prop_assert_eq!(network.has_edge_connecting(u, v), expected > 0);
            }
        }

        let collapsed = network.as_graph();
        prop_assert_eq!(collapsed.edge_count(), graph_of(directed, &edges).edge_count());
    }

    #[test]
    fn test_rejected_mutations_leave_graph_unchanged(
        directed in any::<bool>(),
        edges in arb_edges(),
        node in 0u8..8,
    ) {
        let builder = if directed {
            GraphBuilder::directed()
        } else {
            GraphBuilder::undirected()
        };
        let mut graph = builder.build();
        for &(u, v) in edges.iter().filter(|(u, v)| u != v) {
            graph.put_edge(u, v).unwrap();
        }
        let snapshot = graph.clone();

        let err = graph.put_edge(node, node).unwrap_err();
        prop_assert!(matches!(err, GraphError::SelfLoopsNotAllowed(_)));
        prop_assert!(graph == snapshot);
        prop_assert_eq!(graph.nodes().to_vec(), snapshot.nodes().to_vec());

        let mut network = NetworkBuilder::from_constraints(builder.constraints()).build();
        for (id, &(u, v)) in edges.iter().enumerate() {
            let _ = network.add_edge(id, u, v);
        }
        let network_snapshot = network.clone();
        let first_edge = network.edges().iter().next().cloned();
        if let Some(existing) = first_edge {
            let endpoints = network.incident_nodes(&existing).unwrap();
            let other = (*endpoints.node_u()).wrapping_add(100);
            prop_assert!(network.add_edge(existing, other, other.wrapping_add(1)).is_err());
            prop_assert!(network == network_snapshot);
        }
    }
}

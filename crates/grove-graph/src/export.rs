//! Copying graphs into petgraph.
//!
//! The exporters hand any graph kind to petgraph's algorithm suite
//! (shortest paths, cycle detection, ...). Nodes are added in the source's
//! node order, and every node's index is returned alongside the copy.

use crate::error::{GraphError, Result};
use crate::traits::{Graph, Network, ValueGraph};
use petgraph::graph::{Graph as PetGraph, NodeIndex};
use petgraph::EdgeType;
use std::collections::HashMap;
use std::hash::Hash;

/// A petgraph copy of a graph plus the index of every node.
#[derive(Debug, Clone)]
pub struct Exported<N, W, Ty: EdgeType> {
    pub graph: PetGraph<N, W, Ty>,
    pub indices: HashMap<N, NodeIndex>,
}

impl<N: Clone + Eq + Hash, W, Ty: EdgeType> Exported<N, W, Ty> {
    fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: PetGraph::with_capacity(nodes, edges),
            indices: HashMap::with_capacity(nodes),
        }
    }

    fn add_node(&mut self, node: &N) {
        let index = self.graph.add_node(node.clone());
        self.indices.insert(node.clone(), index);
    }

    fn add_edge(&mut self, node_u: &N, node_v: &N, weight: W) {
        if let (Some(&a), Some(&b)) = (self.indices.get(node_u), self.indices.get(node_v)) {
            self.graph.add_edge(a, b, weight);
        }
    }

    /// The petgraph index of `node`, if it was exported.
    pub fn index_of(&self, node: &N) -> Option<NodeIndex> {
        self.indices.get(node).copied()
    }
}

fn check_directedness<Ty: EdgeType>(directed: bool) -> Result<()> {
    if Ty::is_directed() == directed {
        Ok(())
    } else {
        Err(GraphError::DirectednessMismatch {
            expected: Ty::is_directed(),
            actual: directed,
        })
    }
}

/// Copies `graph` into a petgraph graph with unit edge weights.
pub fn export_graph<G, Ty>(graph: &G) -> Result<Exported<G::Node, (), Ty>>
where
    G: Graph + ?Sized,
    Ty: EdgeType,
{
    check_directedness::<Ty>(graph.is_directed())?;
    let mut exported = Exported::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        exported.add_node(node);
    }
    for edge in graph.edges() {
        exported.add_edge(edge.node_u(), edge.node_v(), ());
    }
    Ok(exported)
}

/// Copies `graph` into a petgraph graph weighted by edge values.
pub fn export_value_graph<G, Ty>(graph: &G) -> Result<Exported<G::Node, G::Value, Ty>>
where
    G: ValueGraph + ?Sized,
    G::Value: Clone,
    Ty: EdgeType,
{
    check_directedness::<Ty>(graph.is_directed())?;
    let mut exported = Exported::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        exported.add_node(node);
    }
    for edge in graph.edges() {
        let (node_u, node_v) = (edge.node_u(), edge.node_v());
        if let Some(value) = graph.edge_value(node_u, node_v)? {
            exported.add_edge(node_u, node_v, value.clone());
        }
    }
    Ok(exported)
}

/// Copies `network` into a petgraph graph whose edge weights are the
/// network's edges. Parallel edges are preserved.
pub fn export_network<G, Ty>(network: &G) -> Result<Exported<G::Node, G::Edge, Ty>>
where
    G: Network + ?Sized,
    Ty: EdgeType,
{
    check_directedness::<Ty>(network.is_directed())?;
    let mut exported = Exported::with_capacity(network.node_count(), network.edge_count());
    for node in network.nodes() {
        exported.add_node(node);
    }
    for edge in network.edges() {
        let endpoints = network.incident_nodes(edge)?;
        exported.add_edge(endpoints.node_u(), endpoints.node_v(), edge.clone());
    }
    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{GraphBuilder, NetworkBuilder, ValueGraphBuilder};
    use crate::traits::{MutableGraph, MutableNetwork, MutableValueGraph};
    use petgraph::visit::EdgeRef;
    use petgraph::{Directed, Undirected};

    #[test]
    fn test_export_graph_preserves_node_order() {
        let mut graph = GraphBuilder::directed().build();
        graph.put_edge("b", "a").unwrap();
        graph.put_edge("a", "c").unwrap();

        let exported = export_graph::<_, Directed>(&graph).unwrap();
        assert_eq!(exported.graph.node_count(), 3);
        assert_eq!(exported.graph.edge_count(), 2);
        assert_eq!(exported.index_of(&"b"), Some(NodeIndex::new(0)));
        assert_eq!(exported.graph[NodeIndex::new(1)], "a");
        assert!(!petgraph::algo::is_cyclic_directed(&exported.graph));
    }

    #[test]
    fn test_export_rejects_wrong_edge_type() {
        let graph: crate::StandardGraph<u8> = GraphBuilder::undirected().build();
        let err = export_graph::<_, Directed>(&graph).unwrap_err();
        assert_eq!(
            err,
            GraphError::DirectednessMismatch {
                expected: true,
                actual: false
            }
        );
    }

    #[test]
    fn test_export_value_graph_runs_dijkstra() {
        let mut graph = ValueGraphBuilder::undirected().build();
        graph.put_edge_value('a', 'b', 4u32).unwrap();
        graph.put_edge_value('b', 'c', 1u32).unwrap();
        graph.put_edge_value('a', 'c', 7u32).unwrap();

        let exported = export_value_graph::<_, Undirected>(&graph).unwrap();
        let start = exported.index_of(&'a').unwrap();
        let costs = petgraph::algo::dijkstra(&exported.graph, start, None, |edge| *edge.weight());
        assert_eq!(costs[&exported.index_of(&'c').unwrap()], 5);
    }

    #[test]
    fn test_export_network_keeps_parallel_edges() {
        let mut network = NetworkBuilder::directed()
            .allows_parallel_edges(true)
            .build();
        network.add_edge(10, 1, 2).unwrap();
        network.add_edge(11, 1, 2).unwrap();

        let exported = export_network::<_, Directed>(&network).unwrap();
        assert_eq!(exported.graph.edge_count(), 2);
        let weights: Vec<_> = exported.graph.edge_weights().copied().collect();
        assert_eq!(weights, vec![10, 11]);
    }
}

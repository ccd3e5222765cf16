//! Derived graphs: transposed views and induced subgraphs.

use crate::builder::{GraphBuilder, NetworkBuilder, ValueGraphBuilder};
use crate::element::Element;
use crate::equality::{graphs_equal, hash_graph};
use crate::error::{GraphError, Result};
use crate::format::fmt_graph;
use crate::graph::StandardGraph;
use crate::network::StandardNetwork;
use crate::order::ElementOrder;
use crate::traits::{
    Adjacency, BaseGraph, Graph, MutableGraph, MutableNetwork, MutableValueGraph, Network,
    ValueGraph,
};
use crate::value_graph::StandardValueGraph;
use crate::view::SetView;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A live view of a graph with every edge reversed.
///
/// Undirected graphs are their own transpose.
pub struct Transposed<'a, G: ?Sized> {
    graph: &'a G,
}

/// Reverses the direction of every edge of `graph`.
pub fn transpose<G: BaseGraph + ?Sized>(graph: &G) -> Transposed<'_, G> {
    Transposed { graph }
}

impl<'a, G: ?Sized> Transposed<'a, G> {
    /// The graph behind this view.
    pub fn get_ref(&self) -> &'a G {
        self.graph
    }
}

impl<G: ?Sized> Clone for Transposed<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for Transposed<'_, G> {}

impl<G: BaseGraph + ?Sized> Adjacency for Transposed<'_, G> {
    type Node = G::Node;

    fn nodes(&self) -> SetView<'_, G::Node> {
        self.graph.nodes()
    }

    fn successors(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.graph.predecessors(node)
    }

    fn predecessors(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.graph.successors(node)
    }
}

impl<G: BaseGraph + ?Sized> BaseGraph for Transposed<'_, G> {
    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    fn allows_self_loops(&self) -> bool {
        self.graph.allows_self_loops()
    }

    fn node_order(&self) -> ElementOrder<G::Node> {
        self.graph.node_order()
    }

    fn incident_edge_order(&self) -> ElementOrder<G::Node> {
        self.graph.incident_edge_order()
    }

    fn adjacent_nodes(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.graph.adjacent_nodes(node)
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn degree(&self, node: &G::Node) -> Result<usize> {
        self.graph.degree(node)
    }

    fn in_degree(&self, node: &G::Node) -> Result<usize> {
        self.graph.out_degree(node)
    }

    fn out_degree(&self, node: &G::Node) -> Result<usize> {
        self.graph.in_degree(node)
    }

    fn has_edge_connecting(&self, node_u: &G::Node, node_v: &G::Node) -> bool {
        self.graph.has_edge_connecting(node_v, node_u)
    }
}

impl<G: Graph + ?Sized> Graph for Transposed<'_, G> {}

impl<G: ValueGraph + ?Sized> ValueGraph for Transposed<'_, G> {
    type Value = G::Value;

    fn edge_value(&self, node_u: &G::Node, node_v: &G::Node) -> Result<Option<&G::Value>> {
        self.graph.edge_value(node_v, node_u)
    }
}

/// Structural equality; edge values, if any, are not compared.
impl<G, H> PartialEq<H> for Transposed<'_, G>
where
    G: BaseGraph + ?Sized,
    H: BaseGraph<Node = G::Node> + ?Sized,
{
    fn eq(&self, other: &H) -> bool {
        graphs_equal(self, other)
    }
}

impl<G: BaseGraph + ?Sized> Eq for Transposed<'_, G> {}

impl<G: BaseGraph + ?Sized> Hash for Transposed<'_, G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_graph(self, state);
    }
}

impl<G: BaseGraph + ?Sized> fmt::Display for Transposed<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_graph(self, f)
    }
}

impl<G: BaseGraph + ?Sized> fmt::Debug for Transposed<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_graph(self, f)
    }
}

/// Collects `nodes` into a node list, failing on the first foreign node.
fn members<'n, N, I>(graph_nodes: SetView<'_, N>, nodes: I) -> Result<Vec<N>>
where
    N: Element + 'n,
    I: IntoIterator<Item = &'n N>,
{
    nodes
        .into_iter()
        .map(|node| {
            if graph_nodes.contains(node) {
                Ok(node.clone())
            } else {
                Err(GraphError::node_not_in_graph(node))
            }
        })
        .collect()
}

/// The subgraph of `graph` spanned by `nodes`: those nodes plus every edge
/// of `graph` between two of them. The result has `graph`'s configuration.
pub fn induced_subgraph<'n, G, I>(graph: &G, nodes: I) -> Result<StandardGraph<G::Node>>
where
    G: BaseGraph + ?Sized,
    G::Node: 'n,
    I: IntoIterator<Item = &'n G::Node>,
{
    let members = members(graph.nodes(), nodes)?;
    let mut subgraph = GraphBuilder::from_graph(graph)
        .expected_node_count(members.len())
        .build();
    for node in &members {
        subgraph.add_node(node.clone());
    }
    for node in &members {
        for successor in graph.successors(node)? {
            if subgraph.nodes().contains(successor) {
                subgraph.put_edge(node.clone(), successor.clone())?;
            }
        }
    }
    Ok(subgraph)
}

/// Like [`induced_subgraph`], keeping edge values.
pub fn induced_value_subgraph<'n, G, I>(
    graph: &G,
    nodes: I,
) -> Result<StandardValueGraph<G::Node, G::Value>>
where
    G: ValueGraph + ?Sized,
    G::Node: 'n,
    G::Value: Clone,
    I: IntoIterator<Item = &'n G::Node>,
{
    let members = members(graph.nodes(), nodes)?;
    let mut subgraph = ValueGraphBuilder::from_graph(graph)
        .expected_node_count(members.len())
        .build();
    for node in &members {
        subgraph.add_node(node.clone());
    }
    for node in &members {
        for successor in graph.successors(node)? {
            if !subgraph.nodes().contains(successor) {
                continue;
            }
            if let Some(value) = graph.edge_value(node, successor)? {
                subgraph.put_edge_value(node.clone(), successor.clone(), value.clone())?;
            }
        }
    }
    Ok(subgraph)
}

/// The subnetwork of `network` spanned by `nodes`, keeping every edge
/// (parallel edges included) whose endpoints are both members.
pub fn induced_subnetwork<'n, G, I>(
    network: &G,
    nodes: I,
) -> Result<StandardNetwork<G::Node, G::Edge>>
where
    G: Network + ?Sized,
    G::Node: 'n,
    I: IntoIterator<Item = &'n G::Node>,
{
    let members = members(network.nodes(), nodes)?;
    let mut subnetwork = NetworkBuilder::from_network(network)
        .expected_node_count(members.len())
        .build();
    for node in &members {
        subnetwork.add_node(node.clone());
    }
    for node in &members {
        for edge in network.out_edges(node)? {
            let endpoints = network.incident_nodes(edge)?;
            let inside = endpoints
                .adjacent_node(node)
                .map_or(false, |other| subnetwork.nodes().contains(other));
            if inside {
                let (node_u, node_v) = endpoints.into_nodes();
                subnetwork.add_edge(edge.clone(), node_u, node_v)?;
            }
        }
    }
    Ok(subnetwork)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointPair;

    fn chain() -> StandardValueGraph<u8, &'static str> {
        let mut graph = ValueGraphBuilder::directed().build();
        graph.put_edge_value(1, 2, "a").unwrap();
        graph.put_edge_value(2, 3, "b").unwrap();
        graph.put_edge_value(3, 4, "c").unwrap();
        graph
    }

    #[test]
    fn test_transpose_reverses_edges() {
        let graph = chain();
        let reversed = transpose(&graph);

        assert_eq!(reversed.successors(&2).unwrap().to_vec(), vec![1]);
        assert_eq!(reversed.predecessors(&2).unwrap().to_vec(), vec![3]);
        assert!(reversed.has_edge_connecting(&2, &1));
        assert_eq!(reversed.edge_value(&2, &1).unwrap(), Some(&"a"));
        assert_eq!(reversed.in_degree(&1).unwrap(), 1);
        assert_eq!(reversed.out_degree(&1).unwrap(), 0);
        assert!(reversed.edges().contains(&EndpointPair::ordered(4, 3)));
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let graph = chain();
        let reversed = transpose(&graph);
        let restored = transpose(&reversed);
        assert_eq!(restored, graph.as_graph());
        assert_ne!(reversed, graph.as_graph());
    }

    #[test]
    fn test_induced_subgraph() {
        let mut graph = GraphBuilder::undirected().allows_self_loops(true).build();
        graph.put_edge(1, 2).unwrap();
        graph.put_edge(2, 3).unwrap();
        graph.put_edge(3, 3).unwrap();
        graph.put_edge(3, 4).unwrap();

        let subgraph = induced_subgraph(&graph, &[2, 3]).unwrap();
        assert_eq!(subgraph.nodes().to_vec(), vec![2, 3]);
        assert_eq!(subgraph.edge_count(), 2);
        assert!(subgraph.has_edge_connecting(&3, &3));
        assert!(subgraph.allows_self_loops());

        let err = induced_subgraph(&graph, &[1, 9]).unwrap_err();
        assert_eq!(err, GraphError::NodeNotInGraph("9".to_string()));
    }

    #[test]
    fn test_induced_value_subgraph_keeps_values() {
        let graph = chain();
        let subgraph = induced_value_subgraph(&graph, &[2, 3, 4]).unwrap();
        assert_eq!(subgraph.edge_count(), 2);
        assert_eq!(subgraph.edge_value(&3, &4).unwrap(), Some(&"c"));
    }

    #[test]
    fn test_induced_subnetwork_keeps_parallel_edges() {
        let mut network = NetworkBuilder::directed()
            .allows_parallel_edges(true)
            .build();
        network.add_edge("x", 'a', 'b').unwrap();
        network.add_edge("y", 'a', 'b').unwrap();
        network.add_edge("z", 'b', 'c').unwrap();

        let subnetwork = induced_subnetwork(&network, &['a', 'b']).unwrap();
        assert_eq!(subnetwork.edges().to_vec(), vec!["x", "y"]);
        assert_eq!(
            subnetwork.incident_nodes(&"y").unwrap(),
            EndpointPair::ordered('a', 'b')
        );
    }
}

//! Structural views: any value graph or network seen as a plain [`Graph`].
//!
//! Both views borrow their source and reflect it live. They are how
//! algorithms written against [`Graph`] run on the other graph kinds, and
//! how graphs of different kinds are compared structurally.

use crate::equality::{graphs_equal, hash_graph};
use crate::error::Result;
use crate::format::fmt_graph;
use crate::order::ElementOrder;
use crate::traits::{Adjacency, BaseGraph, Graph, Network, ValueGraph};
use crate::view::SetView;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A [`ValueGraph`] with its edge values hidden.
pub struct AsGraph<'a, G: ?Sized> {
    graph: &'a G,
}

impl<'a, G: ValueGraph + ?Sized> AsGraph<'a, G> {
    pub(crate) fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// The value graph behind this view.
    pub fn get_ref(&self) -> &'a G {
        self.graph
    }
}

impl<G: ?Sized> Clone for AsGraph<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for AsGraph<'_, G> {}

impl<G: ValueGraph + ?Sized> Adjacency for AsGraph<'_, G> {
    type Node = G::Node;

    fn nodes(&self) -> SetView<'_, G::Node> {
        self.graph.nodes()
    }

    fn successors(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.graph.successors(node)
    }

    fn predecessors(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.graph.predecessors(node)
    }
}

impl<G: ValueGraph + ?Sized> BaseGraph for AsGraph<'_, G> {
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

    fn has_edge_connecting(&self, node_u: &G::Node, node_v: &G::Node) -> bool {
        self.graph.has_edge_connecting(node_u, node_v)
    }
}

impl<G: ValueGraph + ?Sized> Graph for AsGraph<'_, G> {}

impl<G, H> PartialEq<H> for AsGraph<'_, G>
where
    G: ValueGraph + ?Sized,
    H: Graph<Node = G::Node> + ?Sized,
{
    fn eq(&self, other: &H) -> bool {
        graphs_equal(self, other)
    }
}

impl<G: ValueGraph + ?Sized> Eq for AsGraph<'_, G> {}

impl<G: ValueGraph + ?Sized> Hash for AsGraph<'_, G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_graph(self, state);
    }
}

impl<G: ValueGraph + ?Sized> fmt::Display for AsGraph<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_graph(self, f)
    }
}

impl<G: ValueGraph + ?Sized> fmt::Debug for AsGraph<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_graph(self, f)
    }
}

/// A [`Network`] seen as a graph: nodes are connected when at least one
/// edge connects them, so parallel edges collapse into one.
pub struct NetworkAsGraph<'a, G: ?Sized> {
    network: &'a G,
}

impl<'a, G: Network + ?Sized> NetworkAsGraph<'a, G> {
    pub(crate) fn new(network: &'a G) -> Self {
        Self { network }
    }

    /// The network behind this view.
    pub fn get_ref(&self) -> &'a G {
        self.network
    }
}

impl<G: ?Sized> Clone for NetworkAsGraph<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for NetworkAsGraph<'_, G> {}

impl<G: Network + ?Sized> Adjacency for NetworkAsGraph<'_, G> {
    type Node = G::Node;

    fn nodes(&self) -> SetView<'_, G::Node> {
        self.network.nodes()
    }

    fn successors(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.network.successors(node)
    }

    fn predecessors(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.network.predecessors(node)
    }
}

impl<G: Network + ?Sized> BaseGraph for NetworkAsGraph<'_, G> {
    fn is_directed(&self) -> bool {
        self.network.is_directed()
    }

    fn allows_self_loops(&self) -> bool {
        self.network.allows_self_loops()
    }

    fn node_order(&self) -> ElementOrder<G::Node> {
        self.network.node_order()
    }

    /// Neighbor sets of a network follow its edge order only as far as
    /// insertion order goes; a comparator over edges cannot order nodes.
    fn incident_edge_order(&self) -> ElementOrder<G::Node> {
        self.network.edge_order().derived()
    }

    fn adjacent_nodes(&self, node: &G::Node) -> Result<SetView<'_, G::Node>> {
        self.network.adjacent_nodes(node)
    }

    fn node_count(&self) -> usize {
        self.network.node_count()
    }

    fn has_edge_connecting(&self, node_u: &G::Node, node_v: &G::Node) -> bool {
        self.network.has_edge_connecting(node_u, node_v)
    }
}

impl<G: Network + ?Sized> Graph for NetworkAsGraph<'_, G> {}

impl<G, H> PartialEq<H> for NetworkAsGraph<'_, G>
where
    G: Network + ?Sized,
    H: Graph<Node = G::Node> + ?Sized,
{
    fn eq(&self, other: &H) -> bool {
        graphs_equal(self, other)
    }
}

impl<G: Network + ?Sized> Eq for NetworkAsGraph<'_, G> {}

impl<G: Network + ?Sized> Hash for NetworkAsGraph<'_, G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_graph(self, state);
    }
}

impl<G: Network + ?Sized> fmt::Display for NetworkAsGraph<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_graph(self, f)
    }
}

impl<G: Network + ?Sized> fmt::Debug for NetworkAsGraph<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_graph(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{GraphBuilder, NetworkBuilder, ValueGraphBuilder};
    use crate::endpoint::EndpointPair;
    use crate::traits::{MutableGraph, MutableNetwork, MutableValueGraph};

    #[test]
    fn test_value_graph_view_equals_plain_graph() {
        let mut valued = ValueGraphBuilder::undirected().build();
        valued.put_edge_value(1, 2, "a").unwrap();
        valued.put_edge_value(2, 3, "b").unwrap();

        let mut plain = GraphBuilder::undirected().build();
        plain.put_edge(3, 2).unwrap();
        plain.put_edge(1, 2).unwrap();

        assert_eq!(valued.as_graph(), plain);
        assert_eq!(plain, valued.as_graph());
    }

    #[test]
    fn test_view_is_live_between_mutations() {
        let mut valued = ValueGraphBuilder::directed().build();
        valued.put_edge_value("a", "b", 1).unwrap();
        assert_eq!(valued.as_graph().edge_count(), 1);

        valued.put_edge_value("b", "c", 2).unwrap();
        let view = valued.as_graph();
        assert_eq!(view.edge_count(), 2);
        assert_eq!(
            view.edges(),
            vec![EndpointPair::ordered("a", "b"), EndpointPair::ordered("b", "c")]
        );
    }

    #[test]
    fn test_network_view_collapses_parallel_edges() {
        let mut network = NetworkBuilder::undirected()
            .allows_parallel_edges(true)
            .build();
        network.add_edge("e1", 'x', 'y').unwrap();
        network.add_edge("e2", 'y', 'x').unwrap();
        network.add_edge("e3", 'y', 'z').unwrap();

        let view = network.as_graph();
        assert_eq!(view.edge_count(), 2);
        assert_eq!(view.degree(&'y').unwrap(), 2);
        assert!(view.has_edge_connecting(&'x', &'y'));

        let mut plain = GraphBuilder::undirected().build();
        plain.put_edge('x', 'y').unwrap();
        plain.put_edge('y', 'z').unwrap();
        assert_eq!(view, plain);
    }
}

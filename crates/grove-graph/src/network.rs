//! Networks: graphs whose edges are first-class values.
//!
//! [`NetworkCore`] stores every edge with its endpoints and every node with
//! its [`NetworkConnections`]. [`StandardNetwork`] is the mutable façade
//! over it.

use crate::connections::NetworkConnections;
use crate::element::Element;
use crate::endpoint::EndpointPair;
use crate::equality::{hash_network, networks_equal};
use crate::error::{GraphError, Result};
use crate::format::{fmt_network, impl_graph_fmt};
use crate::order::ElementOrder;
use crate::store::OrderedMap;
use crate::traits::{MutableNetwork, Network};
use crate::view::SetView;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Fixed properties of a network, chosen when it is built.
#[derive(Debug, Clone)]
pub(crate) struct NetworkSettings<N, E> {
    pub(crate) directed: bool,
    pub(crate) allows_parallel_edges: bool,
    pub(crate) allows_self_loops: bool,
    pub(crate) node_order: ElementOrder<N>,
    pub(crate) edge_order: ElementOrder<E>,
}

#[derive(Debug, Clone)]
pub(crate) struct NetworkCore<N, E> {
    settings: NetworkSettings<N, E>,
    nodes: OrderedMap<N, NetworkConnections<N, E>>,
    edges: OrderedMap<E, EndpointPair<N>>,
}

impl<N: Element, E: Element> NetworkCore<N, E> {
    pub(crate) fn new(
        settings: NetworkSettings<N, E>,
        expected_node_count: usize,
        expected_edge_count: usize,
    ) -> Self {
        let nodes = OrderedMap::with_capacity(settings.node_order.clone(), expected_node_count);
        let edges = OrderedMap::with_capacity(settings.edge_order.clone(), expected_edge_count);
        Self {
            settings,
            nodes,
            edges,
        }
    }

    /// Rebuilds `network`, preserving the order in which it reports nodes,
    /// edges and each node's incident edges.
    pub(crate) fn copy_from<G>(network: &G) -> Self
    where
        G: Network<Node = N, Edge = E> + ?Sized,
    {
        let settings = NetworkSettings {
            directed: network.is_directed(),
            allows_parallel_edges: network.allows_parallel_edges(),
            allows_self_loops: network.allows_self_loops(),
            node_order: network.node_order().frozen(),
            edge_order: network.edge_order().frozen(),
        };
        let mut core = Self::new(settings, network.node_count(), network.edge_count());

        for node in network.nodes() {
            let mut connections =
                NetworkConnections::new(core.settings.directed, &core.settings.edge_order);
            if core.settings.directed {
                for edge in network.in_edges(node).into_iter().flatten() {
                    if let Some(source) = opposite(network, edge, node) {
                        connections.add_in_edge(edge.clone(), source, false);
                    }
                }
            }
            for edge in network.out_edges(node).into_iter().flatten() {
                if let Some(target) = opposite(network, edge, node) {
                    connections.add_out_edge(edge.clone(), target);
                }
            }
            core.nodes.insert(node.clone(), connections);
        }

        for edge in network.edges() {
            if let Ok(endpoints) = network.incident_nodes(edge) {
                core.edges.insert(edge.clone(), endpoints);
            }
        }

        core
    }

    pub(crate) fn settings(&self) -> &NetworkSettings<N, E> {
        &self.settings
    }

    pub(crate) fn nodes(&self) -> SetView<'_, N> {
        SetView::live(&self.nodes)
    }

    pub(crate) fn edges(&self) -> SetView<'_, E> {
        SetView::live(&self.edges)
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn connections(&self, node: &N) -> Result<&NetworkConnections<N, E>> {
        self.nodes
            .get(node)
            .ok_or_else(|| GraphError::node_not_in_graph(node))
    }

    pub(crate) fn successors(&self, node: &N) -> Result<SetView<'_, N>> {
        Ok(self.connections(node)?.successors())
    }

    pub(crate) fn predecessors(&self, node: &N) -> Result<SetView<'_, N>> {
        Ok(self.connections(node)?.predecessors())
    }

    pub(crate) fn adjacent_nodes(&self, node: &N) -> Result<SetView<'_, N>> {
        Ok(self.connections(node)?.adjacent_nodes())
    }

    pub(crate) fn incident_edges(&self, node: &N) -> Result<SetView<'_, E>> {
        Ok(self.connections(node)?.incident_edges())
    }

    pub(crate) fn in_edges(&self, node: &N) -> Result<SetView<'_, E>> {
        Ok(self.connections(node)?.in_edges())
    }

    pub(crate) fn out_edges(&self, node: &N) -> Result<SetView<'_, E>> {
        Ok(self.connections(node)?.out_edges())
    }

    pub(crate) fn incident_nodes(&self, edge: &E) -> Result<EndpointPair<N>> {
        self.edges
            .get(edge)
            .cloned()
            .ok_or_else(|| GraphError::edge_not_in_graph(edge))
    }

    pub(crate) fn edges_connecting(&self, node_u: &N, node_v: &N) -> Result<SetView<'_, E>> {
        let connections = self.connections(node_u)?;
        if !self.nodes.contains_key(node_v) {
            return Err(GraphError::node_not_in_graph(node_v));
        }
        Ok(connections.edges_connecting(node_v))
    }

    pub(crate) fn has_edge_connecting(&self, node_u: &N, node_v: &N) -> bool {
        self.nodes
            .get(node_u)
            .map_or(false, |connections| connections.successors().contains(node_v))
    }

    pub(crate) fn add_node(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        let connections =
            NetworkConnections::new(self.settings.directed, &self.settings.edge_order);
        self.nodes.insert(node, connections);
        true
    }

    /// Adds `edge` between the two nodes after every constraint has been
    /// checked. Nothing changes if a check fails.
    pub(crate) fn add_edge(&mut self, edge: E, node_u: N, node_v: N) -> Result<bool> {
        let requested = EndpointPair::of(self.settings.directed, node_u.clone(), node_v.clone());
        if let Some(existing) = self.edges.get(&edge) {
            if *existing == requested {
                return Ok(false);
            }
            return Err(GraphError::EdgeReused {
                edge: format!("{:?}", edge),
                existing: existing.to_string(),
                requested: requested.to_string(),
            });
        }
        if !self.settings.allows_parallel_edges && self.has_edge_connecting(&node_u, &node_v) {
            return Err(GraphError::parallel_edges_not_allowed(&node_u, &node_v));
        }
        let is_self_loop = node_u == node_v;
        if !self.settings.allows_self_loops && is_self_loop {
            return Err(GraphError::self_loops_not_allowed(&node_u));
        }

        let directed = self.settings.directed;
        let order = &self.settings.edge_order;
        self.nodes
            .get_or_insert_with(node_u.clone(), || NetworkConnections::new(directed, order))
            .add_out_edge(edge.clone(), node_v.clone());
        self.nodes
            .get_or_insert_with(node_v, || NetworkConnections::new(directed, order))
            .add_in_edge(edge.clone(), node_u, is_self_loop);
        self.edges.insert(edge, requested);
        Ok(true)
    }

    pub(crate) fn remove_node(&mut self, node: &N) -> bool {
        let incident = match self.nodes.get(node) {
            Some(connections) => connections.incident_edges().to_vec(),
            None => return false,
        };
        for edge in &incident {
            self.remove_edge(edge);
        }
        self.nodes.remove(node);
        trace!("removed node {:?} and {} incident edges", node, incident.len());
        true
    }

    pub(crate) fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(endpoints) = self.edges.remove(edge) else {
            return false;
        };
        let (node_u, node_v) = endpoints.into_nodes();
        let is_self_loop = node_u == node_v;
        if let Some(connections) = self.nodes.get_mut(&node_u) {
            connections.remove_out_edge(edge);
        }
        if let Some(connections) = self.nodes.get_mut(&node_v) {
            connections.remove_in_edge(edge, is_self_loop);
        }
        true
    }

    pub(crate) fn freeze(&mut self) {
        self.settings.node_order = self.settings.node_order.frozen();
        self.settings.edge_order = self.settings.edge_order.frozen();
        self.nodes.shrink_to_fit();
        self.edges.shrink_to_fit();
        for connections in self.nodes.values_mut() {
            connections.shrink_to_fit();
        }
    }
}

fn opposite<G>(network: &G, edge: &G::Edge, node: &G::Node) -> Option<G::Node>
where
    G: Network + ?Sized,
{
    network
        .incident_nodes(edge)
        .ok()
        .and_then(|endpoints| endpoints.adjacent_node(node).cloned())
}

pub(crate) mod macros {
    /// Implements [`Adjacency`](crate::traits::Adjacency) and
    /// [`Network`](crate::traits::Network) for a type holding a
    /// [`NetworkCore`](super::NetworkCore) in `$core`.
    macro_rules! delegate_network {
        ($struct:ident<N, E> => $core:ident) => {
            impl<N: $crate::element::Element, E: $crate::element::Element> $crate::traits::Adjacency
                for $struct<N, E>
            {
                type Node = N;

                fn nodes(&self) -> $crate::view::SetView<'_, N> {
                    self.$core.nodes()
                }

                fn successors(&self, node: &N) -> $crate::error::Result<$crate::view::SetView<'_, N>> {
                    self.$core.successors(node)
                }

                fn predecessors(&self, node: &N) -> $crate::error::Result<$crate::view::SetView<'_, N>> {
                    self.$core.predecessors(node)
                }
            }

            impl<N: $crate::element::Element, E: $crate::element::Element> $crate::traits::Network
                for $struct<N, E>
            {
                type Edge = E;

                fn edges(&self) -> $crate::view::SetView<'_, E> {
                    self.$core.edges()
                }

                fn is_directed(&self) -> bool {
                    self.$core.settings().directed
                }

                fn allows_parallel_edges(&self) -> bool {
                    self.$core.settings().allows_parallel_edges
                }

                fn allows_self_loops(&self) -> bool {
                    self.$core.settings().allows_self_loops
                }

                fn node_order(&self) -> $crate::order::ElementOrder<N> {
                    self.$core.settings().node_order.clone()
                }

                fn edge_order(&self) -> $crate::order::ElementOrder<E> {
                    self.$core.settings().edge_order.clone()
                }

                fn adjacent_nodes(&self, node: &N) -> $crate::error::Result<$crate::view::SetView<'_, N>> {
                    self.$core.adjacent_nodes(node)
                }

                fn incident_edges(&self, node: &N) -> $crate::error::Result<$crate::view::SetView<'_, E>> {
                    self.$core.incident_edges(node)
                }

                fn in_edges(&self, node: &N) -> $crate::error::Result<$crate::view::SetView<'_, E>> {
                    self.$core.in_edges(node)
                }

                fn out_edges(&self, node: &N) -> $crate::error::Result<$crate::view::SetView<'_, E>> {
                    self.$core.out_edges(node)
                }

                fn incident_nodes(&self, edge: &E) -> $crate::error::Result<$crate::endpoint::EndpointPair<N>> {
                    self.$core.incident_nodes(edge)
                }

                fn node_count(&self) -> usize {
                    self.$core.node_count()
                }

                fn edge_count(&self) -> usize {
                    self.$core.edge_count()
                }

                fn edges_connecting(
                    &self,
                    node_u: &N,
                    node_v: &N,
                ) -> $crate::error::Result<$crate::view::SetView<'_, E>> {
                    self.$core.edges_connecting(node_u, node_v)
                }

                fn has_edge_connecting(&self, node_u: &N, node_v: &N) -> bool {
                    self.$core.has_edge_connecting(node_u, node_v)
                }
            }
        };
    }

    pub(crate) use delegate_network;
}

/// A mutable [`Network`].
#[derive(Clone)]
pub struct StandardNetwork<N, E> {
    core: NetworkCore<N, E>,
}

impl<N: Element, E: Element> StandardNetwork<N, E> {
    pub(crate) fn from_core(core: NetworkCore<N, E>) -> Self {
        Self { core }
    }

    pub(crate) fn into_core(self) -> NetworkCore<N, E> {
        self.core
    }
}

macros::delegate_network!(StandardNetwork<N, E> => core);

impl<N: Element, E: Element> MutableNetwork for StandardNetwork<N, E> {
    fn add_node(&mut self, node: N) -> bool {
        self.core.add_node(node)
    }

    fn add_edge(&mut self, edge: E, node_u: N, node_v: N) -> Result<bool> {
        self.core.add_edge(edge, node_u, node_v)
    }

    fn remove_node(&mut self, node: &N) -> bool {
        self.core.remove_node(node)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        self.core.remove_edge(edge)
    }
}

impl<N, E, G> PartialEq<G> for StandardNetwork<N, E>
where
    N: Element,
    E: Element,
    G: Network<Node = N, Edge = E> + ?Sized,
{
    fn eq(&self, other: &G) -> bool {
        networks_equal(self, other)
    }
}

impl<N: Element, E: Element> Eq for StandardNetwork<N, E> {}

impl<N: Element, E: Element> Hash for StandardNetwork<N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_network(self, state);
    }
}

impl_graph_fmt!(fmt_network => StandardNetwork<N, E> where E: Element);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::NetworkBuilder;
    use crate::traits::Adjacency;

    fn multigraph() -> StandardNetwork<&'static str, u32> {
        NetworkBuilder::directed()
            .allows_parallel_edges(true)
            .allows_self_loops(true)
            .build()
    }

    #[test]
    fn test_add_edge_and_lookup() {
        let mut network = multigraph();
        assert!(network.add_edge(1, "a", "b").unwrap());
        assert!(!network.add_edge(1, "a", "b").unwrap());
        network.add_edge(2, "a", "b").unwrap();

        assert_eq!(network.edge_count(), 2);
        assert_eq!(network.incident_nodes(&1).unwrap(), EndpointPair::ordered("a", "b"));
        assert_eq!(network.edges_connecting(&"a", &"b").unwrap().to_vec(), vec![1, 2]);
        assert!(network.edges_connecting(&"b", &"a").unwrap().is_empty());
        assert_eq!(network.successors(&"a").unwrap().to_vec(), vec!["b"]);
        assert_eq!(network.out_degree(&"a").unwrap(), 2);
    }

    #[test]
    fn test_edge_reuse_is_rejected() {
        let mut network = multigraph();
        network.add_edge(1, "a", "b").unwrap();
        let err = network.add_edge(1, "b", "c").unwrap_err();
        assert!(matches!(err, GraphError::EdgeReused { .. }));
        assert!(!network.nodes().contains(&"c"));
    }

    #[test]
    fn test_undirected_edge_reuse_accepts_either_order() {
        let mut network = NetworkBuilder::undirected().build();
        network.add_edge("e", 1, 2).unwrap();
        assert!(!network.add_edge("e", 2, 1).unwrap());
    }

    #[test]
    fn test_parallel_edges_rejected_by_default() {
        let mut network = NetworkBuilder::directed().build();
        network.add_edge("e1", 1, 2).unwrap();
        let err = network.add_edge("e2", 1, 2).unwrap_err();
        assert!(matches!(err, GraphError::ParallelEdgesNotAllowed { .. }));
        assert_eq!(network.edge_count(), 1);

        network.add_edge("e3", 2, 1).unwrap();
        assert_eq!(network.edge_count(), 2);
    }

    #[test]
    fn test_edge_connecting_is_ambiguous_with_parallel_edges() {
        let mut network = multigraph();
        network.add_edge(1, "a", "b").unwrap();
        assert_eq!(network.edge_connecting(&"a", &"b").unwrap(), Some(&1));

        network.add_edge(2, "a", "b").unwrap();
        assert!(matches!(
            network.edge_connecting(&"a", &"b"),
            Err(GraphError::AmbiguousEdge { count: 2, .. })
        ));
        assert_eq!(network.edge_connecting(&"b", &"a").unwrap(), None);
        assert_eq!(network.edge_connecting_or_default(&"b", &"a", &0).unwrap(), &0);
    }

    #[test]
    fn test_self_loop_degrees() {
        let mut network = multigraph();
        network.add_edge(7, "a", "a").unwrap();
        assert_eq!(network.in_degree(&"a").unwrap(), 1);
        assert_eq!(network.out_degree(&"a").unwrap(), 1);
        assert_eq!(network.degree(&"a").unwrap(), 2);
        assert_eq!(network.incident_edges(&"a").unwrap().to_vec(), vec![7]);

        let mut undirected = NetworkBuilder::undirected().allows_self_loops(true).build();
        undirected.add_edge("loop", 1, 1).unwrap();
        undirected.add_edge("e", 1, 2).unwrap();
        assert_eq!(undirected.degree(&1).unwrap(), 3);
        assert_eq!(undirected.incident_edges(&1).unwrap().len(), 2);
        assert_eq!(undirected.adjacent_nodes(&1).unwrap().to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_remove_edge_keeps_neighbors_while_parallel_edges_remain() {
        let mut network = multigraph();
        network.add_edge(1, "a", "b").unwrap();
        network.add_edge(2, "a", "b").unwrap();

        assert!(network.remove_edge(&1));
        assert!(!network.remove_edge(&1));
        assert!(network.has_edge_connecting(&"a", &"b"));
        assert!(network.remove_edge(&2));
        assert!(!network.has_edge_connecting(&"a", &"b"));
        assert_eq!(network.node_count(), 2);
    }

    #[test]
    fn test_remove_node_removes_incident_edges() {
        let mut network = multigraph();
        network.add_edge(1, "a", "b").unwrap();
        network.add_edge(2, "b", "c").unwrap();
        network.add_edge(3, "b", "b").unwrap();

        assert!(network.remove_node(&"b"));
        assert!(network.edges().is_empty());
        assert!(network.out_edges(&"a").unwrap().is_empty());
        assert!(network.predecessors(&"c").unwrap().is_empty());
    }

    #[test]
    fn test_adjacent_edges() {
        let mut network = NetworkBuilder::undirected().build();
        network.add_edge('x', 1, 2).unwrap();
        network.add_edge('y', 2, 3).unwrap();
        network.add_edge('z', 3, 4).unwrap();

        assert_eq!(network.adjacent_edges(&'y').unwrap().to_vec(), vec!['x', 'z']);
        assert!(matches!(
            network.adjacent_edges(&'q'),
            Err(GraphError::EdgeNotInGraph(_))
        ));
    }

    #[test]
    fn test_as_graph_collapses_parallel_edges() {
        let mut network = multigraph();
        network.add_edge(1, "a", "b").unwrap();
        network.add_edge(2, "a", "b").unwrap();

        let graph = network.as_graph();
        assert_eq!(crate::traits::BaseGraph::edge_count(&graph), 1);
    }

    #[test]
    fn test_display() {
        let mut network = NetworkBuilder::directed().build();
        network.add_edge("e", 1, 2).unwrap();
        assert_eq!(
            network.to_string(),
            r#"is_directed: true, allows_parallel_edges: false, allows_self_loops: false, nodes: [1, 2], edges: {"e": <1 -> 2>}"#
        );
    }
}

//! The storage engine behind graphs and value graphs.
//!
//! [`GraphCore`] maps every node to its [`GraphConnections`] record and
//! keeps a running edge count. A plain graph is a core whose edge values
//! are `()`.

use crate::connections::GraphConnections;
use crate::element::Element;
use crate::error::{GraphError, Result};
use crate::order::ElementOrder;
use crate::store::OrderedMap;
use crate::traits::BaseGraph;
use crate::view::SetView;
use tracing::trace;

/// Fixed properties of a graph, chosen when it is built.
#[derive(Debug, Clone)]
pub(crate) struct GraphSettings<N> {
    pub(crate) directed: bool,
    pub(crate) allows_self_loops: bool,
    pub(crate) node_order: ElementOrder<N>,
    pub(crate) incident_edge_order: ElementOrder<N>,
}

#[derive(Debug, Clone)]
pub(crate) struct GraphCore<N, V> {
    settings: GraphSettings<N>,
    nodes: OrderedMap<N, GraphConnections<N, V>>,
    edge_count: usize,
}

impl<N: Element, V> GraphCore<N, V> {
    pub(crate) fn new(settings: GraphSettings<N>, expected_node_count: usize) -> Self {
        let nodes = OrderedMap::with_capacity(settings.node_order.clone(), expected_node_count);
        Self {
            settings,
            nodes,
            edge_count: 0,
        }
    }

    /// Rebuilds `graph` node by node, preserving the order in which it
    /// reports nodes and neighbors. `value_of(u, v)` supplies the value of
    /// the edge from `u` to `v`.
    pub(crate) fn copy_from<G, F>(graph: &G, mut value_of: F) -> Self
    where
        G: BaseGraph<Node = N> + ?Sized,
        F: FnMut(&N, &N) -> Option<V>,
    {
        let settings = GraphSettings {
            directed: graph.is_directed(),
            allows_self_loops: graph.allows_self_loops(),
            node_order: graph.node_order().frozen(),
            incident_edge_order: graph.incident_edge_order().frozen(),
        };
        let mut nodes = OrderedMap::with_capacity(settings.node_order.clone(), graph.node_count());

        for node in graph.nodes() {
            let mut connections =
                GraphConnections::new(settings.directed, &settings.incident_edge_order);
            if let GraphConnections::Directed { predecessors, .. } = &mut connections {
                for predecessor in graph.predecessors(node).into_iter().flatten() {
                    predecessors.insert(predecessor.clone(), ());
                }
            }
            for successor in graph.successors(node).into_iter().flatten() {
                if let Some(value) = value_of(node, successor) {
                    connections.add_successor(successor.clone(), value);
                }
            }
            nodes.insert(node.clone(), connections);
        }

        Self {
            settings,
            nodes,
            edge_count: graph.edge_count(),
        }
    }

    pub(crate) fn settings(&self) -> &GraphSettings<N> {
        &self.settings
    }

    pub(crate) fn is_directed(&self) -> bool {
        self.settings.directed
    }

    pub(crate) fn nodes(&self) -> SetView<'_, N> {
        SetView::live(&self.nodes)
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn connections(&self, node: &N) -> Result<&GraphConnections<N, V>> {
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

    pub(crate) fn has_edge_connecting(&self, node_u: &N, node_v: &N) -> bool {
        self.nodes
            .get(node_u)
            .map_or(false, |connections| connections.value(node_v).is_some())
    }

    pub(crate) fn edge_value(&self, node_u: &N, node_v: &N) -> Result<Option<&V>> {
        let connections = self.connections(node_u)?;
        if !self.nodes.contains_key(node_v) {
            return Err(GraphError::node_not_in_graph(node_v));
        }
        Ok(connections.value(node_v))
    }

    pub(crate) fn add_node(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        let connections =
            GraphConnections::new(self.settings.directed, &self.settings.incident_edge_order);
        self.nodes.insert(node, connections);
        true
    }

    /// Removes `node` together with its edges. A self-loop is counted as a
    /// single removed edge.
    pub(crate) fn remove_node(&mut self, node: &N) -> bool {
        let Some(connections) = self.nodes.remove(node) else {
            return false;
        };

        let mut removed = 0;
        for successor in connections.successors() {
            removed += 1;
            if successor != node {
                if let Some(neighbor) = self.nodes.get_mut(successor) {
                    neighbor.remove_predecessor(node);
                }
            }
        }
        if self.settings.directed {
            for predecessor in connections.predecessors() {
                if predecessor != node {
                    removed += 1;
                    if let Some(neighbor) = self.nodes.get_mut(predecessor) {
                        neighbor.remove_successor(node);
                    }
                }
            }
        }

        self.edge_count -= removed;
        trace!("removed node {:?} and {} incident edges", node, removed);
        true
    }

    pub(crate) fn remove_edge(&mut self, node_u: &N, node_v: &N) -> Option<V> {
        let previous = self.nodes.get_mut(node_u)?.remove_successor(node_v)?;
        if let Some(connections) = self.nodes.get_mut(node_v) {
            connections.remove_predecessor(node_u);
        }
        self.edge_count -= 1;
        Some(previous)
    }

    /// Fixes the observed iteration order and releases spare capacity.
    pub(crate) fn freeze(&mut self) {
        self.settings.node_order = self.settings.node_order.frozen();
        self.settings.incident_edge_order = self.settings.incident_edge_order.frozen();
        self.nodes.shrink_to_fit();
        for connections in self.nodes.values_mut() {
            connections.shrink_to_fit();
        }
    }
}

impl<N: Element, V: Clone> GraphCore<N, V> {
    /// Connects `node_u` to `node_v`, adding missing nodes first, and returns
    /// the value the edge carried before.
    pub(crate) fn put_edge_value(&mut self, node_u: N, node_v: N, value: V) -> Result<Option<V>> {
        if !self.settings.allows_self_loops && node_u == node_v {
            return Err(GraphError::self_loops_not_allowed(&node_u));
        }

        let directed = self.settings.directed;
        let order = &self.settings.incident_edge_order;
        let previous = self
            .nodes
            .get_or_insert_with(node_u.clone(), || GraphConnections::new(directed, order))
            .add_successor(node_v.clone(), value.clone());
        self.nodes
            .get_or_insert_with(node_v, || GraphConnections::new(directed, order))
            .add_predecessor(node_u, value);

        if previous.is_none() {
            self.edge_count += 1;
        }
        Ok(previous)
    }
}

pub(crate) mod macros {
    /// Implements [`Adjacency`](crate::traits::Adjacency) and
    /// [`BaseGraph`](crate::traits::BaseGraph) for a type holding a
    /// [`GraphCore`](super::GraphCore) in `$core`.
    macro_rules! delegate_base_graph {
        ($struct:ident<N $(, $generic:ident)*> => $core:ident) => {
            impl<N: $crate::element::Element $(, $generic)*> $crate::traits::Adjacency
                for $struct<N $(, $generic)*>
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

            impl<N: $crate::element::Element $(, $generic)*> $crate::traits::BaseGraph
                for $struct<N $(, $generic)*>
            {
                fn is_directed(&self) -> bool {
                    self.$core.is_directed()
                }

                fn allows_self_loops(&self) -> bool {
                    self.$core.settings().allows_self_loops
                }

                fn node_order(&self) -> $crate::order::ElementOrder<N> {
                    self.$core.settings().node_order.clone()
                }

                fn incident_edge_order(&self) -> $crate::order::ElementOrder<N> {
                    self.$core.settings().incident_edge_order.clone()
                }

                fn adjacent_nodes(&self, node: &N) -> $crate::error::Result<$crate::view::SetView<'_, N>> {
                    self.$core.adjacent_nodes(node)
                }

                fn node_count(&self) -> usize {
                    self.$core.node_count()
                }

                fn edge_count(&self) -> usize {
                    self.$core.edge_count()
                }

                fn has_edge_connecting(&self, node_u: &N, node_v: &N) -> bool {
                    self.$core.has_edge_connecting(node_u, node_v)
                }
            }
        };
    }

    pub(crate) use delegate_base_graph;
}

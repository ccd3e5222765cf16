//! Capability traits shared by every graph kind.
//!
//! Read access and mutation are separate capabilities:
//!
//! - [`Adjacency`] is the minimal read-only interface algorithms need:
//!   the node set plus successors and predecessors of a node.
//! - [`BaseGraph`] adds directedness, degrees and connectivity queries
//!   for graphs whose edges are node pairs. [`Graph`] and [`ValueGraph`]
//!   build on it.
//! - [`Network`] covers graphs whose edges are first-class values.
//! - The `Mutable*` traits add add/remove operations on top of the
//!   corresponding read trait. Immutable instances never implement them.
//!
//! Degree, edge enumeration and connectivity are default methods written
//! once against the primitive accessors, so every implementation agrees
//! on them.

use crate::as_graph::{AsGraph, NetworkAsGraph};
use crate::element::Element;
use crate::endpoint::EndpointPair;
use crate::error::{GraphError, Result};
use crate::order::ElementOrder;
use crate::view::SetView;
use std::collections::HashSet;

/// The minimal read-only adjacency interface.
///
/// Generic algorithms (traversals, reachability, ...) should depend on
/// this trait only, so they run over any graph kind and any backend.
pub trait Adjacency {
    type Node: Element;

    /// All nodes, in the graph's node order. Live view.
    fn nodes(&self) -> SetView<'_, Self::Node>;

    /// Nodes reachable from `node` by one outgoing edge (all adjacent
    /// nodes if undirected). Live view.
    fn successors(&self, node: &Self::Node) -> Result<SetView<'_, Self::Node>>;

    /// Nodes with an edge into `node` (all adjacent nodes if undirected).
    /// Live view.
    fn predecessors(&self, node: &Self::Node) -> Result<SetView<'_, Self::Node>>;
}

/// Read access common to [`Graph`] and [`ValueGraph`].
pub trait BaseGraph: Adjacency {
    fn is_directed(&self) -> bool;

    fn allows_self_loops(&self) -> bool;

    fn node_order(&self) -> ElementOrder<Self::Node>;

    /// Order of the sets reached from one node.
    fn incident_edge_order(&self) -> ElementOrder<Self::Node>;

    /// Predecessors and successors of `node`. Live view; for directed
    /// graphs it is the union of the two sets.
    fn adjacent_nodes(&self, node: &Self::Node) -> Result<SetView<'_, Self::Node>>;

    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    fn edge_count(&self) -> usize {
        // Every edge contributes two to the degree sum.
        let degree_sum: usize = self
            .nodes()
            .iter()
            .filter_map(|node| self.degree(node).ok())
            .sum();
        degree_sum / 2
    }

    /// All edges as endpoint pairs. Snapshot.
    fn edges(&self) -> Vec<EndpointPair<Self::Node>> {
        let directed = self.is_directed();
        let mut visited: HashSet<&Self::Node> = HashSet::new();
        let mut edges = Vec::new();

        for node in self.nodes() {
            for successor in self.successors(node).into_iter().flatten() {
                // An undirected edge is reported from whichever endpoint
                // is visited first.
                if directed || !visited.contains(&successor) {
                    edges.push(EndpointPair::of(directed, node.clone(), successor.clone()));
                }
            }
            if !directed {
                visited.insert(node);
            }
        }

        edges
    }

    /// Edges touching `node`, each reported once. Snapshot.
    fn incident_edges(&self, node: &Self::Node) -> Result<Vec<EndpointPair<Self::Node>>> {
        if self.is_directed() {
            let incoming = self
                .predecessors(node)?
                .into_iter()
                .map(|predecessor| EndpointPair::ordered(predecessor.clone(), node.clone()));
            let outgoing = self
                .successors(node)?
                .into_iter()
                .filter(|successor| *successor != node)
                .map(|successor| EndpointPair::ordered(node.clone(), successor.clone()));
            Ok(incoming.chain(outgoing).collect())
        } else {
            Ok(self
                .adjacent_nodes(node)?
                .into_iter()
                .map(|adjacent| EndpointPair::unordered(node.clone(), adjacent.clone()))
                .collect())
        }
    }

    /// Number of edge endpoints at `node`. A self-loop counts twice.
    fn degree(&self, node: &Self::Node) -> Result<usize> {
        if self.is_directed() {
            Ok(self.predecessors(node)?.len() + self.successors(node)?.len())
        } else {
            let adjacent = self.adjacent_nodes(node)?;
            Ok(adjacent.len() + usize::from(adjacent.contains(node)))
        }
    }

    /// Incoming edges of `node`; equal to the degree if undirected.
    fn in_degree(&self, node: &Self::Node) -> Result<usize> {
        if self.is_directed() {
            Ok(self.predecessors(node)?.len())
        } else {
            self.degree(node)
        }
    }

    /// Outgoing edges of `node`; equal to the degree if undirected.
    fn out_degree(&self, node: &Self::Node) -> Result<usize> {
        if self.is_directed() {
            Ok(self.successors(node)?.len())
        } else {
            self.degree(node)
        }
    }

    /// Whether an edge leads from `node_u` to `node_v` (or connects them,
    /// if undirected). Unknown nodes are simply not connected.
    fn has_edge_connecting(&self, node_u: &Self::Node, node_v: &Self::Node) -> bool {
        self.successors(node_u)
            .map(|successors| successors.contains(node_v))
            .unwrap_or(false)
    }

    /// Like [`has_edge_connecting`](Self::has_edge_connecting). Unordered
    /// endpoints never match in a directed graph.
    fn has_edge_connecting_endpoints(&self, endpoints: &EndpointPair<Self::Node>) -> bool {
        is_ordering_compatible(self.is_directed(), endpoints)
            && self.has_edge_connecting(endpoints.node_u(), endpoints.node_v())
    }
}

/// A graph whose edges are anonymous node pairs.
///
/// Two graphs are equal when they agree on directedness, node set and
/// edge set. Equality never depends on orders, policies or storage.
pub trait Graph: BaseGraph {}

/// A graph that attaches a value to every edge.
///
/// Two value graphs are equal when they are equal as graphs and every
/// edge carries equal values in both.
pub trait ValueGraph: BaseGraph {
    type Value;

    /// The value on the edge from `node_u` to `node_v`, if connected.
    /// Fails if either node is not in the graph.
    fn edge_value(&self, node_u: &Self::Node, node_v: &Self::Node)
        -> Result<Option<&Self::Value>>;

    /// The edge value, or `default` if there is no such edge. Never fails.
    fn edge_value_or_default<'a>(
        &'a self,
        node_u: &Self::Node,
        node_v: &Self::Node,
        default: &'a Self::Value,
    ) -> &'a Self::Value {
        self.edge_value(node_u, node_v)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    /// [`edge_value`](Self::edge_value) addressed by endpoint pair.
    fn edge_value_of(
        &self,
        endpoints: &EndpointPair<Self::Node>,
    ) -> Result<Option<&Self::Value>> {
        validate_endpoints(self.is_directed(), endpoints)?;
        self.edge_value(endpoints.node_u(), endpoints.node_v())
    }

    /// A structural view exposing only connectivity.
    fn as_graph(&self) -> AsGraph<'_, Self>
    where
        Self: Sized,
    {
        AsGraph::new(self)
    }
}

/// A graph whose edges are first-class values, possibly parallel.
///
/// Two networks are equal when they agree on directedness, node set and
/// edge set, and every edge connects the same endpoints in both.
pub trait Network: Adjacency {
    type Edge: Element;

    /// All edges, in the network's edge order. Live view.
    fn edges(&self) -> SetView<'_, Self::Edge>;

    fn is_directed(&self) -> bool;

    fn allows_parallel_edges(&self) -> bool;

    fn allows_self_loops(&self) -> bool;

    fn node_order(&self) -> ElementOrder<Self::Node>;

    fn edge_order(&self) -> ElementOrder<Self::Edge>;

    /// Predecessors and successors of `node`. Live view.
    fn adjacent_nodes(&self, node: &Self::Node) -> Result<SetView<'_, Self::Node>>;

    /// Edges touching `node`. Live view.
    fn incident_edges(&self, node: &Self::Node) -> Result<SetView<'_, Self::Edge>>;

    /// Edges ending at `node` (all incident edges if undirected). Live view.
    fn in_edges(&self, node: &Self::Node) -> Result<SetView<'_, Self::Edge>>;

    /// Edges starting at `node` (all incident edges if undirected). Live view.
    fn out_edges(&self, node: &Self::Node) -> Result<SetView<'_, Self::Edge>>;

    /// The endpoints of `edge`.
    fn incident_nodes(&self, edge: &Self::Edge) -> Result<EndpointPair<Self::Node>>;

    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Number of edge endpoints at `node`. A self-loop counts twice.
    fn degree(&self, node: &Self::Node) -> Result<usize> {
        if self.is_directed() {
            Ok(self.in_edges(node)?.len() + self.out_edges(node)?.len())
        } else {
            Ok(self.incident_edges(node)?.len() + self.edges_connecting(node, node)?.len())
        }
    }

    fn in_degree(&self, node: &Self::Node) -> Result<usize> {
        if self.is_directed() {
            Ok(self.in_edges(node)?.len())
        } else {
            self.degree(node)
        }
    }

    fn out_degree(&self, node: &Self::Node) -> Result<usize> {
        if self.is_directed() {
            Ok(self.out_edges(node)?.len())
        } else {
            self.degree(node)
        }
    }

    /// Edges sharing an endpoint with `edge`, excluding `edge` itself.
    /// Snapshot.
    fn adjacent_edges(&self, edge: &Self::Edge) -> Result<SetView<'_, Self::Edge>> {
        let endpoints = self.incident_nodes(edge)?;
        let around_u = self.incident_edges(endpoints.node_u())?;
        let around_v = self.incident_edges(endpoints.node_v())?;

        let mut seen = HashSet::new();
        let adjacent = around_u
            .into_iter()
            .chain(around_v)
            .filter(|candidate| *candidate != edge && seen.insert(*candidate))
            .collect();
        Ok(SetView::from_items(adjacent))
    }

    /// Edges from `node_u` to `node_v` (connecting them, if undirected).
    /// Snapshot.
    fn edges_connecting(
        &self,
        node_u: &Self::Node,
        node_v: &Self::Node,
    ) -> Result<SetView<'_, Self::Edge>> {
        let out_edges = self.out_edges(node_u)?;
        if !self.nodes().contains(node_v) {
            return Err(GraphError::node_not_in_graph(node_v));
        }
        let connecting = out_edges
            .into_iter()
            .filter(|edge| {
                self.incident_nodes(edge)
                    .map_or(false, |endpoints| endpoints.adjacent_node(node_u) == Some(node_v))
            })
            .collect();
        Ok(SetView::from_items(connecting))
    }

    /// [`edges_connecting`](Self::edges_connecting) addressed by endpoint pair.
    fn edges_connecting_endpoints(
        &self,
        endpoints: &EndpointPair<Self::Node>,
    ) -> Result<SetView<'_, Self::Edge>> {
        validate_endpoints(self.is_directed(), endpoints)?;
        self.edges_connecting(endpoints.node_u(), endpoints.node_v())
    }

    /// The single edge from `node_u` to `node_v`, if any.
    ///
    /// Fails with [`GraphError::AmbiguousEdge`] when parallel edges
    /// connect the two nodes.
    fn edge_connecting(
        &self,
        node_u: &Self::Node,
        node_v: &Self::Node,
    ) -> Result<Option<&Self::Edge>> {
        let connecting = self.edges_connecting(node_u, node_v)?;
        match connecting.len() {
            0 => Ok(None),
            1 => Ok(connecting.iter().next()),
            count => Err(GraphError::ambiguous_edge(node_u, node_v, count)),
        }
    }

    /// The single connecting edge, or `default` if there is none.
    fn edge_connecting_or_default<'a>(
        &'a self,
        node_u: &Self::Node,
        node_v: &Self::Node,
        default: &'a Self::Edge,
    ) -> Result<&'a Self::Edge> {
        Ok(self.edge_connecting(node_u, node_v)?.unwrap_or(default))
    }

    fn has_edge_connecting(&self, node_u: &Self::Node, node_v: &Self::Node) -> bool {
        self.successors(node_u)
            .map(|successors| successors.contains(node_v))
            .unwrap_or(false)
    }

    fn has_edge_connecting_endpoints(&self, endpoints: &EndpointPair<Self::Node>) -> bool {
        is_ordering_compatible(self.is_directed(), endpoints)
            && self.has_edge_connecting(endpoints.node_u(), endpoints.node_v())
    }

    /// A structural view in which parallel edges collapse into one
    /// connection.
    fn as_graph(&self) -> NetworkAsGraph<'_, Self>
    where
        Self: Sized,
    {
        NetworkAsGraph::new(self)
    }
}

/// A [`Graph`] that can be changed after construction.
pub trait MutableGraph: Graph {
    /// Adds an isolated node. Returns `false` if it was already present.
    fn add_node(&mut self, node: Self::Node) -> bool;

    /// Connects `node_u` to `node_v`, adding either node if needed.
    ///
    /// Returns `false` if the edge already existed. Fails without changing
    /// anything if the edge is a disallowed self-loop.
    fn put_edge(&mut self, node_u: Self::Node, node_v: Self::Node) -> Result<bool>;

    fn put_edge_endpoints(&mut self, endpoints: EndpointPair<Self::Node>) -> Result<bool> {
        validate_endpoints(self.is_directed(), &endpoints)?;
        let (node_u, node_v) = endpoints.into_nodes();
        self.put_edge(node_u, node_v)
    }

    /// Removes `node` and every edge touching it.
    fn remove_node(&mut self, node: &Self::Node) -> bool;

    /// Removes the edge from `node_u` to `node_v`; the nodes stay.
    fn remove_edge(&mut self, node_u: &Self::Node, node_v: &Self::Node) -> bool;

    fn remove_edge_endpoints(&mut self, endpoints: &EndpointPair<Self::Node>) -> bool {
        is_ordering_compatible(self.is_directed(), endpoints)
            && self.remove_edge(endpoints.node_u(), endpoints.node_v())
    }
}

/// A [`ValueGraph`] that can be changed after construction.
pub trait MutableValueGraph: ValueGraph {
    fn add_node(&mut self, node: Self::Node) -> bool;

    /// Connects the nodes (adding them if needed) and sets the edge value.
    /// Returns the value it replaced, if any.
    fn put_edge_value(
        &mut self,
        node_u: Self::Node,
        node_v: Self::Node,
        value: Self::Value,
    ) -> Result<Option<Self::Value>>;

    fn put_edge_value_endpoints(
        &mut self,
        endpoints: EndpointPair<Self::Node>,
        value: Self::Value,
    ) -> Result<Option<Self::Value>> {
        validate_endpoints(self.is_directed(), &endpoints)?;
        let (node_u, node_v) = endpoints.into_nodes();
        self.put_edge_value(node_u, node_v, value)
    }

    fn remove_node(&mut self, node: &Self::Node) -> bool;

    /// Removes the edge and returns its value.
    fn remove_edge(&mut self, node_u: &Self::Node, node_v: &Self::Node) -> Option<Self::Value>;

    fn remove_edge_endpoints(
        &mut self,
        endpoints: &EndpointPair<Self::Node>,
    ) -> Option<Self::Value> {
        if !is_ordering_compatible(self.is_directed(), endpoints) {
            return None;
        }
        self.remove_edge(endpoints.node_u(), endpoints.node_v())
    }
}

/// A [`Network`] that can be changed after construction.
pub trait MutableNetwork: Network {
    fn add_node(&mut self, node: Self::Node) -> bool;

    /// Adds `edge` connecting `node_u` to `node_v`, adding either node if
    /// needed.
    ///
    /// Returns `false` if `edge` already connects exactly these endpoints.
    /// Fails without changing anything if `edge` connects other endpoints,
    /// if it would be a disallowed parallel edge, or a disallowed self-loop.
    fn add_edge(
        &mut self,
        edge: Self::Edge,
        node_u: Self::Node,
        node_v: Self::Node,
    ) -> Result<bool>;

    fn add_edge_endpoints(
        &mut self,
        edge: Self::Edge,
        endpoints: EndpointPair<Self::Node>,
    ) -> Result<bool> {
        validate_endpoints(self.is_directed(), &endpoints)?;
        let (node_u, node_v) = endpoints.into_nodes();
        self.add_edge(edge, node_u, node_v)
    }

    /// Removes `node` and every edge touching it.
    fn remove_node(&mut self, node: &Self::Node) -> bool;

    /// Removes `edge`. Unknown edges are ignored and yield `false`.
    fn remove_edge(&mut self, edge: &Self::Edge) -> bool;
}

/// Unordered endpoints cannot address edges of a directed graph.
pub(crate) fn is_ordering_compatible<N>(directed: bool, endpoints: &EndpointPair<N>) -> bool {
    endpoints.is_ordered() || !directed
}

pub(crate) fn validate_endpoints<N>(directed: bool, endpoints: &EndpointPair<N>) -> Result<()> {
    if is_ordering_compatible(directed, endpoints) {
        Ok(())
    } else {
        Err(GraphError::EndpointsMismatch)
    }
}

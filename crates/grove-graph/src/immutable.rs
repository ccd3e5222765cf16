//! Immutable graphs.
//!
//! An immutable instance is built once and never changes: it implements
//! the read traits only, so there is no mutation method to call. Because
//! nothing can change, instances are safe to share across threads without
//! synchronization whenever their elements are.
//!
//! There are three ways to obtain one:
//!
//! - `copy_of(&source)` rebuilds any graph of the same kind, preserving
//!   its node order and the order of every neighbor set.
//! - `From<Standard*>` freezes a mutable instance in place, compacting its
//!   storage.
//! - An `Immutable*Builder`, obtained from a builder's `immutable()`
//!   method, collects nodes and edges and freezes them on `build()`.
//!
//! A source whose order is `Unordered` is reported as `Insertion` once
//! frozen, because its observed order is now fixed.

use crate::element::Element;
use crate::endpoint::EndpointPair;
use crate::equality::{
    graphs_equal, hash_graph, hash_network, hash_value_graph, networks_equal, value_graphs_equal,
};
use crate::error::Result;
use crate::format::{fmt_graph, fmt_network, fmt_value_graph, impl_graph_fmt};
use crate::graph::StandardGraph;
use crate::graph_core::GraphCore;
use crate::graph_core::macros::delegate_base_graph;
use crate::network::macros::delegate_network;
use crate::network::{NetworkCore, StandardNetwork};
use crate::traits::{
    Graph, MutableGraph, MutableNetwork, MutableValueGraph, Network, ValueGraph,
};
use crate::value_graph::StandardValueGraph;
use std::hash::{Hash, Hasher};
use tracing::debug;

mod private {
    pub trait Sealed {}
}

/// Marker for graph types whose contents can never change.
///
/// This trait is sealed: only the three immutable types of this crate
/// implement it, so code bounded by `Immutable` can rely on it.
pub trait Immutable: private::Sealed + Send + Sync {}

fn describe(directed: bool) -> &'static str {
    if directed {
        "directed"
    } else {
        "undirected"
    }
}

/// A [`Graph`] that never changes.
#[derive(Clone)]
pub struct ImmutableGraph<N> {
    core: GraphCore<N, ()>,
}

impl<N: Element> ImmutableGraph<N> {
    /// An immutable copy of `graph`.
    pub fn copy_of<G>(graph: &G) -> Self
    where
        G: Graph<Node = N> + ?Sized,
    {
        Self::frozen(GraphCore::copy_from(graph, |_, _| Some(())))
    }

    fn frozen(core: GraphCore<N, ()>) -> Self {
        debug!(
            "froze {} graph with {} nodes and {} edges",
            describe(core.is_directed()),
            core.node_count(),
            core.edge_count()
        );
        Self { core }
    }
}

impl<N: Element> From<StandardGraph<N>> for ImmutableGraph<N> {
    fn from(graph: StandardGraph<N>) -> Self {
        let mut core = graph.into_core();
        core.freeze();
        Self::frozen(core)
    }
}

delegate_base_graph!(ImmutableGraph<N> => core);

impl<N: Element> Graph for ImmutableGraph<N> {}

impl<N: Element + Send + Sync> private::Sealed for ImmutableGraph<N> {}
impl<N: Element + Send + Sync> Immutable for ImmutableGraph<N> {}

impl<N: Element, G: Graph<Node = N> + ?Sized> PartialEq<G> for ImmutableGraph<N> {
    fn eq(&self, other: &G) -> bool {
        graphs_equal(self, other)
    }
}

impl<N: Element> Eq for ImmutableGraph<N> {}

impl<N: Element> Hash for ImmutableGraph<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_graph(self, state);
    }
}

impl_graph_fmt!(fmt_graph => ImmutableGraph<N>);

/// A [`ValueGraph`] that never changes.
#[derive(Clone)]
pub struct ImmutableValueGraph<N, V> {
    core: GraphCore<N, V>,
}

impl<N: Element, V: Clone> ImmutableValueGraph<N, V> {
    /// An immutable copy of `graph`, cloning every edge value.
    pub fn copy_of<G>(graph: &G) -> Self
    where
        G: ValueGraph<Node = N, Value = V> + ?Sized,
    {
        let core = GraphCore::copy_from(graph, |node_u, node_v| {
            graph.edge_value(node_u, node_v).ok().flatten().cloned()
        });
        Self::frozen(core)
    }
}

impl<N: Element, V> ImmutableValueGraph<N, V> {
    fn frozen(core: GraphCore<N, V>) -> Self {
        debug!(
            "froze {} value graph with {} nodes and {} edges",
            describe(core.is_directed()),
            core.node_count(),
            core.edge_count()
        );
        Self { core }
    }
}

impl<N: Element, V> From<StandardValueGraph<N, V>> for ImmutableValueGraph<N, V> {
    fn from(graph: StandardValueGraph<N, V>) -> Self {
        let mut core = graph.into_core();
        core.freeze();
        Self::frozen(core)
    }
}

delegate_base_graph!(ImmutableValueGraph<N, V> => core);

impl<N: Element, V> ValueGraph for ImmutableValueGraph<N, V> {
    type Value = V;

    fn edge_value(&self, node_u: &N, node_v: &N) -> Result<Option<&V>> {
        self.core.edge_value(node_u, node_v)
    }
}

impl<N: Element + Send + Sync, V: Send + Sync> private::Sealed for ImmutableValueGraph<N, V> {}
impl<N: Element + Send + Sync, V: Send + Sync> Immutable for ImmutableValueGraph<N, V> {}

impl<N, V, G> PartialEq<G> for ImmutableValueGraph<N, V>
where
    N: Element,
    V: PartialEq,
    G: ValueGraph<Node = N, Value = V> + ?Sized,
{
    fn eq(&self, other: &G) -> bool {
        value_graphs_equal(self, other)
    }
}

impl<N: Element, V: Eq> Eq for ImmutableValueGraph<N, V> {}

impl<N: Element, V: Hash> Hash for ImmutableValueGraph<N, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value_graph(self, state);
    }
}

impl_graph_fmt!(fmt_value_graph => ImmutableValueGraph<N, V> where V: std::fmt::Debug);

/// A [`Network`] that never changes.
#[derive(Clone)]
pub struct ImmutableNetwork<N, E> {
    core: NetworkCore<N, E>,
}

impl<N: Element, E: Element> ImmutableNetwork<N, E> {
    /// An immutable copy of `network`.
    pub fn copy_of<G>(network: &G) -> Self
    where
        G: Network<Node = N, Edge = E> + ?Sized,
    {
        Self::frozen(NetworkCore::copy_from(network))
    }

    fn frozen(core: NetworkCore<N, E>) -> Self {
        debug!(
            "froze {} network with {} nodes and {} edges",
            describe(core.settings().directed),
            core.node_count(),
            core.edge_count()
        );
        Self { core }
    }
}

impl<N: Element, E: Element> From<StandardNetwork<N, E>> for ImmutableNetwork<N, E> {
    fn from(network: StandardNetwork<N, E>) -> Self {
        let mut core = network.into_core();
        core.freeze();
        Self::frozen(core)
    }
}

delegate_network!(ImmutableNetwork<N, E> => core);

impl<N: Element + Send + Sync, E: Element + Send + Sync> private::Sealed for ImmutableNetwork<N, E> {}
impl<N: Element + Send + Sync, E: Element + Send + Sync> Immutable for ImmutableNetwork<N, E> {}

impl<N, E, G> PartialEq<G> for ImmutableNetwork<N, E>
where
    N: Element,
    E: Element,
    G: Network<Node = N, Edge = E> + ?Sized,
{
    fn eq(&self, other: &G) -> bool {
        networks_equal(self, other)
    }
}

impl<N: Element, E: Element> Eq for ImmutableNetwork<N, E> {}

impl<N: Element, E: Element> Hash for ImmutableNetwork<N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_network(self, state);
    }
}

impl_graph_fmt!(fmt_network => ImmutableNetwork<N, E> where E: Element);

/// Collects nodes and edges for an [`ImmutableGraph`].
///
/// Obtained from [`GraphBuilder::immutable`](crate::GraphBuilder::immutable).
pub struct ImmutableGraphBuilder<N> {
    graph: StandardGraph<N>,
}

impl<N: Element> ImmutableGraphBuilder<N> {
    pub(crate) fn new(graph: StandardGraph<N>) -> Self {
        Self { graph }
    }

    /// Adds `node` if absent.
    pub fn add_node(&mut self, node: N) -> &mut Self {
        self.graph.add_node(node);
        self
    }

    /// Adds an edge, adding missing endpoints first.
    pub fn put_edge(&mut self, node_u: N, node_v: N) -> Result<&mut Self> {
        self.graph.put_edge(node_u, node_v)?;
        Ok(self)
    }

    /// Like [`put_edge`](Self::put_edge) for an endpoint pair.
    pub fn put_edge_endpoints(&mut self, endpoints: EndpointPair<N>) -> Result<&mut Self> {
        self.graph.put_edge_endpoints(endpoints)?;
        Ok(self)
    }

    /// Freezes what has been collected so far. The builder can keep going
    /// and build again.
    pub fn build(&self) -> ImmutableGraph<N> {
        ImmutableGraph::copy_of(&self.graph)
    }
}

/// Collects nodes and edges for an [`ImmutableValueGraph`].
pub struct ImmutableValueGraphBuilder<N, V> {
    graph: StandardValueGraph<N, V>,
}

impl<N: Element, V: Clone> ImmutableValueGraphBuilder<N, V> {
    pub(crate) fn new(graph: StandardValueGraph<N, V>) -> Self {
        Self { graph }
    }

    /// Adds `node` if absent.
    pub fn add_node(&mut self, node: N) -> &mut Self {
        self.graph.add_node(node);
        self
    }

    /// Connects two nodes with `value`, replacing any previous value.
    pub fn put_edge_value(&mut self, node_u: N, node_v: N, value: V) -> Result<&mut Self> {
        self.graph.put_edge_value(node_u, node_v, value)?;
        Ok(self)
    }

    /// Like [`put_edge_value`](Self::put_edge_value) for an endpoint pair.
    pub fn put_edge_value_endpoints(
        &mut self,
        endpoints: EndpointPair<N>,
        value: V,
    ) -> Result<&mut Self> {
        self.graph.put_edge_value_endpoints(endpoints, value)?;
        Ok(self)
    }

    /// Freezes what has been collected so far.
    pub fn build(&self) -> ImmutableValueGraph<N, V> {
        ImmutableValueGraph::copy_of(&self.graph)
    }
}

/// Collects nodes and edges for an [`ImmutableNetwork`].
pub struct ImmutableNetworkBuilder<N, E> {
    network: StandardNetwork<N, E>,
}

impl<N: Element, E: Element> ImmutableNetworkBuilder<N, E> {
    pub(crate) fn new(network: StandardNetwork<N, E>) -> Self {
        Self { network }
    }

    /// Adds `node` if absent.
    pub fn add_node(&mut self, node: N) -> &mut Self {
        self.network.add_node(node);
        self
    }

    /// Adds `edge` between two nodes, adding missing endpoints first.
    pub fn add_edge(&mut self, edge: E, node_u: N, node_v: N) -> Result<&mut Self> {
        self.network.add_edge(edge, node_u, node_v)?;
        Ok(self)
    }

    /// Like [`add_edge`](Self::add_edge) for an endpoint pair.
    pub fn add_edge_endpoints(&mut self, edge: E, endpoints: EndpointPair<N>) -> Result<&mut Self> {
        self.network.add_edge_endpoints(edge, endpoints)?;
        Ok(self)
    }

    /// Freezes what has been collected so far.
    pub fn build(&self) -> ImmutableNetwork<N, E> {
        ImmutableNetwork::copy_of(&self.network)
    }
}

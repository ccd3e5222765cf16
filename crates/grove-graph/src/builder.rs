//! Builders: the configuration layer for every graph kind.
//!
//! A builder collects hard constraints (directedness, self-loops, parallel
//! edges), iteration orders and size hints, then produces independent
//! instances on every [`build`](GraphBuilder::build) call. The serializable
//! parts of a configuration, [`Constraints`] and [`SizeHints`], can be
//! loaded from JSON or TOML by callers and fed back into a builder.
//!
//! ```
//! use grove_graph::prelude::*;
//!
//! let mut graph = GraphBuilder::undirected()
//!     .allows_self_loops(true)
//!     .node_order(ElementOrder::natural())
//!     .build();
//! graph.put_edge(2, 1).unwrap();
//! assert_eq!(graph.nodes().to_vec(), vec![1, 2]);
//! ```

use crate::element::Element;
use crate::graph::StandardGraph;
use crate::graph_core::{GraphCore, GraphSettings};
use crate::immutable::{ImmutableGraphBuilder, ImmutableNetworkBuilder, ImmutableValueGraphBuilder};
use crate::network::{NetworkCore, NetworkSettings, StandardNetwork};
use crate::order::ElementOrder;
use crate::traits::{BaseGraph, Network};
use crate::value_graph::StandardValueGraph;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::trace;

/// Hard constraints every instance of a builder obeys.
///
/// `allows_parallel_edges` only applies to networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub directed: bool,
    pub allows_self_loops: bool,
    pub allows_parallel_edges: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self::directed()
    }
}

impl Constraints {
    /// Directed, no self-loops, no parallel edges.
    pub fn directed() -> Self {
        Self {
            directed: true,
            allows_self_loops: false,
            allows_parallel_edges: false,
        }
    }

    /// Undirected, no self-loops, no parallel edges.
    pub fn undirected() -> Self {
        Self {
            directed: false,
            ..Self::directed()
        }
    }
}

/// Expected sizes, used to pre-allocate storage.
///
/// Hints never change behavior; instances grow past them as needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeHints {
    pub expected_node_count: Option<usize>,
    pub expected_edge_count: Option<usize>,
}

fn describe(directed: bool) -> &'static str {
    if directed {
        "directed"
    } else {
        "undirected"
    }
}

/// Builds [`StandardGraph`]s and [`ImmutableGraph`](crate::ImmutableGraph)s.
#[derive(Debug, Clone)]
pub struct GraphBuilder<N> {
    constraints: Constraints,
    node_order: ElementOrder<N>,
    incident_edge_order: ElementOrder<N>,
    hints: SizeHints,
}

impl<N: Element> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::directed()
    }
}

impl<N: Element> GraphBuilder<N> {
    /// Creates a builder for directed graphs.
    pub fn directed() -> Self {
        Self::from_constraints(Constraints::directed())
    }

    /// Creates a builder for undirected graphs.
    pub fn undirected() -> Self {
        Self::from_constraints(Constraints::undirected())
    }

    /// A builder with the given constraints and default orders: nodes in
    /// insertion order, neighbors unordered.
    pub fn from_constraints(constraints: Constraints) -> Self {
        Self {
            constraints,
            node_order: ElementOrder::insertion(),
            incident_edge_order: ElementOrder::unordered(),
            hints: SizeHints::default(),
        }
    }

    /// A builder configured like `graph`: same directedness, self-loop
    /// policy and orders. Size hints are not copied.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: BaseGraph<Node = N> + ?Sized,
    {
        Self {
            constraints: Constraints {
                directed: graph.is_directed(),
                allows_self_loops: graph.allows_self_loops(),
                allows_parallel_edges: false,
            },
            node_order: graph.node_order(),
            incident_edge_order: graph.incident_edge_order(),
            hints: SizeHints::default(),
        }
    }

    /// Whether an edge may connect a node to itself. Defaults to false.
    pub fn allows_self_loops(mut self, allowed: bool) -> Self {
        self.constraints.allows_self_loops = allowed;
        self
    }

    /// Order of the node set. Defaults to insertion order.
    pub fn node_order(mut self, order: ElementOrder<N>) -> Self {
        self.node_order = order;
        self
    }

    /// Order of successor, predecessor and adjacent-node sets.
    pub fn incident_edge_order(mut self, order: ElementOrder<N>) -> Self {
        self.incident_edge_order = order;
        self
    }

    /// Reserves room for `count` nodes up front.
    pub fn expected_node_count(mut self, count: usize) -> Self {
        self.hints.expected_node_count = Some(count);
        self
    }

    /// Replaces the size hints. `expected_edge_count` is ignored, since
    /// edges of a graph are not stored apart from their nodes.
    pub fn size_hints(mut self, hints: SizeHints) -> Self {
        self.hints = hints;
        self
    }

    /// The structural constraints configured so far.
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    pub(crate) fn settings(&self) -> GraphSettings<N> {
        GraphSettings {
            directed: self.constraints.directed,
            allows_self_loops: self.constraints.allows_self_loops,
            node_order: self.node_order.clone(),
            incident_edge_order: self.incident_edge_order.clone(),
        }
    }

    /// A new, empty mutable graph. Every call returns an independent instance.
    pub fn build(&self) -> StandardGraph<N> {
        trace!("building {} graph", describe(self.constraints.directed));
        let expected = self.hints.expected_node_count.unwrap_or_default();
        StandardGraph::from_core(GraphCore::new(self.settings(), expected))
    }

    /// A builder for immutable graphs with this configuration. An
    /// unordered neighbor policy becomes insertion order.
    pub fn immutable(&self) -> ImmutableGraphBuilder<N> {
        let stable = self.clone().incident_edge_order(self.incident_edge_order.frozen());
        ImmutableGraphBuilder::new(stable.build())
    }
}

/// Builds [`StandardValueGraph`]s and
/// [`ImmutableValueGraph`](crate::ImmutableValueGraph)s.
#[derive(Debug, Clone)]
pub struct ValueGraphBuilder<N, V> {
    constraints: Constraints,
    node_order: ElementOrder<N>,
    incident_edge_order: ElementOrder<N>,
    hints: SizeHints,
    value: PhantomData<fn() -> V>,
}

impl<N: Element, V> Default for ValueGraphBuilder<N, V> {
    fn default() -> Self {
        Self::directed()
    }
}

impl<N: Element, V> ValueGraphBuilder<N, V> {
    /// Creates a builder for directed value graphs.
    pub fn directed() -> Self {
        Self::from_constraints(Constraints::directed())
    }

    /// Creates a builder for undirected value graphs.
    pub fn undirected() -> Self {
        Self::from_constraints(Constraints::undirected())
    }

    /// A builder with the given constraints and default orders: nodes in
    /// insertion order, neighbors unordered. Parallel edges are ignored.
    pub fn from_constraints(constraints: Constraints) -> Self {
        Self {
            constraints,
            node_order: ElementOrder::insertion(),
            incident_edge_order: ElementOrder::unordered(),
            hints: SizeHints::default(),
            value: PhantomData,
        }
    }

    /// A builder configured like `graph`. The value type may differ.
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: BaseGraph<Node = N> + ?Sized,
    {
        let GraphBuilder {
            constraints,
            node_order,
            incident_edge_order,
            hints,
        } = GraphBuilder::from_graph(graph);
        Self {
            constraints,
            node_order,
            incident_edge_order,
            hints,
            value: PhantomData,
        }
    }

    /// Whether an edge may connect a node to itself. Defaults to false.
    pub fn allows_self_loops(mut self, allowed: bool) -> Self {
        self.constraints.allows_self_loops = allowed;
        self
    }

    /// Order of the node set. Defaults to insertion order.
    pub fn node_order(mut self, order: ElementOrder<N>) -> Self {
        self.node_order = order;
        self
    }

    /// Order of successor, predecessor and adjacent-node sets.
    pub fn incident_edge_order(mut self, order: ElementOrder<N>) -> Self {
        self.incident_edge_order = order;
        self
    }

    /// Reserves room for `count` nodes up front.
    pub fn expected_node_count(mut self, count: usize) -> Self {
        self.hints.expected_node_count = Some(count);
        self
    }

    /// Replaces the size hints. `expected_edge_count` is ignored, since
    /// edge values live in the adjacency of their nodes.
    pub fn size_hints(mut self, hints: SizeHints) -> Self {
        self.hints = hints;
        self
    }

    /// The structural constraints configured so far.
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    fn settings(&self) -> GraphSettings<N> {
        GraphSettings {
            directed: self.constraints.directed,
            allows_self_loops: self.constraints.allows_self_loops,
            node_order: self.node_order.clone(),
            incident_edge_order: self.incident_edge_order.clone(),
        }
    }

    /// A new, empty mutable value graph. Every call returns an independent
    /// instance.
    pub fn build(&self) -> StandardValueGraph<N, V> {
        trace!("building {} value graph", describe(self.constraints.directed));
        let expected = self.hints.expected_node_count.unwrap_or_default();
        StandardValueGraph::from_core(GraphCore::new(self.settings(), expected))
    }

    /// A builder for immutable value graphs with this configuration. An
    /// unordered neighbor policy becomes insertion order.
    pub fn immutable(&self) -> ImmutableValueGraphBuilder<N, V>
    where
        V: Clone,
    {
        let stable = self.clone().incident_edge_order(self.incident_edge_order.frozen());
        ImmutableValueGraphBuilder::new(stable.build())
    }
}

/// Builds [`StandardNetwork`]s and [`ImmutableNetwork`](crate::ImmutableNetwork)s.
#[derive(Debug, Clone)]
pub struct NetworkBuilder<N, E> {
    constraints: Constraints,
    node_order: ElementOrder<N>,
    edge_order: ElementOrder<E>,
    hints: SizeHints,
}

impl<N: Element, E: Element> Default for NetworkBuilder<N, E> {
    fn default() -> Self {
        Self::directed()
    }
}

impl<N: Element, E: Element> NetworkBuilder<N, E> {
    /// Creates a builder for directed networks.
    pub fn directed() -> Self {
        Self::from_constraints(Constraints::directed())
    }

    /// Creates a builder for undirected networks.
    pub fn undirected() -> Self {
        Self::from_constraints(Constraints::undirected())
    }

    /// A builder with the given constraints; nodes and edges are kept in
    /// insertion order.
    pub fn from_constraints(constraints: Constraints) -> Self {
        Self {
            constraints,
            node_order: ElementOrder::insertion(),
            edge_order: ElementOrder::insertion(),
            hints: SizeHints::default(),
        }
    }

    /// A builder configured like `network`: same directedness, edge
    /// policies and orders. Size hints are not copied.
    pub fn from_network<G>(network: &G) -> Self
    where
        G: Network<Node = N, Edge = E> + ?Sized,
    {
        Self {
            constraints: Constraints {
                directed: network.is_directed(),
                allows_self_loops: network.allows_self_loops(),
                allows_parallel_edges: network.allows_parallel_edges(),
            },
            node_order: network.node_order(),
            edge_order: network.edge_order(),
            hints: SizeHints::default(),
        }
    }

    /// Whether two edges may connect the same ordered pair of nodes.
    /// Defaults to false.
    pub fn allows_parallel_edges(mut self, allowed: bool) -> Self {
        self.constraints.allows_parallel_edges = allowed;
        self
    }

    /// Whether an edge may connect a node to itself. Defaults to false.
    pub fn allows_self_loops(mut self, allowed: bool) -> Self {
        self.constraints.allows_self_loops = allowed;
        self
    }

    /// Order of the node set. Defaults to insertion order.
    pub fn node_order(mut self, order: ElementOrder<N>) -> Self {
        self.node_order = order;
        self
    }

    /// Order of the edge set and of each node's incident edges.
    pub fn edge_order(mut self, order: ElementOrder<E>) -> Self {
        self.edge_order = order;
        self
    }

    /// Reserves room for `count` nodes up front.
    pub fn expected_node_count(mut self, count: usize) -> Self {
        self.hints.expected_node_count = Some(count);
        self
    }

    /// Reserves room for `count` edges up front.
    pub fn expected_edge_count(mut self, count: usize) -> Self {
        self.hints.expected_edge_count = Some(count);
        self
    }

    /// Replaces both node and edge size hints.
    pub fn size_hints(mut self, hints: SizeHints) -> Self {
        self.hints = hints;
        self
    }

    /// The structural constraints configured so far.
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    fn settings(&self) -> NetworkSettings<N, E> {
        NetworkSettings {
            directed: self.constraints.directed,
            allows_parallel_edges: self.constraints.allows_parallel_edges,
            allows_self_loops: self.constraints.allows_self_loops,
            node_order: self.node_order.clone(),
            edge_order: self.edge_order.clone(),
        }
    }

    /// A new, empty mutable network. Every call returns an independent
    /// instance.
    pub fn build(&self) -> StandardNetwork<N, E> {
        trace!(
            "building {} network (parallel edges: {})",
            describe(self.constraints.directed),
            self.constraints.allows_parallel_edges
        );
        let core = NetworkCore::new(
            self.settings(),
            self.hints.expected_node_count.unwrap_or_default(),
            self.hints.expected_edge_count.unwrap_or_default(),
        );
        StandardNetwork::from_core(core)
    }

    /// A builder for immutable networks with this configuration. An
    /// unordered edge policy becomes insertion order.
    pub fn immutable(&self) -> ImmutableNetworkBuilder<N, E> {
        let stable = self.clone().edge_order(self.edge_order.frozen());
        ImmutableNetworkBuilder::new(stable.build())
    }
}

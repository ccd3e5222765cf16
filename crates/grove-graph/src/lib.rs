//! Grove Graph - general-purpose graph abstractions
//!
//! This crate models graphs whose nodes (and, for networks, edges) are
//! arbitrary caller-supplied values. It offers three graph kinds behind
//! capability traits:
//!
//! - [`Graph`]: edges are anonymous node pairs.
//! - [`ValueGraph`]: every edge carries a value.
//! - [`Network`]: edges are first-class values; parallel edges optional.
//!
//! Each kind comes in a mutable flavor built by a builder and an immutable
//! flavor that is safe to share across threads. Algorithms should be
//! written against the narrowest trait they need, usually [`Adjacency`].
//!
//! # Architecture
//!
//! Every node owns an adjacency record stored in a hash map that also
//! tracks the configured [`ElementOrder`], so adding and removing stay
//! O(1) amortized (O(log n) for sorted orders). Accessors return
//! [`SetView`]s that borrow the graph, so a view can never observe a
//! mutation in progress.
//!
//! # Example
//!
//! ```
//! use grove_graph::prelude::*;
//!
//! let mut roads = ValueGraphBuilder::undirected().build();
//! roads.put_edge_value("Oslo", "Bergen", 463).unwrap();
//! roads.put_edge_value("Oslo", "Trondheim", 494).unwrap();
//!
//! assert_eq!(roads.degree(&"Oslo").unwrap(), 2);
//! assert_eq!(roads.edge_value(&"Bergen", &"Oslo").unwrap(), Some(&463));
//!
//! let frozen = ImmutableValueGraph::copy_of(&roads);
//! assert_eq!(frozen, roads);
//! ```

mod as_graph;
mod builder;
mod connections;
mod element;
mod endpoint;
mod equality;
mod error;
mod export;
mod format;
mod graph;
mod graph_core;
mod immutable;
mod network;
mod order;
mod store;
mod traits;
mod transform;
mod value_graph;
mod view;

pub use as_graph::{AsGraph, NetworkAsGraph};
pub use builder::{Constraints, GraphBuilder, NetworkBuilder, SizeHints, ValueGraphBuilder};
pub use element::Element;
pub use endpoint::EndpointPair;
pub use equality::{graphs_equal, networks_equal, value_graphs_equal};
pub use error::{GraphError, Result};
pub use export::{export_graph, export_network, export_value_graph, Exported};
pub use graph::StandardGraph;
pub use immutable::{
    Immutable, ImmutableGraph, ImmutableGraphBuilder, ImmutableNetwork, ImmutableNetworkBuilder,
    ImmutableValueGraph, ImmutableValueGraphBuilder,
};
pub use network::StandardNetwork;
pub use order::{Comparator, ElementOrder, OrderKind};
pub use traits::{
    Adjacency, BaseGraph, Graph, MutableGraph, MutableNetwork, MutableValueGraph, Network,
    ValueGraph,
};
pub use transform::{
    induced_subgraph, induced_subnetwork, induced_value_subgraph, transpose, Transposed,
};
pub use value_graph::StandardValueGraph;
pub use view::{Iter, SetView};

/// The traits, builders and types most callers need.
pub mod prelude {
    pub use crate::{
        Adjacency, BaseGraph, ElementOrder, EndpointPair, Graph, GraphBuilder, ImmutableGraph,
        ImmutableNetwork, ImmutableValueGraph, MutableGraph, MutableNetwork, MutableValueGraph,
        Network, NetworkBuilder, ValueGraph, ValueGraphBuilder,
    };
}

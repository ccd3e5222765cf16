//! Error types for graph operations.
//!
//! Elements are rendered with their `Debug` form so that the error type
//! does not carry the node or edge type parameters around.

use std::fmt::Debug;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Everything that can go wrong when querying or mutating a graph.
///
/// Every failure is reported by the call that violated the contract, and
/// that call leaves the graph exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node was referenced that is not a member of the graph.
    #[error("node {0} is not an element of this graph")]
    NodeNotInGraph(String),

    /// An edge was referenced that is not a member of the network.
    #[error("edge {0} is not an element of this network")]
    EdgeNotInGraph(String),

    /// A self-loop was requested on a graph that disallows them.
    #[error("cannot add self-loop on node {0}: self-loops are not allowed")]
    SelfLoopsNotAllowed(String),

    /// A second edge between already-connected nodes was requested on a
    /// network that disallows parallel edges.
    #[error(
        "nodes {node_u} and {node_v} are already connected by a different edge: \
         parallel edges are not allowed"
    )]
    ParallelEdgesNotAllowed { node_u: String, node_v: String },

    /// An existing edge object was reused to connect different endpoints.
    #[error("edge {edge} already connects {existing}; it cannot be reused to connect {requested}")]
    EdgeReused {
        edge: String,
        existing: String,
        requested: String,
    },

    /// A single-edge query matched several parallel edges.
    #[error(
        "{count} parallel edges connect {node_u} to {node_v}; \
         use edges_connecting() to retrieve all of them"
    )]
    AmbiguousEdge {
        node_u: String,
        node_v: String,
        count: usize,
    },

    /// An endpoint pair's orderedness does not fit the graph's directedness.
    #[error("mismatch: unordered endpoints cannot be used with directed graphs")]
    EndpointsMismatch,

    /// An export target disagrees with the source graph's directedness.
    #[error("expected a {} graph but the source is {}", describe(*.expected), describe(*.actual))]
    DirectednessMismatch { expected: bool, actual: bool },
}

fn describe(directed: bool) -> &'static str {
    if directed {
        "directed"
    } else {
        "undirected"
    }
}

impl GraphError {
    pub(crate) fn node_not_in_graph<N: Debug + ?Sized>(node: &N) -> Self {
        Self::NodeNotInGraph(format!("{:?}", node))
    }

    pub(crate) fn edge_not_in_graph<E: Debug + ?Sized>(edge: &E) -> Self {
        Self::EdgeNotInGraph(format!("{:?}", edge))
    }

    pub(crate) fn self_loops_not_allowed<N: Debug + ?Sized>(node: &N) -> Self {
        Self::SelfLoopsNotAllowed(format!("{:?}", node))
    }

    pub(crate) fn parallel_edges_not_allowed<N: Debug>(node_u: &N, node_v: &N) -> Self {
        Self::ParallelEdgesNotAllowed {
            node_u: format!("{:?}", node_u),
            node_v: format!("{:?}", node_v),
        }
    }

    pub(crate) fn ambiguous_edge<N: Debug>(node_u: &N, node_v: &N, count: usize) -> Self {
        Self::AmbiguousEdge {
            node_u: format!("{:?}", node_u),
            node_v: format!("{:?}", node_v),
            count,
        }
    }
}

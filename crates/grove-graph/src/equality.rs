//! Structural equality and hashing.
//!
//! Equality is a function of the declared entities only: directedness,
//! nodes, edges and (for value graphs) edge values. Iteration order,
//! self-loop and parallel-edge policies and storage layout never matter,
//! so a mutable graph, an immutable copy and a structural view compare
//! equal when they describe the same graph.
//!
//! Hashes sum per-element fingerprints, which makes them independent of
//! iteration order and consistent with equality.

use crate::traits::{BaseGraph, Network, ValueGraph};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A stable 64-bit digest of one value.
pub(crate) fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Whether two graphs have the same directedness, nodes and edges.
pub fn graphs_equal<A, B>(left: &A, right: &B) -> bool
where
    A: BaseGraph + ?Sized,
    B: BaseGraph<Node = A::Node> + ?Sized,
{
    if left.is_directed() != right.is_directed() || left.nodes() != right.nodes() {
        return false;
    }

    left.nodes()
        .iter()
        .all(|node| match (left.successors(node), right.successors(node)) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        })
}

/// Whether two value graphs are equal as graphs and carry equal values on
/// every edge.
pub fn value_graphs_equal<A, B>(left: &A, right: &B) -> bool
where
    A: ValueGraph + ?Sized,
    B: ValueGraph<Node = A::Node, Value = A::Value> + ?Sized,
    A::Value: PartialEq,
{
    graphs_equal(left, right)
        && left.edges().iter().all(|edge| {
            let (u, v) = (edge.node_u(), edge.node_v());
            match (left.edge_value(u, v), right.edge_value(u, v)) {
                (Ok(ours), Ok(theirs)) => ours == theirs,
                _ => false,
            }
        })
}

/// Whether two networks have the same directedness, nodes and edges, with
/// every edge connecting the same endpoints.
pub fn networks_equal<A, B>(left: &A, right: &B) -> bool
where
    A: Network + ?Sized,
    B: Network<Node = A::Node, Edge = A::Edge> + ?Sized,
{
    if left.is_directed() != right.is_directed()
        || left.nodes() != right.nodes()
        || left.edges() != right.edges()
    {
        return false;
    }

    left.edges()
        .iter()
        .all(|edge| match (left.incident_nodes(edge), right.incident_nodes(edge)) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        })
}

fn node_digest<'a, N: Hash + 'a>(nodes: impl IntoIterator<Item = &'a N>) -> u64 {
    nodes
        .into_iter()
        .fold(0u64, |acc, node| acc.wrapping_add(fingerprint(node)))
}

pub(crate) fn hash_graph<G, H>(graph: &G, state: &mut H)
where
    G: BaseGraph + ?Sized,
    H: Hasher,
{
    state.write_u8(u8::from(graph.is_directed()));
    state.write_u64(node_digest(graph.nodes()));
    let edges = graph
        .edges()
        .iter()
        .fold(0u64, |acc, edge| acc.wrapping_add(fingerprint(edge)));
    state.write_u64(edges);
}

pub(crate) fn hash_value_graph<G, H>(graph: &G, state: &mut H)
where
    G: ValueGraph + ?Sized,
    G::Value: Hash,
    H: Hasher,
{
    state.write_u8(u8::from(graph.is_directed()));
    state.write_u64(node_digest(graph.nodes()));
    let edges = graph.edges().iter().fold(0u64, |acc, edge| {
        let value = graph.edge_value(edge.node_u(), edge.node_v()).ok().flatten();
        acc.wrapping_add(fingerprint(&(edge, value)))
    });
    state.write_u64(edges);
}

pub(crate) fn hash_network<G, H>(network: &G, state: &mut H)
where
    G: Network + ?Sized,
    H: Hasher,
{
    state.write_u8(u8::from(network.is_directed()));
    state.write_u64(node_digest(network.nodes()));
    let edges = network.edges().iter().fold(0u64, |acc, edge| {
        let endpoints = network.incident_nodes(edge).ok();
        acc.wrapping_add(fingerprint(&(edge, endpoints)))
    });
    state.write_u64(edges);
}

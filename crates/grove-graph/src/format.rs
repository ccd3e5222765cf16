//! Text rendering shared by every graph type.
//!
//! ```text
//! is_directed: true, allows_self_loops: false, nodes: [1, 2, 3], edges: [<1 -> 2>, <2 -> 3>]
//! ```

use crate::traits::{BaseGraph, Network, ValueGraph};
use std::fmt;

pub(crate) fn fmt_graph<G>(graph: &G, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    G: BaseGraph + ?Sized,
{
    write!(
        f,
        "is_directed: {}, allows_self_loops: {}, nodes: ",
        graph.is_directed(),
        graph.allows_self_loops()
    )?;
    f.debug_list().entries(graph.nodes()).finish()?;
    f.write_str(", edges: ")?;
    f.debug_list().entries(graph.edges()).finish()
}

/// Edges render as a map from endpoints to value.
pub(crate) fn fmt_value_graph<G>(graph: &G, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    G: ValueGraph + ?Sized,
    G::Value: fmt::Debug,
{
    write!(
        f,
        "is_directed: {}, allows_self_loops: {}, nodes: ",
        graph.is_directed(),
        graph.allows_self_loops()
    )?;
    f.debug_list().entries(graph.nodes()).finish()?;
    f.write_str(", edges: ")?;
    let edges = graph.edges();
    let entries = edges.iter().filter_map(|edge| {
        let value = graph.edge_value(edge.node_u(), edge.node_v()).ok().flatten()?;
        Some((edge, value))
    });
    f.debug_map().entries(entries).finish()
}

/// Edges render as a map from edge to endpoints.
pub(crate) fn fmt_network<G>(network: &G, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    G: Network + ?Sized,
{
    write!(
        f,
        "is_directed: {}, allows_parallel_edges: {}, allows_self_loops: {}, nodes: ",
        network.is_directed(),
        network.allows_parallel_edges(),
        network.allows_self_loops()
    )?;
    f.debug_list().entries(network.nodes()).finish()?;
    f.write_str(", edges: ")?;
    let entries = network
        .edges()
        .into_iter()
        .filter_map(|edge| Some((edge, network.incident_nodes(edge).ok()?)));
    f.debug_map().entries(entries).finish()
}

/// Implements `Display` and `Debug` for a graph type through one of the
/// renderers above.
macro_rules! impl_graph_fmt {
    ($render:path => $struct:ident<N $(, $generic:ident)*> $(where $($bound:tt)*)?) => {
        impl<N: $crate::element::Element $(, $generic)*> ::std::fmt::Display
            for $struct<N $(, $generic)*>
        $(where $($bound)*)?
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $render(self, f)
            }
        }

        impl<N: $crate::element::Element $(, $generic)*> ::std::fmt::Debug
            for $struct<N $(, $generic)*>
        $(where $($bound)*)?
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $render(self, f)
            }
        }
    };
}

pub(crate) use impl_graph_fmt;

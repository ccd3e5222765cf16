//! The mutable graph with anonymous edges.
//!
//! [`StandardGraph`] is what [`GraphBuilder::build`](crate::GraphBuilder::build)
//! returns. An edge is fully described by the nodes it connects, so at most
//! one edge joins any ordered (directed) or unordered (undirected) pair.

use crate::element::Element;
use crate::equality::{graphs_equal, hash_graph};
use crate::error::Result;
use crate::format::{fmt_graph, impl_graph_fmt};
use crate::graph_core::GraphCore;
use crate::graph_core::macros::delegate_base_graph;
use crate::traits::{Graph, MutableGraph};
use std::hash::{Hash, Hasher};
use tracing::trace;

/// A mutable [`Graph`].
///
/// Accessors return live views: a view taken before a mutation cannot be
/// held across it, and a fresh view reflects the change.
#[derive(Clone)]
pub struct StandardGraph<N> {
    core: GraphCore<N, ()>,
}

impl<N: Element> StandardGraph<N> {
    pub(crate) fn from_core(core: GraphCore<N, ()>) -> Self {
        Self { core }
    }

    pub(crate) fn into_core(self) -> GraphCore<N, ()> {
        self.core
    }
}

/// An empty directed graph with default settings.
impl<N: Element> Default for StandardGraph<N> {
    fn default() -> Self {
        crate::builder::GraphBuilder::directed().build()
    }
}

delegate_base_graph!(StandardGraph<N> => core);

impl<N: Element> Graph for StandardGraph<N> {}

impl<N: Element> MutableGraph for StandardGraph<N> {
    fn add_node(&mut self, node: N) -> bool {
        self.core.add_node(node)
    }

    fn put_edge(&mut self, node_u: N, node_v: N) -> Result<bool> {
        Ok(self.core.put_edge_value(node_u, node_v, ())?.is_none())
    }

    fn remove_node(&mut self, node: &N) -> bool {
        self.core.remove_node(node)
    }

    fn remove_edge(&mut self, node_u: &N, node_v: &N) -> bool {
        let removed = self.core.remove_edge(node_u, node_v).is_some();
        if removed {
            trace!("removed edge {:?} - {:?}", node_u, node_v);
        }
        removed
    }
}

impl<N: Element, G: Graph<Node = N> + ?Sized> PartialEq<G> for StandardGraph<N> {
    fn eq(&self, other: &G) -> bool {
        graphs_equal(self, other)
    }
}

impl<N: Element> Eq for StandardGraph<N> {}

impl<N: Element> Hash for StandardGraph<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_graph(self, state);
    }
}

impl_graph_fmt!(fmt_graph => StandardGraph<N>);

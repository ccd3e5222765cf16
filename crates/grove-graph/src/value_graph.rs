//! The mutable graph whose edges carry values.

use crate::element::Element;
use crate::equality::{hash_value_graph, value_graphs_equal};
use crate::error::Result;
use crate::format::{fmt_value_graph, impl_graph_fmt};
use crate::graph_core::GraphCore;
use crate::graph_core::macros::delegate_base_graph;
use crate::traits::{MutableValueGraph, ValueGraph};
use std::hash::{Hash, Hasher};
use tracing::trace;

/// A mutable [`ValueGraph`].
///
/// Mutation requires `V: Clone`: an undirected edge keeps a copy of its
/// value at each endpoint.
#[derive(Clone)]
pub struct StandardValueGraph<N, V> {
    core: GraphCore<N, V>,
}

impl<N: Element, V> StandardValueGraph<N, V> {
    pub(crate) fn from_core(core: GraphCore<N, V>) -> Self {
        Self { core }
    }

    pub(crate) fn into_core(self) -> GraphCore<N, V> {
        self.core
    }
}

delegate_base_graph!(StandardValueGraph<N, V> => core);

impl<N: Element, V> ValueGraph for StandardValueGraph<N, V> {
    type Value = V;

    fn edge_value(&self, node_u: &N, node_v: &N) -> Result<Option<&V>> {
        self.core.edge_value(node_u, node_v)
    }
}

impl<N: Element, V: Clone> MutableValueGraph for StandardValueGraph<N, V> {
    fn add_node(&mut self, node: N) -> bool {
        self.core.add_node(node)
    }

    fn put_edge_value(&mut self, node_u: N, node_v: N, value: V) -> Result<Option<V>> {
        self.core.put_edge_value(node_u, node_v, value)
    }

    fn remove_node(&mut self, node: &N) -> bool {
        self.core.remove_node(node)
    }

    fn remove_edge(&mut self, node_u: &N, node_v: &N) -> Option<V> {
        let previous = self.core.remove_edge(node_u, node_v);
        if previous.is_some() {
            trace!("removed edge {:?} - {:?}", node_u, node_v);
        }
        previous
    }
}

impl<N, V, G> PartialEq<G> for StandardValueGraph<N, V>
where
    N: Element,
    V: PartialEq,
    G: ValueGraph<Node = N, Value = V> + ?Sized,
{
    fn eq(&self, other: &G) -> bool {
        value_graphs_equal(self, other)
    }
}

impl<N: Element, V: Eq> Eq for StandardValueGraph<N, V> {}

impl<N: Element, V: Hash> Hash for StandardValueGraph<N, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value_graph(self, state);
    }
}

impl_graph_fmt!(fmt_value_graph => StandardValueGraph<N, V> where V: std::fmt::Debug);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ValueGraphBuilder;
    use crate::endpoint::EndpointPair;
    use crate::error::GraphError;
    use crate::traits::{Adjacency, BaseGraph};

    #[test]
    fn test_put_edge_value_returns_previous() {
        let mut graph = ValueGraphBuilder::directed().build();
        assert_eq!(graph.put_edge_value("a", "b", 1.5).unwrap(), None);
        assert_eq!(graph.put_edge_value("a", "b", 2.5).unwrap(), Some(1.5));
        assert_eq!(graph.edge_value(&"a", &"b").unwrap(), Some(&2.5));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edge_value_lookups() {
        let mut graph = ValueGraphBuilder::undirected().build();
        graph.put_edge_value(1, 2, "road").unwrap();
        graph.add_node(3);

        assert_eq!(graph.edge_value(&2, &1).unwrap(), Some(&"road"));
        assert_eq!(graph.edge_value(&1, &3).unwrap(), None);
        assert!(matches!(
            graph.edge_value(&1, &9),
            Err(GraphError::NodeNotInGraph(_))
        ));
        assert_eq!(graph.edge_value_or_default(&1, &9, &"none"), &"none");
        assert_eq!(graph.edge_value_or_default(&1, &2, &"none"), &"road");
        assert_eq!(
            graph.edge_value_of(&EndpointPair::ordered(2, 1)).unwrap(),
            Some(&"road")
        );
    }

    #[test]
    fn test_remove_edge_returns_value() {
        let mut graph = ValueGraphBuilder::directed().build();
        graph.put_edge_value('x', 'y', 10).unwrap();
        assert_eq!(graph.remove_edge(&'y', &'x'), None);
        assert_eq!(graph.remove_edge(&'x', &'y'), Some(10));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_remove_node_drops_values() {
        let mut graph = ValueGraphBuilder::undirected().build();
        graph.put_edge_value(1, 2, 'a').unwrap();
        graph.put_edge_value(2, 3, 'b').unwrap();
        assert!(graph.remove_node(&2));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.adjacent_nodes(&1).unwrap().is_empty());
    }

    #[test]
    fn test_as_graph_sees_structure_only() {
        let mut valued = ValueGraphBuilder::directed().build();
        valued.put_edge_value(1, 2, "w").unwrap();
        let structure = valued.as_graph();
        assert!(structure.has_edge_connecting(&1, &2));
        assert_eq!(structure.successors(&1).unwrap().to_vec(), vec![2]);
    }

    #[test]
    fn test_equality_compares_values() {
        let mut a = ValueGraphBuilder::directed().build();
        a.put_edge_value(1, 2, 7).unwrap();
        let mut b = ValueGraphBuilder::directed().build();
        b.put_edge_value(1, 2, 7).unwrap();
        assert_eq!(a, b);

        b.put_edge_value(1, 2, 8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_lists_values() {
        let mut graph = ValueGraphBuilder::directed().build();
        graph.put_edge_value(1, 2, 'w').unwrap();
        assert_eq!(
            graph.to_string(),
            "is_directed: true, allows_self_loops: false, nodes: [1, 2], edges: {<1 -> 2>: 'w'}"
        );
    }
}

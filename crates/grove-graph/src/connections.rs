//! Per-node adjacency records.
//!
//! Every node owns one connections record. Directed records keep the two
//! directions apart; undirected records keep a single adjacency map in
//! which a self-loop appears once.

use crate::element::Element;
use crate::order::ElementOrder;
use crate::store::OrderedMap;
use crate::view::SetView;

/// Adjacency of one node in a graph or value graph.
///
/// Values live on the successor side. An undirected record stores the
/// value of each edge under the opposite node; the record at the other
/// endpoint holds its own copy.
#[derive(Debug, Clone)]
pub(crate) enum GraphConnections<N, V> {
    Directed {
        predecessors: OrderedMap<N, ()>,
        successors: OrderedMap<N, V>,
    },
    Undirected {
        adjacent: OrderedMap<N, V>,
    },
}

impl<N: Element, V> GraphConnections<N, V> {
    pub(crate) fn new(directed: bool, order: &ElementOrder<N>) -> Self {
        if directed {
            Self::Directed {
                predecessors: OrderedMap::new(order.clone()),
                successors: OrderedMap::new(order.clone()),
            }
        } else {
            Self::Undirected {
                adjacent: OrderedMap::new(order.clone()),
            }
        }
    }

    pub(crate) fn successors(&self) -> SetView<'_, N> {
        match self {
            Self::Directed { successors, .. } => SetView::live(successors),
            Self::Undirected { adjacent } => SetView::live(adjacent),
        }
    }

    pub(crate) fn predecessors(&self) -> SetView<'_, N> {
        match self {
            Self::Directed { predecessors, .. } => SetView::live(predecessors),
            Self::Undirected { adjacent } => SetView::live(adjacent),
        }
    }

    pub(crate) fn adjacent_nodes(&self) -> SetView<'_, N> {
        match self {
            Self::Directed {
                predecessors,
                successors,
            } => SetView::union(predecessors, successors),
            Self::Undirected { adjacent } => SetView::live(adjacent),
        }
    }

    /// The value of the edge towards `node`, if there is one.
    pub(crate) fn value(&self, node: &N) -> Option<&V> {
        match self {
            Self::Directed { successors, .. } => successors.get(node),
            Self::Undirected { adjacent } => adjacent.get(node),
        }
    }

    /// Records an edge towards `node` and returns the value it replaced.
    pub(crate) fn add_successor(&mut self, node: N, value: V) -> Option<V> {
        match self {
            Self::Directed { successors, .. } => successors.insert(node, value),
            Self::Undirected { adjacent } => adjacent.insert(node, value),
        }
    }

    /// Records an edge from `node`. Directed records drop the value.
    pub(crate) fn add_predecessor(&mut self, node: N, value: V) {
        match self {
            Self::Directed { predecessors, .. } => {
                predecessors.insert(node, ());
            }
            Self::Undirected { adjacent } => {
                adjacent.insert(node, value);
            }
        }
    }

    pub(crate) fn remove_successor(&mut self, node: &N) -> Option<V> {
        match self {
            Self::Directed { successors, .. } => successors.remove(node),
            Self::Undirected { adjacent } => adjacent.remove(node),
        }
    }

    pub(crate) fn remove_predecessor(&mut self, node: &N) {
        match self {
            Self::Directed { predecessors, .. } => {
                predecessors.remove(node);
            }
            Self::Undirected { adjacent } => {
                adjacent.remove(node);
            }
        }
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        match self {
            Self::Directed {
                predecessors,
                successors,
            } => {
                predecessors.shrink_to_fit();
                successors.shrink_to_fit();
            }
            Self::Undirected { adjacent } => adjacent.shrink_to_fit(),
        }
    }
}

/// Adjacency of one node in a network.
///
/// Edge maps point from each incident edge to the node at its other end.
/// Node maps count how many edges lead to each neighbor, so neighbors stay
/// listed exactly while at least one edge connects them.
#[derive(Debug, Clone)]
pub(crate) enum NetworkConnections<N, E> {
    Directed {
        in_edges: OrderedMap<E, N>,
        out_edges: OrderedMap<E, N>,
        predecessors: OrderedMap<N, usize>,
        successors: OrderedMap<N, usize>,
    },
    Undirected {
        incident_edges: OrderedMap<E, N>,
        adjacent: OrderedMap<N, usize>,
    },
}

impl<N: Element, E: Element> NetworkConnections<N, E> {
    pub(crate) fn new(directed: bool, edge_order: &ElementOrder<E>) -> Self {
        let node_order: ElementOrder<N> = edge_order.derived();
        if directed {
            Self::Directed {
                in_edges: OrderedMap::new(edge_order.clone()),
                out_edges: OrderedMap::new(edge_order.clone()),
                predecessors: OrderedMap::new(node_order.clone()),
                successors: OrderedMap::new(node_order),
            }
        } else {
            Self::Undirected {
                incident_edges: OrderedMap::new(edge_order.clone()),
                adjacent: OrderedMap::new(node_order),
            }
        }
    }

    pub(crate) fn successors(&self) -> SetView<'_, N> {
        match self {
            Self::Directed { successors, .. } => SetView::live(successors),
            Self::Undirected { adjacent, .. } => SetView::live(adjacent),
        }
    }

    pub(crate) fn predecessors(&self) -> SetView<'_, N> {
        match self {
            Self::Directed { predecessors, .. } => SetView::live(predecessors),
            Self::Undirected { adjacent, .. } => SetView::live(adjacent),
        }
    }

    pub(crate) fn adjacent_nodes(&self) -> SetView<'_, N> {
        match self {
            Self::Directed {
                predecessors,
                successors,
                ..
            } => SetView::union(predecessors, successors),
            Self::Undirected { adjacent, .. } => SetView::live(adjacent),
        }
    }

    pub(crate) fn incident_edges(&self) -> SetView<'_, E> {
        match self {
            Self::Directed {
                in_edges,
                out_edges,
                ..
            } => SetView::union(in_edges, out_edges),
            Self::Undirected { incident_edges, .. } => SetView::live(incident_edges),
        }
    }

    pub(crate) fn in_edges(&self) -> SetView<'_, E> {
        match self {
            Self::Directed { in_edges, .. } => SetView::live(in_edges),
            Self::Undirected { incident_edges, .. } => SetView::live(incident_edges),
        }
    }

    pub(crate) fn out_edges(&self) -> SetView<'_, E> {
        match self {
            Self::Directed { out_edges, .. } => SetView::live(out_edges),
            Self::Undirected { incident_edges, .. } => SetView::live(incident_edges),
        }
    }

    /// Outgoing edges whose other end is `node`. Snapshot.
    pub(crate) fn edges_connecting(&self, node: &N) -> SetView<'_, E> {
        let outgoing = match self {
            Self::Directed { out_edges, .. } => out_edges,
            Self::Undirected { incident_edges, .. } => incident_edges,
        };
        let connecting = outgoing
            .iter()
            .filter(|(_, opposite)| *opposite == node)
            .map(|(edge, _)| edge)
            .collect();
        SetView::from_items(connecting)
    }

    /// Records an edge arriving from `node`. An undirected self-loop is
    /// recorded by [`add_out_edge`](Self::add_out_edge) alone.
    pub(crate) fn add_in_edge(&mut self, edge: E, node: N, is_self_loop: bool) {
        match self {
            Self::Directed {
                in_edges,
                predecessors,
                ..
            } => {
                *predecessors.get_or_insert_with(node.clone(), || 0) += 1;
                in_edges.insert(edge, node);
            }
            Self::Undirected {
                incident_edges,
                adjacent,
            } => {
                if !is_self_loop {
                    *adjacent.get_or_insert_with(node.clone(), || 0) += 1;
                    incident_edges.insert(edge, node);
                }
            }
        }
    }

    /// Records an edge leaving towards `node`.
    pub(crate) fn add_out_edge(&mut self, edge: E, node: N) {
        match self {
            Self::Directed {
                out_edges,
                successors,
                ..
            } => {
                *successors.get_or_insert_with(node.clone(), || 0) += 1;
                out_edges.insert(edge, node);
            }
            Self::Undirected {
                incident_edges,
                adjacent,
            } => {
                *adjacent.get_or_insert_with(node.clone(), || 0) += 1;
                incident_edges.insert(edge, node);
            }
        }
    }

    pub(crate) fn remove_in_edge(&mut self, edge: &E, is_self_loop: bool) {
        match self {
            Self::Directed {
                in_edges,
                predecessors,
                ..
            } => {
                if let Some(node) = in_edges.remove(edge) {
                    decrement(predecessors, &node);
                }
            }
            Self::Undirected {
                incident_edges,
                adjacent,
            } => {
                if !is_self_loop {
                    if let Some(node) = incident_edges.remove(edge) {
                        decrement(adjacent, &node);
                    }
                }
            }
        }
    }

    pub(crate) fn remove_out_edge(&mut self, edge: &E) {
        let (edges, counts) = match self {
            Self::Directed {
                out_edges,
                successors,
                ..
            } => (out_edges, successors),
            Self::Undirected {
                incident_edges,
                adjacent,
            } => (incident_edges, adjacent),
        };
        if let Some(node) = edges.remove(edge) {
            decrement(counts, &node);
        }
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        match self {
            Self::Directed {
                in_edges,
                out_edges,
                predecessors,
                successors,
            } => {
                in_edges.shrink_to_fit();
                out_edges.shrink_to_fit();
                predecessors.shrink_to_fit();
                successors.shrink_to_fit();
            }
            Self::Undirected {
                incident_edges,
                adjacent,
            } => {
                incident_edges.shrink_to_fit();
                adjacent.shrink_to_fit();
            }
        }
    }
}

fn decrement<N: Element>(counts: &mut OrderedMap<N, usize>, node: &N) {
    let exhausted = match counts.get_mut(node) {
        Some(count) => {
            *count = count.saturating_sub(1);
            *count == 0
        }
        None => false,
    };
    if exhausted {
        counts.remove(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_graph_connections() {
        let mut connections: GraphConnections<&str, u32> =
            GraphConnections::new(true, &ElementOrder::insertion());
        assert_eq!(connections.add_successor("b", 1), None);
        assert_eq!(connections.add_successor("b", 2), Some(1));
        connections.add_predecessor("c", 0);

        assert_eq!(connections.successors().to_vec(), vec!["b"]);
        assert_eq!(connections.predecessors().to_vec(), vec!["c"]);
        assert_eq!(connections.adjacent_nodes().to_vec(), vec!["c", "b"]);
        assert_eq!(connections.value(&"b"), Some(&2));
        assert_eq!(connections.value(&"c"), None);

        assert_eq!(connections.remove_successor(&"b"), Some(2));
        assert!(connections.successors().is_empty());
    }

    #[test]
    fn test_undirected_graph_connections_share_one_map() {
        let mut connections: GraphConnections<u8, ()> =
            GraphConnections::new(false, &ElementOrder::insertion());
        connections.add_successor(1, ());
        connections.add_predecessor(2, ());
        assert_eq!(connections.successors(), connections.predecessors());
        assert_eq!(connections.adjacent_nodes().len(), 2);

        connections.remove_predecessor(&1);
        assert_eq!(connections.successors().to_vec(), vec![2]);
    }

    #[test]
    fn test_network_counts_parallel_edges() {
        let mut connections: NetworkConnections<u8, &str> =
            NetworkConnections::new(true, &ElementOrder::insertion());
        connections.add_out_edge("e1", 2);
        connections.add_out_edge("e2", 2);
        connections.add_in_edge("e3", 3, false);

        assert_eq!(connections.successors().to_vec(), vec![2]);
        assert_eq!(connections.edges_connecting(&2).len(), 2);
        assert_eq!(connections.incident_edges().len(), 3);

        connections.remove_out_edge(&"e1");
        assert!(connections.successors().contains(&2));
        connections.remove_out_edge(&"e2");
        assert!(!connections.successors().contains(&2));
        assert_eq!(connections.predecessors().to_vec(), vec![3]);
    }

    #[test]
    fn test_undirected_self_loop_recorded_once() {
        let mut connections: NetworkConnections<u8, &str> =
            NetworkConnections::new(false, &ElementOrder::insertion());
        connections.add_out_edge("loop", 1);
        connections.add_in_edge("loop", 1, true);

        assert_eq!(connections.incident_edges().len(), 1);
        assert_eq!(connections.adjacent_nodes().to_vec(), vec![1]);

        connections.remove_out_edge(&"loop");
        connections.remove_in_edge(&"loop", true);
        assert!(connections.incident_edges().is_empty());
        assert!(connections.adjacent_nodes().is_empty());
    }
}

//! Endpoint pairs: the two nodes an edge connects.
//!
//! In a directed graph an edge's endpoints are ordered (source, then
//! target). In an undirected graph they are an unordered pair. An
//! [`EndpointPair`] carries that distinction, so an ordered pair never equals
//! an unordered one. Unordered pairs compare and hash symmetrically.

use crate::equality::fingerprint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The endpoints of an edge.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointPair<N> {
    /// Endpoints of a directed edge.
    Ordered { source: N, target: N },
    /// Endpoints of an undirected edge.
    Unordered { node_u: N, node_v: N },
}

impl<N> EndpointPair<N> {
    pub fn ordered(source: N, target: N) -> Self {
        Self::Ordered { source, target }
    }

    pub fn unordered(node_u: N, node_v: N) -> Self {
        Self::Unordered { node_u, node_v }
    }

    /// An ordered pair for directed graphs, unordered otherwise.
    pub(crate) fn of(directed: bool, node_u: N, node_v: N) -> Self {
        if directed {
            Self::ordered(node_u, node_v)
        } else {
            Self::unordered(node_u, node_v)
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, Self::Ordered { .. })
    }

    /// The source node, if ordered.
    pub fn source(&self) -> Option<&N> {
        match self {
            Self::Ordered { source, .. } => Some(source),
            Self::Unordered { .. } => None,
        }
    }

    /// The target node, if ordered.
    pub fn target(&self) -> Option<&N> {
        match self {
            Self::Ordered { target, .. } => Some(target),
            Self::Unordered { .. } => None,
        }
    }

    /// The first node: the source of an ordered pair.
    pub fn node_u(&self) -> &N {
        match self {
            Self::Ordered { source, .. } => source,
            Self::Unordered { node_u, .. } => node_u,
        }
    }

    /// The second node: the target of an ordered pair.
    pub fn node_v(&self) -> &N {
        match self {
            Self::Ordered { target, .. } => target,
            Self::Unordered { node_v, .. } => node_v,
        }
    }

    /// Consumes the pair, returning `(node_u, node_v)`.
    pub fn into_nodes(self) -> (N, N) {
        match self {
            Self::Ordered { source, target } => (source, target),
            Self::Unordered { node_u, node_v } => (node_u, node_v),
        }
    }

    /// Borrows both endpoints.
    pub fn as_ref(&self) -> EndpointPair<&N> {
        match self {
            Self::Ordered { source, target } => EndpointPair::Ordered { source, target },
            Self::Unordered { node_u, node_v } => EndpointPair::Unordered { node_u, node_v },
        }
    }
}

impl<N: PartialEq> EndpointPair<N> {
    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn adjacent_node(&self, node: &N) -> Option<&N> {
        if self.node_u() == node {
            Some(self.node_v())
        } else if self.node_v() == node {
            Some(self.node_u())
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.node_u() == self.node_v()
    }
}

impl<N: PartialEq> PartialEq for EndpointPair<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Ordered { source, target },
                Self::Ordered {
                    source: other_source,
                    target: other_target,
                },
            ) => source == other_source && target == other_target,
            (
                Self::Unordered { node_u, node_v },
                Self::Unordered {
                    node_u: other_u,
                    node_v: other_v,
                },
            ) => {
                (node_u == other_u && node_v == other_v) || (node_u == other_v && node_v == other_u)
            }
            _ => false,
        }
    }
}

impl<N: Eq> Eq for EndpointPair<N> {}

impl<N: Hash> Hash for EndpointPair<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Ordered { source, target } => {
                state.write_u8(0);
                source.hash(state);
                target.hash(state);
            }
            Self::Unordered { node_u, node_v } => {
                state.write_u8(1);
                state.write_u64(fingerprint(node_u).wrapping_add(fingerprint(node_v)));
            }
        }
    }
}

impl<N: fmt::Debug> fmt::Display for EndpointPair<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordered { source, target } => write!(f, "<{:?} -> {:?}>", source, target),
            Self::Unordered { node_u, node_v } => write!(f, "[{:?}, {:?}]", node_u, node_v),
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for EndpointPair<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_unordered_pairs_are_symmetric() {
        let a = EndpointPair::unordered(1, 2);
        let b = EndpointPair::unordered(2, 1);
        assert_eq!(a, b);
        assert_eq!(fingerprint(&a), fingerprint(&b));

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordered_pairs_respect_direction() {
        assert_ne!(EndpointPair::ordered(1, 2), EndpointPair::ordered(2, 1));
        assert_ne!(EndpointPair::ordered(1, 2), EndpointPair::unordered(1, 2));
    }

    #[test]
    fn test_accessors() {
        let pair = EndpointPair::ordered("a", "b");
        assert_eq!(pair.source(), Some(&"a"));
        assert_eq!(pair.target(), Some(&"b"));
        assert_eq!(pair.adjacent_node(&"b"), Some(&"a"));
        assert_eq!(pair.adjacent_node(&"z"), None);
        assert!(!pair.is_self_loop());

        let pair = EndpointPair::unordered("x", "x");
        assert_eq!(pair.source(), None);
        assert!(pair.is_self_loop());
        assert_eq!(pair.into_nodes(), ("x", "x"));
    }

    #[test]
    fn test_display() {
        assert_eq!(EndpointPair::ordered(1, 2).to_string(), "<1 -> 2>");
        assert_eq!(EndpointPair::unordered(1, 2).to_string(), "[1, 2]");
    }

    #[test]
    fn test_serde_round_trip() {
        let pair = EndpointPair::ordered(3, 4);
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"{"kind":"ordered","source":3,"target":4}"#);
        let back: EndpointPair<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
    }
}

//! The contract every node and edge value must satisfy.
//!
//! Nodes and network edges are keys into the graph's internal maps. They
//! must provide:
//!
//! - an equality relation (`Eq`), used for uniqueness: a graph holds at
//!   most one element per equivalence class;
//! - a hash consistent with that equality (`Hash`);
//! - when a sorted [`ElementOrder`](crate::ElementOrder) is requested, a
//!   comparator consistent with equality;
//! - a `Debug` rendering, used in error messages and `Display` output.
//!
//! Equality and hashing must not be defined in terms of the element's
//! relationships in the graph. Doing so makes comparisons recurse through
//! cycles.
//!
//! Mutating state that equality depends on while the element is stored
//! (through interior mutability, say) leaves the graph in an unspecified
//! state. This is a caller obligation; the library cannot detect it.
//!
//! Elements cannot be null: every operation takes owned values or
//! references.

use std::fmt::Debug;
use std::hash::Hash;

/// A value usable as a node, or as an edge of a network.
pub trait Element: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Element for T {}

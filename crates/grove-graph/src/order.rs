//! Iteration order policies for node and edge collections.
//!
//! A graph is configured with one [`ElementOrder`] for its node set and
//! another for the sets reached from a single node (successors,
//! predecessors, incident edges).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// The kind of ordering an [`ElementOrder`] describes.
///
/// This is the serializable part of an order; comparators are code and
/// cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// No guaranteed iteration order.
    Unordered,
    /// Iteration follows first insertion.
    Insertion,
    /// Iteration follows a comparator.
    Sorted,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unordered => "unordered",
            Self::Insertion => "insertion",
            Self::Sorted => "sorted",
        };
        write!(f, "{}", s)
    }
}

/// A shared total order over `T`.
///
/// The order must be consistent with `T`'s equality: `compare(a, b)` is
/// `Equal` exactly when `a == b`.
pub struct Comparator<T> {
    compare: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
}

impl<T> Comparator<T> {
    /// Wraps a comparison function.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    /// The order given by `T: Ord`.
    pub fn natural() -> Self
    where
        T: Ord + 'static,
    {
        Self::new(|a: &T, b: &T| a.cmp(b))
    }

    /// Compares two elements.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    /// The same order, reversed.
    pub fn reversed(&self) -> Self
    where
        T: 'static,
    {
        let inner = Arc::clone(&self.compare);
        Self::new(move |a: &T, b: &T| inner(b, a))
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

/// Two comparators are equal when they share the same function object.
impl<T> PartialEq for Comparator<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.compare, &other.compare)
    }
}

/// How a collection of elements is ordered when iterated.
pub enum ElementOrder<T> {
    /// No guaranteed iteration order.
    Unordered,
    /// Iteration order matches the order of first insertion.
    Insertion,
    /// Iteration order matches the comparator.
    Sorted(Comparator<T>),
}

impl<T> ElementOrder<T> {
    pub fn unordered() -> Self {
        Self::Unordered
    }

    pub fn insertion() -> Self {
        Self::Insertion
    }

    /// Orders elements with the given comparison function.
    pub fn sorted<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::Sorted(Comparator::new(compare))
    }

    /// Orders elements by `T: Ord`.
    pub fn natural() -> Self
    where
        T: Ord + 'static,
    {
        Self::Sorted(Comparator::natural())
    }

    pub fn kind(&self) -> OrderKind {
        match self {
            Self::Unordered => OrderKind::Unordered,
            Self::Insertion => OrderKind::Insertion,
            Self::Sorted(_) => OrderKind::Sorted,
        }
    }

    /// The comparator, if this order is sorted.
    pub fn comparator(&self) -> Option<&Comparator<T>> {
        match self {
            Self::Sorted(comparator) => Some(comparator),
            _ => None,
        }
    }

    /// The order an instance reports after its contents have been frozen:
    /// whatever order was observed is now fixed.
    pub(crate) fn frozen(&self) -> Self {
        match self {
            Self::Unordered => Self::Insertion,
            other => other.clone(),
        }
    }

    /// The order of a node collection derived from a collection ordered
    /// like `self`. Comparators cannot carry over to a different element
    /// type, so sorted collections yield insertion-ordered derivatives.
    pub(crate) fn derived<U>(&self) -> ElementOrder<U> {
        match self {
            Self::Unordered => ElementOrder::Unordered,
            _ => ElementOrder::Insertion,
        }
    }
}

impl<T> Default for ElementOrder<T> {
    fn default() -> Self {
        Self::Insertion
    }
}

impl<T> Clone for ElementOrder<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Unordered => Self::Unordered,
            Self::Insertion => Self::Insertion,
            Self::Sorted(comparator) => Self::Sorted(comparator.clone()),
        }
    }
}

impl<T> PartialEq for ElementOrder<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unordered, Self::Unordered) | (Self::Insertion, Self::Insertion) => true,
            (Self::Sorted(a), Self::Sorted(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> fmt::Debug for ElementOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unordered => f.write_str("Unordered"),
            Self::Insertion => f.write_str("Insertion"),
            Self::Sorted(comparator) => f.debug_tuple("Sorted").field(comparator).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_and_reversed() {
        let natural = Comparator::<i32>::natural();
        assert_eq!(natural.compare(&1, &2), Ordering::Less);

        let reversed = natural.reversed();
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
        assert_eq!(reversed.compare(&3, &3), Ordering::Equal);
    }

    #[test]
    fn test_kind_and_comparator() {
        assert_eq!(ElementOrder::<u8>::unordered().kind(), OrderKind::Unordered);
        assert_eq!(ElementOrder::<u8>::default().kind(), OrderKind::Insertion);

        let sorted = ElementOrder::<u8>::natural();
        assert_eq!(sorted.kind(), OrderKind::Sorted);
        assert!(sorted.comparator().is_some());
        assert!(ElementOrder::<u8>::insertion().comparator().is_none());
    }

    #[test]
    fn test_sorted_orders_compare_by_identity() {
        let a = ElementOrder::<u8>::natural();
        let b = ElementOrder::<u8>::natural();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(ElementOrder::<u8>::Insertion, ElementOrder::Insertion);
    }

    #[test]
    fn test_frozen_fixes_unordered() {
        assert_eq!(
            ElementOrder::<u8>::unordered().frozen().kind(),
            OrderKind::Insertion
        );
        assert_eq!(ElementOrder::<u8>::natural().frozen().kind(), OrderKind::Sorted);
    }

    #[test]
    fn test_order_kind_serde() {
        let json = serde_json::to_string(&OrderKind::Insertion).unwrap();
        assert_eq!(json, "\"insertion\"");
        let kind: OrderKind = serde_json::from_str("\"sorted\"").unwrap();
        assert_eq!(kind, OrderKind::Sorted);
    }
}

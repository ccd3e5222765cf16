//! Read-only views returned by graph accessors.
//!
//! A [`SetView`] borrows the graph it came from. Views over mutable
//! graphs are live: they read the graph's storage directly, and the borrow
//! checker guarantees the graph cannot change while a view exists. There
//! is no way to mutate a graph through a view.
//!
//! Each accessor documents whether its view is *live* (reads storage on
//! every call) or a *snapshot* (a list collected when the accessor ran).

use std::fmt;

/// Read-only access to the key set of a storage map.
pub(crate) trait KeySet<T> {
    fn contains_key(&self, key: &T) -> bool;
    fn key_count(&self) -> usize;
    /// Keys in the map's order.
    fn key_iter(&self) -> Box<dyn Iterator<Item = &T> + '_>;
}

/// A read-only set of nodes or edges borrowed from a graph.
pub struct SetView<'a, T> {
    repr: Repr<'a, T>,
}

enum Repr<'a, T> {
    /// The key set of one storage map.
    Live(&'a dyn KeySet<T>),
    /// The union of two key sets; keys of `first` come first.
    Union(&'a dyn KeySet<T>, &'a dyn KeySet<T>),
    /// Elements collected when the view was created.
    Snapshot(Vec<&'a T>),
}

impl<'a, T> SetView<'a, T> {
    pub(crate) fn live(keys: &'a dyn KeySet<T>) -> Self {
        Self {
            repr: Repr::Live(keys),
        }
    }

    pub(crate) fn union(first: &'a dyn KeySet<T>, second: &'a dyn KeySet<T>) -> Self {
        Self {
            repr: Repr::Union(first, second),
        }
    }

    /// A snapshot view over already-collected elements.
    ///
    /// The elements are expected to be distinct.
    pub fn from_items(items: Vec<&'a T>) -> Self {
        Self {
            repr: Repr::Snapshot(items),
        }
    }

    /// Iterates the elements in the view's order.
    pub fn iter(&self) -> Iter<'a, T> {
        match &self.repr {
            Repr::Live(keys) => Iter::keys(*keys),
            Repr::Union(first, second) => Iter::union(*first, *second),
            Repr::Snapshot(items) => Iter::snapshot(items.clone()),
        }
    }
}

impl<'a, T: PartialEq> SetView<'a, T> {
    /// Number of elements. For union views this walks the second set.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Live(keys) => keys.key_count(),
            Repr::Union(first, second) => {
                let extra = second
                    .key_iter()
                    .filter(|key| !first.contains_key(key))
                    .count();
                first.key_count() + extra
            }
            Repr::Snapshot(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.repr {
            Repr::Live(keys) => keys.key_count() == 0,
            Repr::Union(first, second) => first.key_count() == 0 && second.key_count() == 0,
            Repr::Snapshot(items) => items.is_empty(),
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        match &self.repr {
            Repr::Live(keys) => keys.contains_key(item),
            Repr::Union(first, second) => first.contains_key(item) || second.contains_key(item),
            Repr::Snapshot(items) => items.iter().any(|candidate| *candidate == item),
        }
    }

    /// Clones the elements into a `Vec`, in iteration order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for SetView<'_, T> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Live(keys) => Repr::Live(*keys),
            Repr::Union(first, second) => Repr::Union(*first, *second),
            Repr::Snapshot(items) => Repr::Snapshot(items.clone()),
        };
        Self { repr }
    }
}

/// Set equality: same elements, regardless of order.
impl<T: PartialEq> PartialEq for SetView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Eq> Eq for SetView<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for SetView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for SetView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        match self.repr {
            Repr::Live(keys) => Iter::keys(keys),
            Repr::Union(first, second) => Iter::union(first, second),
            Repr::Snapshot(items) => Iter::snapshot(items),
        }
    }
}

impl<'a, T> IntoIterator for &SetView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`SetView`].
pub struct Iter<'a, T> {
    source: Source<'a, T>,
}

enum Source<'a, T> {
    Keys(Box<dyn Iterator<Item = &'a T> + 'a>),
    Snapshot(std::vec::IntoIter<&'a T>),
}

impl<'a, T> Iter<'a, T> {
    fn keys(keys: &'a dyn KeySet<T>) -> Self {
        Self {
            source: Source::Keys(keys.key_iter()),
        }
    }

    /// Keys of `first`, then keys of `second` that `first` lacks.
    fn union(first: &'a dyn KeySet<T>, second: &'a dyn KeySet<T>) -> Self {
        let extra = second.key_iter().filter(move |key| !first.contains_key(key));
        Self {
            source: Source::Keys(Box::new(first.key_iter().chain(extra))),
        }
    }

    fn snapshot(items: Vec<&'a T>) -> Self {
        Self {
            source: Source::Snapshot(items.into_iter()),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Keys(keys) => keys.next(),
            Source::Snapshot(items) => items.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Source::Keys(keys) => keys.size_hint(),
            Source::Snapshot(items) => items.size_hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::ElementOrder;
    use crate::store::OrderedMap;

    fn map_of(keys: &[i32]) -> OrderedMap<i32, ()> {
        let mut map = OrderedMap::new(ElementOrder::insertion());
        for key in keys {
            map.insert(*key, ());
        }
        map
    }

    #[test]
    fn test_live_view() {
        let map = map_of(&[3, 1, 2]);
        let view = SetView::live(&map);
        assert_eq!(view.len(), 3);
        assert!(view.contains(&1));
        assert!(!view.contains(&9));
        assert_eq!(view.to_vec(), vec![3, 1, 2]);
    }

    #[test]
    fn test_union_skips_duplicates() {
        let preds = map_of(&[1, 2, 3]);
        let succs = map_of(&[3, 4, 1, 5]);
        let view = SetView::union(&preds, &succs);

        assert_eq!(view.len(), 5);
        assert_eq!(view.to_vec(), vec![1, 2, 3, 4, 5]);
        assert!(view.contains(&4));
        assert!(!view.is_empty());
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = map_of(&[1, 2, 3]);
        let b = map_of(&[3, 2, 1]);
        assert_eq!(SetView::live(&a), SetView::live(&b));
        assert_eq!(SetView::live(&a), SetView::from_items(vec![&2, &3, &1]));
        assert_ne!(SetView::live(&a), SetView::from_items(vec![&2, &3]));
    }

    #[test]
    fn test_empty_and_debug() {
        let empty = map_of(&[]);
        let view = SetView::live(&empty);
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);

        let map = map_of(&[7, 8]);
        assert_eq!(format!("{:?}", SetView::live(&map)), "{7, 8}");
    }

    #[test]
    fn test_items_outlive_the_view() {
        let map = map_of(&[1, 2]);
        let items: Vec<&i32> = SetView::live(&map).into_iter().collect();
        assert_eq!(items, vec![&1, &2]);
    }
}

//! Keyed storage honoring an [`ElementOrder`].
//!
//! Every set a graph exposes (nodes, successors, incident edges, ...) is
//! the key set of an [`OrderedMap`]. Lookups go through a hash index; the
//! iteration order is kept beside it:
//!
//! - `Unordered`: the index itself, in whatever order removals left it.
//! - `Insertion`: a slot list in which removed keys leave a hole. Holes
//!   are compacted once they outnumber live keys, and on `shrink_to_fit`.
//! - `Sorted`: a B-tree ordered by the comparator.
//!
//! Inserting and removing are O(1) amortized, or O(log n) when sorted.

use crate::order::{Comparator, ElementOrder};
use crate::view::KeySet;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::Hash;

/// Holes are left alone below this many slots.
const MIN_COMPACTION_SLOTS: usize = 16;

/// A hash map whose key order follows an [`ElementOrder`].
#[derive(Debug, Clone)]
pub(crate) struct OrderedMap<K, V> {
    entries: IndexMap<K, Entry<V>>,
    sequence: Sequence<K>,
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    /// Position in the insertion slot list; unused by other orders.
    slot: usize,
}

#[derive(Debug, Clone)]
enum Sequence<K> {
    Unordered,
    Insertion(Vec<Option<K>>),
    Sorted {
        keys: BTreeSet<SortKey<K>>,
        comparator: Comparator<K>,
    },
}

/// A key ordered by a runtime comparator.
#[derive(Debug, Clone)]
struct SortKey<K> {
    key: K,
    comparator: Comparator<K>,
}

impl<K> PartialEq for SortKey<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for SortKey<K> {}

impl<K> PartialOrd for SortKey<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for SortKey<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparator.compare(&self.key, &other.key)
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    pub(crate) fn new(order: ElementOrder<K>) -> Self {
        Self::with_capacity(order, 0)
    }

    /// Creates a map with room for `capacity` entries. Capacity never
    /// affects iteration order.
    pub(crate) fn with_capacity(order: ElementOrder<K>, capacity: usize) -> Self {
        let sequence = match order {
            ElementOrder::Unordered => Sequence::Unordered,
            ElementOrder::Insertion => Sequence::Insertion(Vec::with_capacity(capacity)),
            ElementOrder::Sorted(comparator) => Sequence::Sorted {
                keys: BTreeSet::new(),
                comparator,
            },
        };
        Self {
            entries: IndexMap::with_capacity(capacity),
            sequence,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Inserts or replaces a value. A replaced key keeps its position.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(entry) = self.entries.get_mut(&key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        self.insert_new(key, value);
        None
    }

    /// Returns the value for `key`, inserting `default()` first if absent.
    pub(crate) fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.entries.get_index_of(&key) {
            Some(index) => index,
            None => self.insert_new(key, default()),
        };
        &mut self.entries[index].value
    }

    /// Inserts a key known to be absent and returns its index position.
    fn insert_new(&mut self, key: K, value: V) -> usize {
        let slot = match &mut self.sequence {
            Sequence::Unordered => 0,
            Sequence::Insertion(slots) => {
                slots.push(Some(key.clone()));
                slots.len() - 1
            }
            Sequence::Sorted { keys, comparator } => {
                keys.insert(SortKey {
                    key: key.clone(),
                    comparator: comparator.clone(),
                });
                0
            }
        };
        self.entries.insert_full(key, Entry { value, slot }).0
    }

    /// Removes a key. The remaining keys keep their relative order.
    pub(crate) fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.swap_remove(key)?;
        let live = self.entries.len();
        let crowded = match &mut self.sequence {
            Sequence::Unordered => false,
            Sequence::Insertion(slots) => {
                slots[entry.slot] = None;
                slots.len() >= MIN_COMPACTION_SLOTS && slots.len() - live > live
            }
            Sequence::Sorted { keys, comparator } => {
                keys.remove(&SortKey {
                    key: key.clone(),
                    comparator: comparator.clone(),
                });
                false
            }
        };
        if crowded {
            self.compact();
        }
        Some(entry.value)
    }

    /// Drops the holes of the insertion slot list and renumbers entries.
    fn compact(&mut self) {
        let Sequence::Insertion(slots) = &mut self.sequence else {
            return;
        };
        slots.retain(Option::is_some);
        for (slot, key) in slots.iter().enumerate() {
            if let Some(entry) = key.as_ref().and_then(|key| self.entries.get_mut(key)) {
                entry.slot = slot;
            }
        }
    }

    /// Iterates keys and values in the map's order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.key_iter()
            .filter_map(move |key| self.entries.get(key).map(|entry| (key, &entry.value)))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.values_mut().map(|entry| &mut entry.value)
    }

    /// Compacts the slot list and releases spare capacity.
    pub(crate) fn shrink_to_fit(&mut self) {
        self.compact();
        if let Sequence::Insertion(slots) = &mut self.sequence {
            slots.shrink_to_fit();
        }
        self.entries.shrink_to_fit();
    }
}

impl<K: Hash + Eq + Clone, V> KeySet<K> for OrderedMap<K, V> {
    fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn key_count(&self) -> usize {
        self.entries.len()
    }

    fn key_iter(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        match &self.sequence {
            Sequence::Unordered => Box::new(self.entries.keys()),
            Sequence::Insertion(slots) => Box::new(slots.iter().flatten()),
            Sequence::Sorted { keys, .. } => Box::new(keys.iter().map(|sorted| &sorted.key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of<V>(map: &OrderedMap<i32, V>) -> Vec<i32> {
        map.key_iter().copied().collect()
    }

    fn slot_count<V>(map: &OrderedMap<i32, V>) -> usize {
        match &map.sequence {
            Sequence::Insertion(slots) => slots.len(),
            _ => 0,
        }
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut map = OrderedMap::new(ElementOrder::insertion());
        for key in [5, 1, 4, 2] {
            map.insert(key, ());
        }
        map.remove(&1);
        assert_eq!(keys_of(&map), vec![5, 4, 2]);

        map.insert(1, ());
        assert_eq!(keys_of(&map), vec![5, 4, 2, 1]);
    }

    #[test]
    fn test_holes_are_compacted() {
        let mut map = OrderedMap::new(ElementOrder::insertion());
        for key in 0..100 {
            map.insert(key, key * 2);
        }
        for key in (0..100).filter(|key| key % 10 != 0) {
            assert_eq!(map.remove(&key), Some(key * 2));
            let slots = slot_count(&map);
            assert!(slots < MIN_COMPACTION_SLOTS || slots <= 2 * map.len());
        }

        assert!(slot_count(&map) < 100);
        assert_eq!(keys_of(&map), (0..100).step_by(10).collect::<Vec<_>>());
        assert_eq!(map.get(&50), Some(&100));
        assert_eq!(map.remove(&50), Some(100));
        assert_eq!(map.get(&60), Some(&120));

        map.shrink_to_fit();
        assert_eq!(slot_count(&map), map.len());
        assert_eq!(keys_of(&map), vec![0, 10, 20, 30, 40, 60, 70, 80, 90]);
    }

    #[test]
    fn test_sorted_insert_uses_comparator() {
        let mut map = OrderedMap::new(ElementOrder::sorted(|a: &i32, b: &i32| b.cmp(a)));
        for key in [3, 9, 1, 5] {
            map.insert(key, key * 10);
        }
        assert_eq!(keys_of(&map), vec![9, 5, 3, 1]);
        map.remove(&5);
        assert_eq!(keys_of(&map), vec![9, 3, 1]);
        assert_eq!(map.get(&3), Some(&30));
    }

    #[test]
    fn test_unordered_removal_keeps_every_key() {
        let mut map = OrderedMap::new(ElementOrder::unordered());
        for key in 0..8 {
            map.insert(key, ());
        }
        map.remove(&0);
        map.remove(&5);
        let mut keys = keys_of(&map);
        keys.sort();
        assert_eq!(keys, vec![1, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn test_replacing_keeps_position() {
        let mut map = OrderedMap::new(ElementOrder::insertion());
        map.insert(1, "a");
        map.insert(2, "b");
        assert_eq!(map.insert(1, "c"), Some("a"));
        assert_eq!(keys_of(&map), vec![1, 2]);
        assert_eq!(map.get(&1), Some(&"c"));
    }

    #[test]
    fn test_get_or_insert_with_counts() {
        let mut map: OrderedMap<i32, usize> = OrderedMap::new(ElementOrder::natural());
        *map.get_or_insert_with(4, || 0) += 1;
        *map.get_or_insert_with(2, || 0) += 1;
        *map.get_or_insert_with(4, || 0) += 1;
        assert_eq!(map.get(&4), Some(&2));
        assert_eq!(keys_of(&map), vec![2, 4]);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&2, &1), (&4, &2)]);
    }

    #[test]
    fn test_key_set_contract() {
        let mut map = OrderedMap::new(ElementOrder::insertion());
        map.insert("x", ());
        map.insert("y", ());
        assert_eq!(map.key_count(), 2);
        assert!(KeySet::contains_key(&map, &"y"));
        assert_eq!(map.key_iter().collect::<Vec<_>>(), vec![&"x", &"y"]);
    }
}

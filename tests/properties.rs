//! Property tests for chainmap
//!
//! These tests check the map's size/lookup/iteration laws against a
//! reference `std::collections::HashMap`, and the heap sort against the
//! standard library sort.

use chainmap::heap_sort::{self, heapify};
use chainmap::ChainMap;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// ============================================================
// ChainMap property tests
// ============================================================

fn pairs() -> impl Strategy<Value = Vec<(u16, i32)>> {
    prop::collection::vec((0u16..64, any::<i32>()), 0..200)
}

proptest! {
    #[test]
    fn size_counts_distinct_keys(pairs in pairs(), capacity in 1usize..32) {
        let mut map = ChainMap::with_capacity(capacity).unwrap();
        for &(key, value) in &pairs {
            map.put(key, value);
        }

        let distinct: HashSet<_> = pairs.iter().map(|(key, _)| *key).collect();
        prop_assert_eq!(map.len(), distinct.len());
        prop_assert_eq!(map.capacity(), capacity);
    }

    #[test]
    fn get_returns_last_value_put(pairs in pairs(), probe in any::<u16>()) {
        let mut map = ChainMap::new();
        let mut reference = HashMap::new();
        for &(key, value) in &pairs {
            prop_assert_eq!(map.put(key, value), reference.insert(key, value));
        }

        for (key, value) in &reference {
            prop_assert_eq!(map.get(key), Some(value));
        }
        // Keys are generated below 64, so anything above was never inserted
        if probe >= 64 {
            prop_assert_eq!(map.get(&probe), None);
        }
    }

    #[test]
    fn remove_drops_exactly_one(pairs in pairs(), victim in 0u16..80) {
        let mut map: ChainMap<u16, i32> = pairs.iter().copied().collect();
        let before = map.len();
        let was_present = map.contains_key(&victim);

        let removed = map.remove(&victim);

        prop_assert_eq!(removed.is_some(), was_present);
        prop_assert_eq!(map.len(), if was_present { before - 1 } else { before });
        prop_assert_eq!(map.get(&victim), None);
        prop_assert_eq!(map.remove(&victim), None);
        prop_assert_eq!(map.len(), if was_present { before - 1 } else { before });
    }

    #[test]
    fn iteration_yields_each_key_once(pairs in pairs(), capacity in 1usize..32) {
        let mut map = ChainMap::with_capacity(capacity).unwrap();
        let mut reference = HashMap::new();
        for &(key, value) in &pairs {
            map.put(key, value);
            reference.insert(key, value);
        }
        // Drop every third key again
        let dropped: Vec<_> = reference.keys().copied().filter(|key| key % 3 == 0).collect();
        for key in dropped {
            map.remove(&key);
            reference.remove(&key);
        }

        let seen: Vec<_> = map.iter().map(|(key, value)| (*key, *value)).collect();
        prop_assert_eq!(seen.len(), map.len());
        prop_assert_eq!(map.iter().len(), map.len());

        let seen_map: HashMap<_, _> = seen.into_iter().collect();
        prop_assert_eq!(seen_map, reference);
    }

    #[test]
    fn cursor_agrees_with_iterator(pairs in pairs()) {
        let map: ChainMap<u16, i32> = pairs.into_iter().collect();

        let mut cursor = map.iter();
        let mut walked = Vec::new();
        while cursor.has_next() {
            walked.push(cursor.try_next().unwrap());
        }
        prop_assert!(cursor.try_next().is_err());
        prop_assert_eq!(walked, map.iter().collect::<Vec<_>>());
    }
}

// ============================================================
// Heap sort property tests
// ============================================================

fn is_max_heap(values: &[i32], heap_size: usize) -> bool {
    (1..heap_size).all(|child| values[(child - 1) / 2] >= values[child])
}

proptest! {
    #[test]
    fn sort_matches_std_sort(mut values in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut expected = values.clone();
        expected.sort();

        heap_sort::sort(&mut values);
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn sort_is_idempotent(mut values in prop::collection::vec(-20i32..20, 0..100)) {
        heap_sort::sort(&mut values);
        let once = values.clone();
        heap_sort::sort(&mut values);
        prop_assert_eq!(values, once);
    }

    #[test]
    fn build_max_heap_puts_max_at_root(mut values in prop::collection::vec(any::<i32>(), 1..200)) {
        let max = *values.iter().max().unwrap();
        heap_sort::build_max_heap(&mut values);
        prop_assert!(is_max_heap(&values, values.len()));
        prop_assert_eq!(values[0], max);
    }

    #[test]
    fn heapify_restores_heap_below_root(
        mut values in prop::collection::vec(any::<i32>(), 1..200),
        replacement in any::<i32>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let heap_size = values.len();
        heap_sort::build_max_heap(&mut values);

        // Replace one node; its subtrees are still heaps
        let root = pick.index(heap_size);
        values[root] = replacement.min(values[root]);
        heapify(&mut values, heap_size, root);

        prop_assert!(is_max_heap(&values, heap_size));
    }
}

use std::{collections::BTreeMap, ops::Index};

use serde::Serialize;

/// A total function from `K` to `V`, stored as the keys where the value changes.
///
/// Every key below the first change-point maps to the base value. Each change-point holds the value
/// that starts at its key and lasts until the next change-point. The map is kept in canonical form: no
/// change-point holds the same value as the segment before it, so the number of stored entries always
/// equals the number of value transitions in the domain.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct IntervalMap<K, V> {
    base_value: V,
    change_points: BTreeMap<K, V>,
}

impl<K, V: Default> Default for IntervalMap<K, V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<K, V> IntervalMap<K, V> {
    /// Creates a map where every key is associated with `base_value`.
    pub fn new(base_value: V) -> Self {
        Self { base_value, change_points: BTreeMap::new() }
    }

    /// The value of every key below the first change-point. Never changed by [`Self::assign`].
    pub fn base_value(&self) -> &V {
        &self.base_value
    }

    /// Number of stored change-points.
    pub fn len(&self) -> usize {
        self.change_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.change_points.is_empty()
    }
}

impl<K: Ord, V> IntervalMap<K, V> {
    /// Returns the value associated with `key`.
    pub fn lookup(&self, key: &K) -> &V {
        self.change_points.range(..=key).next_back().map_or(&self.base_value, |(_, value)| value)
    }

    /// Returns the value in effect on the keys right before `key`.
    fn value_before(&self, key: &K) -> &V {
        self.change_points.range(..key).next_back().map_or(&self.base_value, |(_, value)| value)
    }
}

impl<K: Ord, V: PartialEq> IntervalMap<K, V> {
    /// Checks that no change-point repeats the value of the segment before it.
    pub fn is_canonical(&self) -> bool {
        let mut previous = &self.base_value;
        for value in self.change_points.values() {
            if value == previous {
                return false;
            }
            previous = value;
        }
        true
    }
}

impl<K: Ord + Clone, V: PartialEq + Clone> IntervalMap<K, V> {
    /// Assigns `value` to every key in the half-open range `[key_begin, key_end)`, overwriting previous
    /// values. Does nothing unless `key_begin < key_end`.
    pub fn assign(&mut self, key_begin: K, key_end: K, value: V) {
        if !(key_begin < key_end) {
            return;
        }

        // Both boundary values must be read before anything in the range is erased
        let end_value = self.lookup(&key_end).clone();
        let begin_needed = *self.value_before(&key_begin) != value;

        // The entry at `key_end` is erased too and re-inserted below if it's still a transition
        let covered: Vec<K> = self.change_points.range(&key_begin..=&key_end).map(|(key, _)| key.clone()).collect();
        for key in &covered {
            self.change_points.remove(key);
        }

        if end_value != value {
            self.change_points.insert(key_end, end_value);
        }
        if begin_needed {
            self.change_points.insert(key_begin, value);
        }

        debug_assert!(self.is_canonical());
    }
}

impl<K: Ord, V> Index<&K> for IntervalMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.lookup(key)
    }
}

//! Value storage with an explicit miss policy

use std::{collections::HashMap, hash::Hash};

/// Sparse map from keys to values where absent keys read as a fixed default
///
/// Reads never insert. Only [`DefaultMap::insert`] grows the map, so
/// [`DefaultMap::len`] counts the entries that have actually been updated.
#[derive(Debug, Clone)]
pub struct DefaultMap<K> {
    values: HashMap<K, f64>,
    default: f64,
}

impl<K: Eq + Hash> DefaultMap<K> {
    pub fn new(default: f64) -> Self {
        Self {
            values: HashMap::new(),
            default,
        }
    }

    pub fn get(&self, key: &K) -> f64 {
        self.values.get(key).copied().unwrap_or(self.default)
    }

    pub fn insert(&mut self, key: K, value: f64) {
        self.values.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_returns_default_without_inserting() {
        let map: DefaultMap<(u8, u8)> = DefaultMap::new(1.0);
        assert_eq!(map.get(&(3, 4)), 1.0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert_overrides_default() {
        let mut map = DefaultMap::new(1.0);
        map.insert("k", -2.5);
        assert_eq!(map.get(&"k"), -2.5);
        assert_eq!(map.get(&"other"), 1.0);
        assert_eq!(map.len(), 1);
    }
}

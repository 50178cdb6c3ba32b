//! Key-sorted map type for TOON objects.
//!
//! This module provides [`Map`], a wrapper around [`IndexMap`] that keeps its
//! entries ordered by key rather than by insertion. Key order is load-bearing
//! for TOON: tabular array headers and object entries are emitted in iteration
//! order, so a sorted map makes serialization deterministic regardless of how
//! the object was built.
//!
//! ## Examples
//!
//! ```rust
//! use toon::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! // Iteration follows key sort order, not insertion order.
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["age", "name"]);
//! ```

use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// An ordered map of string keys to TOON values.
///
/// Entries iterate in key sort order. This is what makes [`crate::to_string`]
/// deterministic and what fixes the column order of tabular array headers.
///
/// # Examples
///
/// ```rust
/// use toon::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("b".to_string(), Value::from(2));
/// map.insert("a".to_string(), Value::from(1));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<String, crate::Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair at its sorted position.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the entry keeps its position.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert_sorted(key, value).1
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in key sort order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in key sort order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the map, in key sort order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for Map {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, crate::Value>> for Map {
    fn from(map: BTreeMap<String, crate::Value>) -> Self {
        // Already key-sorted.
        Map(map.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, crate::Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        let mut inner = IndexMap::from_iter(iter);
        inner.sort_unstable_keys();
        Map(inner)
    }
}

impl PartialOrd for Map {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.0.iter().partial_cmp(other.0.iter())
    }
}

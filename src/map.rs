//! Ordered dict type for PYON mappings.
//!
//! This module provides [`Dict`], a wrapper around [`IndexMap`] that maintains
//! insertion order for dict entries. Insertion order is the order the encoder
//! emits, so round-tripped text keeps its key order, and keys may be any
//! [`HashableValue`](crate::HashableValue), not just strings.
//!
//! ## Why IndexMap?
//!
//! PYON uses `IndexMap` instead of `HashMap` to ensure:
//!
//! - **Deterministic output**: entries serialize in a consistent order
//! - **Iteration order**: entries are iterated in insertion order
//! - **Compatibility**: easier testing and debugging with predictable output
//!
//! ## Examples
//!
//! ```rust
//! use serde_pyon::{Dict, HashableValue, Value};
//!
//! let mut dict = Dict::new();
//! dict.insert(HashableValue::from("name"), Value::from("Alice"));
//! dict.insert(HashableValue::Int(1), Value::from("one"));
//!
//! assert_eq!(dict.len(), 2);
//! assert_eq!(dict.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::HashableValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of hashable keys to PYON values.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion order,
/// which is what makes PYON encoding deterministic. Unlike JSON objects, keys
/// are full [`HashableValue`]s: integers, floats, booleans, `None`, and
/// tuples are all valid alongside strings.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{Dict, HashableValue, Value};
///
/// let mut dict = Dict::new();
/// dict.insert(HashableValue::from("first"), Value::from(1));
/// dict.insert(HashableValue::from("second"), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = dict.keys().cloned().collect();
/// assert_eq!(keys, vec![HashableValue::from("first"), HashableValue::from("second")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dict(IndexMap<HashableValue, crate::Value>);

impl Dict {
    /// Creates an empty `Dict`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Dict;
    ///
    /// let dict = Dict::new();
    /// assert!(dict.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Dict(IndexMap::new())
    }

    /// Creates an empty `Dict` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Dict(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the dict.
    ///
    /// If the dict already contained this key, the old value is returned and
    /// the key keeps its original position (last-write-wins on the value).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::{Dict, HashableValue, Value};
    ///
    /// let mut dict = Dict::new();
    /// assert!(dict.insert(HashableValue::from("key"), Value::from(42)).is_none());
    /// assert!(dict.insert(HashableValue::from("key"), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: HashableValue, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::{Dict, HashableValue, Value};
    ///
    /// let mut dict = Dict::new();
    /// dict.insert(HashableValue::Int(1), Value::from("one"));
    /// assert_eq!(dict.get(&HashableValue::Int(1)).and_then(|v| v.as_str()), Some("one"));
    /// ```
    #[must_use]
    pub fn get(&self, key: &HashableValue) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns a reference to the value under a string key.
    ///
    /// Convenience for the common case of string-keyed dicts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::{Dict, HashableValue, Value};
    ///
    /// let mut dict = Dict::new();
    /// dict.insert(HashableValue::from("key"), Value::from(42));
    /// assert_eq!(dict.get_str("key").and_then(|v| v.as_i64()), Some(42));
    /// ```
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(&HashableValue::Str(key.to_string()))
    }

    /// Returns `true` if the dict contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &HashableValue) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the dict.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::{Dict, HashableValue, Value};
    ///
    /// let mut dict = Dict::new();
    /// assert_eq!(dict.len(), 0);
    /// dict.insert(HashableValue::from("key"), Value::from(42));
    /// assert_eq!(dict.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the dict contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the dict, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, HashableValue, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the dict, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, HashableValue, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the dict, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, HashableValue, crate::Value> {
        self.0.iter()
    }
}

impl Default for Dict {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<HashableValue, crate::Value>> for Dict {
    fn from(map: HashMap<HashableValue, crate::Value>) -> Self {
        Dict(map.into_iter().collect())
    }
}

impl From<Dict> for HashMap<HashableValue, crate::Value> {
    fn from(dict: Dict) -> Self {
        dict.0.into_iter().collect()
    }
}

impl IntoIterator for Dict {
    type Item = (HashableValue, crate::Value);
    type IntoIter = indexmap::map::IntoIter<HashableValue, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dict {
    type Item = (&'a HashableValue, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, HashableValue, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(HashableValue, crate::Value)> for Dict {
    fn from_iter<T: IntoIterator<Item = (HashableValue, crate::Value)>>(iter: T) -> Self {
        Dict(IndexMap::from_iter(iter))
    }
}

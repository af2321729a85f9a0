//! Read-only result of a successful validation pass

use std::collections::HashMap;
use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::errors::{ParseError, ParseResult};

/// Immutable mapping from output key to final value, in registration order.
///
/// Holds exactly one entry per declared field. A field that was declared but
/// absent from the input is present here with its default (or null); a key
/// that was never declared is absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Namespace {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Namespace {
    /// Builds a namespace from ordered pairs. Keys are unique by construction
    /// of the registry.
    pub(crate) fn from_entries(entries: Vec<(String, Value)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Returns the value stored under a declared output key.
    ///
    /// # Errors
    ///
    /// Returns an attribute-not-found error if `key` was never declared,
    /// which is distinct from a declared field holding null.
    pub fn attr(&self, key: &str) -> ParseResult<&Value> {
        self.get(key).ok_or_else(|| ParseError::AttributeNotFound {
            key: key.to_string(),
        })
    }

    /// Returns the value stored under `key`, or `None` if it was never declared
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Returns the value stored under `key`, or `default` if it was never declared
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Snapshot of every stored pair, in registration order
    pub fn to_dict(&self) -> Map<String, Value> {
        self.entries.iter().cloned().collect()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.entries.into_iter().collect()
    }

    /// Iterates `(output_key, value)` in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for Namespace {
    type Output = Value;

    /// Panics if `key` was never declared; use [`Namespace::attr`] to handle that case.
    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no field named '{}' was declared", key),
        }
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

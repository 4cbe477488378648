//! The indifferent-access mapping.
//!
//! [`IndifferentMap`] owns a private insertion-ordered [`Map`] whose keys are
//! always normalized: a symbol key and its textual rendering address the same
//! slot. Every operation that accepts a key runs it through
//! [`convert_key`]; every value written runs through [`convert_value`], so
//! nested plain mappings come back out as `IndifferentMap`s.
//!
//! Mutation requires `&mut self`; there is no interior locking.

use std::fmt;

use indexmap::map::{Entry, IntoIter, Iter, Keys, Values};
use serde::ser::{Serialize, Serializer};

use crate::convert::{convert_entries, convert_hash, convert_key, convert_value};
use crate::error::IndifferentError;
use crate::value::{Map, Value, fmt_entries, maps_loose_eq, serialize_entries};

#[derive(Clone, Debug, Default)]
pub struct IndifferentMap {
    entries: Map,
    /// Returned by reads of missing keys when set.
    default: Option<Box<Value>>,
}

impl IndifferentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty map whose missing keys read as `default`.
    pub fn with_default(default: impl Into<Value>) -> Self {
        Self {
            entries: Map::new(),
            default: Some(Box::new(default.into())),
        }
    }

    /// Build from an arbitrary source.
    ///
    /// A mapping source is merged in with every key and nested value
    /// normalized. Any other source becomes the default value of an empty
    /// map instead of being rejected.
    pub fn from_value(source: impl Into<Value>) -> Self {
        match source.into() {
            Value::Map(map) => Self::from(map),
            Value::Indifferent(map) => Self::from(map.into_entries()),
            other => Self::with_default(other),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_deref()
    }

    /// Entries in insertion order, keys already normalized.
    pub fn iter(&self) -> Iter<'_, Value, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Keys<'_, Value, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, Value, Value> {
        self.entries.values()
    }

    /// Stored value for `key`, or the default value when the key is absent.
    pub fn get(&self, key: impl Into<Value>) -> Option<&Value> {
        self.entries
            .get(&convert_key(key.into()))
            .or(self.default.as_deref())
    }

    /// Stored value for `key`; absence is an error rather than `None`.
    pub fn fetch(&self, key: impl Into<Value>) -> Result<&Value, IndifferentError> {
        let key = convert_key(key.into());
        match self.entries.get(&key) {
            Some(value) => Ok(value),
            None => Err(IndifferentError::KeyNotFound { key }),
        }
    }

    /// Stored value for `key`, or `default` (normalized like a written value).
    pub fn fetch_or(&self, key: impl Into<Value>, default: impl Into<Value>) -> Value {
        match self.entries.get(&convert_key(key.into())) {
            Some(value) => value.clone(),
            None => convert_value(default.into()),
        }
    }

    /// Stored value for `key`, or the result of `fallback` called with the
    /// normalized key.
    pub fn fetch_or_else<F>(&self, key: impl Into<Value>, fallback: F) -> Value
    where
        F: FnOnce(&Value) -> Value,
    {
        let key = convert_key(key.into());
        match self.entries.get(&key) {
            Some(value) => value.clone(),
            None => fallback(&key),
        }
    }

    pub fn contains_key(&self, key: impl Into<Value>) -> bool {
        self.entries.contains_key(&convert_key(key.into()))
    }

    pub fn has_key(&self, key: impl Into<Value>) -> bool {
        self.contains_key(key)
    }

    pub fn contains(&self, key: impl Into<Value>) -> bool {
        self.contains_key(key)
    }

    pub fn includes(&self, key: impl Into<Value>) -> bool {
        self.contains_key(key)
    }

    /// Write `value` under the normalized `key` and return the stored value.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> &Value {
        let key = convert_key(key.into());
        let value = convert_value(value.into());
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(value);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(value),
        }
    }

    pub fn store(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> &Value {
        self.set(key, value)
    }

    /// Remove the entry for `key`, keeping the order of the others.
    pub fn delete(&mut self, key: impl Into<Value>) -> Option<Value> {
        self.entries.shift_remove(&convert_key(key.into()))
    }

    /// Merge `other` into this map in place. Later entries win.
    pub fn update(&mut self, other: impl Into<Value>) -> Result<&mut Self, IndifferentError> {
        let incoming = converted_mapping("update", other.into())?;
        self.entries.extend(incoming);
        Ok(self)
    }

    pub fn merge_into(&mut self, other: impl Into<Value>) -> Result<&mut Self, IndifferentError> {
        let incoming = converted_mapping("merge_into", other.into())?;
        self.entries.extend(incoming);
        Ok(self)
    }

    /// Copy of this map with `other` merged in.
    pub fn merge(&self, other: impl Into<Value>) -> Result<IndifferentMap, IndifferentError> {
        let incoming = converted_mapping("merge", other.into())?;
        let mut merged = self.clone();
        merged.entries.extend(incoming);
        Ok(merged)
    }

    /// Replace every entry with the normalized contents of `other`.
    ///
    /// The default value is cleared along with the entries.
    pub fn replace(&mut self, other: impl Into<Value>) -> Result<&mut Self, IndifferentError> {
        self.entries = converted_mapping("replace", other.into())?;
        self.default = None;
        Ok(self)
    }

    /// Reinitialize this map as a normalized copy of `other`.
    pub fn initialize_copy(
        &mut self,
        other: impl Into<Value>,
    ) -> Result<&mut Self, IndifferentError> {
        self.entries = converted_mapping("initialize_copy", other.into())?;
        self.default = None;
        Ok(self)
    }

    /// Value equality with `other` after normalizing its keys.
    ///
    /// Order-insensitive; numbers compare across `Int`/`Float`. A
    /// non-mapping is never equal.
    pub fn equals(&self, other: impl Into<Value>) -> bool {
        match convert_hash(other.into()) {
            Value::Map(other) => maps_loose_eq(&self.entries, &other),
            _ => false,
        }
    }

    /// Type-exact equality with `other` after normalizing its keys.
    pub fn structurally_equal(&self, other: impl Into<Value>) -> bool {
        match convert_hash(other.into()) {
            Value::Map(other) => self.entries == other,
            _ => false,
        }
    }

    /// New map of value -> key pairs.
    ///
    /// When several keys share a value the last one in insertion order wins;
    /// callers should not rely on anything stronger.
    pub fn invert(&self) -> IndifferentMap {
        let mut inverted = IndifferentMap::new();
        for (key, value) in &self.entries {
            inverted.set(value.clone(), key.clone());
        }
        inverted
    }

    /// Look up each key in order; missing keys yield the default value or
    /// `None`.
    pub fn values_at<K, I>(&self, keys: I) -> Vec<Option<&Value>>
    where
        K: Into<Value>,
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.get(key)).collect()
    }

    pub(crate) fn entries(&self) -> &Map {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Map {
        self.entries
    }
}

/// Hash-convert a bulk-operation argument, rejecting non-mappings.
fn converted_mapping(operation: &'static str, other: Value) -> Result<Map, IndifferentError> {
    match convert_hash(other) {
        Value::Map(map) => Ok(map),
        other => Err(IndifferentError::TypeMismatch {
            operation,
            found: other.type_name(),
        }),
    }
}

impl From<Map> for IndifferentMap {
    fn from(map: Map) -> Self {
        Self {
            entries: convert_entries(map),
            default: None,
        }
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for IndifferentMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = IndifferentMap::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl IntoIterator for IndifferentMap {
    type Item = (Value, Value);
    type IntoIter = IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndifferentMap {
    type Item = (&'a Value, &'a Value);
    type IntoIter = Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl PartialEq for IndifferentMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for IndifferentMap {}

impl fmt::Display for IndifferentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_entries(f, &self.entries)
    }
}

impl Serialize for IndifferentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(&self.entries, serializer)
    }
}

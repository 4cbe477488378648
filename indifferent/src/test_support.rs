//! Test-only helpers for building plain mappings.

use crate::value::{Map, Value};

/// Build a plain (unnormalized) mapping from `(key, value)` pairs.
pub fn hash<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Map
where
    K: Into<Value>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Build a plain mapping as a [`Value`].
pub fn hash_value<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Value
where
    K: Into<Value>,
    V: Into<Value>,
{
    Value::Map(hash(pairs))
}

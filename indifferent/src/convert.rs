//! Normalization applied to every key and value entering an
//! [`IndifferentMap`].
//!
//! These functions are pure: they take ownership of their input and return
//! the normalized form without touching any map.

use crate::map::IndifferentMap;
use crate::value::{Map, Value};

/// Symbol keys become their text; every other key is returned unchanged.
pub fn convert_key(key: Value) -> Value {
    match key {
        Value::Sym(symbol) => Value::Str(symbol.as_str().to_string()),
        other => other,
    }
}

/// Plain mappings are wrapped (recursively) into an [`IndifferentMap`];
/// every other value, including an already indifferent map, is unchanged.
pub fn convert_value(value: Value) -> Value {
    match value {
        Value::Map(map) => Value::Indifferent(IndifferentMap::from(map)),
        other => other,
    }
}

/// Rebuild a mapping argument as a plain [`Map`] with every key and value
/// normalized. Non-mappings pass through so the caller can reject them.
pub fn convert_hash(value: Value) -> Value {
    match value {
        Value::Map(map) => Value::Map(convert_entries(map)),
        Value::Indifferent(map) => Value::Map(convert_entries(map.into_entries())),
        other => other,
    }
}

pub(crate) fn convert_entries(map: Map) -> Map {
    map.into_iter()
        .map(|(key, value)| (convert_key(key), convert_value(value)))
        .collect()
}

//! Closed value model shared by keys and values.
//!
//! Keys and values use the same [`Value`] type so that composite keys pass
//! through untouched and [`IndifferentMap::invert`] can turn values into keys.
//!
//! Two notions of equality exist:
//! - `==` is strict and drives key identity: `Int(1) != Float(1.0)`, floats
//!   compare by bit pattern, `Str("a") != Sym(:a)`.
//! - [`Value::loose_eq`] is value comparison: numbers compare by magnitude
//!   across `Int`/`Float` and `NaN` never equals itself.
//!
//! A plain [`Map`] and an [`IndifferentMap`] holding the same entries are
//! equal under both.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::map::IndifferentMap;
use crate::symbol::Symbol;

/// Plain insertion-ordered mapping. Keys are not normalized.
pub type Map = IndexMap<Value, Value>;

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sym(Symbol),
    List(Vec<Value>),
    /// Plain mapping; converted to [`Value::Indifferent`] when it enters an
    /// [`IndifferentMap`].
    Map(Map),
    Indifferent(IndifferentMap),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Sym(_) => "symbol",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Indifferent(_) => "indifferent map",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Text of a string or symbol.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            Value::Sym(symbol) => Some(symbol.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_indifferent(&self) -> Option<&IndifferentMap> {
        match self {
            Value::Indifferent(map) => Some(map),
            _ => None,
        }
    }

    /// Value comparison: `Int`/`Float` cross-compare numerically and
    /// containers compare element-wise with `loose_eq`.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                int_eq_float(*a, *b)
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            _ => match (self.entries(), other.entries()) {
                (Some(a), Some(b)) => maps_loose_eq(a, b),
                (None, None) => self == other,
                _ => false,
            },
        }
    }

    pub(crate) fn entries(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            Value::Indifferent(map) => Some(map.entries()),
            _ => None,
        }
    }
}

/// Exact comparison: the float must be integral and inside `i64` range.
fn int_eq_float(int: i64, float: f64) -> bool {
    // 2^63 itself is out of range; `-2^63` is representable exactly.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    float.fract() == 0.0 && (-LIMIT..LIMIT).contains(&float) && float as i64 == int
}

/// Order-insensitive entry comparison using strict key identity and
/// [`Value::loose_eq`] for values.
pub(crate) fn maps_loose_eq(a: &Map, b: &Map) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| value.loose_eq(other)))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => match (self.entries(), other.entries()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Nil => state.write_u8(0),
            Value::Bool(value) => {
                state.write_u8(1);
                value.hash(state);
            }
            Value::Int(value) => {
                state.write_u8(2);
                value.hash(state);
            }
            Value::Float(value) => {
                state.write_u8(3);
                value.to_bits().hash(state);
            }
            Value::Str(value) => {
                state.write_u8(4);
                value.hash(state);
            }
            Value::Sym(symbol) => {
                state.write_u8(5);
                symbol.hash(state);
            }
            Value::List(items) => {
                state.write_u8(6);
                items.hash(state);
            }
            // Map equality ignores order and representation, so only the
            // length is stable enough to hash.
            Value::Map(_) | Value::Indifferent(_) => {
                state.write_u8(7);
                self.entries().map_or(0, Map::len).hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Str(value) => write!(f, "{value:?}"),
            Value::Sym(symbol) => write!(f, "{symbol:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => fmt_entries(f, map),
            Value::Indifferent(map) => write!(f, "{map}"),
        }
    }
}

pub(crate) fn fmt_entries(f: &mut fmt::Formatter<'_>, map: &Map) -> fmt::Result {
    f.write_str("{")?;
    for (index, (key, value)) in map.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key} => {value}")?;
    }
    f.write_str("}")
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Str(value) => serializer.serialize_str(value),
            Value::Sym(symbol) => serializer.serialize_str(symbol.as_str()),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => serialize_entries(map, serializer),
            Value::Indifferent(map) => map.serialize(serializer),
        }
    }
}

pub(crate) fn serialize_entries<S: Serializer>(map: &Map, serializer: S) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, value) in map {
        out.serialize_entry(key, value)?;
    }
    out.end()
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => Value::Int(int),
                None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(text) => Value::Str(text),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (Value::Str(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Sym(symbol)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<&Map> for Value {
    fn from(map: &Map) -> Self {
        Value::Map(map.clone())
    }
}

impl From<IndifferentMap> for Value {
    fn from(map: IndifferentMap) -> Self {
        Value::Indifferent(map)
    }
}

impl From<&IndifferentMap> for Value {
    fn from(map: &IndifferentMap) -> Self {
        Value::Indifferent(map.clone())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::sym;
    use crate::test_support::hash;

    #[test]
    fn strict_equality_separates_text_and_symbol() {
        assert_ne!(Value::from("a"), Value::from(sym("a")));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn loose_eq_compares_numbers_by_magnitude() {
        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert!(!Value::Float(f64::NAN).loose_eq(&Value::Float(f64::NAN)));
        assert!(Value::List(vec![Value::Int(2)]).loose_eq(&Value::List(vec![Value::Float(2.0)])));
    }

    #[test]
    fn loose_eq_is_exact_beyond_float_precision() {
        assert!(!Value::Int(9_007_199_254_740_993).loose_eq(&Value::Float(9_007_199_254_740_992.0)));
        assert!(Value::Int(9_007_199_254_740_992).loose_eq(&Value::Float(9_007_199_254_740_992.0)));
        assert!(!Value::Int(i64::MAX).loose_eq(&Value::Float(9_223_372_036_854_775_808.0)));
        assert!(!Value::Int(1).loose_eq(&Value::Float(1.5)));
    }

    #[test]
    fn accessors_match_only_their_variant() {
        assert!(Value::Nil.is_nil());
        assert!(!Value::Bool(false).is_nil());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(1).as_bool(), None);
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Float(3.0).as_int(), None);
        assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
        assert_eq!(Value::Int(2).as_float(), Some(2.0));
        assert_eq!(Value::from(sym("a")).as_str(), Some("a"));
        assert_eq!(Value::Nil.as_float(), None);
    }

    #[test]
    fn plain_and_indifferent_maps_with_same_entries_are_equal() {
        let plain = hash([("a", 1)]);
        let wrapped = IndifferentMap::from(plain.clone());
        assert_eq!(Value::Map(plain), Value::Indifferent(wrapped));
    }

    #[test]
    fn map_equality_ignores_insertion_order() {
        assert_eq!(
            Value::Map(hash([("a", 1), ("b", 2)])),
            Value::Map(hash([("b", 2), ("a", 1)]))
        );
    }

    #[test]
    fn json_objects_become_plain_maps() {
        let json = serde_json::json!({"port": 3000, "ratio": 0.5, "tags": ["a"], "none": null});
        let value = Value::from(json);
        let map = value.entries().expect("map");
        assert!(matches!(value, Value::Map(_)));
        assert_eq!(map.get(&Value::from("port")), Some(&Value::Int(3000)));
        assert_eq!(map.get(&Value::from("ratio")), Some(&Value::Float(0.5)));
        assert_eq!(map.get(&Value::from("none")), Some(&Value::Nil));
    }

    #[test]
    fn display_renders_inspect_style() {
        let value = Value::Map(hash([("a", Value::from(sym("b")))]));
        assert_eq!(value.to_string(), r#"{"a" => :b}"#);
    }

    #[test]
    fn serializes_symbols_as_strings() {
        let value = Value::List(vec![Value::from(sym("Port")), Value::Nil]);
        let json = serde_json::to_string(&value).expect("serialize");
        assert_eq!(json, r#"["Port",null]"#);
    }
}

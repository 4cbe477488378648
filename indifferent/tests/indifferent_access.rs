//! Behavioural properties of `IndifferentMap` across key notations.
//!
//! Each test exercises the public API only, mirroring how collaborators
//! consume the crate.

use indifferent::test_support::{hash, hash_value};
use indifferent::{IndifferentError, IndifferentMap, Map, Value, WithIndifferentAccess, sym};

fn sample() -> Map {
    hash([
        (Value::from("name"), Value::from("app")),
        (Value::from(sym("port")), Value::Int(3000)),
        (Value::Int(7), Value::Bool(true)),
        (Value::from("env"), hash_value([(sym("name"), "test")])),
    ])
}

#[test]
fn text_write_is_visible_through_symbol_and_back() {
    let mut map = IndifferentMap::new();
    map.set("host", "localhost");
    map.set(sym("port"), 3000);

    assert_eq!(map.get(sym("host")), Some(&Value::from("localhost")));
    assert_eq!(map.get("port"), Some(&Value::Int(3000)));
}

#[test]
fn every_wrapped_key_reads_the_same_in_both_notations() {
    let map = sample().with_indifferent_access();
    for name in ["name", "port", "env"] {
        assert_eq!(map.get(name), map.get(sym(name)), "key {name}");
        assert!(map.get(name).is_some(), "key {name}");
    }
    assert_eq!(map.get(7), Some(&Value::Bool(true)));
}

#[test]
fn wrapping_is_idempotent_for_reads_and_writes() {
    let once = sample().with_indifferent_access();
    let mut twice = IndifferentMap::from_value(once.clone());
    assert_eq!(twice, once);

    let mut once = once;
    once.set(sym("extra"), 1);
    twice.set("extra", 1);
    assert_eq!(twice, once);
}

#[test]
fn nested_mapping_written_later_is_indifferent() {
    let mut map = IndifferentMap::new();
    map.set("db", hash_value([(sym("pool"), 5)]));

    let db = map.get(sym("db")).and_then(Value::as_indifferent).expect("nested");
    assert_eq!(db.get("pool"), Some(&Value::Int(5)));
}

#[test]
fn nested_mapping_from_merge_is_indifferent() {
    let map = IndifferentMap::new()
        .merge(hash([(sym("x"), hash_value([(sym("y"), 1)]))]))
        .expect("merge");
    let x = map.get("x").and_then(Value::as_indifferent).expect("nested");
    assert_eq!(x.get(sym("y")), Some(&Value::Int(1)));
}

#[test]
fn merging_symbol_keys_equals_merging_text_keys() {
    let base = IndifferentMap::from(hash([("a", 1)]));
    let with_symbols = base
        .merge(hash([(sym("b"), 2), (sym("a"), 3)]))
        .expect("merge symbols");
    let with_text = base
        .merge(hash([("b", 2), ("a", 3)]).with_indifferent_access())
        .expect("merge text");

    assert_eq!(with_symbols, with_text);
    assert!(with_symbols.structurally_equal(&with_text));
}

#[test]
fn invert_twice_recovers_unique_pairs() {
    let map = IndifferentMap::from(hash([("a", 1), ("b", 2), ("c", 3)]));
    let round_trip = map.invert().invert();
    assert_eq!(round_trip, map);
}

#[test]
fn wrap_then_set_symbol_scenario() {
    let mut map = hash([("a", 1)]).with_indifferent_access();
    map.set(sym("b"), 2);
    assert_eq!(map.get("b"), Some(&Value::Int(2)));
    assert_eq!(map.get(sym("a")), Some(&Value::Int(1)));
}

#[test]
fn nested_lookup_scenario() {
    let map = hash([("x", hash_value([("y", 1)]))]).with_indifferent_access();
    let x = map.get("x").expect("x present");
    let nested = x.as_indifferent().expect("x is indifferent");
    assert_eq!(nested.get(sym("y")), Some(&Value::Int(1)));
}

#[test]
fn fetch_scenario() {
    let map = IndifferentMap::new();
    assert!(matches!(
        map.fetch("missing"),
        Err(IndifferentError::KeyNotFound { .. })
    ));
    assert_eq!(map.fetch_or("missing", 42), Value::Int(42));
}

#[test]
fn values_at_scenario() {
    let map = hash([("a", 1), ("b", 2)]).with_indifferent_access();
    let values = map.values_at([Value::from("a"), Value::from(sym("b"))]);
    assert_eq!(values, vec![Some(&Value::Int(1)), Some(&Value::Int(2))]);
}

#[test]
fn replace_and_update_reject_non_mappings() {
    let mut map = IndifferentMap::from(hash([("a", 1)]));
    assert!(matches!(
        map.replace(vec![Value::Int(1)]),
        Err(IndifferentError::TypeMismatch { found: "list", .. })
    ));
    assert!(matches!(
        map.merge("text"),
        Err(IndifferentError::TypeMismatch { operation: "merge", .. })
    ));
    assert_eq!(map.get("a"), Some(&Value::Int(1)));
}

#[test]
fn serializes_with_normalized_keys() {
    let map = hash([(sym("Port"), 3000)]).with_indifferent_access();
    let json = serde_json::to_value(&map).expect("serialize");
    assert_eq!(json, serde_json::json!({"Port": 3000}));
}

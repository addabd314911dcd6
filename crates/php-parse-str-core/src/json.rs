//! JSON conversion for parsed query values.
//!
//! This module provides conversion from [`Node`] and [`QueryMap`] to JSON
//! using serde_json. Enable the `serde` feature to use this module.

use serde_json::{Map, Value as JsonValue};

use crate::types::{Node, QueryMap};

/// Convert a node to a JSON value.
///
/// # Mapping Rules
///
/// | Node | JSON Type |
/// |------|-----------|
/// | `Scalar` | `string` |
/// | `List` | `array` |
/// | `Map` | `object` |
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::{from_str, to_json};
///
/// let map = from_str("a[]=1&a[]=2").unwrap();
/// assert_eq!(to_json(&map["a"]), serde_json::json!(["1", "2"]));
/// ```
pub fn to_json(node: &Node) -> JsonValue {
    match node {
        Node::Scalar(s) => JsonValue::String(s.clone()),
        Node::List(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Node::Map(map) => map_to_json(map),
    }
}

/// Convert a whole parse result to a JSON object.
pub fn map_to_json(map: &QueryMap) -> JsonValue {
    let mut object = Map::new();
    for (key, node) in map {
        object.insert(key.clone(), to_json(node));
    }
    JsonValue::Object(object)
}

/// Convert a parse result to a JSON string.
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::{from_str, json::to_json_string};
///
/// let map = from_str("user[name]=Alice&user[tags][]=admin").unwrap();
/// let json_str = to_json_string(&map).unwrap();
/// assert!(json_str.contains(r#""name":"Alice""#));
/// assert!(json_str.contains(r#""tags":["admin"]"#));
/// ```
pub fn to_json_string(map: &QueryMap) -> serde_json::Result<String> {
    let json = map_to_json(map);
    serde_json::to_string(&json)
}

/// Convert a parse result to a pretty-printed JSON string.
pub fn to_json_string_pretty(map: &QueryMap) -> serde_json::Result<String> {
    let json = map_to_json(map);
    serde_json::to_string_pretty(&json)
}

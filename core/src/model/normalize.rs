#![deny(missing_docs)]

//! # Introspection Output Normalization
//!
//! Rewrites generated JSON Schema into the shape the entity model parses:
//!
//! - boolean schemas in schema positions become objects (`true` is `{}`,
//!   `false` is `{"not": {}}`);
//! - tuple-style `items` arrays become 2020-12 `prefixItems`;
//! - the OpenAPI 3.0 `nullable` flag becomes a `null` type union.
//!
//! `additionalProperties` and the `unevaluated*` keywords keep their booleans.

use serde_json::{json, Map, Value};

/// Keywords holding a single subschema.
const SINGLE_KEYWORDS: &[&str] = &[
    "items",
    "not",
    "contains",
    "propertyNames",
    "if",
    "then",
    "else",
    "contentSchema",
];

/// Keywords holding a subschema or a boolean.
const BOOL_OR_SCHEMA_KEYWORDS: &[&str] = &[
    "additionalProperties",
    "unevaluatedItems",
    "unevaluatedProperties",
];

/// Keywords holding a list of subschemas.
const LIST_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf", "prefixItems"];

/// Keywords holding a map of subschemas.
const MAP_KEYWORDS: &[&str] = &["properties", "patternProperties", "dependentSchemas"];

/// Normalizes a schema node and every subschema below it.
pub fn normalize_schema_node(value: &mut Value) {
    let map = match value {
        Value::Bool(flag) => {
            *value = bool_schema_replacement(*flag);
            return;
        }
        Value::Object(map) => map,
        _ => return,
    };

    upgrade_tuple_items(map);
    apply_nullable_flag(map);

    for key in SINGLE_KEYWORDS {
        if let Some(sub) = map.get_mut(*key) {
            normalize_schema_node(sub);
        }
    }
    for key in BOOL_OR_SCHEMA_KEYWORDS {
        if let Some(sub) = map.get_mut(*key) {
            if !sub.is_boolean() {
                normalize_schema_node(sub);
            }
        }
    }
    for key in LIST_KEYWORDS {
        if let Some(Value::Array(items)) = map.get_mut(*key) {
            items.iter_mut().for_each(normalize_schema_node);
        }
    }
    for key in MAP_KEYWORDS {
        if let Some(Value::Object(entries)) = map.get_mut(*key) {
            entries.values_mut().for_each(normalize_schema_node);
        }
    }
}

fn bool_schema_replacement(flag: bool) -> Value {
    if flag {
        Value::Object(Map::new())
    } else {
        json!({ "not": {} })
    }
}

fn upgrade_tuple_items(map: &mut Map<String, Value>) {
    if !matches!(map.get("items"), Some(Value::Array(_))) {
        return;
    }
    if let Some(items) = map.remove("items") {
        map.insert("prefixItems".to_string(), items);
    }
    if let Some(additional) = map.remove("additionalItems") {
        map.insert("items".to_string(), additional);
    }
}

fn apply_nullable_flag(map: &mut Map<String, Value>) {
    if map.remove("nullable").and_then(|v| v.as_bool()) != Some(true) {
        return;
    }

    let union = match map.get("type") {
        Some(Value::String(single)) if single != "null" => json!([single, "null"]),
        Some(Value::Array(types)) if !types.iter().any(|t| t.as_str() == Some("null")) => {
            let mut types = types.clone();
            types.push(Value::String("null".to_string()));
            Value::Array(types)
        }
        Some(_) => return,
        None => {
            let original = std::mem::take(map);
            map.insert(
                "anyOf".to_string(),
                json!([Value::Object(original), { "type": "null" }]),
            );
            return;
        }
    };
    map.insert("type".to_string(), union);
}

#![deny(missing_docs)]

//! # Schemars Introspector
//!
//! Generates JSON Schema for models with `schemars` and parses the result into
//! entity schemas. Sub-schemas come back keyed by their `schemars` name with
//! local references pointing at the generator's definitions path.

use crate::error::{AppError, AppResult};
use crate::model::normalize::normalize_schema_node;
use crate::model::{Generated, Introspection, ModelIntrospector, ModelSource, ModelType};
use crate::oas::schema::SchemaSlot;
use crate::pointer::encode_pointer_segment;
use indexmap::IndexMap;
use schemars::gen::SchemaSettings;
use schemars::schema::{SchemaObject, SubschemaValidation};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Definitions path used by JSON Schema documents with `$defs`.
const DEFS_PATH: &str = "#/$defs/";

/// Definitions path used by draft-07 style documents.
const DEFINITIONS_PATH: &str = "#/definitions/";

/// A [`ModelIntrospector`] driven by `schemars`.
#[derive(Debug, Clone)]
pub struct SchemarsIntrospector {
    settings: SchemaSettings,
}

impl Default for SchemarsIntrospector {
    fn default() -> Self {
        Self::new(SchemaSettings::draft2019_09())
    }
}

impl SchemarsIntrospector {
    /// Creates an introspector generating with `settings`.
    pub fn new(settings: SchemaSettings) -> Self {
        Self { settings }
    }

    /// The generator settings.
    pub fn settings(&self) -> &SchemaSettings {
        &self.settings
    }

    fn from_generated(&self, model: &ModelType, generated: Generated) -> AppResult<Introspection> {
        let definitions_path = self.settings.definitions_path.as_str();
        let mut definitions = IndexMap::new();
        for (name, schema) in generated.definitions {
            definitions.insert(name, to_json(model, &schema)?);
        }
        let mut root = to_json(model, &generated.root)?;

        // Referenceable types come back as a bare `$ref` to their own definition.
        let name = model.schema_name();
        let own_ref = format!("{}{}", definitions_path, encode_pointer_segment(&name));
        if is_bare_ref_to(&root, &own_ref) {
            if let Some(definition) = definitions.get(&name) {
                root = definition.clone();
                if !definitions.values().any(|d| mentions_ref(d, &own_ref)) {
                    definitions.shift_remove(&name);
                }
            }
        }

        let mut nested = IndexMap::new();
        for (name, schema) in definitions {
            nested.insert(name, parse_slot(model, schema)?);
        }
        Ok(Introspection {
            root: parse_slot(model, root)?,
            nested,
            definitions_path: definitions_path.to_string(),
        })
    }
}

impl ModelIntrospector for SchemarsIntrospector {
    fn introspect(&self, model: &ModelType) -> AppResult<Introspection> {
        match model.source() {
            ModelSource::Typed { generate, .. } => {
                self.from_generated(model, generate(&self.settings))
            }
            ModelSource::Document { document, .. } => from_document(model, document),
        }
    }
}

fn from_document(model: &ModelType, document: &Value) -> AppResult<Introspection> {
    let mut root = match document {
        Value::Object(map) => map.clone(),
        Value::Bool(_) => Map::new(),
        other => {
            return Err(introspection_error(
                model,
                format!("expected a JSON Schema object, found {}", json_kind(other)),
            ))
        }
    };
    if document == &Value::Bool(false) {
        root.insert("not".to_string(), json!({}));
    }
    root.remove("$schema");

    let (definitions, definitions_path) = match root.remove("$defs") {
        Some(defs) => (defs, DEFS_PATH),
        None => (
            root.remove("definitions")
                .unwrap_or_else(|| Value::Object(Map::new())),
            DEFINITIONS_PATH,
        ),
    };
    let Value::Object(definitions) = definitions else {
        return Err(introspection_error(
            model,
            "sub-schema definitions must be an object",
        ));
    };

    let mut nested = IndexMap::new();
    for (name, schema) in definitions {
        nested.insert(name, parse_slot(model, schema)?);
    }
    Ok(Introspection {
        root: parse_slot(model, Value::Object(root))?,
        nested,
        definitions_path: definitions_path.to_string(),
    })
}

fn to_json<T: Serialize>(model: &ModelType, schema: &T) -> AppResult<Value> {
    serde_json::to_value(schema).map_err(|e| introspection_error(model, e.to_string()))
}

/// Parses one generated schema. A bare `$ref` becomes a
/// [`Reference`](crate::oas::reference::Reference); a `$ref` with sibling
/// keywords stays a [`Schema`](crate::oas::schema::Schema).
fn parse_slot(model: &ModelType, mut value: Value) -> AppResult<SchemaSlot> {
    normalize_schema_node(&mut value);
    serde_json::from_value::<SchemaSlot>(value).map_err(|e| introspection_error(model, e.to_string()))
}

fn is_bare_ref_to(value: &Value, target: &str) -> bool {
    match value {
        Value::Object(map) => {
            map.len() == 1 && map.get("$ref").and_then(Value::as_str) == Some(target)
        }
        _ => false,
    }
}

/// Whether `target` is used as a `$ref` anywhere below `value`.
fn mentions_ref(value: &Value, target: &str) -> bool {
    match value {
        Value::Object(map) => map.iter().any(|(key, v)| {
            (key == "$ref" && v.as_str() == Some(target)) || mentions_ref(v, target)
        }),
        Value::Array(items) => items.iter().any(|v| mentions_ref(v, target)),
        _ => false,
    }
}

fn introspection_error(model: &ModelType, reason: impl Into<String>) -> AppError {
    AppError::Introspection {
        model: model.type_name().to_string(),
        reason: reason.into(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builds a `oneOf` schema with an OpenAPI `discriminator`.
///
/// Each variant pairs a discriminator value with its schema, typically from
/// `SchemaGenerator::subschema_for`. Variants given as `$ref`s are added to the
/// discriminator `mapping`; inline variants are only listed in `oneOf`.
///
/// Meant for `#[schemars(schema_with = "...")]`:
///
/// ```
/// use openapi_schema_core::model::discriminated_union;
/// use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};
///
/// #[derive(JsonSchema)]
/// struct Cat { kind: String }
/// #[derive(JsonSchema)]
/// struct Dog { kind: String }
///
/// fn pet_schema(gen: &mut SchemaGenerator) -> Schema {
///     discriminated_union(
///         "kind",
///         [("cat", gen.subschema_for::<Cat>()), ("dog", gen.subschema_for::<Dog>())],
///     )
/// }
/// ```
pub fn discriminated_union<K, I>(property_name: &str, variants: I) -> schemars::schema::Schema
where
    K: Into<String>,
    I: IntoIterator<Item = (K, schemars::schema::Schema)>,
{
    let mut mapping = Map::new();
    let mut one_of = Vec::new();
    for (value, schema) in variants {
        let value = value.into();
        if let schemars::schema::Schema::Object(SchemaObject {
            reference: Some(target),
            ..
        }) = &schema
        {
            mapping.insert(value, Value::String(target.clone()));
        }
        one_of.push(schema);
    }

    let mut union = SchemaObject {
        subschemas: Some(Box::new(SubschemaValidation {
            one_of: Some(one_of),
            ..Default::default()
        })),
        ..Default::default()
    };
    union.extensions.insert(
        "discriminator".to_string(),
        json!({ "propertyName": property_name, "mapping": mapping }),
    );
    union.into()
}

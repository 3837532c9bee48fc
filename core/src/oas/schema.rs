#![deny(missing_docs)]

//! # Schema Object
//!
//! JSON Schema 2020-12 as profiled by OpenAPI 3.1, plus the [`SchemaSlot`]
//! union used by every field that may hold a schema.
//!
//! Keywords that collide with Rust keywords carry a prefixed field name
//! (`schema_not`, `schema_if`, `schema_else`, `schema_format`, ...). Both the
//! field name and the wire keyword are accepted when parsing; only the wire
//! keyword is emitted.

use crate::model::ModelSchema;
use crate::oas::reference::Reference;
use crate::oas::tag::ExternalDocumentation;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Keys a Reference Object may carry. Any other key makes a `$ref` object a
/// [`Schema`] with sibling keywords.
const REFERENCE_KEYS: &[&str] = &["$ref", "ref", "summary", "description"];

/// A slot that can hold a schema.
///
/// An object whose only keys are `$ref`, `summary` and `description` parses
/// as a [`Reference`]; everything else, including a `$ref` with sibling
/// keywords, parses as a [`Schema`]. The `Model` variant only exists between
/// document construction and schema resolution: it is never produced by
/// parsing, and serializing it is an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaSlot {
    /// A `$ref` to another schema.
    Reference(Reference),
    /// An inline schema definition.
    Schema(Box<Schema>),
    /// A placeholder standing in for a model type.
    #[serde(skip)]
    Model(ModelSchema),
}

impl SchemaSlot {
    /// A placeholder for the model type `T`, registered under its default name.
    pub fn model<T: schemars::JsonSchema>() -> Self {
        SchemaSlot::Model(ModelSchema::of::<T>())
    }

    /// Returns the inline schema, if any.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaSlot::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    /// Returns the reference, if any.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            SchemaSlot::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Whether this slot still holds an unresolved placeholder.
    pub fn is_model(&self) -> bool {
        matches!(self, SchemaSlot::Model(_))
    }
}

impl<'de> Deserialize<'de> for SchemaSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let is_reference = match &value {
            Value::Object(map) => {
                map.get("$ref")
                    .or_else(|| map.get("ref"))
                    .is_some_and(Value::is_string)
                    && map.keys().all(|key| REFERENCE_KEYS.contains(&key.as_str()))
            }
            _ => false,
        };
        let parsed = if is_reference {
            serde_json::from_value::<Reference>(value).map(SchemaSlot::from)
        } else {
            serde_json::from_value::<Schema>(value).map(SchemaSlot::from)
        };
        parsed.map_err(D::Error::custom)
    }
}

impl Default for SchemaSlot {
    fn default() -> Self {
        SchemaSlot::Schema(Box::default())
    }
}

impl From<Schema> for SchemaSlot {
    fn from(schema: Schema) -> Self {
        SchemaSlot::Schema(Box::new(schema))
    }
}

impl From<Reference> for SchemaSlot {
    fn from(reference: Reference) -> Self {
        SchemaSlot::Reference(reference)
    }
}

impl From<ModelSchema> for SchemaSlot {
    fn from(model: ModelSchema) -> Self {
        SchemaSlot::Model(model)
    }
}

/// Keywords such as `additionalProperties` that take a schema or a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolOrSchema {
    /// `true` allows everything, `false` nothing.
    Bool(bool),
    /// A schema every extra instance must satisfy.
    Schema(SchemaSlot),
}

/// JSON Schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `null`
    Null,
}

/// The `type` keyword: one type name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// A single type, e.g. `"string"`.
    Single(DataType),
    /// A type union, e.g. `["string", "null"]`.
    Multiple(Vec<DataType>),
}

impl From<DataType> for SchemaType {
    fn from(data_type: DataType) -> Self {
        SchemaType::Single(data_type)
    }
}

/// Serializes whole-number constraints as integers (`0`, not `0.0`).
#[allow(clippy::ref_option)]
fn serialize_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            #[allow(clippy::cast_possible_truncation)]
            let int_val = *v as i64;
            serializer.serialize_some(&int_val)
        }
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

/// The Schema Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// A `$ref` carried together with sibling keywords such as `title` or
    /// `default`.
    #[serde(
        rename = "$ref",
        alias = "ref_path",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ref_path: Option<String>,

    // Applicators
    /// Every subschema must validate.
    #[serde(default, alias = "all_of", skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaSlot>,
    /// At least one subschema must validate.
    #[serde(default, alias = "any_of", skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaSlot>,
    /// Exactly one subschema must validate.
    #[serde(default, alias = "one_of", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaSlot>,
    /// The subschema must not validate.
    #[serde(
        rename = "not",
        alias = "schema_not",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_not: Option<Box<SchemaSlot>>,
    /// Condition selecting between `then` and `else`.
    #[serde(
        rename = "if",
        alias = "schema_if",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_if: Option<Box<SchemaSlot>>,
    /// Applied when `if` validates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Box<SchemaSlot>>,
    /// Applied when `if` does not validate.
    #[serde(
        rename = "else",
        alias = "schema_else",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_else: Option<Box<SchemaSlot>>,
    /// Schemas applied when the named property is present.
    #[serde(
        default,
        alias = "dependent_schemas",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub dependent_schemas: IndexMap<String, SchemaSlot>,
    /// Positional item schemas.
    #[serde(default, alias = "prefix_items", skip_serializing_if = "Vec::is_empty")]
    pub prefix_items: Vec<SchemaSlot>,
    /// Schema for array items not covered by `prefixItems`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaSlot>>,
    /// At least one item must validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<Box<SchemaSlot>>,
    /// Named property schemas.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaSlot>,
    /// Property schemas keyed by regular expression.
    #[serde(
        default,
        alias = "pattern_properties",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub pattern_properties: IndexMap<String, SchemaSlot>,
    /// Schema for properties not matched by `properties`/`patternProperties`.
    #[serde(
        default,
        alias = "additional_properties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<BoolOrSchema>>,
    /// Schema every property name must satisfy.
    #[serde(
        default,
        alias = "property_names",
        skip_serializing_if = "Option::is_none"
    )]
    pub property_names: Option<Box<SchemaSlot>>,
    /// Schema for items not evaluated by other keywords.
    #[serde(
        default,
        alias = "unevaluated_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub unevaluated_items: Option<Box<BoolOrSchema>>,
    /// Schema for properties not evaluated by other keywords.
    #[serde(
        default,
        alias = "unevaluated_properties",
        skip_serializing_if = "Option::is_none"
    )]
    pub unevaluated_properties: Option<Box<BoolOrSchema>>,

    // Validation
    /// The `type` keyword.
    #[serde(
        rename = "type",
        alias = "schema_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_type: Option<SchemaType>,
    /// Allowed values.
    #[serde(
        rename = "enum",
        alias = "enum_values",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_values: Option<Vec<Value>>,
    /// The single allowed value.
    #[serde(
        rename = "const",
        alias = "const_value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub const_value: Option<Value>,
    /// Numbers must be a multiple of this value.
    #[serde(
        default,
        alias = "multiple_of",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub multiple_of: Option<f64>,
    /// Inclusive upper bound.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub maximum: Option<f64>,
    /// Exclusive upper bound.
    #[serde(
        default,
        alias = "exclusive_maximum",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub exclusive_maximum: Option<f64>,
    /// Inclusive lower bound.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub minimum: Option<f64>,
    /// Exclusive lower bound.
    #[serde(
        default,
        alias = "exclusive_minimum",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    pub exclusive_minimum: Option<f64>,
    /// Maximum string length.
    #[serde(default, alias = "max_length", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Minimum string length.
    #[serde(default, alias = "min_length", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// ECMA-262 regular expression strings must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Maximum array length.
    #[serde(default, alias = "max_items", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Minimum array length.
    #[serde(default, alias = "min_items", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Whether array items must be distinct.
    #[serde(default, alias = "unique_items", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    /// Maximum number of items matching `contains`.
    #[serde(default, alias = "max_contains", skip_serializing_if = "Option::is_none")]
    pub max_contains: Option<u64>,
    /// Minimum number of items matching `contains`.
    #[serde(default, alias = "min_contains", skip_serializing_if = "Option::is_none")]
    pub min_contains: Option<u64>,
    /// Maximum number of properties.
    #[serde(
        default,
        alias = "max_properties",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_properties: Option<u64>,
    /// Minimum number of properties.
    #[serde(
        default,
        alias = "min_properties",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_properties: Option<u64>,
    /// Properties that must be present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Properties required when the keyed property is present.
    #[serde(
        default,
        alias = "dependent_required",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub dependent_required: IndexMap<String, Vec<String>>,

    // Format and content
    /// Semantic format such as `date-time` or `int64`.
    #[serde(
        rename = "format",
        alias = "schema_format",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_format: Option<String>,
    /// Encoding of string content, e.g. `base64`.
    #[serde(
        default,
        alias = "content_encoding",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_encoding: Option<String>,
    /// Media type of string content.
    #[serde(
        default,
        alias = "content_media_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_media_type: Option<String>,
    /// Schema of decoded string content.
    #[serde(
        default,
        alias = "content_schema",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_schema: Option<Box<SchemaSlot>>,

    // Metadata
    /// Short title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description; CommonMark allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Marks the schema as deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Only sent in responses.
    #[serde(default, alias = "read_only", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Only sent in requests.
    #[serde(default, alias = "write_only", skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
    /// Example instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,

    // OpenAPI vocabulary
    /// Polymorphism hint for `oneOf`/`anyOf`/`allOf`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    /// XML representation hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,
    /// External documentation.
    #[serde(default, alias = "external_docs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
    /// Deprecated single example; prefer `examples`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Schema {
    /// A schema with only a `type` keyword.
    pub fn of_type(data_type: DataType) -> Self {
        Self {
            schema_type: Some(data_type.into()),
            ..Self::default()
        }
    }

    /// An empty `object` schema.
    pub fn object() -> Self {
        Self::of_type(DataType::Object)
    }

    /// Adds a property.
    pub fn with_property(mut self, name: impl Into<String>, schema: impl Into<SchemaSlot>) -> Self {
        self.properties.insert(name.into(), schema.into());
        self
    }

    /// Marks a property as required.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }
}

/// When request bodies or response payloads may be one of a number of
/// different schemas, names the property whose value selects the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discriminator {
    /// **REQUIRED**. The name of the property carrying the discriminator value.
    #[serde(rename = "propertyName", alias = "property_name")]
    pub property_name: String,

    /// Discriminator values mapped to schema names or references.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, String>,
}

/// Metadata for fine-tuned XML representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xml {
    /// Replaces the element/attribute name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absolute URI of the namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Prefix for the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Render as an attribute instead of an element.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub attribute: bool,
    /// Wrap array items in an outer element.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wrapped: bool,
}

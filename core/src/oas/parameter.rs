#![deny(missing_docs)]

//! # Parameter and Header Objects

use crate::oas::content::{Example, MediaType};
use crate::oas::reference::RefOr;
use crate::oas::schema::SchemaSlot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The location of a parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Appended to the URL, e.g. `/items?id=###`.
    #[default]
    Query,
    /// A custom request header.
    Header,
    /// Part of the templated path, e.g. `/items/{itemId}`.
    Path,
    /// A cookie value.
    Cookie,
}

/// The only location a Header Object may declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLocation {
    /// `header`
    #[default]
    Header,
}

impl From<HeaderLocation> for ParameterLocation {
    fn from(_: HeaderLocation) -> Self {
        ParameterLocation::Header
    }
}

/// How a parameter value is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    /// Path-style parameters (RFC 6570).
    Matrix,
    /// Label style parameters (RFC 6570).
    Label,
    /// Form style parameters (RFC 6570).
    Form,
    /// Simple style parameters (RFC 6570).
    Simple,
    /// Space separated array values.
    SpaceDelimited,
    /// Pipe separated array values.
    PipeDelimited,
    /// Nested objects using form parameters.
    DeepObject,
}

/// Describes a single operation parameter.
///
/// A unique parameter is defined by a combination of `name` and `in`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// **REQUIRED**. The case-sensitive name of the parameter.
    pub name: String,

    /// **REQUIRED**. The location of the parameter.
    #[serde(rename = "in", alias = "param_in")]
    pub param_in: ParameterLocation,

    /// A brief description of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this parameter is mandatory. MUST be `true` for path parameters.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Specifies that a parameter is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    /// Allows sending an empty query value.
    #[serde(
        rename = "allowEmptyValue",
        alias = "allow_empty_value",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub allow_empty_value: bool,

    /// How the parameter value is serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,

    /// Whether array/object values generate separate parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    /// Whether reserved characters are sent unencoded.
    #[serde(
        rename = "allowReserved",
        alias = "allow_reserved",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub allow_reserved: bool,

    /// The schema defining the type used for the parameter.
    #[serde(
        rename = "schema",
        alias = "param_schema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub param_schema: Option<SchemaSlot>,

    /// Example of the parameter's potential value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Examples of the parameter's potential value.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,

    /// Media type representations; mutually exclusive with `schema`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Parameter {
    /// Creates a parameter with a schema.
    pub fn new(
        name: impl Into<String>,
        param_in: ParameterLocation,
        schema: impl Into<SchemaSlot>,
    ) -> Self {
        Self {
            name: name.into(),
            required: param_in == ParameterLocation::Path,
            param_in,
            param_schema: Some(schema.into()),
            ..Self::default()
        }
    }
}

/// The Header Object follows the Parameter Object, without `name`, and with
/// `in` fixed to `header`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Always `header`; never emitted.
    #[serde(rename = "in", alias = "param_in", default, skip_serializing)]
    pub param_in: HeaderLocation,

    /// A brief description of the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this header is mandatory.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Specifies that a header is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    /// How the header value is serialized. Only `simple` is valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,

    /// Whether array/object values generate separate values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    /// The schema defining the type used for the header.
    #[serde(
        rename = "schema",
        alias = "param_schema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub param_schema: Option<SchemaSlot>,

    /// Example of the header's potential value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Examples of the header's potential value.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,

    /// Media type representations; mutually exclusive with `schema`.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::schema::Schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parameter_alias() {
        let built = Parameter::new("test", ParameterLocation::Path, Schema::default());
        let by_field: Parameter = serde_json::from_value(json!({
            "name": "test",
            "param_in": "path",
            "param_schema": {},
            "required": true
        }))
        .unwrap();
        let by_keyword: Parameter = serde_json::from_value(json!({
            "name": "test",
            "in": "path",
            "schema": {},
            "required": true
        }))
        .unwrap();
        assert_eq!(built, by_field);
        assert_eq!(by_field, by_keyword);
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            json!({"name": "test", "in": "path", "required": true, "schema": {}})
        );
    }

    #[test]
    fn test_parameter_rejects_unknown_location() {
        let parsed = serde_json::from_value::<Parameter>(json!({"name": "a", "in": "body"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_header_alias() {
        let built = Header::default();
        let by_field: Header = serde_json::from_value(json!({"param_in": "header"})).unwrap();
        let by_keyword: Header = serde_json::from_value(json!({"in": "header"})).unwrap();
        assert_eq!(built, by_field);
        assert_eq!(by_field, by_keyword);
        assert_eq!(ParameterLocation::from(built.param_in), ParameterLocation::Header);
    }

    #[test]
    fn test_header_only_accepts_header_location() {
        let parsed = serde_json::from_value::<Header>(json!({"in": "query"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_style_wire_names() {
        let value = serde_json::to_value(ParameterStyle::DeepObject).unwrap();
        assert_eq!(value, json!("deepObject"));
    }
}

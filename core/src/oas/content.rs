#![deny(missing_docs)]

//! # Payload Objects
//!
//! Media types, encodings, examples, request bodies, responses and links.

use crate::oas::parameter::Header;
use crate::oas::reference::RefOr;
use crate::oas::schema::SchemaSlot;
use crate::oas::server::Server;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provides schema and examples for the media type identified by its key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// The schema defining the content of the request, response, or parameter.
    #[serde(
        rename = "schema",
        alias = "media_type_schema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub media_type_schema: Option<SchemaSlot>,

    /// Example of the media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Examples of the media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,

    /// A map between a property name and its encoding information.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub encoding: IndexMap<String, Encoding>,
}

impl MediaType {
    /// A media type carrying only a schema.
    pub fn with_schema(schema: impl Into<SchemaSlot>) -> Self {
        Self {
            media_type_schema: Some(schema.into()),
            ..Self::default()
        }
    }
}

/// A single encoding definition applied to a single schema property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    /// The Content-Type for encoding a specific property.
    #[serde(
        rename = "contentType",
        alias = "content_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,

    /// Additional headers, e.g. `Content-Disposition`, for multipart bodies.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,

    /// How the property value is serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

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
}

/// An example value with metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Short description for the example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Long description for the example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Embedded literal example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// A URI that points to the literal example.
    #[serde(
        rename = "externalValue",
        alias = "external_value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_value: Option<String>,
}

/// Describes a single request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// A brief description of the request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// **REQUIRED**. The content of the request body, keyed by media type.
    pub content: IndexMap<String, MediaType>,

    /// Whether the request body is required in the request.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl RequestBody {
    /// A request body with a single media type.
    pub fn with_content(media_type: impl Into<String>, content: MediaType) -> Self {
        let mut body = Self::default();
        body.content.insert(media_type.into(), content);
        body
    }
}

/// Describes a single response from an API Operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// **REQUIRED**. A description of the response.
    pub description: String,

    /// Maps a header name to its definition.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,

    /// Potential response payloads, keyed by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,

    /// Operation links that can be followed from the response.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, RefOr<Link>>,
}

impl Response {
    /// A response with only a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

/// A possible design-time link for a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// A relative or absolute URI reference to an OAS operation.
    #[serde(
        rename = "operationRef",
        alias = "operation_ref",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_ref: Option<String>,

    /// The name of an existing, resolvable OAS operation.
    #[serde(
        rename = "operationId",
        alias = "operation_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    /// Parameters to pass to the linked operation.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,

    /// A literal value or expression to use as a request body.
    #[serde(
        rename = "requestBody",
        alias = "request_body",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<Value>,

    /// A description of the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// A server object to be used by the target operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::schema::Schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_media_type_alias() {
        let built = MediaType::with_schema(Schema::default());
        let by_field: MediaType =
            serde_json::from_value(json!({"media_type_schema": {}})).unwrap();
        let by_keyword: MediaType = serde_json::from_value(json!({"schema": {}})).unwrap();
        assert_eq!(built, by_field);
        assert_eq!(by_field, by_keyword);
    }

    #[test]
    fn test_response_content_round_trip() {
        let value = json!({
            "description": "General Error",
            "content": {
                "application/json": {"schema": {"$ref": "#/components/schemas/GeneralError"}}
            }
        });
        let response: Response = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), value);
    }

    #[test]
    fn test_request_body_requires_content() {
        assert!(serde_json::from_value::<RequestBody>(json!({"required": true})).is_err());
    }
}

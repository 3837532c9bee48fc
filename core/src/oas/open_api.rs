#![deny(missing_docs)]

//! # OpenAPI Object
//!
//! The root document, plus JSON/YAML reading and writing. Parsing failures
//! surface as `AppError::Validation`.

use crate::error::{AppError, AppResult};
use crate::oas::components::Components;
use crate::oas::info::Info;
use crate::oas::paths::{PathItem, Paths};
use crate::oas::reference::RefOr;
use crate::oas::schema::SchemaSlot;
use crate::oas::security::SecurityRequirement;
use crate::oas::server::Server;
use crate::oas::tag::{ExternalDocumentation, Tag};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// The only OpenAPI version this model describes.
pub const OPENAPI_VERSION: &str = "3.1.0";

fn default_openapi_version() -> String {
    OPENAPI_VERSION.to_string()
}

fn deserialize_openapi_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let version = String::deserialize(deserializer)?;
    if version == OPENAPI_VERSION {
        Ok(version)
    } else {
        Err(serde::de::Error::custom(format!(
            "unsupported OpenAPI version '{}', expected '{}'",
            version, OPENAPI_VERSION
        )))
    }
}

/// The root document object of the OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// **REQUIRED**. The OpenAPI Specification version. Always `3.1.0`;
    /// filled in when omitted.
    #[serde(
        default = "default_openapi_version",
        deserialize_with = "deserialize_openapi_version"
    )]
    pub openapi: String,

    /// **REQUIRED**. Metadata about the API.
    pub info: Info,

    /// Default `$schema` for Schema Objects in this document.
    #[serde(
        rename = "jsonSchemaDialect",
        alias = "json_schema_dialect",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub json_schema_dialect: Option<String>,

    /// Connectivity information to target servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// The available paths and operations for the API.
    #[serde(default)]
    pub paths: Paths,

    /// Incoming webhooks that MAY be received as part of this API.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub webhooks: IndexMap<String, RefOr<PathItem>>,

    /// Reusable objects for the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    /// Security mechanisms that can be used across the API.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,

    /// Tags used by the document with additional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    /// Additional external documentation.
    #[serde(
        rename = "externalDocs",
        alias = "external_docs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_docs: Option<ExternalDocumentation>,
}

impl OpenApi {
    /// Creates a document with the given info and the default version.
    pub fn new(info: Info) -> Self {
        Self {
            openapi: default_openapi_version(),
            info,
            json_schema_dialect: None,
            servers: Vec::new(),
            paths: Paths::new(),
            webhooks: IndexMap::new(),
            components: None,
            security: Vec::new(),
            tags: None,
            external_docs: None,
        }
    }

    /// Adds a path item.
    pub fn with_path(mut self, path: impl Into<String>, item: PathItem) -> Self {
        self.paths.insert(path.into(), item);
        self
    }

    /// Returns the components object, creating an empty one if absent.
    pub fn components_mut(&mut self) -> &mut Components {
        self.components.get_or_insert_with(Components::default)
    }

    /// Looks up a component schema by name.
    pub fn schema(&self, name: &str) -> Option<&SchemaSlot> {
        self.components.as_ref()?.schemas.get(name)
    }

    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Validation(format!("Failed to parse OpenAPI JSON: {}", e)))
    }

    /// Parses a document from YAML.
    pub fn from_yaml(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Validation(format!("Failed to parse OpenAPI YAML: {}", e)))
    }

    /// Parses a document from a JSON value.
    pub fn from_value(value: serde_json::Value) -> AppResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| AppError::Validation(format!("Failed to parse OpenAPI document: {}", e)))
    }

    /// Serializes to a JSON value.
    ///
    /// Fails if a model placeholder is still present.
    pub fn to_value(&self) -> AppResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::content::{MediaType, RequestBody, Response};
    use crate::oas::paths::Operation;
    use crate::oas::schema::{DataType, Schema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_version_defaults_when_omitted() {
        let doc = OpenApi::from_value(json!({
            "info": {"title": "My own API", "version": "v0.0.1"}
        }))
        .unwrap();
        assert_eq!(doc.openapi, "3.1.0");
        assert_eq!(doc, OpenApi::new(Info::new("My own API", "v0.0.1")));
    }

    #[test]
    fn test_other_versions_are_rejected() {
        let err = OpenApi::from_value(json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "version": "1"}
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("3.0.3"));
    }

    #[test]
    fn test_missing_info_is_a_validation_error() {
        let err = OpenApi::from_json(r#"{"openapi": "3.1.0"}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_yaml_round_trip() {
        let op = Operation {
            request_body: Some(RefOr::T(RequestBody::with_content(
                "application/json",
                MediaType::with_schema(Schema::of_type(DataType::String)),
            ))),
            responses: [("200".to_string(), RefOr::T(Response::new("pong")))]
                .into_iter()
                .collect(),
            ..Operation::default()
        };
        let doc = OpenApi::new(Info::new("Ping", "1.0.0")).with_path(
            "/ping",
            PathItem {
                post: Some(op),
                ..PathItem::default()
            },
        );

        let yaml = doc.to_yaml().unwrap();
        assert!(yaml.contains("requestBody"));
        assert_eq!(OpenApi::from_yaml(&yaml).unwrap(), doc);
    }

    #[test]
    fn test_serialized_root_keys() {
        let mut doc = OpenApi::new(Info::new("t", "1"));
        doc.json_schema_dialect = Some("https://spec.openapis.org/oas/3.1/dialect/base".into());
        doc.components_mut();
        let value = doc.to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "openapi": "3.1.0",
                "info": {"title": "t", "version": "1"},
                "jsonSchemaDialect": "https://spec.openapis.org/oas/3.1/dialect/base",
                "paths": {},
                "components": {}
            })
        );
    }

    #[test]
    fn test_unresolved_placeholder_fails_serialization() {
        #[derive(schemars::JsonSchema)]
        #[allow(dead_code)]
        struct Ping {
            message: String,
        }

        let mut doc = OpenApi::new(Info::new("t", "1"));
        doc.components_mut()
            .schemas
            .insert("Ping".into(), SchemaSlot::model::<Ping>());
        assert!(matches!(doc.to_json(), Err(AppError::Json(_))));
    }
}

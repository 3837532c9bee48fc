#![deny(missing_docs)]

//! # Paths, Path Items and Operations

use crate::oas::content::{RequestBody, Response};
use crate::oas::parameter::Parameter;
use crate::oas::reference::RefOr;
use crate::oas::security::SecurityRequirement;
use crate::oas::server::Server;
use crate::oas::tag::ExternalDocumentation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Relative paths to the individual endpoints, keyed by path template.
pub type Paths = IndexMap<String, PathItem>;

/// Responses keyed by HTTP status code (or `default`).
pub type Responses = IndexMap<String, RefOr<Response>>;

/// Out-of-band requests related to the parent operation, keyed by runtime
/// expression.
pub type Callback = IndexMap<String, PathItem>;

/// Describes the operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Allows for a referenced definition of this path item.
    #[serde(
        rename = "$ref",
        alias = "ref",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ref_path: Option<String>,

    /// A summary applying to all operations in this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// A description applying to all operations in this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// A definition of a GET operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    /// A definition of a PUT operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    /// A definition of a POST operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    /// A definition of a DELETE operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,

    /// A definition of a OPTIONS operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,

    /// A definition of a HEAD operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,

    /// A definition of a PATCH operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,

    /// A definition of a TRACE operation on this path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,

    /// Alternative servers for all operations in this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Parameters applicable to all operations under this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
}

impl PathItem {
    /// Iterates the defined operations with their lowercase method names.
    pub fn operations_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut Operation)> + '_ {
        [
            ("get", self.get.as_mut()),
            ("put", self.put.as_mut()),
            ("post", self.post.as_mut()),
            ("delete", self.delete.as_mut()),
            ("options", self.options.as_mut()),
            ("head", self.head.as_mut()),
            ("patch", self.patch.as_mut()),
            ("trace", self.trace.as_mut()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

/// Describes a single API operation on a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Tags for API documentation control.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// A short summary of what the operation does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// A verbose explanation of the operation behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Additional external documentation for this operation.
    #[serde(
        rename = "externalDocs",
        alias = "external_docs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_docs: Option<ExternalDocumentation>,

    /// Unique, case-sensitive string used to identify the operation.
    #[serde(
        rename = "operationId",
        alias = "operation_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    /// Parameters applicable for this operation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,

    /// The request body applicable for this operation.
    #[serde(
        rename = "requestBody",
        alias = "request_body",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<RefOr<RequestBody>>,

    /// The possible responses returned from executing this operation.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: Responses,

    /// Out-of-band callbacks related to the parent operation.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, RefOr<Callback>>,

    /// Declares this operation to be deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    /// Security mechanisms for this operation; overrides the document level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,

    /// Alternative servers for this operation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_item_alias() {
        let built = PathItem {
            ref_path: Some("#/dummy".into()),
            ..PathItem::default()
        };
        let by_field: PathItem = serde_json::from_value(json!({"ref": "#/dummy"})).unwrap();
        let by_keyword: PathItem = serde_json::from_value(json!({"$ref": "#/dummy"})).unwrap();
        assert_eq!(built, by_field);
        assert_eq!(by_field, by_keyword);
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            json!({"$ref": "#/dummy"})
        );
    }

    #[test]
    fn test_operations_mut_lists_defined_methods_in_order() {
        let mut item = PathItem {
            post: Some(Operation::default()),
            get: Some(Operation::default()),
            ..PathItem::default()
        };
        let methods: Vec<&str> = item.operations_mut().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["get", "post"]);
    }

    #[test]
    fn test_operation_aliases() {
        let op: Operation = serde_json::from_value(json!({
            "operation_id": "updatePet",
            "request_body": {"content": {}},
            "responses": {"200": {"description": "Pet updated."}}
        }))
        .unwrap();
        assert_eq!(op.operation_id.as_deref(), Some("updatePet"));
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["operationId"], "updatePet");
        assert!(value.get("requestBody").is_some());
    }
}

#![deny(missing_docs)]

//! # Components Object
//!
//! Holds the reusable objects of a document. `schemas` is the component
//! registry that schema resolution writes into.

use crate::oas::content::{Example, Link, RequestBody, Response};
use crate::oas::parameter::{Header, Parameter};
use crate::oas::paths::{Callback, PathItem};
use crate::oas::reference::RefOr;
use crate::oas::schema::SchemaSlot;
use crate::oas::security::SecurityScheme;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Holds a set of reusable objects for different aspects of the OAS.
///
/// Objects defined here have no effect on the API unless they are explicitly
/// referenced from outside the components object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Reusable Schema Objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaSlot>,

    /// Reusable Response Objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, RefOr<Response>>,

    /// Reusable Parameter Objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, RefOr<Parameter>>,

    /// Reusable Example Objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, RefOr<Example>>,

    /// Reusable Request Body Objects.
    #[serde(
        rename = "requestBodies",
        alias = "request_bodies",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,

    /// Reusable Header Objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, RefOr<Header>>,

    /// Reusable Security Scheme Objects.
    #[serde(
        rename = "securitySchemes",
        alias = "security_schemes",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, RefOr<SecurityScheme>>,

    /// Reusable Link Objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, RefOr<Link>>,

    /// Reusable Callback Objects.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, RefOr<Callback>>,

    /// Reusable Path Item Objects.
    #[serde(
        rename = "pathItems",
        alias = "path_items",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub path_items: IndexMap<String, RefOr<PathItem>>,
}

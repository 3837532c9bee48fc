#![deny(missing_docs)]

//! # OpenAPI 3.1 Entity Model
//!
//! - **open_api**: the root document and its JSON/YAML I/O.
//! - **schema**: the Schema Object and the schema slot union.
//! - **reference**: `$ref` objects and `RefOr<T>`.
//! - **visit**: mutable traversal of every schema slot.
//! - the remaining modules hold the plain records of the OpenAPI catalog.

pub mod components;
pub mod content;
pub mod info;
pub mod open_api;
pub mod parameter;
pub mod paths;
pub mod reference;
pub mod schema;
pub mod security;
pub mod server;
pub mod tag;
pub mod visit;

pub use components::Components;
pub use content::{Encoding, Example, Link, MediaType, RequestBody, Response};
pub use info::{Contact, Info, License};
pub use open_api::{OpenApi, OPENAPI_VERSION};
pub use parameter::{Header, HeaderLocation, Parameter, ParameterLocation, ParameterStyle};
pub use paths::{Callback, Operation, PathItem, Paths, Responses};
pub use reference::{RefOr, Reference};
pub use schema::{BoolOrSchema, DataType, Discriminator, Schema, SchemaSlot, SchemaType, Xml};
pub use security::{
    ApiKeyLocation, OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme,
    SecuritySchemeType,
};
pub use server::{Server, ServerVariable};
pub use tag::{ExternalDocumentation, Tag};

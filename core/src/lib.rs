#![deny(missing_docs)]

//! # OpenAPI Schema Core
//!
//! OpenAPI 3.1 entity model plus a resolver that turns model placeholders
//! into de-duplicated `components.schemas` entries.
//!
//! ```
//! use openapi_schema_core::{resolve, Info, MediaType, OpenApi, Operation, PathItem, RefOr,
//!     RequestBody, SchemaSlot};
//! use schemars::JsonSchema;
//!
//! #[derive(JsonSchema)]
//! struct Ping { message: String }
//!
//! let op = Operation {
//!     request_body: Some(RefOr::T(RequestBody::with_content(
//!         "application/json",
//!         MediaType::with_schema(SchemaSlot::model::<Ping>()),
//!     ))),
//!     ..Operation::default()
//! };
//! let mut doc = OpenApi::new(Info::new("Ping", "1.0.0"))
//!     .with_path("/ping", PathItem { post: Some(op), ..PathItem::default() });
//!
//! resolve(&mut doc)?;
//! assert!(doc.to_json()?.contains("#/components/schemas/Ping"));
//! # Ok::<(), openapi_schema_core::AppError>(())
//! ```

/// Shared error types.
pub mod error;

/// Resolver options.
pub mod config;

/// JSON Pointer helpers.
pub mod pointer;

/// OpenAPI 3.1 entities.
pub mod oas;

/// Model placeholders and introspection.
pub mod model;

/// Placeholder resolution.
pub mod resolve;

pub use config::{CollisionPolicy, ResolverOptions};
pub use error::{AppError, AppResult};
pub use model::{
    discriminated_union, Introspection, ModelIntrospector, ModelSchema, ModelType,
    SchemarsIntrospector,
};
pub use oas::{
    BoolOrSchema, Callback, Components, Contact, DataType, Discriminator, Encoding, Example,
    ExternalDocumentation, Header, Info, License, Link, MediaType, OpenApi, Operation, Parameter,
    ParameterLocation, PathItem, RefOr, Reference, RequestBody, Response, Schema, SchemaSlot,
    SchemaType, SecurityScheme, Server, Tag,
};
pub use pointer::JsonPointer;
pub use resolve::{dangling_schema_refs, resolve, SchemaResolver};

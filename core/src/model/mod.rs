#![deny(missing_docs)]

//! # Model Placeholders and Introspection
//!
//! A model is a Rust type (or a pre-compiled JSON Schema document) that stands
//! behind a schema slot until the document is resolved.
//!
//! - **ModelType**: an opaque handle on the model.
//! - **ModelSchema**: the placeholder node stored in a [`SchemaSlot`].
//! - **ModelIntrospector**: turns a model into entity schemas.
//! - **generator**: the `schemars` backed introspector.

pub mod generator;
pub mod normalize;

pub use generator::{discriminated_union, SchemarsIntrospector};

use crate::error::AppResult;
use crate::oas::schema::SchemaSlot;
use indexmap::IndexMap;
use schemars::gen::SchemaSettings;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Raw `schemars` output for one type.
pub(crate) struct Generated {
    /// The subschema for the type; a `$ref` for referenceable types.
    pub(crate) root: Schema,
    /// Every definition the generator collected.
    pub(crate) definitions: schemars::Map<String, Schema>,
}

/// Generates the schema of a concrete type under the given settings.
pub(crate) type GenerateFn = fn(&SchemaSettings) -> Generated;

fn generate_for<T: JsonSchema>(settings: &SchemaSettings) -> Generated {
    let mut gen = settings.clone().into_generator();
    let root = gen.subschema_for::<T>();
    Generated {
        root,
        definitions: gen.take_definitions(),
    }
}

/// Where a model's schema comes from.
#[derive(Clone)]
pub(crate) enum ModelSource {
    /// A Rust type implementing `JsonSchema`.
    Typed {
        type_name: &'static str,
        schema_name: fn() -> String,
        generate: GenerateFn,
    },
    /// A JSON Schema document supplied as data.
    Document { name: String, document: Arc<Value> },
}

/// A handle on a structured-data model.
///
/// Cheap to clone; the same handle always introspects to the same output.
#[derive(Clone)]
pub struct ModelType {
    source: ModelSource,
}

impl ModelType {
    /// The model backed by the Rust type `T`.
    pub fn of<T: JsonSchema>() -> Self {
        Self {
            source: ModelSource::Typed {
                type_name: std::any::type_name::<T>(),
                schema_name: T::schema_name,
                generate: generate_for::<T>,
            },
        }
    }

    /// A model described by a JSON Schema document.
    ///
    /// Sub-schemas are read from `$defs` (or `definitions`) and local
    /// references should point there.
    pub fn from_json_schema(name: impl Into<String>, document: Value) -> Self {
        Self {
            source: ModelSource::Document {
                name: name.into(),
                document: Arc::new(document),
            },
        }
    }

    /// The default component name. Honours `#[schemars(rename = "...")]`.
    pub fn schema_name(&self) -> String {
        match &self.source {
            ModelSource::Typed { schema_name, .. } => schema_name(),
            ModelSource::Document { name, .. } => name.clone(),
        }
    }

    /// The Rust type path, or the document name for JSON Schema models.
    pub fn type_name(&self) -> &str {
        match &self.source {
            ModelSource::Typed { type_name, .. } => type_name,
            ModelSource::Document { name, .. } => name,
        }
    }

    pub(crate) fn source(&self) -> &ModelSource {
        &self.source
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelType").field(&self.type_name()).finish()
    }
}

impl PartialEq for ModelType {
    fn eq(&self, other: &Self) -> bool {
        match (&self.source, &other.source) {
            (
                ModelSource::Typed { type_name: a, .. },
                ModelSource::Typed { type_name: b, .. },
            ) => a == b,
            (
                ModelSource::Document {
                    name: a,
                    document: doc_a,
                },
                ModelSource::Document {
                    name: b,
                    document: doc_b,
                },
            ) => a == b && doc_a == doc_b,
            _ => false,
        }
    }
}

/// A placeholder node: a model plus an optional registration name.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    /// The model to introspect.
    pub model: ModelType,
    /// Overrides the model's default component name.
    pub schema_name: Option<String>,
}

impl ModelSchema {
    /// A placeholder for `model` under its default name.
    pub fn new(model: ModelType) -> Self {
        Self {
            model,
            schema_name: None,
        }
    }

    /// A placeholder for the Rust type `T`.
    pub fn of<T: JsonSchema>() -> Self {
        Self::new(ModelType::of::<T>())
    }

    /// Registers the model under `name` instead of its default name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    /// The name the model is registered under.
    pub fn registration_name(&self) -> String {
        self.schema_name
            .clone()
            .unwrap_or_else(|| self.model.schema_name())
    }
}

/// The entity schemas produced for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Introspection {
    /// The schema of the model itself.
    pub root: SchemaSlot,
    /// Every transitively referenced sub-model, keyed by its default name.
    pub nested: IndexMap<String, SchemaSlot>,
    /// Prefix of the local references into `nested`, e.g. `#/$defs/`.
    pub definitions_path: String,
}

/// Turns models into entity schemas.
///
/// Implementations must be deterministic and must not hold per-document
/// state.
pub trait ModelIntrospector {
    /// Introspects `model`. Local references in the output point into
    /// `definitions_path`.
    fn introspect(&self, model: &ModelType) -> AppResult<Introspection>;
}

#![deny(missing_docs)]

//! # Reference Object
//!
//! The `$ref` wrapper and the `RefOr<T>` slot used wherever OpenAPI allows
//! either an inline object or a reference to a component.

use crate::pointer::{component_schema_name, component_schema_ref};
use serde::{Deserialize, Serialize};

/// A simple object to allow referencing other components in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// **REQUIRED**. The reference identifier, a URI.
    #[serde(rename = "$ref", alias = "ref")]
    pub ref_path: String,

    /// A short summary which by default overrides that of the referenced component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// A description which by default overrides that of the referenced component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Reference {
    /// Creates a reference to an arbitrary target.
    pub fn new(ref_path: impl Into<String>) -> Self {
        Self {
            ref_path: ref_path.into(),
            summary: None,
            description: None,
        }
    }

    /// Creates a reference to `#/components/schemas/{name}`.
    pub fn schema(name: &str) -> Self {
        Self::new(component_schema_ref(name))
    }

    /// Returns the component schema name if this reference points into
    /// `components.schemas`.
    pub fn schema_name(&self) -> Option<String> {
        component_schema_name(&self.ref_path)
    }
}

/// Either a [`Reference`] or an inline `T`.
///
/// The reference form is tried first when parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `$ref` to a reusable component.
    Ref(Reference),
    /// An inline object.
    T(T),
}

impl<T> RefOr<T> {
    /// Returns the inline object, if any.
    pub fn as_inline_mut(&mut self) -> Option<&mut T> {
        match self {
            RefOr::T(inner) => Some(inner),
            RefOr::Ref(_) => None,
        }
    }
}

impl<T> From<Reference> for RefOr<T> {
    fn from(reference: Reference) -> Self {
        RefOr::Ref(reference)
    }
}

#![deny(missing_docs)]

//! # Tags and External Documentation

use serde::{Deserialize, Serialize};
use url::Url;

/// Allows referencing an external resource for extended documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocumentation {
    /// A description of the target documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// **REQUIRED**. The URL for the target documentation.
    pub url: Url,
}

/// Adds metadata to a single tag that is used by the Operation Object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// **REQUIRED**. The name of the tag.
    pub name: String,

    /// A description for the tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Additional external documentation for this tag.
    #[serde(
        rename = "externalDocs",
        alias = "external_docs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_docs: Option<ExternalDocumentation>,
}

#![deny(missing_docs)]

//! # Server Object

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An object representing a Server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// **REQUIRED**. A URL to the target host. May be relative and may contain
    /// `{variable}` substitutions.
    pub url: String,

    /// An optional string describing the host designated by the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Variables substituted into the server's URL template.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
}

/// An object representing a Server Variable for server URL template substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Restricts the substitution options to a limited set.
    #[serde(
        rename = "enum",
        alias = "enum_values",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enum_values: Vec<String>,

    /// **REQUIRED**. The default value to use for substitution.
    pub default: String,

    /// An optional description for the server variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

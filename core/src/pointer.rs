#![deny(missing_docs)]

//! # JSON Pointers
//!
//! Helpers for building JSON Pointers (RFC 6901) while walking a document and
//! for reading the component name back out of a local `$ref`.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::fmt::Display;

/// Prefix of every reference into the component schema registry.
pub const COMPONENT_SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// A JSON Pointer to a location inside an OpenAPI document.
///
/// Used to name call sites in errors and log events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer(String);

impl JsonPointer {
    /// The pointer to the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a pointer one segment deeper.
    pub fn child(&self, segment: impl AsRef<str>) -> Self {
        Self(format!("{}/{}", self.0, encode_pointer_segment(segment.as_ref())))
    }

    /// Returns a pointer one array index deeper.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}/{}", self.0, index))
    }

    /// The pointer as a URI fragment (`#/paths/...`).
    pub fn to_fragment(&self) -> String {
        format!("#{}", self.0)
    }

    /// The raw pointer string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for JsonPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Builds the `$ref` target for a component schema name.
pub fn component_schema_ref(name: &str) -> String {
    format!("{}{}", COMPONENT_SCHEMAS_PREFIX, encode_pointer_segment(name))
}

/// Extracts a component schema name from a `$ref` if it points to
/// `#/components/schemas/{name}`.
///
/// Returns `None` for external references and deeper pointers.
pub fn component_schema_name(ref_str: &str) -> Option<String> {
    let segment = ref_str.strip_prefix(COMPONENT_SCHEMAS_PREFIX)?;
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(segment))
}

/// Encodes a JSON Pointer segment (escapes `~` and `/`).
pub fn encode_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains(&['~', '/'][..]) {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

#![deny(missing_docs)]

//! # Resolver Configuration
//!
//! Options controlling one schema resolution pass. Every field has a default,
//! so partial JSON/YAML configuration is accepted.

use serde::{Deserialize, Serialize};

/// What to do when a component name is claimed by two different schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail the pass with `AppError::NameCollision`.
    #[default]
    Reject,
    /// Keep the latest definition and log a warning.
    Overwrite,
}

/// Options for [`crate::resolve::SchemaResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverOptions {
    /// Handling of conflicting definitions under one name.
    pub collision_policy: CollisionPolicy,
    /// Reject registration names that are not valid component keys.
    pub validate_names: bool,
    /// Sort the schemas added by the pass by name. Entries already in
    /// `components.schemas` keep their order and stay first.
    pub sort_schemas: bool,
    /// Walk the document for placeholders. When off, only the models given
    /// to [`crate::resolve::SchemaResolver::with_model`] are registered.
    pub scan_placeholders: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::Reject,
            validate_names: true,
            sort_schemas: true,
            scan_placeholders: true,
        }
    }
}

impl ResolverOptions {
    /// Sets the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Enables or disables component name validation.
    pub fn with_validate_names(mut self, validate: bool) -> Self {
        self.validate_names = validate;
        self
    }

    /// Enables or disables sorting of newly registered schemas.
    pub fn with_sort_schemas(mut self, sort: bool) -> Self {
        self.sort_schemas = sort;
        self
    }

    /// Enables or disables the placeholder walk.
    pub fn with_scan_placeholders(mut self, scan: bool) -> Self {
        self.scan_placeholders = scan;
        self
    }
}

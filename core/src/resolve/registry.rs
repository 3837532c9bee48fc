#![deny(missing_docs)]

//! # Name Registry
//!
//! Tracks the component schemas claimed during one resolution pass and
//! arbitrates name collisions. Lives only as long as the pass.

use crate::config::{CollisionPolicy, ResolverOptions};
use crate::error::{AppError, AppResult};
use crate::oas::schema::SchemaSlot;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt::Display;
use tracing::{debug, warn};

/// Valid `components` keys.
pub const COMPONENT_KEY_PATTERN: &str = r"^[a-zA-Z0-9._-]+$";

/// Where a registered schema came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Already present in `components.schemas` before the pass.
    Existing,
    /// Produced by introspecting a model.
    Model {
        /// Rust type path or document name of the model.
        model: String,
        /// JSON Pointer fragment of the placeholder, or `None` for models
        /// registered explicitly on the resolver.
        site: Option<String>,
    },
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Existing => write!(f, "the existing component"),
            Origin::Model {
                model,
                site: Some(site),
            } => write!(f, "model '{}' at {}", model, site),
            Origin::Model { model, site: None } => write!(f, "model '{}'", model),
        }
    }
}

/// Outcome of a single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The name was free.
    Inserted,
    /// The same content was already registered under the name.
    Reused,
    /// Different content was replaced (`CollisionPolicy::Overwrite`).
    Replaced,
}

#[derive(Debug)]
struct Entry {
    schema: SchemaSlot,
    origin: Origin,
    seeded: bool,
}

/// Component schema names claimed so far.
#[derive(Debug)]
pub struct NameRegistry {
    entries: IndexMap<String, Entry>,
    policy: CollisionPolicy,
    key_pattern: Option<Regex>,
}

impl NameRegistry {
    /// Creates an empty registry.
    pub fn new(options: &ResolverOptions) -> AppResult<Self> {
        let key_pattern = if options.validate_names {
            let re = Regex::new(COMPONENT_KEY_PATTERN)
                .map_err(|e| AppError::General(format!("Invalid component key pattern: {}", e)))?;
            Some(re)
        } else {
            None
        };
        Ok(Self {
            entries: IndexMap::new(),
            policy: options.collision_policy,
            key_pattern,
        })
    }

    /// Seeds the registry with the schemas already in the document.
    ///
    /// Placeholders are skipped; they are registered when visited.
    pub fn seed(&mut self, existing: &IndexMap<String, SchemaSlot>) {
        for (name, slot) in existing {
            if slot.is_model() {
                continue;
            }
            self.entries.insert(
                name.clone(),
                Entry {
                    schema: slot.clone(),
                    origin: Origin::Existing,
                    seeded: true,
                },
            );
        }
    }

    /// Checks `name` against [`COMPONENT_KEY_PATTERN`] when validation is on.
    pub fn validate_name(&self, name: &str) -> AppResult<()> {
        match &self.key_pattern {
            Some(re) if !re.is_match(name) => Err(AppError::InvalidComponentName {
                name: name.to_string(),
                pattern: COMPONENT_KEY_PATTERN,
            }),
            _ => Ok(()),
        }
    }

    /// Claims `name` for `schema`.
    pub fn register(
        &mut self,
        name: &str,
        schema: SchemaSlot,
        origin: Origin,
    ) -> AppResult<Registration> {
        self.validate_name(name)?;

        let Some(entry) = self.entries.get_mut(name) else {
            debug!(schema = name, origin = %origin, "Registered component schema");
            self.entries.insert(
                name.to_string(),
                Entry {
                    schema,
                    origin,
                    seeded: false,
                },
            );
            return Ok(Registration::Inserted);
        };

        if entry.schema == schema {
            debug!(schema = name, origin = %origin, "Reused component schema");
            return Ok(Registration::Reused);
        }

        match self.policy {
            CollisionPolicy::Reject => Err(AppError::NameCollision {
                name: name.to_string(),
                first: entry.origin.to_string(),
                second: origin.to_string(),
            }),
            CollisionPolicy::Overwrite => {
                warn!(
                    schema = name,
                    previous = %entry.origin,
                    origin = %origin,
                    "Overwriting component schema with a different definition"
                );
                *entry = Entry {
                    schema,
                    origin,
                    seeded: false,
                };
                Ok(Registration::Replaced)
            }
        }
    }

    /// Whether `name` is claimed.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of claimed names, seeded ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no name is claimed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes every schema registered during the pass into `schemas`.
    ///
    /// Returns how many were written.
    pub fn merge_into(self, schemas: &mut IndexMap<String, SchemaSlot>) -> usize {
        let mut written = 0;
        for (name, entry) in self.entries {
            if entry.seeded {
                continue;
            }
            schemas.insert(name, entry.schema);
            written += 1;
        }
        written
    }
}

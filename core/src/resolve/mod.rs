#![deny(missing_docs)]

//! # Schema Resolution
//!
//! Replaces every model placeholder in a document with a `$ref` to a
//! de-duplicated entry in `components.schemas`.
//!
//! - **registry**: collision-aware name registry for one pass.
//! - **rewrite**: local reference rewriting and reference closure checks.
//!
//! A pass works on a copy of the document and only commits on success, so a
//! failed [`resolve`] leaves the caller's document as it was.

pub mod registry;
pub mod rewrite;

pub use registry::{NameRegistry, Origin, Registration, COMPONENT_KEY_PATTERN};
pub use rewrite::{dangling_schema_refs, LocalRefRewriter};

use crate::config::ResolverOptions;
use crate::error::AppResult;
use crate::model::{Introspection, ModelIntrospector, ModelSchema, SchemarsIntrospector};
use crate::oas::open_api::OpenApi;
use crate::oas::reference::Reference;
use crate::oas::schema::SchemaSlot;
use crate::oas::visit::{walk_open_api_mut, walk_slot_mut, VisitMut};
use crate::pointer::{component_schema_name, JsonPointer};
use tracing::{debug, info};

/// Resolves `doc` in place with the default options and the `schemars`
/// introspector.
pub fn resolve(doc: &mut OpenApi) -> AppResult<&mut OpenApi> {
    SchemaResolver::new().resolve(doc)
}

/// Configurable schema resolver.
#[derive(Debug, Clone)]
pub struct SchemaResolver<I = SchemarsIntrospector> {
    options: ResolverOptions,
    introspector: I,
    models: Vec<ModelSchema>,
}

impl SchemaResolver<SchemarsIntrospector> {
    /// A resolver with default options and the `schemars` introspector.
    pub fn new() -> Self {
        Self {
            options: ResolverOptions::default(),
            introspector: SchemarsIntrospector::default(),
            models: Vec::new(),
        }
    }
}

impl Default for SchemaResolver<SchemarsIntrospector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ModelIntrospector> SchemaResolver<I> {
    /// Replaces the options.
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Swaps the introspector.
    pub fn with_introspector<J: ModelIntrospector>(self, introspector: J) -> SchemaResolver<J> {
        SchemaResolver {
            options: self.options,
            introspector,
            models: self.models,
        }
    }

    /// Registers a model into `components.schemas` even if no placeholder
    /// refers to it.
    pub fn with_model(mut self, model: ModelSchema) -> Self {
        self.models.push(model);
        self
    }

    /// The active options.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolves `doc` in place and returns it for chaining.
    ///
    /// On error `doc` is left untouched.
    pub fn resolve<'a>(&self, doc: &'a mut OpenApi) -> AppResult<&'a mut OpenApi> {
        *doc = self.resolved(doc)?;
        Ok(doc)
    }

    /// Returns a resolved copy of `doc`.
    pub fn resolved(&self, doc: &OpenApi) -> AppResult<OpenApi> {
        let mut working = doc.clone();
        self.run(&mut working)?;
        Ok(working)
    }

    fn run(&self, doc: &mut OpenApi) -> AppResult<()> {
        let mut registry = NameRegistry::new(&self.options)?;
        registry.seed(&doc.components_mut().schemas);

        let mut pass = ResolvePass {
            introspector: &self.introspector,
            registry,
            resolved: 0,
        };
        for model in &self.models {
            pass.register_model(model, None)?;
        }
        if self.options.scan_placeholders {
            walk_open_api_mut(&mut pass, doc)?;
        }

        let ResolvePass {
            registry, resolved, ..
        } = pass;
        let schemas = &mut doc.components_mut().schemas;
        let existing = schemas.len();
        let registered = registry.merge_into(schemas);
        if self.options.sort_schemas {
            // New names land after the existing ones; only those are sorted.
            let mut added = schemas.split_off(existing);
            added.sort_keys();
            schemas.extend(added);
        }

        info!(
            placeholders = resolved,
            schemas = registered,
            "Resolved model placeholders"
        );
        Ok(())
    }
}

/// State of one traversal.
struct ResolvePass<'r, I> {
    introspector: &'r I,
    registry: NameRegistry,
    resolved: usize,
}

impl<I: ModelIntrospector> ResolvePass<'_, I> {
    /// Introspects a model and registers it with everything it depends on.
    /// Returns the name the model was registered under.
    fn register_model(&mut self, placeholder: &ModelSchema, site: Option<&JsonPointer>) -> AppResult<String> {
        let name = placeholder.registration_name();
        self.registry.validate_name(&name)?;

        let Introspection {
            mut root,
            mut nested,
            definitions_path,
        } = self.introspector.introspect(&placeholder.model)?;

        let mut rewriter = LocalRefRewriter::new(&definitions_path);
        rewriter.rewrite(&mut root)?;
        for slot in nested.values_mut() {
            rewriter.rewrite(slot)?;
        }

        let origin = Origin::Model {
            model: placeholder.model.type_name().to_string(),
            site: site.map(JsonPointer::to_fragment),
        };
        for (nested_name, schema) in nested {
            self.registry.register(&nested_name, schema, origin.clone())?;
        }
        self.registry.register(&name, root, origin)?;
        Ok(name)
    }
}

impl<I: ModelIntrospector> VisitMut for ResolvePass<'_, I> {
    fn visit_slot_mut(&mut self, slot: &mut SchemaSlot, ptr: &JsonPointer) -> AppResult<()> {
        let SchemaSlot::Model(placeholder) = slot else {
            return walk_slot_mut(self, slot, ptr);
        };
        let name = self.register_model(placeholder, Some(ptr))?;
        let reference = SchemaSlot::Reference(Reference::schema(&name));

        // A placeholder stored under another component key keeps that key
        // claimed, so a later model cannot silently take it over.
        let fragment = ptr.to_fragment();
        if let Some(key) = component_schema_name(&fragment).filter(|key| *key != name) {
            let origin = Origin::Model {
                model: placeholder.model.type_name().to_string(),
                site: Some(fragment),
            };
            self.registry.register(&key, reference.clone(), origin)?;
        }

        debug!(
            at = %ptr,
            model = placeholder.model.type_name(),
            schema = %name,
            "Replaced model placeholder"
        );
        *slot = reference;
        self.resolved += 1;
        Ok(())
    }
}

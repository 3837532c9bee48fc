#![deny(missing_docs)]

//! # Reference Rewriting
//!
//! Moves introspector-local pointers (`#/$defs/<name>`, `#/definitions/<name>`)
//! onto `#/components/schemas/<name>`, and checks that every component
//! reference in a document resolves.

use crate::error::{AppError, AppResult};
use crate::oas::open_api::OpenApi;
use crate::oas::reference::Reference;
use crate::oas::schema::{Schema, SchemaSlot};
use crate::oas::visit::{walk_open_api_mut, walk_schema_mut, walk_slot_mut, VisitMut};
use crate::pointer::{decode_pointer_segment, JsonPointer, COMPONENT_SCHEMAS_PREFIX};
use indexmap::IndexSet;

/// Prefixes always treated as local to an introspected model.
const LOCAL_PREFIXES: &[&str] = &["#/$defs/", "#/definitions/"];

/// Rewrites local `$ref`s and discriminator mapping values.
#[derive(Debug, Clone)]
pub struct LocalRefRewriter {
    prefixes: Vec<String>,
}

impl LocalRefRewriter {
    /// A rewriter for output whose sub-schemas live under `definitions_path`.
    pub fn new(definitions_path: &str) -> Self {
        let mut prefixes = vec![definitions_path.to_string()];
        for prefix in LOCAL_PREFIXES {
            if *prefix != definitions_path {
                prefixes.push(prefix.to_string());
            }
        }
        Self { prefixes }
    }

    /// Returns the document-level target for a local pointer.
    pub fn rewrite_target(&self, target: &str) -> Option<String> {
        self.prefixes.iter().find_map(|prefix| {
            let rest = target.strip_prefix(prefix.as_str())?;
            (!rest.is_empty()).then(|| format!("{}{}", COMPONENT_SCHEMAS_PREFIX, rest))
        })
    }

    /// Rewrites every local pointer in `slot`.
    pub fn rewrite(&mut self, slot: &mut SchemaSlot) -> AppResult<()> {
        self.visit_slot_mut(slot, &JsonPointer::root())
    }
}

impl VisitMut for LocalRefRewriter {
    fn visit_schema_mut(&mut self, schema: &mut Schema, ptr: &JsonPointer) -> AppResult<()> {
        if let Some(target) = schema.ref_path.as_mut() {
            if let Some(rewritten) = self.rewrite_target(target) {
                *target = rewritten;
            }
        }
        if let Some(discriminator) = schema.discriminator.as_mut() {
            for target in discriminator.mapping.values_mut() {
                if let Some(rewritten) = self.rewrite_target(target) {
                    *target = rewritten;
                }
            }
        }
        walk_schema_mut(self, schema, ptr)
    }

    fn visit_reference_mut(&mut self, reference: &mut Reference, _ptr: &JsonPointer) -> AppResult<()> {
        if let Some(rewritten) = self.rewrite_target(&reference.ref_path) {
            reference.ref_path = rewritten;
        }
        Ok(())
    }
}

/// Collects component schema targets.
#[derive(Default)]
struct TargetCollector {
    targets: IndexSet<String>,
}

impl TargetCollector {
    fn record(&mut self, target: &str) {
        if target.starts_with(COMPONENT_SCHEMAS_PREFIX) {
            self.targets.insert(target.to_string());
        }
    }
}

impl VisitMut for TargetCollector {
    fn visit_slot_mut(&mut self, slot: &mut SchemaSlot, ptr: &JsonPointer) -> AppResult<()> {
        if slot.is_model() {
            return Err(AppError::General(format!(
                "Unresolved model placeholder at {}",
                ptr.to_fragment()
            )));
        }
        walk_slot_mut(self, slot, ptr)
    }

    fn visit_schema_mut(&mut self, schema: &mut Schema, ptr: &JsonPointer) -> AppResult<()> {
        if let Some(target) = schema.ref_path.as_deref() {
            self.record(target);
        }
        if let Some(discriminator) = schema.discriminator.as_ref() {
            for target in discriminator.mapping.values() {
                self.record(target);
            }
        }
        walk_schema_mut(self, schema, ptr)
    }

    fn visit_reference_mut(&mut self, reference: &mut Reference, _ptr: &JsonPointer) -> AppResult<()> {
        self.record(&reference.ref_path);
        Ok(())
    }
}

/// Lists every `#/components/schemas/...` target in `doc` whose component is
/// missing, in document order.
///
/// Fails if a model placeholder is still present.
pub fn dangling_schema_refs(doc: &OpenApi) -> AppResult<Vec<String>> {
    let mut working = doc.clone();
    let mut collector = TargetCollector::default();
    walk_open_api_mut(&mut collector, &mut working)?;

    let schemas = doc.components.as_ref().map(|c| &c.schemas);
    Ok(collector
        .targets
        .into_iter()
        .filter(|target| {
            let name = target
                .strip_prefix(COMPONENT_SCHEMAS_PREFIX)
                .and_then(|rest| rest.split('/').next())
                .map(decode_pointer_segment)
                .unwrap_or_default();
            !schemas.is_some_and(|s| s.contains_key(&name))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::info::Info;
    use crate::oas::schema::Discriminator;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_rewrites_refs_and_mapping() {
        let mut slot: SchemaSlot = serde_json::from_value(json!({
            "oneOf": [
                {"$ref": "#/$defs/DataAModel"},
                {"$ref": "#/definitions/DataBModel"},
                {"$ref": "https://example.com/schemas/External"}
            ],
            "discriminator": {
                "propertyName": "kind",
                "mapping": {
                    "a": "#/$defs/DataAModel",
                    "b": "DataBModel"
                }
            },
            "items": {"$ref": "#/$defs/Tree/properties/leaf"}
        }))
        .unwrap();

        LocalRefRewriter::new("#/$defs/").rewrite(&mut slot).unwrap();

        assert_eq!(
            serde_json::to_value(&slot).unwrap(),
            json!({
                "oneOf": [
                    {"$ref": "#/components/schemas/DataAModel"},
                    {"$ref": "#/components/schemas/DataBModel"},
                    {"$ref": "https://example.com/schemas/External"}
                ],
                "items": {"$ref": "#/components/schemas/Tree/properties/leaf"},
                "discriminator": {
                    "propertyName": "kind",
                    "mapping": {
                        "a": "#/components/schemas/DataAModel",
                        "b": "DataBModel"
                    }
                }
            })
        );
    }

    #[test]
    fn test_rewrites_refs_with_sibling_keywords() {
        let mut slot: SchemaSlot = serde_json::from_value(json!({
            "properties": {
                "owner": {
                    "$ref": "#/$defs/Owner",
                    "title": "Owner of pet",
                    "default": {"name": "x"}
                }
            }
        }))
        .unwrap();

        LocalRefRewriter::new("#/$defs/").rewrite(&mut slot).unwrap();

        assert_eq!(
            serde_json::to_value(&slot).unwrap(),
            json!({
                "properties": {
                    "owner": {
                        "$ref": "#/components/schemas/Owner",
                        "title": "Owner of pet",
                        "default": {"name": "x"}
                    }
                }
            })
        );
    }

    #[test]
    fn test_custom_definitions_path() {
        let rewriter = LocalRefRewriter::new("#/components/schemas/");
        assert_eq!(
            rewriter.rewrite_target("#/components/schemas/Pet").as_deref(),
            Some("#/components/schemas/Pet")
        );
        assert_eq!(
            rewriter.rewrite_target("#/$defs/Pet").as_deref(),
            Some("#/components/schemas/Pet")
        );
        assert_eq!(rewriter.rewrite_target("#/$defs/"), None);
        assert_eq!(rewriter.rewrite_target("#/dummy"), None);
    }

    #[test]
    fn test_root_reference_is_rewritten() {
        let mut slot = SchemaSlot::from(Reference::new("#/$defs/Pet"));
        LocalRefRewriter::new("#/$defs/").rewrite(&mut slot).unwrap();
        assert_eq!(slot, SchemaSlot::from(Reference::schema("Pet")));
    }

    #[test]
    fn test_dangling_schema_refs() {
        let mut doc = OpenApi::new(Info::new("t", "1"));
        let schemas = &mut doc.components_mut().schemas;
        schemas.insert(
            "Pet".into(),
            Schema {
                one_of: vec![
                    Reference::schema("Cat").into(),
                    Reference::schema("Dog").into(),
                ],
                discriminator: Some(Discriminator {
                    property_name: "kind".into(),
                    mapping: [("fish".to_string(), "#/components/schemas/Fish".to_string())]
                        .into_iter()
                        .collect(),
                }),
                ..Schema::default()
            }
            .into(),
        );
        schemas.insert("Cat".into(), Schema::object().into());
        schemas.insert(
            "Owner".into(),
            Schema {
                ref_path: Some("#/components/schemas/Person".into()),
                title: Some("Owner".into()),
                ..Schema::default()
            }
            .into(),
        );

        assert_eq!(
            dangling_schema_refs(&doc).unwrap(),
            vec![
                "#/components/schemas/Fish".to_string(),
                "#/components/schemas/Dog".to_string(),
                "#/components/schemas/Person".to_string()
            ]
        );
    }

    #[test]
    fn test_dangling_schema_refs_rejects_placeholders() {
        #[derive(schemars::JsonSchema)]
        #[allow(dead_code)]
        struct Pet {
            name: String,
        }

        let mut doc = OpenApi::new(Info::new("t", "1"));
        doc.components_mut()
            .schemas
            .insert("Pet".into(), SchemaSlot::model::<Pet>());
        let err = dangling_schema_refs(&doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "General Error: Unresolved model placeholder at #/components/schemas/Pet"
        );
    }
}

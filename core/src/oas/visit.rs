#![deny(missing_docs)]

//! # Mutable Schema Visitor
//!
//! Walks every schema slot reachable from an [`OpenApi`] document.
//!
//! Implementors override the `visit_*` hooks they care about and call back
//! into the matching `walk_*` function to keep descending. Every hook gets the
//! JSON Pointer of the node it is looking at.

use crate::error::AppResult;
use crate::oas::components::Components;
use crate::oas::content::{Encoding, MediaType, RequestBody, Response};
use crate::oas::open_api::OpenApi;
use crate::oas::parameter::{Header, Parameter};
use crate::oas::paths::{Operation, PathItem};
use crate::oas::reference::{RefOr, Reference};
use crate::oas::schema::{BoolOrSchema, Schema, SchemaSlot};
use crate::pointer::JsonPointer;
use indexmap::IndexMap;

/// A fallible, mutable traversal over schema slots.
pub trait VisitMut {
    /// Called for every schema slot, including placeholders.
    fn visit_slot_mut(&mut self, slot: &mut SchemaSlot, ptr: &JsonPointer) -> AppResult<()> {
        walk_slot_mut(self, slot, ptr)
    }

    /// Called for every inline schema.
    fn visit_schema_mut(&mut self, schema: &mut Schema, ptr: &JsonPointer) -> AppResult<()> {
        walk_schema_mut(self, schema, ptr)
    }

    /// Called for every schema reference.
    fn visit_reference_mut(
        &mut self,
        _reference: &mut Reference,
        _ptr: &JsonPointer,
    ) -> AppResult<()> {
        Ok(())
    }
}

/// Walks paths, webhooks and components of a document.
pub fn walk_open_api_mut<V: VisitMut + ?Sized>(v: &mut V, doc: &mut OpenApi) -> AppResult<()> {
    let root = JsonPointer::root();

    let paths = root.child("paths");
    for (path, item) in doc.paths.iter_mut() {
        walk_path_item_mut(v, item, &paths.child(path))?;
    }

    let webhooks = root.child("webhooks");
    for (name, item) in doc.webhooks.iter_mut() {
        if let Some(item) = item.as_inline_mut() {
            walk_path_item_mut(v, item, &webhooks.child(name))?;
        }
    }

    if let Some(components) = doc.components.as_mut() {
        walk_components_mut(v, components, &root.child("components"))?;
    }
    Ok(())
}

/// Walks every component collection that can hold schema slots.
pub fn walk_components_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    components: &mut Components,
    ptr: &JsonPointer,
) -> AppResult<()> {
    let schemas = ptr.child("schemas");
    for (name, slot) in components.schemas.iter_mut() {
        v.visit_slot_mut(slot, &schemas.child(name))?;
    }

    let responses = ptr.child("responses");
    for (name, response) in components.responses.iter_mut() {
        if let Some(response) = response.as_inline_mut() {
            walk_response_mut(v, response, &responses.child(name))?;
        }
    }

    let parameters = ptr.child("parameters");
    for (name, parameter) in components.parameters.iter_mut() {
        if let Some(parameter) = parameter.as_inline_mut() {
            walk_parameter_mut(v, parameter, &parameters.child(name))?;
        }
    }

    let bodies = ptr.child("requestBodies");
    for (name, body) in components.request_bodies.iter_mut() {
        if let Some(body) = body.as_inline_mut() {
            walk_request_body_mut(v, body, &bodies.child(name))?;
        }
    }

    walk_headers_mut(v, &mut components.headers, &ptr.child("headers"))?;

    let callbacks = ptr.child("callbacks");
    for (name, callback) in components.callbacks.iter_mut() {
        if let Some(callback) = callback.as_inline_mut() {
            walk_callback_mut(v, callback, &callbacks.child(name))?;
        }
    }

    let path_items = ptr.child("pathItems");
    for (name, item) in components.path_items.iter_mut() {
        if let Some(item) = item.as_inline_mut() {
            walk_path_item_mut(v, item, &path_items.child(name))?;
        }
    }
    Ok(())
}

/// Walks the shared parameters and every operation of a path item.
pub fn walk_path_item_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    item: &mut PathItem,
    ptr: &JsonPointer,
) -> AppResult<()> {
    walk_parameter_list_mut(v, &mut item.parameters, &ptr.child("parameters"))?;
    for (method, op) in item.operations_mut() {
        walk_operation_mut(v, op, &ptr.child(method))?;
    }
    Ok(())
}

/// Walks parameters, request body, responses and callbacks of an operation.
pub fn walk_operation_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    op: &mut Operation,
    ptr: &JsonPointer,
) -> AppResult<()> {
    walk_parameter_list_mut(v, &mut op.parameters, &ptr.child("parameters"))?;

    if let Some(body) = op.request_body.as_mut().and_then(RefOr::as_inline_mut) {
        walk_request_body_mut(v, body, &ptr.child("requestBody"))?;
    }

    let responses = ptr.child("responses");
    for (status, response) in op.responses.iter_mut() {
        if let Some(response) = response.as_inline_mut() {
            walk_response_mut(v, response, &responses.child(status))?;
        }
    }

    let callbacks = ptr.child("callbacks");
    for (name, callback) in op.callbacks.iter_mut() {
        if let Some(callback) = callback.as_inline_mut() {
            walk_callback_mut(v, callback, &callbacks.child(name))?;
        }
    }
    Ok(())
}

/// Walks the path items of a callback, keyed by runtime expression.
pub fn walk_callback_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    callback: &mut IndexMap<String, PathItem>,
    ptr: &JsonPointer,
) -> AppResult<()> {
    for (expression, item) in callback.iter_mut() {
        walk_path_item_mut(v, item, &ptr.child(expression))?;
    }
    Ok(())
}

fn walk_parameter_list_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    parameters: &mut [RefOr<Parameter>],
    ptr: &JsonPointer,
) -> AppResult<()> {
    for (idx, parameter) in parameters.iter_mut().enumerate() {
        if let Some(parameter) = parameter.as_inline_mut() {
            walk_parameter_mut(v, parameter, &ptr.index(idx))?;
        }
    }
    Ok(())
}

fn walk_headers_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    headers: &mut IndexMap<String, RefOr<Header>>,
    ptr: &JsonPointer,
) -> AppResult<()> {
    for (name, header) in headers.iter_mut() {
        if let Some(header) = header.as_inline_mut() {
            walk_header_mut(v, header, &ptr.child(name))?;
        }
    }
    Ok(())
}

fn walk_content_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    content: &mut IndexMap<String, MediaType>,
    ptr: &JsonPointer,
) -> AppResult<()> {
    for (media_type, media) in content.iter_mut() {
        walk_media_type_mut(v, media, &ptr.child(media_type))?;
    }
    Ok(())
}

/// Walks the schema and content of a parameter.
pub fn walk_parameter_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    parameter: &mut Parameter,
    ptr: &JsonPointer,
) -> AppResult<()> {
    if let Some(slot) = parameter.param_schema.as_mut() {
        v.visit_slot_mut(slot, &ptr.child("schema"))?;
    }
    walk_content_mut(v, &mut parameter.content, &ptr.child("content"))
}

/// Walks the schema and content of a header.
pub fn walk_header_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    header: &mut Header,
    ptr: &JsonPointer,
) -> AppResult<()> {
    if let Some(slot) = header.param_schema.as_mut() {
        v.visit_slot_mut(slot, &ptr.child("schema"))?;
    }
    walk_content_mut(v, &mut header.content, &ptr.child("content"))
}

/// Walks the content of a request body.
pub fn walk_request_body_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    body: &mut RequestBody,
    ptr: &JsonPointer,
) -> AppResult<()> {
    walk_content_mut(v, &mut body.content, &ptr.child("content"))
}

/// Walks the headers and content of a response.
pub fn walk_response_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    response: &mut Response,
    ptr: &JsonPointer,
) -> AppResult<()> {
    walk_headers_mut(v, &mut response.headers, &ptr.child("headers"))?;
    walk_content_mut(v, &mut response.content, &ptr.child("content"))
}

/// Walks the schema and encodings of a media type.
pub fn walk_media_type_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    media: &mut MediaType,
    ptr: &JsonPointer,
) -> AppResult<()> {
    if let Some(slot) = media.media_type_schema.as_mut() {
        v.visit_slot_mut(slot, &ptr.child("schema"))?;
    }
    let encoding = ptr.child("encoding");
    for (property, enc) in media.encoding.iter_mut() {
        walk_encoding_mut(v, enc, &encoding.child(property))?;
    }
    Ok(())
}

/// Walks the headers of an encoding.
pub fn walk_encoding_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    encoding: &mut Encoding,
    ptr: &JsonPointer,
) -> AppResult<()> {
    walk_headers_mut(v, &mut encoding.headers, &ptr.child("headers"))
}

/// Dispatches a slot to the reference or schema hook. Placeholders are leaves.
pub fn walk_slot_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    slot: &mut SchemaSlot,
    ptr: &JsonPointer,
) -> AppResult<()> {
    match slot {
        SchemaSlot::Reference(reference) => v.visit_reference_mut(reference, ptr),
        SchemaSlot::Schema(schema) => v.visit_schema_mut(schema, ptr),
        SchemaSlot::Model(_) => Ok(()),
    }
}

fn walk_slot_list_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    slots: &mut [SchemaSlot],
    ptr: &JsonPointer,
) -> AppResult<()> {
    for (idx, slot) in slots.iter_mut().enumerate() {
        v.visit_slot_mut(slot, &ptr.index(idx))?;
    }
    Ok(())
}

fn walk_slot_map_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    slots: &mut IndexMap<String, SchemaSlot>,
    ptr: &JsonPointer,
) -> AppResult<()> {
    for (key, slot) in slots.iter_mut() {
        v.visit_slot_mut(slot, &ptr.child(key))?;
    }
    Ok(())
}

fn walk_boxed_slot_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    slot: &mut Option<Box<SchemaSlot>>,
    ptr: &JsonPointer,
) -> AppResult<()> {
    match slot.as_deref_mut() {
        Some(slot) => v.visit_slot_mut(slot, ptr),
        None => Ok(()),
    }
}

fn walk_bool_or_schema_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    value: &mut Option<Box<BoolOrSchema>>,
    ptr: &JsonPointer,
) -> AppResult<()> {
    match value.as_deref_mut() {
        Some(BoolOrSchema::Schema(slot)) => v.visit_slot_mut(slot, ptr),
        _ => Ok(()),
    }
}

/// Walks every subschema keyword of a schema.
pub fn walk_schema_mut<V: VisitMut + ?Sized>(
    v: &mut V,
    schema: &mut Schema,
    ptr: &JsonPointer,
) -> AppResult<()> {
    walk_slot_list_mut(v, &mut schema.all_of, &ptr.child("allOf"))?;
    walk_slot_list_mut(v, &mut schema.any_of, &ptr.child("anyOf"))?;
    walk_slot_list_mut(v, &mut schema.one_of, &ptr.child("oneOf"))?;
    walk_boxed_slot_mut(v, &mut schema.schema_not, &ptr.child("not"))?;
    walk_boxed_slot_mut(v, &mut schema.schema_if, &ptr.child("if"))?;
    walk_boxed_slot_mut(v, &mut schema.then, &ptr.child("then"))?;
    walk_boxed_slot_mut(v, &mut schema.schema_else, &ptr.child("else"))?;
    walk_slot_map_mut(
        v,
        &mut schema.dependent_schemas,
        &ptr.child("dependentSchemas"),
    )?;
    walk_slot_list_mut(v, &mut schema.prefix_items, &ptr.child("prefixItems"))?;
    walk_boxed_slot_mut(v, &mut schema.items, &ptr.child("items"))?;
    walk_boxed_slot_mut(v, &mut schema.contains, &ptr.child("contains"))?;
    walk_slot_map_mut(v, &mut schema.properties, &ptr.child("properties"))?;
    walk_slot_map_mut(
        v,
        &mut schema.pattern_properties,
        &ptr.child("patternProperties"),
    )?;
    walk_bool_or_schema_mut(
        v,
        &mut schema.additional_properties,
        &ptr.child("additionalProperties"),
    )?;
    walk_boxed_slot_mut(v, &mut schema.property_names, &ptr.child("propertyNames"))?;
    walk_bool_or_schema_mut(
        v,
        &mut schema.unevaluated_items,
        &ptr.child("unevaluatedItems"),
    )?;
    walk_bool_or_schema_mut(
        v,
        &mut schema.unevaluated_properties,
        &ptr.child("unevaluatedProperties"),
    )?;
    walk_boxed_slot_mut(v, &mut schema.content_schema, &ptr.child("contentSchema"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::info::Info;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Default)]
    struct RefCollector {
        seen: Vec<(String, String)>,
    }

    impl VisitMut for RefCollector {
        fn visit_reference_mut(
            &mut self,
            reference: &mut Reference,
            ptr: &JsonPointer,
        ) -> AppResult<()> {
            self.seen
                .push((ptr.to_fragment(), reference.ref_path.clone()));
            Ok(())
        }
    }

    fn sample() -> OpenApi {
        OpenApi::from_value(json!({
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/pets/{id}": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true,
                         "schema": {"$ref": "#/components/schemas/Id"}}
                    ],
                    "post": {
                        "requestBody": {"content": {"application/json": {
                            "schema": {"type": "object", "properties": {
                                "tags": {"type": "array", "items": {"$ref": "#/components/schemas/Tag"}}
                            }}
                        }}},
                        "responses": {"200": {
                            "description": "ok",
                            "headers": {"X-Rate": {"schema": {"$ref": "#/components/schemas/Rate"}}}
                        }},
                        "callbacks": {"onEvent": {"{$request.body#/url}": {
                            "post": {"responses": {"200": {"description": "ok", "content": {
                                "application/json": {"schema": {"$ref": "#/components/schemas/Event"}}
                            }}}}
                        }}}
                    }
                }
            },
            "components": {
                "schemas": {
                    "Pet": {"allOf": [{"$ref": "#/components/schemas/Base"}],
                            "additionalProperties": {"$ref": "#/components/schemas/Extra"}}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_visits_every_reference_with_its_pointer() {
        let mut doc = sample();
        let mut collector = RefCollector::default();
        walk_open_api_mut(&mut collector, &mut doc).unwrap();
        assert_eq!(
            collector.seen,
            vec![
                (
                    "#/paths/~1pets~1{id}/parameters/0/schema".to_string(),
                    "#/components/schemas/Id".to_string()
                ),
                (
                    "#/paths/~1pets~1{id}/post/requestBody/content/application~1json/schema/properties/tags/items".to_string(),
                    "#/components/schemas/Tag".to_string()
                ),
                (
                    "#/paths/~1pets~1{id}/post/responses/200/headers/X-Rate/schema".to_string(),
                    "#/components/schemas/Rate".to_string()
                ),
                (
                    "#/paths/~1pets~1{id}/post/callbacks/onEvent/{$request.body#~1url}/post/responses/200/content/application~1json/schema".to_string(),
                    "#/components/schemas/Event".to_string()
                ),
                (
                    "#/components/schemas/Pet/allOf/0".to_string(),
                    "#/components/schemas/Base".to_string()
                ),
                (
                    "#/components/schemas/Pet/additionalProperties".to_string(),
                    "#/components/schemas/Extra".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_errors_stop_the_walk() {
        struct Failing;
        impl VisitMut for Failing {
            fn visit_reference_mut(
                &mut self,
                reference: &mut Reference,
                _ptr: &JsonPointer,
            ) -> AppResult<()> {
                Err(crate::error::AppError::General(reference.ref_path.clone()))
            }
        }

        let mut doc = sample();
        let err = walk_open_api_mut(&mut Failing, &mut doc).unwrap_err();
        assert_eq!(err.to_string(), "General Error: #/components/schemas/Id");
    }

    #[test]
    fn test_empty_document_is_a_no_op() {
        let mut doc = OpenApi::new(Info::new("t", "1"));
        let mut collector = RefCollector::default();
        walk_open_api_mut(&mut collector, &mut doc).unwrap();
        assert!(collector.seen.is_empty());
    }
}

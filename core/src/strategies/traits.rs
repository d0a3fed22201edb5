#![deny(missing_docs)]

//! # Spec Variation Trait
//!
//! Defines the interface one API description dialect implements: its `$ref` prefix, the
//! file name it is served under and how the dialect-neutral descriptors are laid out.

use crate::route::{OperationDescriptor, ParameterDescriptor, ResponseDescriptor};
use crate::schema::SchemaNode;
use serde_json::{Map, Value};

/// A strategy trait decoupling dialect layout from schema synthesis.
///
/// Implementors only decide *where* things go; every schema and reference handed to them
/// is already resolved against the document's own registry.
pub trait SpecVariation {
    /// Short name used in logs and errors (`swagger`, `openapi`).
    fn name(&self) -> &'static str;

    /// The file name the rendered document is served under.
    fn file_name(&self) -> &'static str;

    /// Prefix placed before a registry name inside `$ref` strings.
    fn ref_prefix(&self) -> &'static str;

    /// Renders a schema node against this dialect's prefix.
    fn render_schema(&self, node: &SchemaNode) -> Value {
        node.to_json(self.ref_prefix())
    }

    /// Renders a non-body parameter.
    fn render_parameter(&self, param: &ParameterDescriptor) -> Value;

    /// Renders one entry of an operation's response table.
    fn render_response(&self, response: &ResponseDescriptor) -> Value;

    /// Renders a whole operation.
    fn render_operation(&self, operation: &OperationDescriptor) -> Value;

    /// Assembles the document root.
    ///
    /// # Arguments
    ///
    /// * `info` - The serialized `info` object.
    /// * `paths` - Path template -> method key -> rendered operation.
    /// * `schemas` - Registry name -> rendered definition.
    fn render_document(
        &self,
        info: Value,
        paths: Map<String, Value>,
        schemas: Map<String, Value>,
    ) -> Value;
}

/// Inserts the operation fields both dialects share, in document order.
pub(crate) fn insert_operation_header(obj: &mut Map<String, Value>, op: &OperationDescriptor) {
    if !op.tags.is_empty() {
        obj.insert("tags".to_string(), Value::from(op.tags.clone()));
    }
    if let Some(summary) = &op.summary {
        obj.insert("summary".to_string(), Value::from(summary.clone()));
    }
    if let Some(description) = &op.description {
        obj.insert("description".to_string(), Value::from(description.clone()));
    }
    if let Some(operation_id) = &op.operation_id {
        obj.insert("operationId".to_string(), Value::from(operation_id.clone()));
    }
}

/// The `name`/`in`/`description`/`required` prefix shared by both dialects' parameters.
pub(crate) fn parameter_header(param: &ParameterDescriptor) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("name".to_string(), Value::from(param.name.clone()));
    obj.insert("in".to_string(), Value::from(param.input.as_str()));
    obj.insert("description".to_string(), Value::from(param.description.clone()));
    obj.insert("required".to_string(), Value::from(param.required));
    obj
}

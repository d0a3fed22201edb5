#![deny(missing_docs)]

//! # OpenAPI 3.0
//!
//! Layout rules for OpenAPI 3.0 documents:
//!
//! - Schemas live under `#/components/schemas/`.
//! - The request body is a `requestBody` keyed by media type (`text/plain` for raw text).
//! - Parameters nest their schema, with the default inside it.
//! - Examples are named maps under each media type.

use crate::route::{OperationDescriptor, ParameterDescriptor, ResponseDescriptor};
use crate::strategies::traits::{insert_operation_header, parameter_header, SpecVariation};
use serde_json::{json, Map, Value};

const JSON_MIME: &str = "application/json";
const TEXT_MIME: &str = "text/plain";

/// The OpenAPI 3.0 dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiV3;

impl OpenApiV3 {
    fn media_type(&self, schema: Value, examples: Value) -> Value {
        let mut obj = Map::new();
        obj.insert("schema".to_string(), schema);
        if examples.as_object().is_some_and(|e| !e.is_empty()) {
            obj.insert("examples".to_string(), examples);
        }
        Value::Object(obj)
    }
}

impl SpecVariation for OpenApiV3 {
    fn name(&self) -> &'static str {
        "openapi"
    }

    fn file_name(&self) -> &'static str {
        "openapi.json"
    }

    fn ref_prefix(&self) -> &'static str {
        "#/components/schemas/"
    }

    fn render_parameter(&self, param: &ParameterDescriptor) -> Value {
        let mut obj = parameter_header(param);
        let mut schema = param.schema.to_json_map(self.ref_prefix());
        if let Some(default) = &param.default {
            schema.insert("default".to_string(), json!(default));
        }
        obj.insert("schema".to_string(), Value::Object(schema));
        Value::Object(obj)
    }

    fn render_response(&self, response: &ResponseDescriptor) -> Value {
        let mut obj = Map::new();
        obj.insert("description".to_string(), json!(response.description));
        if let Some(schema) = &response.schema {
            let media = self.media_type(self.render_schema(schema), json!(response.examples));
            obj.insert("content".to_string(), json!({ JSON_MIME: media }));
        }
        Value::Object(obj)
    }

    fn render_operation(&self, op: &OperationDescriptor) -> Value {
        let mut obj = Map::new();
        insert_operation_header(&mut obj, op);

        let parameters: Vec<Value> = op
            .parameters
            .iter()
            .map(|p| self.render_parameter(p))
            .collect();
        obj.insert("parameters".to_string(), Value::Array(parameters));

        if let Some(body) = &op.body {
            let mime = if body.is_raw_text() { TEXT_MIME } else { JSON_MIME };
            let media = self.media_type(self.render_schema(&body.schema), json!(body.examples));
            obj.insert(
                "requestBody".to_string(),
                json!({
                    "description": body.description,
                    "required": true,
                    "content": { mime: media },
                }),
            );
        }

        let responses: Map<String, Value> = op
            .responses
            .iter()
            .map(|(status, response)| (status.clone(), self.render_response(response)))
            .collect();
        obj.insert("responses".to_string(), Value::Object(responses));

        Value::Object(obj)
    }

    fn render_document(
        &self,
        info: Value,
        paths: Map<String, Value>,
        schemas: Map<String, Value>,
    ) -> Value {
        json!({
            "openapi": "3.0.0",
            "info": info,
            "paths": paths,
            "components": { "schemas": schemas },
        })
    }
}

#![deny(missing_docs)]

//! # Swagger 2.0
//!
//! Layout rules for Swagger 2.0 documents:
//!
//! - Definitions live under `#/definitions/`.
//! - The request body is a parameter with `in: body`, always listed first.
//! - Non-body parameters carry their schema keywords inline, `default` included.
//! - Response examples are keyed by mime type.

use crate::route::{OperationDescriptor, ParameterDescriptor, ResponseDescriptor};
use crate::strategies::traits::{insert_operation_header, parameter_header, SpecVariation};
use serde_json::{json, Map, Value};

const JSON_MIME: &str = "application/json";
const TEXT_MIME: &str = "text/plain";

/// The Swagger 2.0 dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerV2;

impl SpecVariation for SwaggerV2 {
    fn name(&self) -> &'static str {
        "swagger"
    }

    fn file_name(&self) -> &'static str {
        "swagger.json"
    }

    fn ref_prefix(&self) -> &'static str {
        "#/definitions/"
    }

    fn render_parameter(&self, param: &ParameterDescriptor) -> Value {
        let mut obj = parameter_header(param);
        obj.extend(param.schema.to_json_map(self.ref_prefix()));
        if let Some(default) = &param.default {
            obj.insert("default".to_string(), json!(default));
        }
        Value::Object(obj)
    }

    fn render_response(&self, response: &ResponseDescriptor) -> Value {
        let mut obj = Map::new();
        obj.insert("description".to_string(), json!(response.description));
        if let Some(schema) = &response.schema {
            obj.insert("schema".to_string(), self.render_schema(schema));
        }
        // One example per mime type; the first declared one wins.
        if let Some(example) = response.examples.values().next() {
            obj.insert(
                "examples".to_string(),
                json!({ JSON_MIME: example.value.clone() }),
            );
        }
        Value::Object(obj)
    }

    fn render_operation(&self, op: &OperationDescriptor) -> Value {
        let mut obj = Map::new();
        insert_operation_header(&mut obj, op);

        let consumes = match &op.body {
            Some(body) if body.is_raw_text() => TEXT_MIME,
            _ => JSON_MIME,
        };
        obj.insert("consumes".to_string(), json!([consumes]));
        obj.insert("produces".to_string(), json!([JSON_MIME]));

        let mut parameters = Vec::with_capacity(op.parameters.len() + 1);
        if let Some(body) = &op.body {
            let mut param = Map::new();
            param.insert("name".to_string(), json!("body"));
            param.insert("in".to_string(), json!("body"));
            param.insert("description".to_string(), json!(body.description));
            param.insert("required".to_string(), json!(true));
            param.insert("schema".to_string(), self.render_schema(&body.schema));
            if !body.examples.is_empty() {
                param.insert("x-examples".to_string(), json!(body.examples));
            }
            parameters.push(Value::Object(param));
        }
        parameters.extend(op.parameters.iter().map(|p| self.render_parameter(p)));
        obj.insert("parameters".to_string(), Value::Array(parameters));

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
            "swagger": "2.0",
            "info": info,
            "paths": paths,
            "definitions": schemas,
        })
    }
}

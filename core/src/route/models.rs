#![deny(missing_docs)]

//! # Route Models
//!
//! Inputs consumed from the routing layer: the method, the resource (path template plus
//! the type whose members become parameters) and the per-route `Metadata` an author
//! attaches (summary, responses, extra parameter types, body overrides, examples).

use crate::naming::model_name;
use crate::types::{Describe, TypeOccurrence};
use derive_more::Display;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods an operation can be registered under.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[display("GET")]
    Get,
    /// HEAD
    #[display("HEAD")]
    Head,
    /// POST
    #[display("POST")]
    Post,
    /// PUT
    #[display("PUT")]
    Put,
    /// PATCH
    #[display("PATCH")]
    Patch,
    /// DELETE
    #[display("DELETE")]
    Delete,
    /// OPTIONS
    #[display("OPTIONS")]
    Options,
}

impl HttpMethod {
    /// The closed set of methods whose semantics exclude a request body.
    pub const FORBIDS_BODY: [HttpMethod; 3] =
        [HttpMethod::Get, HttpMethod::Head, HttpMethod::Delete];

    /// Whether a request body is forbidden.
    pub fn forbids_body(self) -> bool {
        Self::FORBIDS_BODY.contains(&self)
    }

    /// Lowercase key used in the paths table (`get`, `post`, ...).
    pub fn as_key(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Head => "head",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
        }
    }
}

/// A routed resource: path template, the type whose members become parameters, and an
/// optional group label (rendered as the operation tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Path template, e.g. `/pets/{id}`.
    pub path: String,
    /// The resource type.
    pub type_: TypeOccurrence,
    /// Group label.
    pub group: Option<String>,
}

impl Resource {
    /// Creates a resource over an explicit occurrence.
    pub fn new(path: impl Into<String>, type_: TypeOccurrence) -> Self {
        Self {
            path: path.into(),
            type_,
            group: None,
        }
    }

    /// Creates a resource over a described Rust type.
    pub fn of<T: Describe + ?Sized>(path: impl Into<String>) -> Self {
        Self::new(path, T::occurrence())
    }

    /// Sets the group label.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// One route as seen by the documentation layer: method, resource and body type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistration {
    /// HTTP method.
    pub method: HttpMethod,
    /// Routed resource.
    pub resource: Resource,
    /// Declared request body type (`Unit` for none).
    pub body: TypeOccurrence,
}

impl RouteRegistration {
    /// A route without a request body.
    pub fn new(method: HttpMethod, resource: Resource) -> Self {
        Self {
            method,
            resource,
            body: <()>::occurrence(),
        }
    }

    /// Sets the body to an explicit occurrence.
    pub fn with_body(mut self, body: TypeOccurrence) -> Self {
        self.body = body;
        self
    }

    /// Sets the body to a described Rust type.
    pub fn with_body_of<T: Describe + ?Sized>(self) -> Self {
        self.with_body(T::occurrence())
    }
}

/// A named example payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The example payload.
    pub value: Value,
}

impl Example {
    /// An example without summary or description.
    pub fn new(value: Value) -> Self {
        Self {
            summary: None,
            description: None,
            value,
        }
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// What a response returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// A reflected type.
    FromType(TypeOccurrence),
    /// An author-declared schema.
    FromSchema(String),
    /// Nothing.
    Empty,
}

/// One status-code entry of an operation's response table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Explicit description.
    pub description: Option<String>,
    /// Payload.
    pub body: ResponseBody,
    /// Named example payloads.
    pub examples: IndexMap<String, Example>,
}

impl ResponseSpec {
    /// A response with the given status and payload.
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self {
            status,
            description: None,
            body,
            examples: IndexMap::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a named example.
    pub fn with_example(mut self, name: impl Into<String>, example: Example) -> Self {
        self.examples.insert(name.into(), example);
        self
    }

    /// Description falling back to the payload's model name, then the reason phrase.
    pub fn effective_description(&self) -> String {
        if let Some(description) = &self.description {
            return description.clone();
        }
        match &self.body {
            ResponseBody::FromType(occ) if occ.identity() != "Unit" => model_name(occ),
            ResponseBody::FromSchema(name) => name.clone(),
            _ => reason_phrase(self.status).to_string(),
        }
    }
}

/// `200 OK` returning `T`.
pub fn ok<T: Describe + ?Sized>() -> ResponseSpec {
    ResponseSpec::new(200, ResponseBody::FromType(T::occurrence()))
}

/// `201 Created` returning `T`.
pub fn created<T: Describe + ?Sized>() -> ResponseSpec {
    ResponseSpec::new(201, ResponseBody::FromType(T::occurrence()))
}

/// `200 OK` returning an author-declared schema.
pub fn ok_schema(name: impl Into<String>) -> ResponseSpec {
    ResponseSpec::new(200, ResponseBody::FromSchema(name.into()))
}

/// `201 Created` returning an author-declared schema.
pub fn created_schema(name: impl Into<String>) -> ResponseSpec {
    ResponseSpec::new(201, ResponseBody::FromSchema(name.into()))
}

/// `204 No Content`.
pub fn no_content() -> ResponseSpec {
    ResponseSpec::new(204, ResponseBody::Empty)
}

/// `400 Bad Request` without payload.
pub fn bad_request() -> ResponseSpec {
    ResponseSpec::new(400, ResponseBody::Empty)
}

/// `404 Not Found` without payload.
pub fn not_found() -> ResponseSpec {
    ResponseSpec::new(404, ResponseBody::Empty)
}

/// An author-declared body schema replacing the reflected body type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodySchema {
    /// Schema name; defaults to the body type's model name.
    pub name: Option<String>,
}

/// Per-route documentation attached by the author.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Operation summary.
    pub summary: Option<String>,
    /// Operation description.
    pub description: Option<String>,
    /// Operation id.
    pub operation_id: Option<String>,
    /// Response table, in declaration order.
    pub responses: Vec<ResponseSpec>,
    /// Extra types whose members become query parameters.
    pub parameters: Vec<TypeOccurrence>,
    /// Types whose members become header parameters.
    pub headers: Vec<TypeOccurrence>,
    /// Author-declared body schema.
    pub body_schema: Option<BodySchema>,
    /// Named request body examples.
    pub body_examples: IndexMap<String, Example>,
}

impl Metadata {
    /// Metadata carrying only a summary.
    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the operation id.
    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Appends a response.
    pub fn responds(mut self, response: ResponseSpec) -> Self {
        self.responses.push(response);
        self
    }

    /// Adds a request body example.
    pub fn example(mut self, name: impl Into<String>, example: Example) -> Self {
        self.body_examples.insert(name.into(), example);
        self
    }

    /// Adds a type whose members become query parameters.
    pub fn parameter<T: Describe + ?Sized>(mut self) -> Self {
        self.parameters.push(T::occurrence());
        self
    }

    /// Adds a type whose members become header parameters.
    pub fn header<T: Describe + ?Sized>(mut self) -> Self {
        self.headers.push(T::occurrence());
        self
    }

    /// Declares the body through an author schema named after the body type.
    pub fn no_reflection_body(mut self) -> Self {
        self.body_schema = Some(BodySchema::default());
        self
    }

    /// Declares the body through the named author schema.
    pub fn body_schema(mut self, name: impl Into<String>) -> Self {
        self.body_schema = Some(BodySchema {
            name: Some(name.into()),
        });
        self
    }
}

/// Standard reason phrase for a status code.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        503 => "Service Unavailable",
        _ => "Response",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_methods() {
        assert!(HttpMethod::Get.forbids_body());
        assert!(HttpMethod::Delete.forbids_body());
        assert!(HttpMethod::Head.forbids_body());
        assert!(!HttpMethod::Post.forbids_body());
        assert!(!HttpMethod::Put.forbids_body());
        assert!(!HttpMethod::Patch.forbids_body());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Patch.as_key(), "patch");
    }

    #[test]
    fn test_registration_defaults_to_unit_body() {
        let route = RouteRegistration::new(
            HttpMethod::Get,
            Resource::new("/", TypeOccurrence::named("Unit")),
        );
        assert_eq!(route.body, TypeOccurrence::named("Unit"));
        let route = route.with_body_of::<Vec<i64>>();
        assert_eq!(route.body.to_string(), "List<Long>");
    }

    #[test]
    fn test_response_descriptions() {
        assert_eq!(ok::<Vec<String>>().effective_description(), "ListOfString");
        assert_eq!(not_found().effective_description(), "Not Found");
        assert_eq!(ok::<()>().effective_description(), "OK");
        assert_eq!(created_schema("Rectangles").effective_description(), "Rectangles");
        assert_eq!(
            ok::<i32>().with_description("count").effective_description(),
            "count"
        );
    }

    #[test]
    fn test_metadata_builder() {
        let meta = Metadata::summary("create")
            .description("Save a pet")
            .responds(created::<String>())
            .example("rover", Example::new(serde_json::json!({ "id": 2 })))
            .body_schema("CustomName");

        assert_eq!(meta.summary.as_deref(), Some("create"));
        assert_eq!(meta.responses.len(), 1);
        assert_eq!(meta.body_examples.len(), 1);
        assert_eq!(
            meta.body_schema,
            Some(BodySchema {
                name: Some("CustomName".into())
            })
        );
    }
}

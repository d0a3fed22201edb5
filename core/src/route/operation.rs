#![deny(missing_docs)]

//! # Operation Descriptors
//!
//! The resolved, dialect-neutral form of one registered operation. Each dialect renders
//! these with its own layout; every schema inside them is already synthesized and every
//! reference already registered in the owning document's registry.

use crate::route::models::{Example, HttpMethod};
use crate::schema::SchemaNode;
use crate::types::TypeOccurrence;
use indexmap::IndexMap;

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterIn {
    /// A `{placeholder}` in the path template.
    Path,
    /// The query string.
    Query,
    /// A request header.
    Header,
}

impl ParameterIn {
    /// The `in` value shared by both dialects.
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterIn::Path => "path",
            ParameterIn::Query => "query",
            ParameterIn::Header => "header",
        }
    }
}

/// A resolved non-body parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: String,
    /// Location.
    pub input: ParameterIn,
    /// Description.
    pub description: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Default value.
    pub default: Option<String>,
    /// Schema.
    pub schema: SchemaNode,
}

/// How a request body's schema was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyOrigin {
    /// Ordinary resolution of the declared body type.
    FromType(TypeOccurrence),
    /// An author-declared schema, bypassing resolution.
    FromSchema(String),
    /// An opaque string body.
    FromRawText,
}

/// A resolved request body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDescriptor {
    /// Origin.
    pub origin: BodyOrigin,
    /// Schema.
    pub schema: SchemaNode,
    /// Description.
    pub description: String,
    /// Named examples.
    pub examples: IndexMap<String, Example>,
}

impl BodyDescriptor {
    /// Whether the body is opaque text.
    pub fn is_raw_text(&self) -> bool {
        matches!(self.origin, BodyOrigin::FromRawText)
    }
}

/// A resolved response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    /// Description.
    pub description: String,
    /// Schema, absent for empty responses.
    pub schema: Option<SchemaNode>,
    /// Named examples.
    pub examples: IndexMap<String, Example>,
}

/// A resolved operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// Method.
    pub method: HttpMethod,
    /// Path template.
    pub path: String,
    /// Summary.
    pub summary: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Operation id.
    pub operation_id: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Non-body parameters, in order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Request body.
    pub body: Option<BodyDescriptor>,
    /// Status code -> response.
    pub responses: IndexMap<String, ResponseDescriptor>,
}

impl OperationDescriptor {
    /// Every schema name referenced anywhere in the operation.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        for param in &self.parameters {
            param.schema.collect_references(&mut refs);
        }
        if let Some(body) = &self.body {
            body.schema.collect_references(&mut refs);
        }
        for response in self.responses.values() {
            if let Some(schema) = &response.schema {
                schema.collect_references(&mut refs);
            }
        }
        refs
    }
}

#![deny(missing_docs)]

//! # Request Body Derivation
//!
//! Chooses a body origin for a route and resolves it into a [`BodyDescriptor`]:
//!
//! - An author-declared body schema wins (`FromSchema`).
//! - A plain `String` body is opaque text (`FromRawText`).
//! - Anything else is resolved like any other payload (`FromType`).
//! - A `Unit` body means "no body".

use crate::error::{AppError, AppResult};
use crate::naming::model_name;
use crate::route::models::{HttpMethod, Metadata};
use crate::route::operation::{BodyDescriptor, BodyOrigin};
use crate::schema::{SchemaNode, SchemaRegistry};
use crate::types::{TypeCatalog, TypeOccurrence};

/// Chooses the body origin, or `None` when the route has no body.
pub fn derive_body_origin(
    body: &TypeOccurrence,
    metadata: &Metadata,
    catalog: &TypeCatalog,
) -> Option<BodyOrigin> {
    if let Some(schema) = &metadata.body_schema {
        let name = schema.name.clone().unwrap_or_else(|| model_name(body));
        return Some(BodyOrigin::FromSchema(name));
    }
    if catalog.is_unit(body) {
        return None;
    }
    if catalog.is_string(body) {
        return Some(BodyOrigin::FromRawText);
    }
    Some(BodyOrigin::FromType(body.clone()))
}

/// Rejects a body on a method whose semantics exclude one.
pub fn ensure_body_allowed(
    method: HttpMethod,
    path: &str,
    origin: Option<&BodyOrigin>,
) -> AppResult<()> {
    if origin.is_some() && method.forbids_body() {
        return Err(AppError::BodyNotAllowed {
            method: method.to_string(),
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Resolves an origin into a descriptor, registering what it references.
pub fn resolve_body(
    origin: BodyOrigin,
    metadata: &Metadata,
    catalog: &TypeCatalog,
    registry: &mut SchemaRegistry,
) -> AppResult<BodyDescriptor> {
    let (schema, description) = match &origin {
        BodyOrigin::FromType(occ) => {
            let schema = registry
                .payload_schema(occ, catalog)?
                .ok_or_else(|| AppError::General(format!("'{}' has no body schema", occ)))?;
            (schema, model_name(occ))
        }
        BodyOrigin::FromSchema(name) => (SchemaNode::reference(name.clone()), name.clone()),
        BodyOrigin::FromRawText => (SchemaNode::string(), "body".to_string()),
    };

    Ok(BodyDescriptor {
        origin,
        schema,
        description,
        examples: metadata.body_examples.clone(),
    })
}

#![deny(missing_docs)]

//! # Parameter Derivation
//!
//! Turns the members of a resource (or of an extra query/header type) into parameters.
//!
//! Handles:
//! - Location: `path` when the template contains `{name}`, else `query`, unless forced.
//! - Requiredness: no default value and a non-nullable declared type.
//! - Schema: explicit schema reference, explicit replacement type, or ordinary resolution.

use crate::error::AppResult;
use crate::route::operation::{ParameterDescriptor, ParameterIn};
use crate::schema::{SchemaNode, SchemaRegistry};
use crate::types::{resolve_member, BindingEnv, PropertyDef, TypeCatalog, TypeOccurrence};

/// Derives one parameter per non-ignored member of `owner`.
///
/// # Arguments
///
/// * `owner` - The resource (or parameter/header) type.
/// * `path` - The route's path template.
/// * `forced` - A location overriding the path/query inference.
/// * `catalog` - Type definitions.
/// * `registry` - The dialect registry receiving any discovered object types.
pub fn derive_parameters(
    owner: &TypeOccurrence,
    path: &str,
    forced: Option<ParameterIn>,
    catalog: &TypeCatalog,
    registry: &mut SchemaRegistry,
) -> AppResult<Vec<ParameterDescriptor>> {
    if catalog.is_unit(owner) {
        return Ok(Vec::new());
    }

    let def = catalog.lookup(owner.identity())?;
    let env = BindingEnv::for_occurrence(owner, catalog)?;

    def.properties()
        .iter()
        .filter(|p| !p.meta.ignore)
        .map(|property| {
            let input = forced.unwrap_or_else(|| infer_location(&property.name, path));
            derive_parameter(property, &env, input, catalog, registry)
        })
        .collect()
}

/// Derives the parameter for a single member.
pub fn derive_parameter(
    property: &PropertyDef,
    env: &BindingEnv,
    input: ParameterIn,
    catalog: &TypeCatalog,
    registry: &mut SchemaRegistry,
) -> AppResult<ParameterDescriptor> {
    let schema = match &property.meta.schema_ref {
        Some(schema) => SchemaNode::reference(schema.clone()),
        None => {
            let resolved = resolve_member(property, env)?;
            registry.member_schema(&resolved, catalog)?
        }
    };

    let description = property
        .meta
        .description
        .clone()
        .or_else(|| schema.reference_name().map(str::to_string))
        .unwrap_or_else(|| property.name.clone());

    Ok(ParameterDescriptor {
        name: property.name.clone(),
        input,
        description,
        required: property.is_required(),
        default: property.meta.default_value.clone(),
        schema,
    })
}

/// `path` if the template holds a `{name}` placeholder, else `query`.
pub fn infer_location(name: &str, path: &str) -> ParameterIn {
    if path.contains(&format!("{{{}}}", name)) {
        ParameterIn::Path
    } else {
        ParameterIn::Query
    }
}

#![deny(missing_docs)]

//! # Spec Documents
//!
//! One `SpecDocument` per dialect: its own registry, its own path table and its own
//! info block. Routes are resolved into a staged copy first and only committed once the
//! caller has staged every dialect successfully, so a failing route never leaves a
//! document half-updated.

use crate::config::{DocumentConfig, Information};
use crate::error::AppResult;
use crate::route::body::{derive_body_origin, ensure_body_allowed, resolve_body};
use crate::route::params::derive_parameters;
use crate::route::{
    HttpMethod, Metadata, OperationDescriptor, ParameterIn, ResponseBody, ResponseDescriptor,
    RouteRegistration,
};
use crate::schema::{SchemaNode, SchemaRegistry};
use crate::strategies::SpecVariation;
use crate::types::TypeCatalog;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A resolved operation together with the registry state it needs.
#[derive(Debug, Clone)]
pub struct StagedOperation {
    registry: SchemaRegistry,
    operation: OperationDescriptor,
}

impl StagedOperation {
    /// The resolved operation.
    pub fn operation(&self) -> &OperationDescriptor {
        &self.operation
    }
}

/// The description document of one dialect.
#[derive(Debug, Clone)]
pub struct SpecDocument<V: SpecVariation> {
    variation: V,
    info: Information,
    registry: SchemaRegistry,
    paths: IndexMap<String, IndexMap<HttpMethod, OperationDescriptor>>,
}

impl<V: SpecVariation> SpecDocument<V> {
    /// Creates a document and seeds its author-declared schemas.
    pub fn new(variation: V, config: &DocumentConfig) -> Self {
        let mut registry = SchemaRegistry::new();
        for (name, schema) in &config.definitions {
            if !registry.insert_manual(name.clone(), schema.clone()) {
                tracing::warn!(
                    dialect = variation.name(),
                    %name,
                    "Duplicate declared schema ignored."
                );
            }
        }

        Self {
            variation,
            info: config.info.clone(),
            registry,
            paths: IndexMap::new(),
        }
    }

    /// The dialect.
    pub fn variation(&self) -> &V {
        &self.variation
    }

    /// The info block.
    pub fn info(&self) -> &Information {
        &self.info
    }

    /// The schema registry.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Path template -> method -> operation.
    pub fn paths(&self) -> &IndexMap<String, IndexMap<HttpMethod, OperationDescriptor>> {
        &self.paths
    }

    /// The operation registered under `path` and `method`.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&OperationDescriptor> {
        self.paths.get(path).and_then(|methods| methods.get(&method))
    }

    /// Resolves a route against a copy of this document's registry.
    ///
    /// Nothing in `self` changes; hand the result to [`SpecDocument::commit`].
    pub fn prepare(
        &self,
        route: &RouteRegistration,
        metadata: &Metadata,
        catalog: &TypeCatalog,
    ) -> AppResult<StagedOperation> {
        let path = route.resource.path.as_str();

        let origin = derive_body_origin(&route.body, metadata, catalog);
        ensure_body_allowed(route.method, path, origin.as_ref())?;

        let mut registry = self.registry.clone();

        let body = origin
            .map(|origin| resolve_body(origin, metadata, catalog, &mut registry))
            .transpose()?;

        let mut responses = IndexMap::new();
        for response in &metadata.responses {
            let schema = match &response.body {
                ResponseBody::FromType(occ) => registry.payload_schema(occ, catalog)?,
                ResponseBody::FromSchema(name) => Some(SchemaNode::reference(name.clone())),
                ResponseBody::Empty => None,
            };
            responses.insert(
                response.status.to_string(),
                ResponseDescriptor {
                    description: response.effective_description(),
                    schema,
                    examples: response.examples.clone(),
                },
            );
        }

        let mut parameters =
            derive_parameters(&route.resource.type_, path, None, catalog, &mut registry)?;
        for extra in &metadata.parameters {
            parameters.extend(derive_parameters(
                extra,
                path,
                Some(ParameterIn::Query),
                catalog,
                &mut registry,
            )?);
        }
        for header in &metadata.headers {
            parameters.extend(derive_parameters(
                header,
                path,
                Some(ParameterIn::Header),
                catalog,
                &mut registry,
            )?);
        }

        let operation = OperationDescriptor {
            method: route.method,
            path: path.to_string(),
            summary: metadata.summary.clone(),
            description: metadata.description.clone(),
            operation_id: metadata.operation_id.clone(),
            tags: route.resource.group.iter().cloned().collect(),
            parameters,
            body,
            responses,
        };

        Ok(StagedOperation {
            registry,
            operation,
        })
    }

    /// Applies a staged operation. A later registration for the same path and method
    /// replaces the earlier one.
    pub fn commit(&mut self, staged: StagedOperation) {
        let StagedOperation {
            registry,
            operation,
        } = staged;

        tracing::debug!(
            dialect = self.variation.name(),
            method = %operation.method,
            path = %operation.path,
            "Operation registered."
        );

        self.registry = registry;
        let methods = self.paths.entry(operation.path.clone()).or_default();
        if methods.insert(operation.method, operation).is_some() {
            tracing::debug!(dialect = self.variation.name(), "Replaced an earlier operation.");
        }
    }

    /// Prepares and commits in one step.
    pub fn register(
        &mut self,
        route: &RouteRegistration,
        metadata: &Metadata,
        catalog: &TypeCatalog,
    ) -> AppResult<()> {
        let staged = self.prepare(route, metadata, catalog)?;
        self.commit(staged);
        Ok(())
    }

    /// Referenced names with no registry entry, sorted.
    pub fn dangling_references(&self) -> Vec<String> {
        let prefix = self.variation.ref_prefix();
        let mut referenced: BTreeSet<String> = BTreeSet::new();

        for methods in self.paths.values() {
            for operation in methods.values() {
                referenced.extend(operation.referenced_names().into_iter().map(str::to_string));
            }
        }
        for (_, definition) in self.registry.iter() {
            referenced.extend(definition.referenced_names(prefix));
        }

        referenced
            .into_iter()
            .filter(|name| !self.registry.contains(name))
            .collect()
    }

    /// Renders the whole document.
    pub fn to_json(&self) -> AppResult<Value> {
        let info = serde_json::to_value(&self.info)?;

        let mut paths = Map::new();
        for (path, methods) in &self.paths {
            let rendered: Map<String, Value> = methods
                .iter()
                .map(|(method, op)| {
                    (method.as_key().to_string(), self.variation.render_operation(op))
                })
                .collect();
            paths.insert(path.clone(), Value::Object(rendered));
        }

        let schemas = self.registry.to_json(self.variation.ref_prefix());
        Ok(self.variation.render_document(info, paths, schemas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{no_content, ok, Resource, ResponseSpec};
    use crate::strategies::{OpenApiV3, SwaggerV2};
    use crate::types::{PropertyDef, TypeDef, TypeOccurrence, TypeRef};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog
            .define_all([
                TypeDef::object("Pet")
                    .with_property(PropertyDef::new("id", TypeRef::named("Long")))
                    .with_property(PropertyDef::new("name", TypeRef::named("String"))),
                TypeDef::object("Pets")
                    .with_property(PropertyDef::new("limit", TypeRef::named("Int")).nullable()),
                TypeDef::object("PetById")
                    .with_property(PropertyDef::new("id", TypeRef::named("Long"))),
            ])
            .unwrap();
        catalog
    }

    fn config() -> DocumentConfig {
        DocumentConfig::new(Information::new("Pets", "1.0"))
            .with_definition("petUuid", json!({ "type": "string", "format": "uuid" }))
    }

    fn list_route() -> RouteRegistration {
        RouteRegistration::new(
            HttpMethod::Get,
            Resource::new("/pets", TypeOccurrence::named("Pets")).with_group("pets"),
        )
    }

    fn list_metadata() -> Metadata {
        Metadata::summary("list").responds(ResponseSpec::new(
            200,
            ResponseBody::FromType(TypeOccurrence::list_of(TypeOccurrence::named("Pet"))),
        ))
    }

    #[test]
    fn test_seeded_definitions() {
        let doc = SpecDocument::new(SwaggerV2, &config());
        assert!(doc.registry().contains("petUuid"));
    }

    #[test]
    fn test_list_response_registers_both_entries() {
        let mut doc = SpecDocument::new(OpenApiV3, &config());
        doc.register(&list_route(), &list_metadata(), &catalog()).unwrap();

        let rendered = doc.to_json().unwrap();
        assert_eq!(
            rendered["components"]["schemas"]["ListOfPet"],
            json!({
                "type": "array",
                "items": { "$ref": "#/components/schemas/Pet" }
            })
        );
        assert_eq!(
            rendered["components"]["schemas"]["Pet"],
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "name": { "type": "string" }
                }
            })
        );
        assert_eq!(
            rendered["paths"]["/pets"]["get"]["responses"]["200"]["content"]["application/json"]
                ["schema"],
            json!({ "$ref": "#/components/schemas/ListOfPet" })
        );
        assert_eq!(rendered["paths"]["/pets"]["get"]["tags"], json!(["pets"]));
        assert!(doc.dangling_references().is_empty());
    }

    #[test]
    fn test_prepare_leaves_document_untouched() {
        let doc = SpecDocument::new(SwaggerV2, &config());
        let staged = doc.prepare(&list_route(), &list_metadata(), &catalog()).unwrap();

        assert_eq!(staged.operation().path, "/pets");
        assert!(!doc.registry().contains("Pet"));
        assert!(doc.paths().is_empty());
    }

    #[test]
    fn test_body_on_get_is_rejected() {
        let doc = SpecDocument::new(SwaggerV2, &config());
        let route = list_route().with_body(TypeOccurrence::named("Pet"));
        assert!(doc.prepare(&route, &list_metadata(), &catalog()).is_err());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut doc = SpecDocument::new(SwaggerV2, &config());
        let route = RouteRegistration::new(
            HttpMethod::Delete,
            Resource::new("/pets/{id}", TypeOccurrence::named("PetById")),
        );
        doc.register(&route, &Metadata::summary("first").responds(no_content()), &catalog())
            .unwrap();
        doc.register(&route, &Metadata::summary("second").responds(ok::<()>()), &catalog())
            .unwrap();

        assert_eq!(doc.paths()["/pets/{id}"].len(), 1);
        let op = doc.operation("/pets/{id}", HttpMethod::Delete).unwrap();
        assert_eq!(op.summary.as_deref(), Some("second"));
        assert_eq!(op.parameters[0].input, ParameterIn::Path);
        assert!(op.responses["200"].schema.is_none());
    }

    #[test]
    fn test_dangling_author_reference() {
        let mut doc = SpecDocument::new(SwaggerV2, &config());
        let route = RouteRegistration::new(
            HttpMethod::Get,
            Resource::new("/pets", TypeOccurrence::named("Unit")),
        );
        let metadata = Metadata::default().responds(crate::route::ok_schema("Missing"));
        doc.register(&route, &metadata, &catalog()).unwrap();

        assert_eq!(doc.dangling_references(), vec!["Missing".to_string()]);
    }
}

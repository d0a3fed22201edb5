#![deny(missing_docs)]

//! # Install-Time Builder
//!
//! `ApiDocsBuilder` collects route registrations into every configured dialect, then
//! freezes into the read-only [`ApiDocs`] endpoint.
//!
//! Each registration is all-or-nothing across dialects: every document stages the route
//! first, and nothing is committed unless all of them succeeded.

use crate::config::DocsConfig;
use crate::document::{SpecDocument, StagedOperation};
use crate::error::{AppError, AppResult};
use crate::route::{HttpMethod, Metadata, Resource, RouteRegistration};
use crate::serve::{ApiDocs, AssetSource, MountSettings, NoAssets};
use crate::strategies::{OpenApiV3, SpecVariation, SwaggerV2};
use crate::types::{Describe, TypeCatalog};

/// Rewrites a route's metadata before one dialect sees it.
pub type Customization = Box<dyn Fn(Metadata, HttpMethod) -> Metadata + Send + Sync>;

/// Collects routes during installation.
pub struct ApiDocsBuilder {
    config: DocsConfig,
    catalog: TypeCatalog,
    swagger: Option<SpecDocument<SwaggerV2>>,
    openapi: Option<SpecDocument<OpenApiV3>>,
    swagger_customization: Option<Customization>,
    openapi_customization: Option<Customization>,
    assets: Box<dyn AssetSource + Send + Sync>,
}

impl ApiDocsBuilder {
    /// Validates `config` and creates one document per configured dialect.
    pub fn new(config: DocsConfig, catalog: TypeCatalog) -> AppResult<Self> {
        config.validate()?;

        let swagger = config
            .swagger
            .as_ref()
            .map(|doc| SpecDocument::new(SwaggerV2, doc));
        let openapi = config
            .openapi
            .as_ref()
            .map(|doc| SpecDocument::new(OpenApiV3, doc));

        tracing::info!(
            path = %config.normalized_path(),
            swagger = swagger.is_some(),
            openapi = openapi.is_some(),
            "Installing API docs."
        );

        Ok(Self {
            config,
            catalog,
            swagger,
            openapi,
            swagger_customization: None,
            openapi_customization: None,
            assets: Box::new(NoAssets),
        })
    }

    /// The type catalog routes are resolved against.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Mutable access for defining more types before registering routes.
    pub fn catalog_mut(&mut self) -> &mut TypeCatalog {
        &mut self.catalog
    }

    /// The Swagger 2.0 document, if configured.
    pub fn swagger(&self) -> Option<&SpecDocument<SwaggerV2>> {
        self.swagger.as_ref()
    }

    /// The OpenAPI 3.0 document, if configured.
    pub fn openapi(&self) -> Option<&SpecDocument<OpenApiV3>> {
        self.openapi.as_ref()
    }

    /// Applies `customize` to every route's metadata before Swagger 2.0 processes it.
    pub fn customize_swagger(
        mut self,
        customize: impl Fn(Metadata, HttpMethod) -> Metadata + Send + Sync + 'static,
    ) -> Self {
        self.swagger_customization = Some(Box::new(customize));
        self
    }

    /// Applies `customize` to every route's metadata before OpenAPI 3.0 processes it.
    pub fn customize_openapi(
        mut self,
        customize: impl Fn(Metadata, HttpMethod) -> Metadata + Send + Sync + 'static,
    ) -> Self {
        self.openapi_customization = Some(Box::new(customize));
        self
    }

    /// Sets where UI assets are loaded from.
    pub fn with_assets(mut self, assets: impl AssetSource + Send + Sync + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    /// Registers a route in every configured document.
    ///
    /// Fails without touching any document if any dialect rejects the route.
    pub fn register(&mut self, route: RouteRegistration, metadata: Metadata) -> AppResult<()> {
        tracing::info!(
            method = %route.method,
            path = %route.resource.path,
            "Registering route."
        );

        let swagger = match &self.swagger {
            Some(doc) => Some(stage(
                doc,
                &route,
                &metadata,
                self.swagger_customization.as_ref(),
                &self.catalog,
            )?),
            None => None,
        };
        let openapi = match &self.openapi {
            Some(doc) => Some(stage(
                doc,
                &route,
                &metadata,
                self.openapi_customization.as_ref(),
                &self.catalog,
            )?),
            None => None,
        };

        if let (Some(doc), Some(staged)) = (self.swagger.as_mut(), swagger) {
            doc.commit(staged);
        }
        if let (Some(doc), Some(staged)) = (self.openapi.as_mut(), openapi) {
            doc.commit(staged);
        }
        Ok(())
    }

    /// Registers a route without a request body.
    pub fn route(
        &mut self,
        method: HttpMethod,
        resource: Resource,
        metadata: Metadata,
    ) -> AppResult<()> {
        self.register(RouteRegistration::new(method, resource), metadata)
    }

    /// Registers a route whose request body is `B`.
    pub fn route_with_body<B: Describe + ?Sized>(
        &mut self,
        method: HttpMethod,
        resource: Resource,
        metadata: Metadata,
    ) -> AppResult<()> {
        self.register(
            RouteRegistration::new(method, resource).with_body_of::<B>(),
            metadata,
        )
    }

    /// Freezes the documents into the serving endpoint.
    ///
    /// Every `$ref` in each document must resolve inside that same document.
    pub fn build(self) -> AppResult<ApiDocs> {
        let swagger = self.swagger.as_ref().map(render).transpose()?;
        let openapi = self.openapi.as_ref().map(render).transpose()?;

        let settings = MountSettings {
            path: self.config.normalized_path().to_string(),
            forward_root: self.config.forward_root,
            provide_ui: self.config.provide_ui,
            default_file: self.config.default_file(),
        };

        tracing::info!(path = %settings.path, "API docs frozen.");
        Ok(ApiDocs::new(settings, swagger, openapi, self.assets))
    }
}

fn stage<V: SpecVariation>(
    doc: &SpecDocument<V>,
    route: &RouteRegistration,
    metadata: &Metadata,
    customization: Option<&Customization>,
    catalog: &TypeCatalog,
) -> AppResult<StagedOperation> {
    let metadata = match customization {
        Some(customize) => customize(metadata.clone(), route.method),
        None => metadata.clone(),
    };
    doc.prepare(route, &metadata, catalog)
}

fn render<V: SpecVariation>(doc: &SpecDocument<V>) -> AppResult<serde_json::Value> {
    if let Some(name) = doc.dangling_references().into_iter().next() {
        return Err(AppError::DanglingReference {
            dialect: doc.variation().name().to_string(),
            name,
        });
    }
    doc.to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocumentConfig, Information};
    use crate::route::{ok, ok_schema};
    use crate::types::{PropertyDef, TypeDef, TypeOccurrence, TypeRef};

    fn config() -> DocsConfig {
        let info = Information::new("Pets", "1.0");
        DocsConfig::default()
            .with_swagger(DocumentConfig::new(info.clone()))
            .with_openapi(DocumentConfig::new(info))
    }

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog
            .define(
                TypeDef::object("Pet")
                    .with_property(PropertyDef::new("name", TypeRef::named("String"))),
            )
            .unwrap();
        catalog
    }

    struct Pet;

    impl Describe for Pet {
        fn occurrence() -> TypeOccurrence {
            TypeOccurrence::named("Pet")
        }
    }

    fn pets() -> Resource {
        Resource::new("/pets", TypeOccurrence::named("Unit"))
    }

    #[test]
    fn test_body_on_get_mutates_nothing() {
        let mut builder = ApiDocsBuilder::new(config(), catalog()).unwrap();
        let route = RouteRegistration::new(HttpMethod::Get, pets())
            .with_body(TypeOccurrence::named("Pet"));

        let err = builder.register(route, Metadata::default()).unwrap_err();
        assert!(matches!(err, AppError::BodyNotAllowed { .. }));
        assert!(builder.swagger().unwrap().paths().is_empty());
        assert!(builder.openapi().unwrap().registry().is_empty());
    }

    #[test]
    fn test_one_dialect_failing_commits_neither() {
        // Only the OpenAPI customization introduces an unknown response type.
        let mut builder = ApiDocsBuilder::new(config(), catalog())
            .unwrap()
            .customize_openapi(|meta, _| {
                meta.responds(crate::route::ResponseSpec::new(
                    500,
                    crate::route::ResponseBody::FromType(TypeOccurrence::named("Ghost")),
                ))
            });

        let result = builder.route(
            HttpMethod::Get,
            pets(),
            Metadata::default().responds(ok::<()>()),
        );
        assert!(matches!(result, Err(AppError::UnknownType(_))));
        assert!(builder.swagger().unwrap().paths().is_empty());
    }

    #[test]
    fn test_customization_is_per_dialect() {
        let mut builder = ApiDocsBuilder::new(config(), catalog())
            .unwrap()
            .customize_swagger(|meta, method| meta.description(format!("swagger {}", method)));
        builder
            .route(HttpMethod::Get, pets(), Metadata::summary("list"))
            .unwrap();

        let swagger = builder.swagger().unwrap();
        let op = swagger.operation("/pets", HttpMethod::Get).unwrap();
        assert_eq!(op.description.as_deref(), Some("swagger GET"));
        let openapi = builder.openapi().unwrap();
        let op = openapi.operation("/pets", HttpMethod::Get).unwrap();
        assert_eq!(op.description, None);
    }

    #[test]
    fn test_build_rejects_dangling_reference() {
        let mut builder = ApiDocsBuilder::new(config(), catalog()).unwrap();
        builder
            .route(
                HttpMethod::Get,
                pets(),
                Metadata::default().responds(ok_schema("Nowhere")),
            )
            .unwrap();

        let err = builder.build().unwrap_err();
        assert!(matches!(err, AppError::DanglingReference { ref name, .. } if name == "Nowhere"));
    }

    #[test]
    fn test_build_renders_both_documents() {
        let mut builder = ApiDocsBuilder::new(config(), catalog()).unwrap();
        builder
            .route_with_body::<Pet>(HttpMethod::Post, pets(), Metadata::default())
            .unwrap();

        let docs = builder.build().unwrap();
        assert_eq!(docs.swagger().unwrap()["swagger"], "2.0");
        assert!(docs.swagger().unwrap()["definitions"]["Pet"].is_object());
        assert!(docs.openapi().unwrap()["components"]["schemas"]["Pet"].is_object());
        assert_eq!(docs.default_file(), "openapi.json");
    }
}

#![deny(missing_docs)]

//! # API Docs Core
//!
//! Synthesizes Swagger 2.0 and OpenAPI 3.0 documents from route registrations and a
//! catalog of payload types.
//!
//! Registration happens once, at install time, through [`ApiDocsBuilder`]. Generic
//! payloads are resolved into concrete occurrences, named deterministically
//! (`PageOfPet`, `PairOfIntAndString`), and stored write-once in each dialect's
//! registry. [`ApiDocsBuilder::build`] freezes everything into an [`ApiDocs`] endpoint
//! that only ever reads.

/// Shared error types.
pub mod error;

/// Generic type occurrences, the type catalog and parameter binding.
pub mod types;

/// Model naming.
pub mod naming;

/// Schema synthesis and the write-once registry.
pub mod schema;

/// Route inputs and resolved operations.
pub mod route;

/// Dialect layouts.
pub mod strategies;

/// Installation settings.
pub mod config;

/// Per-dialect documents.
pub mod document;

/// Install-time builder.
pub mod support;

/// Frozen serving endpoint.
pub mod serve;

/// Actix Web mounting.
#[cfg(feature = "actix")]
pub mod actix;

pub use config::{Contact, DocsConfig, DocumentConfig, Information};
pub use document::SpecDocument;
pub use error::{AppError, AppResult};
pub use naming::model_name;
pub use route::{
    bad_request, created, created_schema, no_content, not_found, ok, ok_schema, Example,
    HttpMethod, Metadata, Resource, ResponseSpec, RouteRegistration,
};
pub use schema::{SchemaNode, SchemaRegistry};
pub use serve::{ApiDocs, AssetSource, DirectoryAssets, NoAssets, Served};
pub use strategies::{OpenApiV3, SpecVariation, SwaggerV2};
pub use support::ApiDocsBuilder;
pub use types::{Describe, PropertyDef, TypeCatalog, TypeDef, TypeOccurrence, TypeRef};

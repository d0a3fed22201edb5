#![deny(missing_docs)]

//! # Route Module
//!
//! Everything between a route registration and a resolved operation.
//!
//! - **models**: Inputs from the routing layer (`HttpMethod`, `Resource`, `Metadata`).
//! - **operation**: Resolved, dialect-neutral descriptors.
//! - **params**: Parameter derivation from resource members.
//! - **body**: Request body origin selection and resolution.

pub mod body;
pub mod models;
pub mod operation;
pub mod params;

pub use models::{
    bad_request, created, created_schema, no_content, not_found, ok, ok_schema, BodySchema,
    Example, HttpMethod, Metadata, Resource, ResponseBody, ResponseSpec, RouteRegistration,
};
pub use operation::{
    BodyDescriptor, BodyOrigin, OperationDescriptor, ParameterDescriptor, ParameterIn,
    ResponseDescriptor,
};

#![deny(missing_docs)]

//! # Strategies
//!
//! This module defines the pluggable dialect layouts.
//!
//! - **traits**: Defines `SpecVariation` for implementing new dialects.
//! - **swagger**: Swagger 2.0.
//! - **openapi**: OpenAPI 3.0.

pub mod openapi;
pub mod swagger;
pub mod traits;

// Re-export for easier access downstream
pub use openapi::OpenApiV3;
pub use swagger::SwaggerV2;
pub use traits::SpecVariation;

#![deny(missing_docs)]

//! # Types Module
//!
//! The static stand-in for runtime type introspection.
//!
//! - **occurrence**: `TypeOccurrence` (concrete instantiation) and `TypeRef` (declared type).
//! - **catalog**: `TypeCatalog` of definitions (primitives, enums, collections, objects).
//! - **resolver**: Binding environments and generic-parameter substitution.
//! - **describe**: `Describe` trait mapping Rust types to occurrences.

pub mod catalog;
pub mod describe;
pub mod occurrence;
pub mod resolver;

pub use catalog::{EnumConstant, FieldMetadata, PropertyDef, TypeCatalog, TypeDef, TypeKind};
pub use describe::Describe;
pub use occurrence::{TypeOccurrence, TypeRef};
pub use resolver::{resolve, resolve_member, BindingEnv};

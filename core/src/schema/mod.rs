#![deny(missing_docs)]

//! # Schema Module
//!
//! Turns resolved type occurrences into schema nodes and named definitions.
//!
//! - **node**: `SchemaNode`, the dialect-neutral schema value.
//! - **synth**: Property-level synthesis with deferred object discovery.
//! - **registry**: The write-once named store driving discovery to closure.

pub mod node;
pub mod registry;
pub mod synth;

pub use node::SchemaNode;
pub use registry::{Definition, SchemaRegistry};
pub use synth::{synthesize, Synthesis};

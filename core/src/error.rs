//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Every failure in this crate happens while the documents are being assembled at
//! startup. None of them are retried: a malformed type graph or a misused route aborts
//! installation instead of reaching the serving phase.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A declared member type names a type parameter the enclosing instantiation never bound.
    #[from(ignore)]
    #[display("Type parameter '{param}' is unbound while resolving a member of '{owner}'")]
    UnboundTypeParameter {
        /// The type parameter name (e.g. `T`).
        param: String,
        /// Model name of the enclosing occurrence.
        owner: String,
    },

    /// An occurrence names a type that is not present in the catalog.
    #[from(ignore)]
    #[display("Unknown type '{_0}'")]
    UnknownType(String),

    /// An occurrence carries a different number of arguments than its definition declares.
    #[from(ignore)]
    #[display("Type '{name}' expects {expected} type argument(s) but {found} were supplied")]
    ArityMismatch {
        /// Nominal type name.
        name: String,
        /// Number of declared type parameters.
        expected: usize,
        /// Number of arguments carried by the occurrence.
        found: usize,
    },

    /// A textual type reference could not be parsed.
    #[from(ignore)]
    #[display("Invalid type syntax: {_0}")]
    InvalidTypeSyntax(String),

    /// Registration reached an occurrence nested deeper than the registry accepts.
    ///
    /// Raised for generic types that refer to themselves with a growing argument
    /// (`Nest<T>` holding a `Nest<List<T>>`), which would otherwise never close.
    #[from(ignore)]
    #[display("Type '{name}' nests more than {limit} levels deep")]
    NestingTooDeep {
        /// Nominal identity of the offending occurrence.
        name: String,
        /// The depth limit that was exceeded.
        limit: usize,
    },

    /// A serial-name override names a constant the enumeration does not declare.
    #[from(ignore)]
    #[display("Type '{name}' has no constant '{constant}' to rename")]
    UnknownConstant {
        /// Nominal type name.
        name: String,
        /// The constant named by the override.
        constant: String,
    },

    /// A type was defined twice in the same catalog.
    #[from(ignore)]
    #[display("Type '{_0}' is already defined")]
    DuplicateType(String),

    /// A body was declared for a method whose semantics exclude one.
    #[from(ignore)]
    #[display("Method type {method} does not support a body parameter (route '{path}')")]
    BodyNotAllowed {
        /// HTTP method of the offending route.
        method: String,
        /// Path template of the offending route.
        path: String,
    },

    /// A rendered document contains a `$ref` with no matching registry entry.
    #[from(ignore)]
    #[display("{dialect} document references '{name}' which is not defined")]
    DanglingReference {
        /// The dialect whose document is inconsistent.
        dialect: String,
        /// The unresolved schema name.
        name: String,
    },

    /// Invalid installation configuration.
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Config(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#![deny(missing_docs)]

//! # Binding Resolver
//!
//! Substitutes type parameters in a member's declared type with the arguments bound by
//! the enclosing instantiation. This is a pure algebra over [`TypeOccurrence`] values;
//! it never touches a schema registry.
//!
//! ```text
//! Page<Pet>  declares  items: List<T>   with  T -> Pet   =>   List<Pet>
//! ```

use crate::error::{AppError, AppResult};
use crate::types::catalog::{PropertyDef, TypeCatalog};
use crate::types::occurrence::{TypeOccurrence, TypeRef};
use indexmap::IndexMap;

/// Type-parameter name -> concrete occurrence, scoped to one enclosing instantiation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingEnv {
    owner: String,
    bindings: IndexMap<String, TypeOccurrence>,
}

impl BindingEnv {
    /// An environment binding nothing. Resolving any parameter under it fails.
    pub fn empty(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            bindings: IndexMap::new(),
        }
    }

    /// Builds the environment implied by `occ`: its arguments mapped positionally onto
    /// the type parameters its definition declares.
    pub fn for_occurrence(occ: &TypeOccurrence, catalog: &TypeCatalog) -> AppResult<Self> {
        let def = catalog.lookup(occ.identity())?;
        let params = def.type_params();

        if params.len() != occ.arguments().len() {
            return Err(AppError::ArityMismatch {
                name: occ.identity().to_string(),
                expected: params.len(),
                found: occ.arguments().len(),
            });
        }

        Ok(Self {
            owner: occ.to_string(),
            bindings: params
                .into_iter()
                .zip(occ.arguments().iter().cloned())
                .collect(),
        })
    }

    /// The occurrence bound to `param`.
    pub fn get(&self, param: &str) -> Option<&TypeOccurrence> {
        self.bindings.get(param)
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Resolves a declared type to a fully concrete occurrence.
pub fn resolve(declared: &TypeRef, env: &BindingEnv) -> AppResult<TypeOccurrence> {
    match declared {
        TypeRef::Param(name) => {
            env.get(name)
                .cloned()
                .ok_or_else(|| AppError::UnboundTypeParameter {
                    param: name.clone(),
                    owner: env.owner.clone(),
                })
        }
        TypeRef::Applied { name, args } => {
            let resolved = args
                .iter()
                .map(|arg| resolve(arg, env))
                .collect::<AppResult<Vec<_>>>()?;
            Ok(TypeOccurrence::new(name.clone(), resolved))
        }
    }
}

/// Resolves the effective type of `property` under the bindings in `env`.
///
/// An explicit type override wins over the declared type and is already concrete.
pub fn resolve_member(property: &PropertyDef, env: &BindingEnv) -> AppResult<TypeOccurrence> {
    match &property.meta.explicit_type {
        Some(explicit) => Ok(explicit.clone()),
        None => resolve(&property.ty, env),
    }
}

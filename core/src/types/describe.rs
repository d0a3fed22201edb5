#![deny(missing_docs)]

//! # Describe
//!
//! Maps Rust types onto catalog occurrences so route signatures can be written with
//! ordinary type parameters (`ok::<Vec<Pet>>()`) instead of hand-built occurrences.

use crate::types::occurrence::TypeOccurrence;
use std::collections::{BTreeSet, HashSet};

/// A Rust type with a known occurrence in the [`TypeCatalog`](crate::types::TypeCatalog).
///
/// User types implement this by naming their catalog entry:
///
/// ```rust
/// use apidocs_core::types::{Describe, TypeOccurrence};
///
/// struct Pet;
///
/// impl Describe for Pet {
///     fn occurrence() -> TypeOccurrence {
///         TypeOccurrence::named("Pet")
///     }
/// }
/// ```
pub trait Describe {
    /// The occurrence this type stands for.
    fn occurrence() -> TypeOccurrence;
}

macro_rules! describe_as {
    ($name:literal => $($ty:ty),+) => {
        $(
            impl Describe for $ty {
                fn occurrence() -> TypeOccurrence {
                    TypeOccurrence::named($name)
                }
            }
        )+
    };
}

describe_as!("Int" => i8, i16, i32, u8, u16);
describe_as!("Long" => i64, u32, u64, isize, usize);
describe_as!("Double" => f64);
describe_as!("Float" => f32);
describe_as!("Boolean" => bool);
describe_as!("String" => String, str, char);
describe_as!("Unit" => ());

impl<T: Describe + ?Sized> Describe for &T {
    fn occurrence() -> TypeOccurrence {
        T::occurrence()
    }
}

/// Nullability is a property of the member, not of the occurrence.
impl<T: Describe> Describe for Option<T> {
    fn occurrence() -> TypeOccurrence {
        T::occurrence()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::list_of(T::occurrence())
    }
}

impl<T: Describe> Describe for [T] {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::list_of(T::occurrence())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::set_of(T::occurrence())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::set_of(T::occurrence())
    }
}

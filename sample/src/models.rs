#![deny(missing_docs)]

//! # Pet Store Models
//!
//! Wire types of the sample service, each paired with its catalog entry.

use apidocs_core::{
    AppResult, Describe, PropertyDef, TypeCatalog, TypeDef, TypeOccurrence, TypeRef,
};
use serde::{Deserialize, Serialize};

/// Adoption status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Up for adoption.
    Available,
    /// Adoption in progress.
    Pending,
    /// Adopted.
    #[serde(rename = "adopted")]
    Sold,
}

/// A stored pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Identifier.
    pub id: i64,
    /// Name.
    pub name: String,
    /// Status.
    pub status: PetStatus,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload for creating a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPet {
    /// Name.
    pub name: String,
    /// Initial status.
    pub status: Option<PetStatus>,
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of items.
    pub total: i64,
}

/// Query parameters of `GET /pets`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PetsQuery {
    /// Maximum number of pets returned.
    pub limit: Option<i32>,
    /// Status filter.
    pub status: Option<PetStatus>,
}

/// Path parameters of `/pets/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PetPath {
    /// Identifier.
    pub id: i64,
}

/// Headers every pet route understands.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestHeaders;

macro_rules! describe {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn occurrence() -> TypeOccurrence {
                    TypeOccurrence::named($name)
                }
            }
        )+
    };
}

describe! {
    PetStatus => "PetStatus",
    Pet => "Pet",
    NewPet => "NewPet",
    PetsQuery => "PetsQuery",
    PetPath => "PetPath",
    RequestHeaders => "RequestHeaders",
}

impl<T: Describe> Describe for Page<T> {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::new("Page", vec![T::occurrence()])
    }
}

/// The catalog describing every type above.
pub fn catalog() -> AppResult<TypeCatalog> {
    let mut catalog = TypeCatalog::new();
    catalog.define_all([
        TypeDef::enumeration("PetStatus", &["available", "pending", "sold"])
            .with_serial_name("sold", "adopted"),
        TypeDef::object("Pet")
            .with_property(PropertyDef::new("id", TypeRef::named("Long")))
            .with_property(PropertyDef::new("name", TypeRef::named("String")))
            .with_property(PropertyDef::new("status", TypeRef::named("PetStatus")))
            .with_property(PropertyDef::new("tags", "List<String>".parse()?).with_default("[]")),
        TypeDef::object("NewPet")
            .with_property(PropertyDef::new("name", TypeRef::named("String")))
            .with_property(PropertyDef::new("status", TypeRef::named("PetStatus")).nullable()),
        TypeDef::generic_object("Page", &["T"])
            .with_property(PropertyDef::new("items", "List<T>".parse()?))
            .with_property(PropertyDef::new("total", TypeRef::named("Long"))),
        TypeDef::object("PetsQuery")
            .with_property(
                PropertyDef::new("limit", TypeRef::named("Int"))
                    .nullable()
                    .with_description("Maximum number of pets returned"),
            )
            .with_property(PropertyDef::new("status", TypeRef::named("PetStatus")).nullable()),
        TypeDef::object("PetPath").with_property(PropertyDef::new("id", TypeRef::named("Long"))),
        TypeDef::object("RequestHeaders").with_property(
            PropertyDef::new("x-request-id", TypeRef::named("String"))
                .nullable()
                .with_description("Correlation id echoed in logs"),
        ),
    ])?;
    Ok(catalog)
}

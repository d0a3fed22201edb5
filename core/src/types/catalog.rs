#![deny(missing_docs)]

//! # Type Catalog
//!
//! Statically constructed descriptors for every type that can appear in a route
//! signature. The catalog is the only source of member lists, generic parameter lists
//! and enumeration constants; nothing is discovered at runtime.

use crate::error::{AppError, AppResult};
use crate::types::occurrence::{TypeOccurrence, TypeRef};
use indexmap::IndexMap;

/// Per-property overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Skip the property entirely (schemas and parameters).
    pub ignore: bool,
    /// Emit a reference to this author-declared schema instead of resolving the type.
    pub schema_ref: Option<String>,
    /// Resolve the property as if it had this type.
    pub explicit_type: Option<TypeOccurrence>,
    /// Default value. Its presence makes the field optional.
    pub default_value: Option<String>,
    /// Human description, used for parameters.
    pub description: Option<String>,
}

/// A member property of an object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property name as serialized.
    pub name: String,
    /// Declared type, possibly mentioning the owner's type parameters.
    pub ty: TypeRef,
    /// Whether the declared type admits null.
    pub nullable: bool,
    /// Overrides.
    pub meta: FieldMetadata,
}

impl PropertyDef {
    /// Creates a non-nullable property without overrides.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            meta: FieldMetadata::default(),
        }
    }

    /// Marks the declared type nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Excludes the property from schemas and parameters.
    pub fn ignored(mut self) -> Self {
        self.meta.ignore = true;
        self
    }

    /// Points the property at an author-declared schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.meta.schema_ref = Some(schema.into());
        self
    }

    /// Resolves the property as `ty` instead of its declared type.
    pub fn with_type(mut self, ty: TypeOccurrence) -> Self {
        self.meta.explicit_type = Some(ty);
        self
    }

    /// Sets a default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.meta.default_value = Some(value.into());
        self
    }

    /// Sets a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    /// Required means: no default value and a non-nullable declared type.
    pub fn is_required(&self) -> bool {
        self.meta.default_value.is_none() && !self.nullable
    }
}

/// An enumeration constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConstant {
    /// Declared constant name.
    pub name: String,
    /// Serialization name override.
    pub serial_name: Option<String>,
}

impl EnumConstant {
    /// The name the constant serializes to.
    pub fn serialized(&self) -> &str {
        self.serial_name.as_deref().unwrap_or(&self.name)
    }
}

/// The shape of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Inlined primitive (`type` plus optional `format`).
    Primitive {
        /// JSON schema type (`integer`, `string`, ...).
        kind: String,
        /// Optional format (`int64`, `date-time`, ...).
        format: Option<String>,
    },
    /// String enumeration.
    Enum(Vec<EnumConstant>),
    /// List-like (`unique == false`) or set-like (`unique == true`) collection over one element.
    Collection {
        /// Set semantics.
        unique: bool,
    },
    /// Composite type with member properties.
    Object {
        /// Declared type parameters, in order.
        type_params: Vec<String>,
        /// Member properties, in declaration order.
        properties: Vec<PropertyDef>,
    },
    /// The empty payload.
    Unit,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Nominal identity.
    pub name: String,
    /// Shape.
    pub kind: TypeKind,
    /// Serial-name overrides that matched no constant; `define` rejects them.
    unmatched_serial_names: Vec<String>,
}

impl TypeDef {
    /// A definition of any kind.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            unmatched_serial_names: Vec::new(),
        }
    }

    /// A primitive alias.
    pub fn primitive(name: impl Into<String>, kind: &str, format: Option<&str>) -> Self {
        Self::new(
            name,
            TypeKind::Primitive {
                kind: kind.to_string(),
                format: format.map(str::to_string),
            },
        )
    }

    /// A non-generic object with no properties yet.
    pub fn object(name: impl Into<String>) -> Self {
        Self::generic_object(name, &[])
    }

    /// A generic object declaring `params`.
    pub fn generic_object(name: impl Into<String>, params: &[&str]) -> Self {
        Self::new(
            name,
            TypeKind::Object {
                type_params: params.iter().map(|p| p.to_string()).collect(),
                properties: Vec::new(),
            },
        )
    }

    /// A collection identity.
    pub fn collection(name: impl Into<String>, unique: bool) -> Self {
        Self::new(name, TypeKind::Collection { unique })
    }

    /// An enumeration of plain constants.
    pub fn enumeration(name: impl Into<String>, constants: &[&str]) -> Self {
        let constants = constants
            .iter()
            .map(|c| EnumConstant {
                name: c.to_string(),
                serial_name: None,
            })
            .collect();
        Self::new(name, TypeKind::Enum(constants))
    }

    /// Renames the serialized form of an enumeration constant.
    ///
    /// A name matching no constant (or any name on a non-enum kind) is remembered and
    /// makes [`TypeCatalog::define`] fail with [`AppError::UnknownConstant`].
    pub fn with_serial_name(mut self, constant: &str, serial: impl Into<String>) -> Self {
        let target = match &mut self.kind {
            TypeKind::Enum(constants) => constants.iter_mut().find(|c| c.name == constant),
            _ => None,
        };
        match target {
            Some(c) => c.serial_name = Some(serial.into()),
            None => self.unmatched_serial_names.push(constant.to_string()),
        }
        self
    }

    /// Appends a property. No-op on non-object kinds.
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        if let TypeKind::Object { properties, .. } = &mut self.kind {
            properties.push(property);
        }
        self
    }

    /// Declared type parameters (empty for non-generic kinds; `E` for collections).
    pub fn type_params(&self) -> Vec<String> {
        match &self.kind {
            TypeKind::Object { type_params, .. } => type_params.clone(),
            TypeKind::Collection { .. } => vec!["E".to_string()],
            _ => Vec::new(),
        }
    }

    /// Member properties (empty for non-object kinds).
    pub fn properties(&self) -> &[PropertyDef] {
        match &self.kind {
            TypeKind::Object { properties, .. } => properties,
            _ => &[],
        }
    }
}

/// Name -> definition store, seeded with the builtin primitives and collections.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    defs: IndexMap<String, TypeDef>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog {
    /// Creates a catalog holding the builtin table.
    pub fn new() -> Self {
        let builtins = [
            TypeDef::primitive("Int", "integer", Some("int32")),
            TypeDef::primitive("Long", "integer", Some("int64")),
            TypeDef::primitive("String", "string", None),
            TypeDef::primitive("Boolean", "boolean", None),
            TypeDef::primitive("Double", "number", Some("double")),
            TypeDef::primitive("Float", "number", Some("float")),
            TypeDef::primitive("Instant", "string", Some("date-time")),
            TypeDef::primitive("Date", "string", Some("date-time")),
            TypeDef::primitive("LocalDateTime", "string", Some("date-time")),
            TypeDef::primitive("LocalDate", "string", Some("date")),
            TypeDef::collection("List", false),
            TypeDef::collection("Set", true),
            TypeDef::new("Unit", TypeKind::Unit),
        ];

        Self {
            defs: builtins
                .into_iter()
                .map(|def| (def.name.clone(), def))
                .collect(),
        }
    }

    /// Adds a definition.
    ///
    /// Bare property type names matching the definition's type parameters are
    /// reclassified as parameters, so `"List<T>".parse()` can be used directly.
    pub fn define(&mut self, mut def: TypeDef) -> AppResult<()> {
        if self.defs.contains_key(&def.name) {
            return Err(AppError::DuplicateType(def.name));
        }
        if let Some(constant) = def.unmatched_serial_names.first() {
            return Err(AppError::UnknownConstant {
                name: def.name.clone(),
                constant: constant.clone(),
            });
        }

        if let TypeKind::Object {
            type_params,
            properties,
        } = &mut def.kind
        {
            for property in properties.iter_mut() {
                property.ty = property.ty.clone().classify(type_params);
            }
        }

        tracing::trace!(name = %def.name, "Defined type.");
        self.defs.insert(def.name.clone(), def);
        Ok(())
    }

    /// Adds several definitions, stopping at the first failure.
    pub fn define_all(&mut self, defs: impl IntoIterator<Item = TypeDef>) -> AppResult<()> {
        defs.into_iter().try_for_each(|def| self.define(def))
    }

    /// Looks up a definition.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.defs.get(name)
    }

    /// Looks up a definition, failing on unknown names.
    pub fn lookup(&self, name: &str) -> AppResult<&TypeDef> {
        self.get(name)
            .ok_or_else(|| AppError::UnknownType(name.to_string()))
    }

    /// Whether `occ` names the `Unit` payload.
    pub fn is_unit(&self, occ: &TypeOccurrence) -> bool {
        matches!(
            self.get(occ.identity()).map(|d| &d.kind),
            Some(TypeKind::Unit)
        )
    }

    /// Whether `occ` names the builtin `String` primitive.
    pub fn is_string(&self, occ: &TypeOccurrence) -> bool {
        occ.identity() == "String" && !occ.is_parameterized()
    }
}

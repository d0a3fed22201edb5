#![deny(missing_docs)]

//! # Type Occurrences
//!
//! Value types describing *uses* of a type:
//!
//! - [`TypeOccurrence`]: a concrete instantiation such as `List<Pet>` or `Pair<String, Int>`.
//! - [`TypeRef`]: a member's declared type as written in its definition, which may
//!   still mention the declaring type's parameters (`List<T>`).
//!
//! Both are immutable once constructed. Text such as `Pair<List<T>, String>` parses into
//! a [`TypeRef`] by splitting generic arguments at top-level commas.

use crate::error::{AppError, AppResult};
use std::fmt;
use std::str::FromStr;

/// A concrete type instantiation: nominal identity plus resolved generic arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeOccurrence {
    identity: String,
    arguments: Vec<TypeOccurrence>,
}

impl TypeOccurrence {
    /// Creates an occurrence with explicit arguments.
    pub fn new(identity: impl Into<String>, arguments: Vec<TypeOccurrence>) -> Self {
        Self {
            identity: identity.into(),
            arguments,
        }
    }

    /// Creates a non-parameterized occurrence.
    pub fn named(identity: impl Into<String>) -> Self {
        Self::new(identity, Vec::new())
    }

    /// `List<element>`.
    pub fn list_of(element: TypeOccurrence) -> Self {
        Self::new("List", vec![element])
    }

    /// `Set<element>`.
    pub fn set_of(element: TypeOccurrence) -> Self {
        Self::new("Set", vec![element])
    }

    /// The nominal identity (possibly module-qualified, e.g. `pets::Pet`).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The bound generic arguments, in declaration order.
    pub fn arguments(&self) -> &[TypeOccurrence] {
        &self.arguments
    }

    /// Whether the occurrence carries generic arguments.
    pub fn is_parameterized(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// The identity without any module qualification.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.identity)
    }

    /// Levels of nesting: `Int` is 1, `List<Int>` is 2, `Pair<List<Int>, Int>` is 3.
    pub fn depth(&self) -> usize {
        1 + self
            .arguments
            .iter()
            .map(TypeOccurrence::depth)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for TypeOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)?;
        if !self.arguments.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeOccurrence {
    type Err = AppError;

    /// Parses a fully concrete occurrence. Every name is taken as a nominal identity.
    fn from_str(s: &str) -> AppResult<Self> {
        Ok(s.parse::<TypeRef>()?.into_occurrence())
    }
}

/// A member's declared type, possibly mentioning type parameters of its declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A bare type-parameter reference (`T`).
    Param(String),
    /// A nominal type applied to (possibly generic) arguments.
    Applied {
        /// Nominal identity.
        name: String,
        /// Declared arguments.
        args: Vec<TypeRef>,
    },
}

impl TypeRef {
    /// A type-parameter reference.
    pub fn param(name: impl Into<String>) -> Self {
        TypeRef::Param(name.into())
    }

    /// A non-parameterized nominal type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    /// A nominal type applied to arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Applied {
            name: name.into(),
            args,
        }
    }

    /// `List<element>`.
    pub fn list_of(element: TypeRef) -> Self {
        Self::generic("List", vec![element])
    }

    /// `Set<element>`.
    pub fn set_of(element: TypeRef) -> Self {
        Self::generic("Set", vec![element])
    }

    /// Lifts a concrete occurrence into a declared type.
    pub fn concrete(occ: &TypeOccurrence) -> Self {
        TypeRef::Applied {
            name: occ.identity().to_string(),
            args: occ.arguments().iter().map(TypeRef::concrete).collect(),
        }
    }

    /// Reclassifies bare names that match `params` as [`TypeRef::Param`].
    ///
    /// Parsing is context free, so `List<T>` first comes out as an application of `List`
    /// to a nominal `T`. The declaring type's parameter list decides what `T` really is.
    pub fn classify(self, params: &[String]) -> Self {
        match self {
            TypeRef::Applied { name, args } if args.is_empty() && params.contains(&name) => {
                TypeRef::Param(name)
            }
            TypeRef::Applied { name, args } => TypeRef::Applied {
                name,
                args: args.into_iter().map(|a| a.classify(params)).collect(),
            },
            param => param,
        }
    }

    /// Whether the declared type mentions no type parameters at all.
    pub fn is_concrete(&self) -> bool {
        match self {
            TypeRef::Param(_) => false,
            TypeRef::Applied { args, .. } => args.iter().all(TypeRef::is_concrete),
        }
    }

    // Treats parameters as nominal names. Only used on freshly parsed text.
    fn into_occurrence(self) -> TypeOccurrence {
        match self {
            TypeRef::Param(name) => TypeOccurrence::named(name),
            TypeRef::Applied { name, args } => TypeOccurrence::new(
                name,
                args.into_iter().map(TypeRef::into_occurrence).collect(),
            ),
        }
    }
}

impl From<TypeOccurrence> for TypeRef {
    fn from(occ: TypeOccurrence) -> Self {
        TypeRef::concrete(&occ)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Param(name) => write!(f, "{}", name),
            TypeRef::Applied { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", rendered.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for TypeRef {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        parse_type(s.trim())
    }
}

/// Strips module qualification (`a::b::Pet` / `a.b.Pet` -> `Pet`).
pub(crate) fn simple_name(identity: &str) -> &str {
    let tail = identity.rsplit("::").next().unwrap_or(identity);
    tail.rsplit('.').next().unwrap_or(tail)
}

fn parse_type(ty: &str) -> AppResult<TypeRef> {
    if ty.is_empty() {
        return Err(AppError::InvalidTypeSyntax("empty type".into()));
    }

    let Some(start) = ty.find('<') else {
        if ty.contains(['>', ',']) || ty.contains(char::is_whitespace) {
            return Err(AppError::InvalidTypeSyntax(ty.to_string()));
        }
        return Ok(TypeRef::named(ty));
    };

    if !ty.ends_with('>') {
        return Err(AppError::InvalidTypeSyntax(ty.to_string()));
    }

    let base = ty[..start].trim();
    if base.is_empty() {
        return Err(AppError::InvalidTypeSyntax(ty.to_string()));
    }

    let inner = &ty[start + 1..ty.len() - 1];
    let args = split_generic_args(inner)?
        .iter()
        .map(|arg| parse_type(arg))
        .collect::<AppResult<Vec<_>>>()?;

    if args.is_empty() {
        return Err(AppError::InvalidTypeSyntax(ty.to_string()));
    }

    Ok(TypeRef::generic(base, args))
}

fn split_generic_args(inner: &str) -> AppResult<Vec<String>> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for ch in inner.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    AppError::InvalidTypeSyntax(format!("unbalanced '>' in '{}'", inner))
                })?;
                current.push(ch);
            }
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if depth != 0 {
        return Err(AppError::InvalidTypeSyntax(format!(
            "unbalanced '<' in '{}'",
            inner
        )));
    }

    let last = current.trim();
    if last.is_empty() {
        if !args.is_empty() {
            return Err(AppError::InvalidTypeSyntax(format!(
                "empty trailing argument in '{}'",
                inner
            )));
        }
    } else {
        args.push(last.to_string());
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let parsed: TypeRef = "Pair<List<T>, String>".parse().unwrap();
        assert_eq!(
            parsed,
            TypeRef::generic(
                "Pair",
                vec![
                    TypeRef::list_of(TypeRef::named("T")),
                    TypeRef::named("String")
                ]
            )
        );
    }

    #[test]
    fn test_classify_params() {
        let parsed: TypeRef = "Pair<List<T>, T>".parse().unwrap();
        let classified = parsed.classify(&["T".to_string()]);
        assert_eq!(
            classified,
            TypeRef::generic(
                "Pair",
                vec![TypeRef::list_of(TypeRef::param("T")), TypeRef::param("T")]
            )
        );
        assert!(!classified.is_concrete());
    }

    #[test]
    fn test_classify_leaves_applied_names() {
        // A parameterized `T<...>` is a nominal type, never a parameter.
        let parsed = TypeRef::generic("T", vec![TypeRef::named("Int")]);
        let classified = parsed.clone().classify(&["T".to_string()]);
        assert_eq!(classified, parsed);
    }

    #[test]
    fn test_depth() {
        let leaf = TypeOccurrence::named("Int");
        assert_eq!(leaf.depth(), 1);
        let nested: TypeOccurrence = "Pair<List<Int>, Int>".parse().unwrap();
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!("List<".parse::<TypeRef>().is_err());
        assert!("List<>".parse::<TypeRef>().is_err());
        assert!("List<A>>".parse::<TypeRef>().is_err());
        assert!("List<A,>".parse::<TypeRef>().is_err());
        assert!("Pair<,A>".parse::<TypeRef>().is_err());
        assert!("".parse::<TypeRef>().is_err());
        assert!("Two Words".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_occurrence_display_round_trip() {
        let occ: TypeOccurrence = "Outer<Mid<Leaf>, Int>".parse().unwrap();
        assert_eq!(occ.to_string(), "Outer<Mid<Leaf>, Int>");
        assert_eq!(occ.arguments().len(), 2);
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("pets::model::Pet"), "Pet");
        assert_eq!(simple_name("de.example.Pet"), "Pet");
        assert_eq!(simple_name("Pet"), "Pet");
    }
}

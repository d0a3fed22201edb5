#![deny(missing_docs)]

//! # Schema Synthesizer
//!
//! Maps a resolved occurrence to the node a *property* of that type renders as.
//!
//! Objects never expand here: they become a `Reference` and are reported back as a
//! discovery for the registry to expand. What a type looks like from outside is thereby
//! decoupled from how its own body is built, which is what keeps cyclic graphs finite.

use crate::error::{AppError, AppResult};
use crate::naming::model_name;
use crate::schema::node::SchemaNode;
use crate::types::{TypeCatalog, TypeKind, TypeOccurrence};

/// A node plus the object occurrences it references that still need registering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// The node seen by the caller.
    pub node: SchemaNode,
    /// Object occurrences that must become registry entries.
    pub discovered: Vec<TypeOccurrence>,
}

impl Synthesis {
    fn inline(node: SchemaNode) -> Self {
        Self {
            node,
            discovered: Vec::new(),
        }
    }
}

/// Synthesizes the property-level schema of `occ`.
pub fn synthesize(occ: &TypeOccurrence, catalog: &TypeCatalog) -> AppResult<Synthesis> {
    let def = catalog.lookup(occ.identity())?;

    match &def.kind {
        TypeKind::Primitive { kind, format } => {
            expect_arity(occ, 0)?;
            Ok(Synthesis::inline(SchemaNode::primitive(
                kind.clone(),
                format.clone(),
            )))
        }
        TypeKind::Enum(constants) => {
            expect_arity(occ, 0)?;
            Ok(Synthesis::inline(SchemaNode::Enumeration {
                values: constants.iter().map(|c| c.serialized().to_string()).collect(),
            }))
        }
        TypeKind::Collection { unique } => {
            let element = collection_element(occ)?;
            let inner = synthesize(element, catalog)?;
            Ok(Synthesis {
                node: SchemaNode::array(inner.node, *unique),
                discovered: inner.discovered,
            })
        }
        TypeKind::Object { type_params, .. } => {
            expect_arity(occ, type_params.len())?;
            Ok(Synthesis {
                node: SchemaNode::reference(model_name(occ)),
                discovered: vec![occ.clone()],
            })
        }
        TypeKind::Unit => Err(AppError::General(format!(
            "'{}' carries no payload and cannot be used as a member type",
            occ
        ))),
    }
}

/// The single element argument of a collection occurrence.
pub(crate) fn collection_element(occ: &TypeOccurrence) -> AppResult<&TypeOccurrence> {
    expect_arity(occ, 1)?;
    Ok(&occ.arguments()[0])
}

fn expect_arity(occ: &TypeOccurrence, expected: usize) -> AppResult<()> {
    if occ.arguments().len() == expected {
        Ok(())
    } else {
        Err(AppError::ArityMismatch {
            name: occ.identity().to_string(),
            expected,
            found: occ.arguments().len(),
        })
    }
}

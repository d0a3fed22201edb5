#![deny(missing_docs)]

//! # Schema Registry
//!
//! The named, write-once store of schema definitions for one dialect document.
//!
//! Registration drives discovery to closure with a worklist: an entry is inserted under
//! its name *before* the occurrences it references are visited, so a type reaching
//! itself again (directly or through a cycle) finds its name taken and stops there.

use crate::error::{AppError, AppResult};
use crate::naming::model_name;
use crate::schema::node::SchemaNode;
use crate::schema::synth::{collection_element, synthesize};
use crate::types::{resolve_member, BindingEnv, TypeCatalog, TypeKind, TypeOccurrence};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// Deepest occurrence registration will expand.
///
/// Reserving names stops cycles back to the same occurrence, but a generic type that
/// refers to itself with a growing argument mints a new name on every pass.
pub const MAX_NESTING_DEPTH: usize = 32;

/// A registry entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// A synthesized object or standalone array.
    Model(SchemaNode),
    /// An author-declared schema, stored verbatim.
    Manual(Value),
}

impl Definition {
    /// Renders the entry against a dialect's reference prefix.
    pub fn to_json(&self, ref_prefix: &str) -> Value {
        match self {
            Definition::Model(node) => node.to_json(ref_prefix),
            Definition::Manual(value) => value.clone(),
        }
    }

    /// Names this entry references, as far as can be told.
    ///
    /// Manual entries are scanned for `$ref` strings under `ref_prefix`; anything else
    /// (external documents, other prefixes) is not this registry's concern.
    pub fn referenced_names(&self, ref_prefix: &str) -> Vec<String> {
        match self {
            Definition::Model(node) => {
                let mut refs = Vec::new();
                node.collect_references(&mut refs);
                refs.into_iter().map(str::to_string).collect()
            }
            Definition::Manual(value) => {
                let mut refs = Vec::new();
                collect_json_refs(value, ref_prefix, &mut refs);
                refs
            }
        }
    }
}

/// Name -> definition, write-once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    entries: IndexMap<String, Definition>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The entry under `name`.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.entries.get(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Definition)> {
        self.entries.iter()
    }

    /// Inserts an author-declared schema. Returns `false` if the name was taken.
    pub fn insert_manual(&mut self, name: impl Into<String>, schema: Value) -> bool {
        self.insert(name.into(), Definition::Manual(schema))
    }

    /// Registers `occ` and, transitively, every object type it references.
    ///
    /// Idempotent: a name already present is neither re-expanded nor re-discovered.
    /// Fails with [`AppError::NestingTooDeep`] once an occurrence exceeds
    /// [`MAX_NESTING_DEPTH`]; entries registered before that point stay.
    /// Primitive, enumeration and `Unit` occurrences are always inlined and never stored.
    pub fn register(&mut self, occ: &TypeOccurrence, catalog: &TypeCatalog) -> AppResult<()> {
        let mut pending = VecDeque::from([occ.clone()]);

        while let Some(next) = pending.pop_front() {
            if next.depth() > MAX_NESTING_DEPTH {
                return Err(AppError::NestingTooDeep {
                    name: next.identity().to_string(),
                    limit: MAX_NESTING_DEPTH,
                });
            }

            let name = model_name(&next);
            if self.contains(&name) {
                tracing::trace!(%name, "Schema already registered.");
                continue;
            }

            let Some((definition, discovered)) = expand(&next, catalog)? else {
                continue;
            };

            // The name is reserved here, ahead of visiting what it references.
            self.insert(name, definition);
            pending.extend(discovered);
        }

        Ok(())
    }

    /// The schema for a whole payload (request body, response or top-level parameter).
    ///
    /// Objects and collections are registered under their model name and come back as a
    /// reference; primitives and enumerations come back inline. `Unit` yields `None`.
    pub fn payload_schema(
        &mut self,
        occ: &TypeOccurrence,
        catalog: &TypeCatalog,
    ) -> AppResult<Option<SchemaNode>> {
        match &catalog.lookup(occ.identity())?.kind {
            TypeKind::Unit => Ok(None),
            TypeKind::Primitive { .. } | TypeKind::Enum(_) => {
                Ok(Some(synthesize(occ, catalog)?.node))
            }
            TypeKind::Collection { .. } | TypeKind::Object { .. } => {
                self.register(occ, catalog)?;
                Ok(Some(SchemaNode::reference(model_name(occ))))
            }
        }
    }

    /// The schema for a member property of type `occ`, registering what it discovers.
    pub fn member_schema(
        &mut self,
        occ: &TypeOccurrence,
        catalog: &TypeCatalog,
    ) -> AppResult<SchemaNode> {
        let synthesis = synthesize(occ, catalog)?;
        for discovered in &synthesis.discovered {
            self.register(discovered, catalog)?;
        }
        Ok(synthesis.node)
    }

    /// Renders every entry against `ref_prefix`.
    pub fn to_json(&self, ref_prefix: &str) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(name, def)| (name.clone(), def.to_json(ref_prefix)))
            .collect()
    }

    fn insert(&mut self, name: String, definition: Definition) -> bool {
        if self.entries.contains_key(&name) {
            return false;
        }
        tracing::debug!(
            %name,
            kind = match &definition {
                Definition::Model(SchemaNode::Array { .. }) => "array",
                Definition::Model(_) => "object",
                Definition::Manual(_) => "manual",
            },
            "Registered schema."
        );
        self.entries.insert(name, definition);
        true
    }
}

/// Builds the standalone definition of `occ` and the occurrences it references.
///
/// Returns `None` for kinds that are never stored.
fn expand(
    occ: &TypeOccurrence,
    catalog: &TypeCatalog,
) -> AppResult<Option<(Definition, Vec<TypeOccurrence>)>> {
    let def = catalog.lookup(occ.identity())?;

    match &def.kind {
        TypeKind::Collection { unique } => {
            let element = synthesize(collection_element(occ)?, catalog)?;
            Ok(Some((
                Definition::Model(SchemaNode::array(element.node, *unique)),
                element.discovered,
            )))
        }
        TypeKind::Object { properties, .. } => {
            let env = BindingEnv::for_occurrence(occ, catalog)?;
            let mut discovered = Vec::new();
            let mut nodes = IndexMap::new();

            for property in properties.iter().filter(|p| !p.meta.ignore) {
                let node = match &property.meta.schema_ref {
                    Some(schema) => SchemaNode::reference(schema.clone()),
                    None => {
                        let resolved = resolve_member(property, &env)?;
                        let synthesis = synthesize(&resolved, catalog)?;
                        discovered.extend(synthesis.discovered);
                        synthesis.node
                    }
                };
                nodes.insert(property.name.clone(), node);
            }

            Ok(Some((
                Definition::Model(SchemaNode::Object { properties: nodes }),
                discovered,
            )))
        }
        TypeKind::Primitive { .. } | TypeKind::Enum(_) | TypeKind::Unit => Ok(None),
    }
}

fn collect_json_refs(value: &Value, ref_prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                match (key.as_str(), inner) {
                    ("$ref", Value::String(target)) => {
                        if let Some(name) = target.strip_prefix(ref_prefix) {
                            out.push(name.to_string());
                        }
                    }
                    _ => collect_json_refs(inner, ref_prefix, out),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_json_refs(item, ref_prefix, out);
            }
        }
        _ => {}
    }
}

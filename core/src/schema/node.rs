#![deny(missing_docs)]

//! # Schema Nodes
//!
//! Dialect-neutral schema values. Only the `$ref` prefix differs between Swagger 2.0 and
//! OpenAPI 3.0 renderings, so every node renders against a caller-supplied prefix.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// A synthesized schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Inlined primitive.
    Primitive {
        /// JSON schema type.
        kind: String,
        /// Optional format.
        format: Option<String>,
    },
    /// Inlined string enumeration.
    Enumeration {
        /// Serialized constant names, in declaration order.
        values: Vec<String>,
    },
    /// Array over `items`.
    Array {
        /// Element schema.
        items: Box<SchemaNode>,
        /// Set semantics.
        unique_items: bool,
    },
    /// Reference to a named registry entry.
    Reference {
        /// Registry key.
        name: String,
    },
    /// Object with named properties.
    Object {
        /// Properties in declaration order.
        properties: IndexMap<String, SchemaNode>,
    },
}

impl SchemaNode {
    /// A primitive node.
    pub fn primitive(kind: impl Into<String>, format: Option<String>) -> Self {
        SchemaNode::Primitive {
            kind: kind.into(),
            format,
        }
    }

    /// The plain `string` primitive.
    pub fn string() -> Self {
        Self::primitive("string", None)
    }

    /// A reference node.
    pub fn reference(name: impl Into<String>) -> Self {
        SchemaNode::Reference { name: name.into() }
    }

    /// Wraps `items` in an array node.
    pub fn array(items: SchemaNode, unique_items: bool) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
            unique_items,
        }
    }

    /// The referenced name, when this node is a reference.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            SchemaNode::Reference { name } => Some(name),
            _ => None,
        }
    }

    /// Renders the node, prefixing references with `ref_prefix`.
    pub fn to_json(&self, ref_prefix: &str) -> Value {
        Value::Object(self.to_json_map(ref_prefix))
    }

    /// Renders the node as a JSON object map (used when a dialect flattens a schema
    /// into a surrounding object, as Swagger 2.0 parameters do).
    pub fn to_json_map(&self, ref_prefix: &str) -> Map<String, Value> {
        let mut obj = Map::new();
        match self {
            SchemaNode::Primitive { kind, format } => {
                obj.insert("type".to_string(), json!(kind));
                if let Some(format) = format {
                    obj.insert("format".to_string(), json!(format));
                }
            }
            SchemaNode::Enumeration { values } => {
                obj.insert("type".to_string(), json!("string"));
                obj.insert("enum".to_string(), json!(values));
            }
            SchemaNode::Array {
                items,
                unique_items,
            } => {
                obj.insert("type".to_string(), json!("array"));
                obj.insert("items".to_string(), items.to_json(ref_prefix));
                if *unique_items {
                    obj.insert("uniqueItems".to_string(), json!(true));
                }
            }
            SchemaNode::Reference { name } => {
                obj.insert("$ref".to_string(), json!(format!("{}{}", ref_prefix, name)));
            }
            SchemaNode::Object { properties } => {
                obj.insert("type".to_string(), json!("object"));
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_json(ref_prefix)))
                    .collect();
                obj.insert("properties".to_string(), Value::Object(props));
            }
        }
        obj
    }

    /// Collects every referenced name reachable inside this node.
    pub fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            SchemaNode::Reference { name } => out.push(name),
            SchemaNode::Array { items, .. } => items.collect_references(out),
            SchemaNode::Object { properties } => {
                for node in properties.values() {
                    node.collect_references(out);
                }
            }
            SchemaNode::Primitive { .. } | SchemaNode::Enumeration { .. } => {}
        }
    }
}

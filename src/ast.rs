//! Abstract Syntax Tree values.
//!
//! This module defines [`Value`], the universal result type produced by a
//! parse engine. A `Value` is a closed set of variants — scalars, ordered
//! arrays, and kind-tagged nodes — so the serializer can be written once,
//! exhaustively, against the variant set rather than via dynamic dispatch
//! per node type.
//!
//! # Structure
//!
//! ```text
//! Value
//! ├── Null / Bool / Int / Float / Str   (scalars)
//! ├── Array(Vec<Value>)                 (ordered sequence)
//! └── Node(Node)                        (kind + fields in declaration order)
//! ```
//!
//! Integers and floats are separate variants so every integer in the 64-bit
//! signed range serializes without precision loss.
//!
//! # Ownership invariant
//!
//! A `Value` owns its children outright (`Vec`, [`IndexMap`]). Sharing a
//! subtree between two parents or referencing an ancestor is unrepresentable,
//! which makes the acyclic-tree invariant a property of the type, not a
//! runtime check.
//!
//! # Example
//!
//! ```rust
//! use ast2json::{Node, Value};
//!
//! let program = Node::new("Program").field("body", Value::Array(vec![]));
//! assert_eq!(ast2json::to_string(&program.into()).unwrap(),
//!            r#"{"kind":"Program","body":[]}"#);
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Range;

/// A span in the source code represented as byte offsets.
pub type Span = Range<usize>;

/// An AST value: scalar, ordered sequence, or kind-tagged node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar, exact over the full 64-bit signed range.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar.
    Str(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A labeled structure with a node-kind discriminator.
    Node(Node),
}

/// A kind-tagged AST node: a discriminator plus named fields in declaration
/// order.
///
/// Field names are unique within a node and [`IndexMap`] preserves insertion
/// order, so two walks over the same node always see the same field sequence.
/// The name `kind` is reserved for the discriminator and must not be used as
/// a field name; the serializer rejects nodes that violate this.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    /// The node-kind discriminator, e.g. `"Program"` or `"Identifier"`.
    pub kind: String,
    /// Named children in declaration order.
    pub fields: IndexMap<String, Value>,
}

impl Node {
    /// Create a node with the given kind and no fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: IndexMap::new(),
        }
    }

    /// Append a field, preserving declaration order. Builder-style.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ast2json::Node;
    ///
    /// let node = Node::new("LetDeclaration")
    ///     .field("name", "x")
    ///     .field("init", 1i64);
    /// assert_eq!(node.fields.len(), 2);
    /// ```
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Value {
    /// Returns the inner node if this value is a [`Value::Node`].
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the inner string if this value is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this value is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

// Serialize maps each value to exactly the JSON shape the canonical writer
// emits: nodes become objects with "kind" first, then fields in declaration
// order. Kept in lockstep with the writer so serde_json output can be used
// as a cross-check in tests.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Node(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("kind", &self.kind)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

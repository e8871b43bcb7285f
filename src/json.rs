//! Canonical JSON serialization of AST values.
//!
//! The writer walks a [`Value`] and streams JSON text to any [`io::Write`],
//! so peak memory stays bounded by tree depth rather than output size. The
//! encoding is deterministic: identical trees always produce byte-identical
//! text.
//!
//! # Encoding rules
//!
//! - Strings: `"`, `\` and the control characters `\b \f \n \r \t` use their
//!   short escapes; remaining control characters become `\u00XX`. Non-ASCII
//!   code points are emitted raw as UTF-8 — the output is declared UTF-8, so
//!   `\uXXXX` escaping above ASCII would only bloat it. The same policy
//!   applies to field names.
//! - Numbers: [`Value::Int`] prints in decimal, exact over the full 64-bit
//!   signed range. [`Value::Float`] emits a literal that reparses to the
//!   identical double; whole values carry a `.0` suffix so a float never
//!   reads back as an integer. Non-finite floats
//!   have no JSON encoding and fail with
//!   [`SerializeError::NonFiniteNumber`] rather than encode lossily.
//! - Arrays preserve element order; nodes emit the reserved `"kind"` key
//!   first, then their fields in declaration order.
//! - Nesting beyond [`MAX_DEPTH`] levels fails with
//!   [`SerializeError::DepthLimit`]. Ownership makes true cycles
//!   unrepresentable in [`Value`], so the guard can only fire on a
//!   misbehaving engine output.
//!
//! # Example
//!
//! ```rust
//! use ast2json::{Node, Value};
//!
//! let ast: Value = Node::new("StringLiteral").field("value", "He said \"hi\"\n").into();
//! assert_eq!(
//!     ast2json::to_string(&ast).unwrap(),
//!     r#"{"kind":"StringLiteral","value":"He said \"hi\"\n"}"#
//! );
//! ```

use crate::ast::{Node, Value};
use std::io::{self, Write};
use thiserror::Error;

/// Maximum nesting depth the writer will follow.
pub const MAX_DEPTH: usize = 1000;

/// An internal-consistency fault during serialization.
///
/// None of these should be reachable given a well-formed AST from a correct
/// engine; they are reported distinctly from syntax errors so callers never
/// confuse "your input is invalid" with "this tool is broken".
#[derive(Debug, Error)]
pub enum SerializeError {
    /// A float with no JSON encoding (NaN or infinity).
    #[error("cannot encode non-finite number {0}")]
    NonFiniteNumber(f64),
    /// A node declared a field under the reserved discriminator key.
    #[error("node of kind '{kind}' declares a field named 'kind', which is reserved")]
    ReservedField {
        /// Kind of the offending node.
        kind: String,
    },
    /// Nesting exceeded [`MAX_DEPTH`]; the engine produced a malformed tree.
    #[error("AST nesting exceeds {MAX_DEPTH} levels")]
    DepthLimit,
    /// The output stream failed.
    #[error("failed to write JSON output: {0}")]
    Io(#[from] io::Error),
}

/// Serialize `value` as compact JSON to `writer`.
pub fn to_writer<W: Write>(writer: W, value: &Value) -> Result<(), SerializeError> {
    Emitter::new(writer, false).emit(value)
}

/// Serialize `value` as pretty-printed JSON (two-space indent) to `writer`.
pub fn to_writer_pretty<W: Write>(writer: W, value: &Value) -> Result<(), SerializeError> {
    Emitter::new(writer, true).emit(value)
}

/// Serialize `value` to a compact JSON string.
pub fn to_string(value: &Value) -> Result<String, SerializeError> {
    let mut buf = Vec::new();
    to_writer(&mut buf, value)?;
    Ok(String::from_utf8(buf).expect("emitter writes valid UTF-8"))
}

/// Serialize `value` to a pretty-printed JSON string.
pub fn to_string_pretty(value: &Value) -> Result<String, SerializeError> {
    let mut buf = Vec::new();
    to_writer_pretty(&mut buf, value)?;
    Ok(String::from_utf8(buf).expect("emitter writes valid UTF-8"))
}

/// Internal streaming writer.
struct Emitter<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> Emitter<W> {
    fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    fn emit(&mut self, value: &Value) -> Result<(), SerializeError> {
        self.write_value(value, 0)
    }

    fn write_value(&mut self, value: &Value, depth: usize) -> Result<(), SerializeError> {
        if depth > MAX_DEPTH {
            return Err(SerializeError::DepthLimit);
        }
        match value {
            Value::Null => self.out.write_all(b"null")?,
            Value::Bool(true) => self.out.write_all(b"true")?,
            Value::Bool(false) => self.out.write_all(b"false")?,
            Value::Int(n) => write!(self.out, "{}", n)?,
            Value::Float(x) => self.write_float(*x)?,
            Value::Str(s) => self.write_string(s)?,
            Value::Array(items) => self.write_array(items, depth)?,
            Value::Node(node) => self.write_node(node, depth)?,
        }
        Ok(())
    }

    fn write_float(&mut self, x: f64) -> Result<(), SerializeError> {
        if !x.is_finite() {
            return Err(SerializeError::NonFiniteNumber(x));
        }
        // Whole-valued doubles keep a ".0" suffix so the literal stays
        // unambiguously a float on the way back in. "{:.1}" is exact for
        // every finite double, whatever the magnitude.
        if x == x.trunc() {
            write!(self.out, "{:.1}", x)?;
        } else {
            write!(self.out, "{}", x)?;
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<(), SerializeError> {
        self.out.write_all(b"\"")?;
        let bytes = s.as_bytes();
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            let escape: &[u8] = match byte {
                b'"' => b"\\\"",
                b'\\' => b"\\\\",
                0x08 => b"\\b",
                0x0c => b"\\f",
                b'\n' => b"\\n",
                b'\r' => b"\\r",
                b'\t' => b"\\t",
                0x00..=0x1f => b"",
                _ => continue,
            };
            if start < i {
                self.out.write_all(&bytes[start..i])?;
            }
            if escape.is_empty() {
                write!(self.out, "\\u{:04x}", byte)?;
            } else {
                self.out.write_all(escape)?;
            }
            start = i + 1;
        }
        if start < bytes.len() {
            self.out.write_all(&bytes[start..])?;
        }
        self.out.write_all(b"\"")?;
        Ok(())
    }

    fn write_array(&mut self, items: &[Value], depth: usize) -> Result<(), SerializeError> {
        if items.is_empty() {
            self.out.write_all(b"[]")?;
            return Ok(());
        }
        self.out.write_all(b"[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b",")?;
            }
            self.break_line(depth + 1)?;
            self.write_value(item, depth + 1)?;
        }
        self.break_line(depth)?;
        self.out.write_all(b"]")?;
        Ok(())
    }

    fn write_node(&mut self, node: &Node, depth: usize) -> Result<(), SerializeError> {
        if node.fields.contains_key("kind") {
            return Err(SerializeError::ReservedField {
                kind: node.kind.clone(),
            });
        }
        self.out.write_all(b"{")?;
        self.break_line(depth + 1)?;
        self.write_string("kind")?;
        self.colon()?;
        self.write_string(&node.kind)?;
        for (name, value) in &node.fields {
            self.out.write_all(b",")?;
            self.break_line(depth + 1)?;
            self.write_string(name)?;
            self.colon()?;
            self.write_value(value, depth + 1)?;
        }
        self.break_line(depth)?;
        self.out.write_all(b"}")?;
        Ok(())
    }

    fn colon(&mut self) -> io::Result<()> {
        if self.pretty {
            self.out.write_all(b": ")
        } else {
            self.out.write_all(b":")
        }
    }

    fn break_line(&mut self, depth: usize) -> io::Result<()> {
        if self.pretty {
            self.out.write_all(b"\n")?;
            for _ in 0..depth {
                self.out.write_all(b"  ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use pretty_assertions::assert_eq;

    fn node(kind: &str) -> Node {
        Node::new(kind)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_string(&Value::Null).unwrap(), "null");
        assert_eq!(to_string(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(to_string(&Value::Bool(false)).unwrap(), "false");
        assert_eq!(to_string(&Value::Int(0)).unwrap(), "0");
        assert_eq!(to_string(&Value::Int(-7)).unwrap(), "-7");
    }

    #[test]
    fn test_int_is_exact_at_64_bit_extremes() {
        assert_eq!(to_string(&Value::Int(i64::MAX)).unwrap(), "9223372036854775807");
        assert_eq!(to_string(&Value::Int(i64::MIN)).unwrap(), "-9223372036854775808");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(to_string(&Value::Float(3.14)).unwrap(), "3.14");
        assert_eq!(to_string(&Value::Float(1.0)).unwrap(), "1.0");
        assert_eq!(to_string(&Value::Float(-0.5)).unwrap(), "-0.5");
    }

    #[test]
    fn test_large_whole_floats_keep_the_float_suffix() {
        for x in [2e16, 1e18, -9e15] {
            let text = to_string(&Value::Float(x)).unwrap();
            assert!(text.ends_with(".0"), "{text} lost its float marker");
            let back: f64 = text.parse().unwrap();
            assert_eq!(back.to_bits(), x.to_bits(), "{text} did not round-trip");
        }
    }

    #[test]
    fn test_float_round_trips() {
        for x in [3.14, 0.1, 1e-8, 12345.6789, -2.5e10] {
            let text = to_string(&Value::Float(x)).unwrap();
            let back: f64 = text.parse().unwrap();
            assert_eq!(back.to_bits(), x.to_bits(), "{text} did not round-trip");
        }
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = to_string(&Value::Float(x)).unwrap_err();
            assert!(matches!(err, SerializeError::NonFiniteNumber(_)));
        }
    }

    #[test]
    fn test_string_escaping() {
        let ast: Value = node("StringLiteral").field("value", "He said \"hi\"\n").into();
        assert_eq!(
            to_string(&ast).unwrap(),
            r#"{"kind":"StringLiteral","value":"He said \"hi\"\n"}"#
        );
    }

    #[test]
    fn test_control_characters_use_u_escapes() {
        let ast = Value::Str("a\u{1}b\u{7f}".to_string());
        // 0x7f is not a JSON control character and passes through raw.
        assert_eq!(to_string(&ast).unwrap(), "\"a\\u0001b\u{7f}\"");
    }

    #[test]
    fn test_non_ascii_is_emitted_raw() {
        let ast = Value::Str("héllo ✓".to_string());
        assert_eq!(to_string(&ast).unwrap(), "\"héllo ✓\"");
    }

    #[test]
    fn test_kind_comes_first_then_declaration_order() {
        let ast: Value = node("LetDeclaration")
            .field("name", "x")
            .field("init", Value::Node(node("NumberLiteral").field("value", 1i64)))
            .into();
        assert_eq!(
            to_string(&ast).unwrap(),
            r#"{"kind":"LetDeclaration","name":"x","init":{"kind":"NumberLiteral","value":1}}"#
        );
    }

    #[test]
    fn test_array_order_preserved() {
        let ast = Value::Array(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        assert_eq!(to_string(&ast).unwrap(), "[3,1,2]");
    }

    #[test]
    fn test_reserved_field_is_rejected() {
        let ast: Value = node("Broken").field("kind", "sneaky").into();
        let err = to_string(&ast).unwrap_err();
        assert!(matches!(err, SerializeError::ReservedField { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let mut ast = Value::Null;
        for _ in 0..(MAX_DEPTH + 1) {
            ast = Value::Array(vec![ast]);
        }
        let err = to_string(&ast).unwrap_err();
        assert!(matches!(err, SerializeError::DepthLimit));
    }

    #[test]
    fn test_depth_limit_leaves_deep_but_legal_trees_alone() {
        let mut ast = Value::Null;
        for _ in 0..MAX_DEPTH {
            ast = Value::Array(vec![ast]);
        }
        assert!(to_string(&ast).is_ok());
    }

    #[test]
    fn test_pretty_output() {
        let ast: Value = node("Program")
            .field("body", Value::Array(vec![node("NullLiteral").into()]))
            .into();
        let expected = "{\n  \"kind\": \"Program\",\n  \"body\": [\n    {\n      \"kind\": \"NullLiteral\"\n    }\n  ]\n}";
        assert_eq!(to_string_pretty(&ast).unwrap(), expected);
    }

    #[test]
    fn test_matches_serde_json_encoding() {
        let ast: Value = node("Program")
            .field(
                "body",
                Value::Array(vec![node("ExpressionStatement")
                    .field(
                        "expression",
                        Value::Node(
                            node("BinaryExpression")
                                .field("operator", "+")
                                .field("left", Value::Node(node("NumberLiteral").field("value", 1i64)))
                                .field("right", Value::Node(node("NumberLiteral").field("value", 2.5))),
                        ),
                    )
                    .into()]),
            )
            .into();
        assert_eq!(to_string(&ast).unwrap(), serde_json::to_string(&ast).unwrap());
        assert_eq!(
            to_string_pretty(&ast).unwrap(),
            serde_json::to_string_pretty(&ast).unwrap()
        );
    }

    #[test]
    fn test_determinism() {
        let ast: Value = node("Program")
            .field("body", Value::Array(vec![node("NullLiteral").into()]))
            .into();
        assert_eq!(to_string(&ast).unwrap(), to_string(&ast).unwrap());
    }
}

//! The parse-engine boundary.
//!
//! Everything upstream of the serializer talks to the grammar through one
//! interface: [`ParseEngine::parse`] takes source text and returns either a
//! complete [`Value`] tree or a [`SyntaxError`]. The engine's internal
//! signaling convention — error enums, panics, whatever — never leaks past
//! [`parse_with`], so a different grammar can be plugged in without touching
//! the serialization or CLI layers.
//!
//! # Example
//!
//! ```rust
//! use ast2json::engine::{parse_with, ParseEngine, SyntaxError};
//! use ast2json::{Node, Value};
//!
//! struct EmptyGrammar;
//!
//! impl ParseEngine for EmptyGrammar {
//!     fn name(&self) -> &str {
//!         "empty"
//!     }
//!
//!     fn parse(&self, _source: &str) -> Result<Value, SyntaxError> {
//!         Ok(Node::new("Program").field("body", Value::Array(vec![])).into())
//!     }
//! }
//!
//! let ast = parse_with(&EmptyGrammar, "anything").unwrap();
//! assert_eq!(ast.as_node().unwrap().kind, "Program");
//! ```

use crate::ast::{Span, Value};
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A position in the source text, 1-based for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
    /// Byte offset into the source, when the engine tracked one.
    pub offset: Option<usize>,
}

/// A failure to parse: the input does not conform to the grammar.
///
/// This is user-facing and expected — invalid input, not a defect. The
/// position and span are optional because not every engine tracks them.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Where the failure was detected, when available.
    pub position: Option<Position>,
    /// Byte span of the offending region, for diagnostic rendering.
    pub span: Option<Span>,
}

impl SyntaxError {
    /// A syntax error with no position information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            span: None,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(
                f,
                "syntax error at line {}, column {}: {}",
                pos.line, pos.column, self.message
            ),
            None => write!(f, "syntax error: {}", self.message),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// A grammar-driven parsing capability.
///
/// Implementations are all-or-nothing: a parse either yields one complete
/// AST rooted at a single top-level node, or one error. No recovery, no
/// partial trees.
pub trait ParseEngine {
    /// Short engine name used in diagnostics.
    fn name(&self) -> &str;

    /// Parse the full source text into an AST value.
    fn parse(&self, source: &str) -> Result<Value, SyntaxError>;
}

/// Invoke `engine` on `source` exactly once and normalize the outcome.
///
/// Success and failure pass through untouched. A panic inside the engine is
/// caught and converted into a positionless [`SyntaxError`], so callers see
/// the same two-outcome contract no matter how the engine misbehaves.
pub fn parse_with(engine: &dyn ParseEngine, source: &str) -> Result<Value, SyntaxError> {
    match catch_unwind(AssertUnwindSafe(|| engine.parse(source))) {
        Ok(outcome) => outcome,
        Err(cause) => Err(SyntaxError::new(format!(
            "{} engine aborted: {}",
            engine.name(),
            panic_message(cause.as_ref())
        ))),
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(cause: &(dyn Any + Send)) -> &str {
    if let Some(msg) = cause.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = cause.downcast_ref::<String>() {
        msg
    } else {
        "unknown cause"
    }
}

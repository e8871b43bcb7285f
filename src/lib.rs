//! # ast2json
//!
//! Parse a source file with a grammar-driven engine and emit its abstract
//! syntax tree as a single, deterministic JSON document.
//!
//! The hard part of a tool like this is not the thin driver — it is the two
//! contracts that make the driver trustworthy:
//!
//! - **The engine boundary** ([`engine`]): any parsing capability is invoked
//!   through one interface, `parse(text) → AST | SyntaxError`, and whatever
//!   signaling convention it uses internally is normalized at that boundary.
//!   Swapping grammars never touches the serialization or CLI layers.
//! - **Canonical serialization** ([`json`]): the AST value tree is encoded as
//!   JSON with fixed, documented rules — declaration-order fields, lossless
//!   64-bit integers, uniform escaping — so two runs over identical ASTs are
//!   byte-for-byte identical and structural diffs stay meaningful.
//!
//! A small demonstration grammar, [`mini`], ships as the default engine.
//!
//! ## Quick start
//!
//! ```rust
//! use ast2json::{mini, to_string};
//!
//! let ast = mini::parse("let x = 1;").unwrap();
//! let json = to_string(&ast).unwrap();
//! assert!(json.starts_with(r#"{"kind":"Program""#));
//! ```
//!
//! ## Plugging in a different grammar
//!
//! ```rust
//! use ast2json::engine::{parse_with, ParseEngine, SyntaxError};
//! use ast2json::{Node, Value};
//!
//! struct MyGrammar;
//!
//! impl ParseEngine for MyGrammar {
//!     fn name(&self) -> &str {
//!         "mine"
//!     }
//!
//!     fn parse(&self, _source: &str) -> Result<Value, SyntaxError> {
//!         Ok(Node::new("Program")
//!             .field("body", Value::Array(vec![]))
//!             .into())
//!     }
//! }
//!
//! let ast = parse_with(&MyGrammar, "").unwrap();
//! ```
//!
//! ## Module overview
//!
//! - [`ast`] - AST value types (closed variant set, declaration-order fields)
//! - [`engine`] - the parse-engine boundary and outcome normalization
//! - [`json`] - the canonical streaming JSON writer
//! - [`error`] - error taxonomy, exit codes, and ariadne reporting
//! - [`mini`] - the bundled demonstration grammar
//! - [`cli`] - argument parsing and the load → parse → serialize pipeline

pub mod ast;
pub mod cli;
pub mod engine;
pub mod error;
pub mod json;
pub mod mini;

// Re-export commonly used types
pub use ast::{Node, Value};
pub use engine::{parse_with, ParseEngine, Position, SyntaxError};
pub use error::{Error, ErrorReporter};
pub use json::{to_string, to_string_pretty, to_writer, to_writer_pretty, SerializeError};

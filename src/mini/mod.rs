//! The bundled mini grammar engine.
//!
//! mini is a small statement/expression language that ships with the tool so
//! the harness is usable out of the box. A program is a sequence of
//! statements:
//!
//! ```text
//! let total = price * quantity;
//! print(total, "done");
//! ```
//!
//! The engine uses a two-phase architecture:
//!
//! 1. **Lexical analysis** - Source → Tokens (via [`lexer`])
//! 2. **Parsing** - Tokens → [`Value`] tree (via chumsky combinators)
//!
//! [`MiniLang`] plugs the whole thing in behind [`ParseEngine`]; nothing
//! outside this module depends on mini's tokens or grammar shape.
//!
//! # Example
//!
//! ```rust
//! use ast2json::mini;
//!
//! let ast = mini::parse("let x = 1;").unwrap();
//! assert_eq!(ast.as_node().unwrap().kind, "Program");
//!
//! let err = mini::parse("let x = ;").unwrap_err();
//! assert_eq!(err.position.unwrap().line, 1);
//! ```

pub mod lexer;
mod parser;

use crate::ast::Value;
use crate::engine::{ParseEngine, Position, SyntaxError};
use chumsky::input::Input as _;
use chumsky::prelude::*;

use lexer::Token;

/// The bundled mini parse engine.
pub struct MiniLang;

impl ParseEngine for MiniLang {
    fn name(&self) -> &str {
        "mini"
    }

    fn parse(&self, source: &str) -> Result<Value, SyntaxError> {
        parse(source)
    }
}

/// Parse mini source into an AST value.
///
/// All-or-nothing: the first lexer or parser error wins and no partial tree
/// is returned.
pub fn parse(source: &str) -> Result<Value, SyntaxError> {
    // Phase 1: lexical analysis
    let tokens = lexer::lexer()
        .parse(source)
        .into_result()
        .map_err(|errs| lexer_error(source, &errs))?;

    // Phase 2: token-based parsing. The result is bound to a local so the
    // borrow of `tokens` held by the raw parse errors ends before `tokens`
    // goes out of scope.
    let eoi_span = lexer::Span::new((), source.len()..source.len());
    let token_stream = tokens.as_slice().split_token_span(eoi_span);
    let result = parser::program()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| parser_error(source, &errs));
    result
}

/// Convert a character offset to (line, column) - both 1-indexed.
fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn syntax_error_at(source: &str, start: usize, end: usize, message: String) -> SyntaxError {
    let (line, column) = offset_to_line_col(source, start);
    SyntaxError {
        message,
        position: Some(Position {
            line,
            column,
            offset: Some(start),
        }),
        span: Some(start..end),
    }
}

/// Normalize the first lexer error.
fn lexer_error(source: &str, errors: &[Rich<'_, char, lexer::Span>]) -> SyntaxError {
    match errors.first() {
        Some(err) => {
            let span = err.span();
            syntax_error_at(source, span.start, span.end, format!("{}", err.reason()))
        }
        None => SyntaxError::new("unknown lexer error"),
    }
}

/// Normalize the first parser error: what was found, then what was expected.
fn parser_error(source: &str, errors: &[Rich<'_, Token<'_>, lexer::Span>]) -> SyntaxError {
    let Some(err) = errors.first() else {
        return SyntaxError::new("unknown parse error");
    };

    let found = match err.found() {
        Some(tok) => format!("found '{}'", tok),
        None => "found end of input".to_string(),
    };

    let expected: Vec<String> = err.expected().map(|e| format!("{}", e)).collect();
    let expected_str = if expected.is_empty() {
        String::new()
    } else if expected.len() == 1 {
        format!(", expected {}", expected[0])
    } else {
        format!(", expected one of: {}", expected.join(", "))
    };

    let span = err.span();
    syntax_error_at(source, span.start, span.end, format!("{}{}", found, expected_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse_with;

    #[test]
    fn test_engine_contract() {
        let ast = parse_with(&MiniLang, "let x = 1;").unwrap();
        assert_eq!(ast.as_node().unwrap().kind, "Program");
    }

    #[test]
    fn test_offset_to_line_col() {
        let source = "let a = 1;\nlet b = 2;";
        assert_eq!(offset_to_line_col(source, 0), (1, 1));
        assert_eq!(offset_to_line_col(source, 4), (1, 5));
        assert_eq!(offset_to_line_col(source, 11), (2, 1));
        assert_eq!(offset_to_line_col(source, 15), (2, 5));
    }

    #[test]
    fn test_whitespace_and_comments_parse_as_empty_program() {
        let ast = parse("  \n// nothing here\n\t").unwrap();
        let node = ast.as_node().unwrap();
        assert_eq!(node.kind, "Program");
        assert_eq!(node.fields["body"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_over_range_number_is_a_syntax_error() {
        let source = format!("let n = {};", "9".repeat(400));
        let err = parse(&source).unwrap_err();
        assert!(err.message.contains("out of range"), "message was: {}", err.message);
        assert!(err.position.is_some());
    }

    #[test]
    fn test_error_mentions_expected() {
        let err = parse("let x 1;").unwrap_err();
        assert!(err.message.contains("found '1'"), "message was: {}", err.message);
    }
}

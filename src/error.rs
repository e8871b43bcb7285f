//! Error taxonomy and diagnostic reporting.
//!
//! Three error classes cover every way an invocation can fail, and each maps
//! to its own exit code so calling scripts can branch on failure kind without
//! parsing message text:
//!
//! | Class | Meaning | Exit code |
//! |-------|---------|-----------|
//! | [`Error::Syntax`] | input does not conform to the grammar | 1 |
//! | [`Error::Io`] | source file missing, unreadable, or not UTF-8 | 2 |
//! | [`Error::Serialize`] | internal-consistency fault in the tool | 3 |
//!
//! Syntax errors with a span are rendered through [`ErrorReporter`], which
//! uses [ariadne](https://crates.io/crates/ariadne) for context-aware
//! reports; everything else is a single plain line on stderr. Every failure
//! path produces exactly one diagnostic and one exit code.

use crate::engine::SyntaxError;
use crate::json::SerializeError;
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for an `ast2json` invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be loaded.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// Path the loader was asked to read.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },
    /// The input does not conform to the grammar. Expected, user-facing.
    #[error("{error}")]
    Syntax {
        /// Path of the offending file, for the report header.
        path: PathBuf,
        /// Full source text, kept for diagnostic rendering.
        source_text: String,
        /// The normalized engine failure.
        error: SyntaxError,
    },
    /// Serialization failed. Should be unreachable with a correct engine.
    #[error("internal error: {0}")]
    Serialize(#[from] SerializeError),
}

impl Error {
    /// The process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Syntax { .. } => 1,
            Error::Io { .. } => 2,
            Error::Serialize(_) => 3,
        }
    }

    /// Print the single diagnostic for this error to stderr.
    pub fn report(&self) {
        match self {
            Error::Syntax {
                path,
                source_text,
                error,
            } => {
                ErrorReporter::new(path.display().to_string(), source_text)
                    .report_syntax_error(error);
            }
            other => eprintln!("error: {other}"),
        }
    }
}

/// Error reporter that uses ariadne for pretty syntax-error output.
pub struct ErrorReporter<'src> {
    source_name: String,
    source: &'src str,
}

impl<'src> ErrorReporter<'src> {
    /// Create a reporter for one source file.
    pub fn new(source_name: impl Into<String>, source: &'src str) -> Self {
        Self {
            source_name: source_name.into(),
            source,
        }
    }

    /// Report a syntax error to stderr.
    ///
    /// Falls back to a plain line when the engine supplied no span to point
    /// at.
    pub fn report_syntax_error(&self, error: &SyntaxError) {
        let Some(span) = error.span.clone() else {
            eprintln!("{}: {}", self.source_name, error);
            return;
        };

        let mut report = Report::build(ReportKind::Error, &self.source_name, span.start)
            .with_message(&error.message);

        report = report.with_label(
            Label::new((&self.source_name, span))
                .with_color(Color::Red)
                .with_message("here"),
        );

        if let Some(pos) = error.position {
            report = report.with_note(format!("at line {}, column {}", pos.line, pos.column));
        }

        report
            .finish()
            .eprint((&self.source_name, Source::from(self.source)))
            .unwrap();
    }
}

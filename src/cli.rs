//! The ast2json command-line interface.
//!
//! One invocation is a strict three-stage pipeline: load the source file,
//! parse it through the engine boundary, serialize the AST to the output
//! stream. Any failure short-circuits straight to error reporting — later
//! stages never run, and nothing reaches stdout on a load or parse failure.
//!
//! Exit codes are documented on [`crate::error::Error::exit_code`].

use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::ast::Value;
use crate::engine::parse_with;
use crate::error::Error;
use crate::json::{self, SerializeError};
use crate::mini::MiniLang;

/// The CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "ast2json",
    version,
    about = "Parse a source file and emit its AST as a JSON document on stdout."
)]
pub struct Cli {
    /// Path to the source file to parse.
    pub file: PathBuf,

    /// Pretty-print the JSON document.
    #[arg(long)]
    pub pretty: bool,

    /// Write the document to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Run the pipeline for one invocation.
pub fn run(cli: &Cli) -> Result<(), Error> {
    // Stage 1: load. The whole file comes into memory before parsing;
    // read_to_string also rejects non-UTF-8 content as InvalidData.
    let source = fs::read_to_string(&cli.file).map_err(|source| Error::Io {
        path: cli.file.clone(),
        source,
    })?;

    // Stage 2: parse, through the engine boundary.
    let ast = parse_with(&MiniLang, &source).map_err(|error| Error::Syntax {
        path: cli.file.clone(),
        source_text: source.clone(),
        error,
    })?;

    // Stage 3: serialize to the configured destination.
    match &cli.out {
        Some(path) => {
            let file = fs::File::create(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            write_document(BufWriter::new(file), &ast, cli.pretty)?;
        }
        None => {
            write_document(BufWriter::new(io::stdout().lock()), &ast, cli.pretty)?;
        }
    }

    Ok(())
}

/// Stream one JSON document plus a trailing newline, then flush.
fn write_document<W: Write>(mut writer: W, ast: &Value, pretty: bool) -> Result<(), Error> {
    if pretty {
        json::to_writer_pretty(&mut writer, ast)?;
    } else {
        json::to_writer(&mut writer, ast)?;
    }
    writer.write_all(b"\n").map_err(SerializeError::from)?;
    writer.flush().map_err(SerializeError::from)?;
    Ok(())
}

use ast2json::cli::{run, Cli};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        err.report();
        process::exit(err.exit_code());
    }
}

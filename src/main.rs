//! Command-line entry point: read a source file, run it, exit with the
//! code the interpretation result maps to.

use std::fs;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use tinylang::error::FatalError;
use tinylang::vm::Vm;
use tracing_subscriber::EnvFilter;

/// A small bytecode interpreter.
#[derive(ClapParser, Debug)]
#[command(version, about)]
struct Cli {
    /// Source file to run.
    path: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match read_source(&cli.path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(74);
        }
    };

    let mut vm = Vm::new();
    let result = vm.interpret(&source);
    ExitCode::from(result.exit_code() as u8)
}

fn read_source(path: &str) -> Result<String, FatalError> {
    fs::read_to_string(path).map_err(|source| FatalError::FileOpen { path: path.to_string(), source })
}

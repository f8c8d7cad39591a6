//! Error types and the exit-code convention (spec §7). Static errors are
//! collected during compilation; runtime errors abort the dispatch loop
//! at the first one; fatal errors come from outside the language itself
//! (file I/O, allocation failure).

use std::io;

use thiserror::Error;

/// A single compile-time diagnostic (spec §4.5 "error_at"). The compiler
/// collects these instead of stopping at the first one.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] Error: {message}")]
pub struct StaticError {
    pub line: usize,
    pub message: String,
}

impl StaticError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }

    pub fn report(&self) {
        eprintln!("{}", self);
    }
}

/// Errors the dispatch loop can raise while executing a chunk (spec §4.6
/// "Runtime errors").
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("[line {line}] Error: {message}")]
    TypeMismatch { line: usize, message: String },

    #[error("[line {line}] Error: undefined variable '{name}'")]
    UndefinedGlobal { line: usize, name: String },

    #[error("[line {line}] Error: assignment to undeclared variable '{name}'")]
    UndeclaredAssignment { line: usize, name: String },

    #[error("[line {line}] Error: nothing on the stack to print")]
    NothingToPrint { line: usize },

    #[error("stack underflow")]
    StackUnderflow,
}

impl RuntimeError {
    pub fn report(&self) {
        eprintln!("{}", self);
    }
}

/// Errors that originate outside the language pipeline entirely (spec §7
/// exit code 74).
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("could not open '{path}': {source}")]
    FileOpen { path: String, source: io::Error },

    #[error("out of memory")]
    OutOfMemory,
}

/// The outcome of [`crate::vm::Vm::interpret`], mapped to the process exit
/// code the binary returns (spec §7 "Exit codes").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

impl InterpretResult {
    pub fn exit_code(&self) -> i32 {
        match self {
            InterpretResult::Ok => 0,
            InterpretResult::CompileError => 65,
            InterpretResult::RuntimeError => 70,
        }
    }
}

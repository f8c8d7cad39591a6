//! The virtual machine. Holds the chunk being executed, the instruction
//! pointer, the value stack, the heap-object chain, and the two hash
//! tables (globals and the reserved string pool).

mod run;

use std::rc::Rc;

use crate::chunk::Chunk;
use crate::compiler;
use crate::error::{InterpretResult, RuntimeError, StaticError};
use crate::stack::Stack;
use crate::table::Table;
use crate::value::ObjString;

/// Owns every heap allocation and both hash tables the compiler and the
/// dispatch loop touch. The compiler borrows this mutably for the
/// duration of `interpret` so that strings it interns become visible on
/// the same object chain the VM will later execute against and free —
/// see DESIGN.md's note on allocator ownership.
pub struct Vm {
    /// Every `ObjString` ever allocated, in allocation order. Dropped as a
    /// whole when the `Vm` is dropped — there is no GC, only teardown.
    objects: Vec<Rc<ObjString>>,
    /// Reserved for string interning: not consulted by allocation today,
    /// but present so a future interning pass has somewhere to live
    /// without changing the VM's shape.
    strings: Table,
    globals: Table,
    stack: Stack,
}

impl Vm {
    pub fn new() -> Self {
        Self { objects: Vec::new(), strings: Table::new(), globals: Table::new(), stack: Stack::new() }
    }

    /// Allocates a new heap string, links it into the object chain, and
    /// returns a handle to it. The returned `Rc` is what both the
    /// constants pool and the running stack hold on to.
    pub fn allocate_string(&mut self, chars: impl Into<String>) -> Rc<ObjString> {
        let obj = Rc::new(ObjString::new(chars));
        self.objects.push(Rc::clone(&obj));
        obj
    }

    pub fn globals(&self) -> &Table {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut Table {
        &mut self.globals
    }

    #[cfg(test)]
    pub fn strings_mut(&mut self) -> &mut Table {
        &mut self.strings
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Compiles `source`, then — if compilation produced no errors — runs
    /// the resulting chunk. The VM never runs a chunk that failed to
    /// compile.
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        let tokens = crate::scanner::scan_tokens(source);
        let mut chunk = Chunk::new();

        let errors = compiler::compile(self, &tokens, &mut chunk);
        if !errors.is_empty() {
            for err in &errors {
                err.report();
            }
            return InterpretResult::CompileError;
        }

        match self.run(&chunk) {
            Ok(()) => InterpretResult::Ok,
            Err(err) => {
                err.report();
                InterpretResult::RuntimeError
            }
        }
    }

    /// Used by tests that want a chunk compiled without immediately
    /// executing it, and by the runtime dispatch loop's error reporting.
    pub fn compile_only(&mut self, source: &str) -> Result<Chunk, Vec<StaticError>> {
        let tokens = crate::scanner::scan_tokens(source);
        let mut chunk = Chunk::new();
        let errors = compiler::compile(self, &tokens, &mut chunk);
        if errors.is_empty() {
            Ok(chunk)
        } else {
            Err(errors)
        }
    }

    pub fn run_chunk(&mut self, chunk: &Chunk) -> Result<(), RuntimeError> {
        self.run(chunk)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

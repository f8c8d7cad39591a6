//! The single-pass Pratt compiler: walks the token list once, emitting
//! bytecode directly into a [`Chunk`] as it goes — there is no
//! intermediate AST. Forward jumps are emitted with a placeholder offset
//! and patched once the target address is known; backward jumps (loops)
//! are computed immediately since the target already exists.

mod expressions;
mod precedence;
mod statements;

use std::rc::Rc;

use crate::chunk::{Chunk, OpCode};
use crate::error::StaticError;
use crate::token::{Token, TokenKind};
use crate::vm::Vm;

pub(crate) use precedence::{get_rule, Precedence};

/// Holds the compiler's cursor over the token stream plus everything it
/// needs to emit bytecode and allocate heap strings: the target chunk and
/// a mutable handle to the VM that will eventually execute it (see
/// DESIGN.md on why allocations must flow through the same VM, not a
/// detached object chain).
pub(crate) struct Parser<'a> {
    tokens: Vec<Rc<Token>>,
    pos: usize,
    pub(crate) previous: Rc<Token>,
    pub(crate) current: Rc<Token>,
    had_error: bool,
    panic_mode: bool,
    errors: Vec<StaticError>,
    pub(crate) vm: &'a mut Vm,
    pub(crate) chunk: &'a mut Chunk,
}

impl<'a> Parser<'a> {
    fn new(tokens: &[Token], vm: &'a mut Vm, chunk: &'a mut Chunk) -> Self {
        let tokens: Vec<Rc<Token>> = tokens.iter().cloned().map(Rc::new).collect();
        let sentinel = Rc::new(Token::new(TokenKind::ERROR, "", crate::token::Literal::None, 0));
        Self {
            tokens,
            pos: 0,
            previous: Rc::clone(&sentinel),
            current: sentinel,
            had_error: false,
            panic_mode: false,
            errors: Vec::new(),
            vm,
            chunk,
        }
    }

    /// Advances past any run of `ERROR` tokens the scanner produced,
    /// reporting each one, then lands on the next real token.
    pub(crate) fn advance(&mut self) {
        self.previous = Rc::clone(&self.current);

        loop {
            // Once the cursor has consumed the `END` token, stay put: a
            // trailing `consume(END, ...)` still calls `advance` once
            // more, and must not walk off the end of the token list.
            let index = self.pos.min(self.tokens.len() - 1);
            self.current = Rc::clone(&self.tokens[index]);
            self.pos = (index + 1).min(self.tokens.len());

            if self.current.kind != TokenKind::ERROR {
                break;
            }
            let message = self.current.lexeme.clone();
            self.error_at_current(&message);
            if index + 1 >= self.tokens.len() {
                break;
            }
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(crate) fn panic_mode(&self) -> bool {
        self.panic_mode
    }

    pub(crate) fn clear_panic_mode(&mut self) {
        self.panic_mode = false;
    }

    pub(crate) fn chunk_len(&self) -> usize {
        self.chunk.len()
    }

    pub(crate) fn matches(&mut self, kind: TokenKind) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
            return;
        }
        self.error_at_current(message);
    }

    fn error_at_current(&mut self, message: &str) {
        self.error_at(&Rc::clone(&self.current), message);
    }

    pub(crate) fn error_at_previous(&mut self, message: &str) {
        self.error_at(&Rc::clone(&self.previous), message);
    }

    fn error_at(&mut self, token: &Token, message: &str) {
        self.had_error = true;
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.errors.push(StaticError::new(token.line, message));
    }

    pub(crate) fn emit_byte(&mut self, byte: u8) {
        let line = self.previous.line;
        self.chunk.write(byte, line);
    }

    pub(crate) fn emit_op(&mut self, op: OpCode) {
        self.emit_byte(op.into());
    }

    pub(crate) fn emit_ops(&mut self, a: OpCode, b: OpCode) {
        self.emit_op(a);
        self.emit_op(b);
    }

    pub(crate) fn emit_constant(&mut self, value: crate::value::Value) {
        let index = self.chunk.add_constant(value);
        self.emit_op(OpCode::OP_CONSTANT);
        self.emit_byte(index);
    }

    fn emit_return(&mut self) {
        self.emit_op(OpCode::OP_RETURN);
    }

    /// Emits `instruction` followed by a two-byte placeholder and returns
    /// the index of the placeholder's first byte, for [`Self::patch_jump`]
    /// to fill in once the jump target is known.
    pub(crate) fn emit_jump(&mut self, instruction: OpCode) -> usize {
        self.emit_op(instruction);
        self.emit_byte(0xff);
        self.emit_byte(0xff);
        self.chunk.len() - 2
    }

    pub(crate) fn patch_jump(&mut self, placeholder_index: usize) {
        let offset = self.chunk.len() - placeholder_index - 2;
        self.chunk.patch_jump(placeholder_index, offset as u16);
    }

    /// Emits `OP_LOOP` with the backward offset needed to land back at
    /// `loop_start` (spec §4.5 "while": `chunk.count + 2 - loop_start`).
    pub(crate) fn emit_loop(&mut self, loop_start: usize) {
        self.emit_op(OpCode::OP_LOOP);
        let offset = self.chunk.len() + 2 - loop_start;
        self.emit_byte((offset >> 8) as u8);
        self.emit_byte((offset & 0xff) as u8);
    }

    /// Interns the current token's lexeme as a string constant, used for
    /// both variable declarations and variable references (spec §4.5
    /// "variable").
    pub(crate) fn identifier_constant(&mut self, name: &str) -> u8 {
        let obj = self.vm.allocate_string(name);
        self.chunk.add_constant(crate::value::Value::Obj(obj))
    }
}

/// Compiles `tokens` into `chunk`. Returns the list of static errors found;
/// an empty list means compilation succeeded and `chunk` is ready to run
/// (spec §4.5 `compile`).
pub fn compile(vm: &mut Vm, tokens: &[Token], chunk: &mut Chunk) -> Vec<StaticError> {
    let mut parser = Parser::new(tokens, vm, chunk);

    parser.advance();
    while !parser.check(TokenKind::END) {
        statements::declaration(&mut parser);
    }
    parser.consume(TokenKind::END, "expected end of input");
    parser.emit_return();

    parser.errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_tokens;

    fn compile_source(src: &str) -> (Chunk, Vec<StaticError>) {
        let mut vm = Vm::new();
        let mut chunk = Chunk::new();
        let tokens = scan_tokens(src);
        let errors = compile(&mut vm, &tokens, &mut chunk);
        (chunk, errors)
    }

    #[test]
    fn missing_expression_is_a_compile_error() {
        let (_, errors) = compile_source("var x = ;");
        assert!(!errors.is_empty());
    }

    #[test]
    fn well_formed_program_compiles_clean() {
        let (_, errors) = compile_source("print 1 + 2;");
        assert!(errors.is_empty());
    }

    /// Compiles then runs an `if`/`while` program through the real emitter
    /// (not a hand-built chunk), checking the jump placeholders it patches
    /// actually land execution where they should (spec §8 invariant 5).
    #[test]
    fn if_and_while_jumps_execute_to_completion() {
        let mut vm = Vm::new();
        let mut chunk = Chunk::new();
        let tokens = scan_tokens(
            "var i = 0; \
             while (i < 3) { \
                 if (i == 1) { i = i + 2; } else { i = i + 1; } \
             } \
             print i;",
        );
        let errors = compile(&mut vm, &tokens, &mut chunk);
        assert!(errors.is_empty());
        vm.run_chunk(&chunk).expect("well-formed control flow should run to OP_RETURN");
    }

    #[test]
    fn bare_expression_statement_needs_no_expr_keyword() {
        let (_, errors) = compile_source("var x = 1; x = x + 1; print x;");
        assert!(errors.is_empty());
    }

    #[test]
    fn expr_keyword_is_accepted_before_a_bare_expression() {
        let (_, errors) = compile_source("var x = 1; expr x = x + 1; print x;");
        assert!(errors.is_empty());
    }
}

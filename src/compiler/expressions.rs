//! Expression compilation: the Pratt driver and each prefix/infix handler.

use super::precedence::{get_rule, ParseFn, Precedence};
use super::Parser;
use crate::chunk::OpCode;
use crate::token::{Literal, TokenKind};
use crate::value::Value;

pub(crate) fn expression(parser: &mut Parser) {
    parse_precedence(parser, Precedence::ASSIGNMENT);
}

/// Advances one token, invokes its prefix handler, then keeps consuming
/// infix operators whose precedence is at least `min_prec`.
pub(crate) fn parse_precedence(parser: &mut Parser, min_prec: Precedence) {
    parser.advance();
    let prefix = get_rule(parser.previous.kind).prefix;
    match prefix {
        ParseFn::None => {
            parser.error_at_previous("expected expression");
            return;
        }
        other => call_parse_fn(parser, other),
    }

    while min_prec <= get_rule(parser.current.kind).precedence {
        parser.advance();
        let infix = get_rule(parser.previous.kind).infix;
        call_parse_fn(parser, infix);
    }
}

fn call_parse_fn(parser: &mut Parser, f: ParseFn) {
    match f {
        ParseFn::None => {}
        ParseFn::Grouping => grouping(parser),
        ParseFn::Unary => unary(parser),
        ParseFn::Binary => binary(parser),
        ParseFn::Literal => literal(parser),
        ParseFn::Variable => variable(parser),
    }
}

fn grouping(parser: &mut Parser) {
    expression(parser);
    parser.consume(TokenKind::RIGHT_PAREN, "expected ')' after expression");
}

fn unary(parser: &mut Parser) {
    let operator = parser.previous.kind;
    parse_precedence(parser, Precedence::UNARY);

    match operator {
        TokenKind::MINUS => parser.emit_op(OpCode::OP_NEGATE),
        TokenKind::BANG => parser.emit_op(OpCode::OP_NOT),
        _ => unreachable!("unary() called with a non-unary operator token"),
    }
}

fn binary(parser: &mut Parser) {
    let operator = parser.previous.kind;
    let rule = get_rule(operator);
    parse_precedence(parser, rule.precedence.next());

    match operator {
        TokenKind::PLUS => parser.emit_op(OpCode::OP_ADD),
        TokenKind::MINUS => parser.emit_op(OpCode::OP_SUBTRACT),
        TokenKind::STAR => parser.emit_op(OpCode::OP_MULTIPLY),
        TokenKind::SLASH => parser.emit_op(OpCode::OP_DIVIDE),
        TokenKind::PERCENT => parser.emit_op(OpCode::OP_MOD),
        TokenKind::EQUAL_EQUAL => parser.emit_op(OpCode::OP_EQUAL),
        TokenKind::BANG_EQUAL => parser.emit_ops(OpCode::OP_EQUAL, OpCode::OP_NOT),
        TokenKind::LESS => parser.emit_op(OpCode::OP_LESS),
        TokenKind::LESS_EQUAL => parser.emit_ops(OpCode::OP_GREATER, OpCode::OP_NOT),
        TokenKind::GREATER => parser.emit_op(OpCode::OP_GREATER),
        TokenKind::GREATER_EQUAL => parser.emit_ops(OpCode::OP_LESS, OpCode::OP_NOT),
        _ => unreachable!("binary() called with a non-binary operator token"),
    }
}

fn literal(parser: &mut Parser) {
    match parser.previous.kind {
        TokenKind::NUMBER => {
            let value = match &parser.previous.literal {
                Literal::Number(n) => *n,
                _ => unreachable!("NUMBER token without a numeric literal payload"),
            };
            parser.emit_constant(Value::Number(value));
        }
        TokenKind::TRUE => parser.emit_op(OpCode::OP_TRUE),
        TokenKind::FALSE => parser.emit_op(OpCode::OP_FALSE),
        TokenKind::NIL => parser.emit_op(OpCode::OP_NIL),
        TokenKind::STRING => {
            let text = parser.previous.lexeme.clone();
            let obj = parser.vm.allocate_string(text);
            parser.emit_constant(Value::Obj(obj));
        }
        _ => unreachable!("literal() called with a non-literal token"),
    }
}

/// Compiles a variable reference or assignment: `IDENT` alone emits
/// `OP_GET_GLOBAL`; `IDENT = expr` compiles the right-hand side and emits
/// `OP_SET_GLOBAL`.
fn variable(parser: &mut Parser) {
    let name = parser.previous.lexeme.clone();
    let arg = parser.identifier_constant(&name);

    if parser.matches(TokenKind::EQUAL) {
        expression(parser);
        parser.emit_op(OpCode::OP_SET_GLOBAL);
        parser.emit_byte(arg);
    } else {
        parser.emit_op(OpCode::OP_GET_GLOBAL);
        parser.emit_byte(arg);
    }
}

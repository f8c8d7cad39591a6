//! The operator-precedence ladder and the per-token parse rule table that
//! drives the Pratt parser (spec §4.5 "Operator precedence ladder",
//! "Parse rule table"). Modeled as a `match` over the token kind rather
//! than open-ended dispatch, per DESIGN.md's note on dynamic dispatch over
//! token kinds.

use crate::token::TokenKind;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    NONE,
    ASSIGNMENT, // =
    OR,
    AND,
    EQUALITY,   // == !=
    COMPARISON, // < > <= >=
    TERM,       // + -
    FACTOR,     // * /
    UNARY,      // ! -
    CALL,
    PRIMARY,
}

impl Precedence {
    /// The next tighter precedence level, used by `binary` to parse its
    /// right operand left-associatively (spec §4.5 `operator_precedence + 1`).
    pub(crate) fn next(self) -> Precedence {
        use Precedence::*;
        match self {
            NONE => ASSIGNMENT,
            ASSIGNMENT => OR,
            OR => AND,
            AND => EQUALITY,
            EQUALITY => COMPARISON,
            COMPARISON => TERM,
            TERM => FACTOR,
            FACTOR => UNARY,
            UNARY => CALL,
            CALL => PRIMARY,
            PRIMARY => PRIMARY,
        }
    }
}

/// A parse-function slot: either no handler, or one of the fixed set the
/// compiler implements (spec's §9 note: a static table, not subclassing).
#[derive(Clone, Copy)]
pub(crate) enum ParseFn {
    None,
    Grouping,
    Unary,
    Binary,
    Literal,
    Variable,
}

#[derive(Clone, Copy)]
pub(crate) struct ParseRule {
    pub prefix: ParseFn,
    pub infix: ParseFn,
    pub precedence: Precedence,
}

const fn rule(prefix: ParseFn, infix: ParseFn, precedence: Precedence) -> ParseRule {
    ParseRule { prefix, infix, precedence }
}

/// Looks up the `{prefix, infix, precedence}` rule for `kind` (spec §4.5
/// "Parse rule table").
pub(crate) fn get_rule(kind: TokenKind) -> ParseRule {
    use ParseFn::*;
    use Precedence::*;
    use TokenKind::*;

    match kind {
        LEFT_PAREN => rule(Grouping, None, Precedence::NONE),
        MINUS => rule(Unary, Binary, TERM),
        BANG => rule(Unary, ParseFn::None, Precedence::NONE),
        PLUS => rule(ParseFn::None, Binary, TERM),
        PERCENT => rule(ParseFn::None, Binary, TERM),
        STAR => rule(ParseFn::None, Binary, FACTOR),
        SLASH => rule(ParseFn::None, Binary, FACTOR),
        EQUAL_EQUAL => rule(ParseFn::None, Binary, EQUALITY),
        BANG_EQUAL => rule(ParseFn::None, Binary, EQUALITY),
        LESS => rule(ParseFn::None, Binary, COMPARISON),
        LESS_EQUAL => rule(ParseFn::None, Binary, COMPARISON),
        GREATER => rule(ParseFn::None, Binary, COMPARISON),
        GREATER_EQUAL => rule(ParseFn::None, Binary, COMPARISON),
        NUMBER | TRUE | FALSE | NIL | STRING => rule(Literal, ParseFn::None, Precedence::NONE),
        IDENTIFIER => rule(Variable, ParseFn::None, Precedence::NONE),
        _ => rule(ParseFn::None, ParseFn::None, Precedence::NONE),
    }
}

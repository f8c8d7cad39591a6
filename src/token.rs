//! Token shapes produced by the scanner (spec §3 "Token", "TokenList").

/// Every distinct token the scanner can produce (spec §4.1).
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Single-character tokens.
    SEMICOLON,
    EQUAL,
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    MINUS,
    PLUS,
    SLASH,
    STAR,
    PERCENT,
    BANG,
    LESS,
    GREATER,

    // Two-character operators.
    EQUAL_EQUAL,
    BANG_EQUAL,
    LESS_EQUAL,
    GREATER_EQUAL,

    // Literals.
    NUMBER,
    STRING,
    IDENTIFIER,

    // Keywords.
    VAR,
    FALSE,
    TRUE,
    IF,
    ELSE,
    NIL,
    RETURN,
    PRINT,
    WHILE,
    EXPR,

    ERROR,
    END,
}

/// The literal payload a token carries, if any (spec §3 "Token": "literal
/// payload (one of int/string/bool/none)").
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
    Bool(bool),
    None,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Literal,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: Literal, line: usize) -> Self {
        Self { kind, lexeme: lexeme.into(), literal, line }
    }
}

/// Maps an identifier's lexeme to its keyword token kind, or `None` if it
/// is a plain identifier (spec §4.1's "small fixed keyword table").
pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    use TokenKind::*;
    match ident {
        "var" => Some(VAR),
        "False" => Some(FALSE),
        "True" => Some(TRUE),
        "if" => Some(IF),
        "else" => Some(ELSE),
        "nil" => Some(NIL),
        "return" => Some(RETURN),
        "print" => Some(PRINT),
        "while" => Some(WHILE),
        "expr" => Some(EXPR),
        _ => None,
    }
}

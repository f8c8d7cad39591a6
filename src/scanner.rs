//! The lexical scanner. Kept deliberately terse relative to the compiler
//! and the VM — its job is purely clerical. Produces the full token list
//! up front rather than token-by-token, since nothing downstream needs
//! streaming.
//!
//! Lexical mistakes (an unterminated string, an overlong literal, a stray
//! character) are not fatal to scanning: an `ERROR` token is spliced into
//! the stream with the problem as its lexeme, scanning continues, and the
//! parser reports it the same way it reports any other syntax error, so a
//! single source file can surface more than one lexical mistake per run.

use crate::config::MAX_LEXEME_LEN;
use crate::token::{keyword_kind, Literal, Token, TokenKind};

pub struct Scanner<'a> {
    source: &'a [u8],
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source: source.as_bytes(), start: 0, current: 0, line: 1 }
    }

    /// Scans the entire source into a token list terminated by `END`.
    pub fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            self.start = self.current;

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::END, "", Literal::None, self.line));
                return tokens;
            }

            tokens.push(self.scan_token());
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> u8 {
        if self.current + 1 >= self.source.len() {
            0
        } else {
            self.source[self.current + 1]
        }
    }

    fn advance(&mut self) -> u8 {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.peek() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn lexeme(&self) -> String {
        String::from_utf8_lossy(&self.source[self.start..self.current]).into_owned()
    }

    fn make(&self, kind: TokenKind, literal: Literal) -> Token {
        Token::new(kind, self.lexeme(), literal, self.line)
    }

    fn error(&self, message: &str) -> Token {
        Token::new(TokenKind::ERROR, message, Literal::None, self.line)
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' => {
                    self.advance();
                }
                b'\n' => {
                    self.line += 1;
                    self.advance();
                }
                _ => return,
            }
        }
    }

    fn scan_token(&mut self) -> Token {
        let c = self.advance();

        if c.is_ascii_alphabetic() || c == b'_' {
            return self.identifier();
        }
        if c.is_ascii_digit() {
            return self.number();
        }

        match c {
            b';' => self.make(TokenKind::SEMICOLON, Literal::None),
            b'(' => self.make(TokenKind::LEFT_PAREN, Literal::None),
            b')' => self.make(TokenKind::RIGHT_PAREN, Literal::None),
            b'{' => self.make(TokenKind::LEFT_BRACE, Literal::None),
            b'}' => self.make(TokenKind::RIGHT_BRACE, Literal::None),
            b'-' => self.make(TokenKind::MINUS, Literal::None),
            b'+' => self.make(TokenKind::PLUS, Literal::None),
            b'/' => self.make(TokenKind::SLASH, Literal::None),
            b'*' => self.make(TokenKind::STAR, Literal::None),
            b'%' => self.make(TokenKind::PERCENT, Literal::None),
            b'!' => {
                if self.matches(b'=') {
                    self.make(TokenKind::BANG_EQUAL, Literal::None)
                } else {
                    self.make(TokenKind::BANG, Literal::None)
                }
            }
            b'=' => {
                if self.matches(b'=') {
                    self.make(TokenKind::EQUAL_EQUAL, Literal::None)
                } else {
                    self.make(TokenKind::EQUAL, Literal::None)
                }
            }
            b'<' => {
                if self.matches(b'=') {
                    self.make(TokenKind::LESS_EQUAL, Literal::None)
                } else {
                    self.make(TokenKind::LESS, Literal::None)
                }
            }
            b'>' => {
                if self.matches(b'=') {
                    self.make(TokenKind::GREATER_EQUAL, Literal::None)
                } else {
                    self.make(TokenKind::GREATER, Literal::None)
                }
            }
            b'"' => self.string(),
            _ => self.error("unexpected character"),
        }
    }

    fn identifier(&mut self) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }

        let text = self.lexeme();
        match keyword_kind(&text) {
            Some(TokenKind::TRUE) => self.make(TokenKind::TRUE, Literal::Bool(true)),
            Some(TokenKind::FALSE) => self.make(TokenKind::FALSE, Literal::Bool(false)),
            Some(kind) => self.make(kind, Literal::None),
            None => self.make(TokenKind::IDENTIFIER, Literal::None),
        }
    }

    fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.current - self.start > MAX_LEXEME_LEN {
            return self.error("number literal too long");
        }

        let text = self.lexeme();
        let value: f64 = text.parse().unwrap_or(0.0);
        self.make(TokenKind::NUMBER, Literal::Number(value))
    }

    fn string(&mut self) -> Token {
        let content_start = self.current;
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return self.error("unterminated string");
        }

        let content_len = self.current - content_start;
        if content_len == 0 {
            self.advance(); // consume closing quote before returning
            return self.error("empty string literal");
        }
        if content_len > MAX_LEXEME_LEN {
            self.advance();
            return self.error("string literal too long");
        }

        let content =
            String::from_utf8_lossy(&self.source[content_start..self.current]).into_owned();
        self.advance(); // consume closing quote
        Token::new(TokenKind::STRING, content.clone(), Literal::Str(content), self.line)
    }
}

/// Scans `source` into a complete, `END`-terminated token list.
pub fn scan_tokens(source: &str) -> Vec<Token> {
    Scanner::new(source).scan()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        scan_tokens(src).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn ends_with_end_token() {
        assert_eq!(kinds(""), vec![TokenKind::END]);
    }

    #[test]
    fn two_char_operators_are_single_tokens() {
        assert_eq!(
            kinds("== != <= >="),
            vec![
                TokenKind::EQUAL_EQUAL,
                TokenKind::BANG_EQUAL,
                TokenKind::LESS_EQUAL,
                TokenKind::GREATER_EQUAL,
                TokenKind::END
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        let toks = scan_tokens("var foo True False");
        assert_eq!(toks[0].kind, TokenKind::VAR);
        assert_eq!(toks[1].kind, TokenKind::IDENTIFIER);
        assert_eq!(toks[2].kind, TokenKind::TRUE);
        assert_eq!(toks[3].kind, TokenKind::FALSE);
    }

    #[test]
    fn return_is_its_own_keyword() {
        assert_eq!(scan_tokens("return").first().unwrap().kind, TokenKind::RETURN);
    }

    #[test]
    fn unterminated_string_is_an_error_token() {
        assert_eq!(kinds("\"abc"), vec![TokenKind::ERROR, TokenKind::END]);
    }

    #[test]
    fn empty_string_is_an_error_token() {
        assert_eq!(kinds("\"\""), vec![TokenKind::ERROR, TokenKind::END]);
    }

    #[test]
    fn newline_advances_line_counter() {
        let toks = scan_tokens("var\nfoo");
        assert_eq!(toks[0].line, 1);
        assert_eq!(toks[1].line, 2);
    }

    #[test]
    fn number_literal_carries_its_value() {
        let toks = scan_tokens("123");
        assert_eq!(toks[0].literal, Literal::Number(123.0));
    }
}

//! Lexer (tokenizer) for the object-expression language.
//!
//! A single linear scan with no escaping and no lookahead beyond one byte.
//! The parser works on the finished token slice, so [`tokenize`] runs the
//! lexer to completion up front.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// The lexer state.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    /// Current byte position.
    pos: usize,
    /// Start position of the current token.
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            token_start: 0,
        }
    }

    /// Get the next token. Returns `Eof` forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();
        self.token_start = self.pos;

        if self.is_eof() {
            return self.make_token(TokenKind::Eof);
        }

        let ch = self.current();
        let kind = match ch {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_name(),
            b'0'..=b'9' => self.scan_int(),
            _ => match TokenKind::from_punct(ch) {
                Some(kind) => {
                    self.advance();
                    kind
                }
                None => self.scan_invalid(),
            },
        };

        self.make_token(kind)
    }

    // === Helper methods ===

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current(&self) -> u8 {
        self.source.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(
            kind,
            &self.source[self.token_start..self.pos],
            Span::from_offsets(self.token_start, self.pos),
        )
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), b' ' | b'\t' | b'\r' | b'\n') {
            self.advance();
        }
    }

    fn scan_name(&mut self) -> TokenKind {
        while matches!(self.current(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.advance();
        }
        TokenKind::Name
    }

    fn scan_int(&mut self) -> TokenKind {
        while self.current().is_ascii_digit() {
            self.advance();
        }
        TokenKind::Int
    }

    /// Consume one whole character so token text stays valid UTF-8.
    fn scan_invalid(&mut self) -> TokenKind {
        let width = self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += width;
        TokenKind::Invalid
    }
}

/// Tokenize the whole input. The result always ends with exactly one `Eof`.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

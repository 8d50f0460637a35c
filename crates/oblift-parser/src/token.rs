//! Token types for the object-expression language.

use crate::span::Span;
use std::fmt;

/// A token: its kind plus a view of the source text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    #[inline]
    pub const fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }
}

/// The kind of token.
///
/// There are no keywords, strings, comments or multi-character operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Always the last token, exactly once.
    Eof,
    /// A character outside the language's alphabet.
    Invalid,

    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    Comma,  // ,
    Colon,  // :
    Dot,    // .

    /// `foo`, `_bar`, `baz9`
    Name,
    /// A run of decimal digits: `7`, `0017`
    Int,
}

impl TokenKind {
    /// Short human-readable description, used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Invalid => "invalid character",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Name => "name",
            TokenKind::Int => "integer",
        }
    }

    /// Map a punctuation byte to its token kind.
    pub fn from_punct(byte: u8) -> Option<TokenKind> {
        match byte {
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b'{' => Some(TokenKind::LBrace),
            b'}' => Some(TokenKind::RBrace),
            b',' => Some(TokenKind::Comma),
            b':' => Some(TokenKind::Colon),
            b'.' => Some(TokenKind::Dot),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punct_table() {
        let kinds: Vec<_> = "(){},:.".bytes().filter_map(TokenKind::from_punct).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Dot,
            ]
        );
        assert_eq!(TokenKind::from_punct(b';'), None);
    }
}

//! oblift-parser: front end for a minimal object-expression language.
//!
//! # Pipeline
//!
//! 1. **Tokenize**: [`tokenize`] turns source text into a token slice ending
//!    in `Eof`.
//! 2. **Parse**: [`Parser`] builds an arena-allocated [`Expr`] tree. Finished
//!    expressions live on a single operand stack; sibling lists are collapsed
//!    into arena slices once complete.
//! 3. **Lift**: [`lift`] moves every object literal and method out into flat
//!    top-level definitions, leaving a residual expression free of literals.
//! 4. **Print**: [`Printer`] renders trees and definitions back to text.
//!
//! All nodes and synthesized names live in one [`Arena`] per run.
//!
//! # Example
//!
//! ```
//! use oblift_parser::{lift, parse, print_lifted, Arena};
//!
//! let arena = Arena::new();
//! let expr = parse(&arena, "{foo(n): n.add(2, 3), baz: 7}.baz").unwrap();
//! let lifted = lift(&arena, &expr);
//! assert_eq!(
//!     print_lifted(&lifted),
//!     "obj0 = {baz: 7}\nm0foo(self, xn) = xn.add(2, 3)\nobj0.baz\n"
//! );
//! ```

mod arena;
mod ast;
mod lexer;
mod lift;
mod parser;
mod printer;
mod span;
mod token;

// Re-exports
pub use arena::Arena;
pub use ast::*;
pub use lexer::{tokenize, Lexer};
pub use lift::{lift, Lifted, Lifter, HYGIENE_MARKER, METHOD_PREFIX, OBJECT_PREFIX};
pub use parser::{
    parse_int_literal, ParseError, ParseErrorKind, ParseStats, Parser, ParserOptions,
    DEFAULT_MAX_DEPTH,
};
pub use printer::{print_expr, print_lifted, Printer, RECEIVER};
pub use span::{LineIndex, Span, MAX_SOURCE_LEN};
pub use token::{Token, TokenKind};

/// Tokenize and parse `source` with default options.
pub fn parse<'a>(arena: &'a Arena, source: &'a str) -> Result<Expr<'a>, ParseError> {
    let tokens = tokenize(source);
    Parser::new(arena, &tokens).parse()
}

/// Parse, lift and print in one step.
pub fn transform(source: &str, options: ParserOptions) -> Result<String, ParseError> {
    let arena = Arena::new();
    let tokens = tokenize(source);
    let expr = Parser::with_options(&arena, &tokens, options).parse()?;
    Ok(print_lifted(&lift(&arena, &expr)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let out = transform("{foo: bar, baz: 7}.baz", ParserOptions::default()).unwrap();
        assert_eq!(out, "obj0 = {foo: xbar, baz: 7}\nobj0.baz\n");
    }

    #[test]
    fn test_transform_error() {
        let err = transform("{foo: }", ParserOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.found, TokenKind::RBrace);
    }

    #[test]
    fn test_lift_of_plain_int() {
        let arena = Arena::new();
        let expr = parse(&arena, "7").unwrap();
        assert_eq!(print_lifted(&lift(&arena, &expr)), "7\n");
    }
}

//! Stack-based recursive-descent parser.
//!
//! Finished expressions live on one growable operand stack owned by the
//! parser. A parse call is handed the index of the first free slot (`base`)
//! and leaves exactly the expressions it produced at `[base, base + k)`.
//! Sibling lists (object fields, call arguments) are parsed onto successive
//! slots and then collapsed into a single arena slice, so no list is
//! allocated per node while it is being built.
//!
//! Postfix chains (`a.b.c(x)`) are resolved by rewriting the receiver's slot:
//! the receiver is moved into the arena and the slot receives the wrapping
//! `Access`/`Call` node.

use crate::arena::Arena;
use crate::ast::*;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use rustc_hash::FxHashSet;
use std::fmt;
use thiserror::Error;

/// Default limit on expression nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration options.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Deepest allowed nesting of expressions (parens, literals, arguments,
    /// and each `.name` link of a postfix chain).
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// What went wrong. The parser stops at the first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    NameExpected,
    CloseParenExpected,
    CommaExpected,
    ColonExpected,
    /// An expression was required.
    UnexpectedToken,
    /// A complete expression was followed by more input.
    TrailingInput,
    NestingTooDeep { limit: usize },
    /// A method name repeated within one object literal.
    DuplicateField,
}

impl ParseErrorKind {
    /// Stable identifier for machine-readable output.
    pub fn code(self) -> &'static str {
        match self {
            ParseErrorKind::NameExpected => "name-expected",
            ParseErrorKind::CloseParenExpected => "close-paren-expected",
            ParseErrorKind::CommaExpected => "comma-expected",
            ParseErrorKind::ColonExpected => "colon-expected",
            ParseErrorKind::UnexpectedToken => "unexpected-token",
            ParseErrorKind::TrailingInput => "trailing-input",
            ParseErrorKind::NestingTooDeep { .. } => "nesting-too-deep",
            ParseErrorKind::DuplicateField => "duplicate-field",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::NameExpected => f.write_str("expected a name"),
            ParseErrorKind::CloseParenExpected => f.write_str("expected `)`"),
            ParseErrorKind::CommaExpected => f.write_str("expected `,`"),
            ParseErrorKind::ColonExpected => f.write_str("expected `:`"),
            ParseErrorKind::UnexpectedToken => f.write_str("expected an expression"),
            ParseErrorKind::TrailingInput => f.write_str("expected end of input"),
            ParseErrorKind::NestingTooDeep { limit } => {
                write!(f, "expression nested more than {limit} levels deep")
            }
            ParseErrorKind::DuplicateField => f.write_str("method already defined in this object"),
        }
    }
}

/// Parse error: the failure kind plus the token actually observed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind}, found {found} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub found: TokenKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, found: &Token<'_>) -> Self {
        Self {
            kind,
            found: found.kind,
            span: found.span,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Counters gathered during one parse, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub tokens: usize,
    /// Highest operand-stack occupancy seen.
    pub max_stack: usize,
    /// Deepest expression nesting seen.
    pub max_depth: usize,
}

/// Header of a field whose definition is still being parsed.
#[derive(Debug, Clone, Copy)]
struct FieldHead<'a> {
    name: &'a str,
    kind: FieldKind,
    params: &'a [&'a str],
    start: u32,
}

/// The parser.
pub struct Parser<'a, 't> {
    arena: &'a Arena,
    tokens: &'t [Token<'a>],
    pos: usize,
    options: ParserOptions,
    depth: usize,
    /// Operand stack of finished expressions.
    stack: Vec<Expr<'a>>,
    /// Field headers, parallel to the definitions on `stack`.
    heads: Vec<FieldHead<'a>>,
    /// Scratch space for parameter names.
    names: Vec<&'a str>,
    /// Method names of the open literals, keyed by each literal's `heads` base.
    methods: FxHashSet<(usize, &'a str)>,
    stats: ParseStats,
}

impl<'a, 't> Parser<'a, 't> {
    /// Create a parser over a token slice ending in `Eof`.
    pub fn new(arena: &'a Arena, tokens: &'t [Token<'a>]) -> Self {
        Self::with_options(arena, tokens, ParserOptions::default())
    }

    pub fn with_options(arena: &'a Arena, tokens: &'t [Token<'a>], options: ParserOptions) -> Self {
        Self {
            arena,
            tokens,
            pos: 0,
            options,
            depth: 0,
            stack: Vec::new(),
            heads: Vec::new(),
            names: Vec::new(),
            methods: FxHashSet::default(),
            stats: ParseStats {
                tokens: tokens.len(),
                ..ParseStats::default()
            },
        }
    }

    /// Parse one expression followed by end of input.
    pub fn parse(self) -> Result<Expr<'a>, ParseError> {
        self.parse_with_stats().map(|(expr, _)| expr)
    }

    /// Like [`Parser::parse`], also returning the run's counters.
    pub fn parse_with_stats(mut self) -> Result<(Expr<'a>, ParseStats), ParseError> {
        let produced = self.parse_expr(0)?;
        debug_assert_eq!(produced, 1);

        let next = self.current();
        if next.kind != TokenKind::Eof {
            return Err(ParseError::new(ParseErrorKind::TrailingInput, &next));
        }

        assert_eq!(self.stack.len(), 1, "operand stack must hold exactly the root");
        debug_assert!(self.heads.is_empty() && self.names.is_empty() && self.methods.is_empty());
        Ok((self.stack[0], self.stats))
    }

    // =========================================================================
    // Token Handling
    // =========================================================================

    fn current(&self) -> Token<'a> {
        match self.tokens.get(self.pos) {
            Some(token) => *token,
            None => {
                let end = self.tokens.last().map_or(0, |t| t.span.end);
                Token::new(TokenKind::Eof, "", Span::empty(end))
            }
        }
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    /// Consume the current token. `Eof` is never consumed.
    fn advance(&mut self) -> Token<'a> {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, otherwise: ParseErrorKind) -> Result<Token<'a>, ParseError> {
        if self.peek() == kind {
            Ok(self.advance())
        } else {
            Err(self.error(otherwise))
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, &self.current())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parse `primary postfixes` into slot `base`. Returns the slot count.
    fn parse_expr(&mut self, base: usize) -> Result<usize, ParseError> {
        assert_eq!(self.stack.len(), base, "parse must start at the top of the operand stack");
        self.descend()?;

        self.parse_primary(base)?;
        self.parse_postfixes(base)?;

        self.depth -= 1;
        debug_assert_eq!(self.stack.len(), base + 1);
        self.stats.max_stack = self.stats.max_stack.max(self.stack.len());
        Ok(1)
    }

    /// Enter one more level of nesting, failing past `max_depth`.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(ParseErrorKind::NestingTooDeep {
                limit: self.options.max_depth,
            }));
        }
        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        Ok(())
    }

    fn parse_primary(&mut self, base: usize) -> Result<(), ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Name => {
                self.advance();
                self.stack.push(Expr::ident(token.text, token.span));
            }
            TokenKind::Int => {
                self.advance();
                self.stack.push(Expr::int(parse_int_literal(token.text), token.span));
            }
            TokenKind::LParen => {
                self.advance();
                self.parse_expr(base)?;
                let close = self.expect(TokenKind::RParen, ParseErrorKind::CloseParenExpected)?;
                self.stack[base].span = token.span.to(close.span);
            }
            TokenKind::LBrace => self.parse_object(base)?,
            TokenKind::Eof
            | TokenKind::Invalid
            | TokenKind::RParen
            | TokenKind::RBrace
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::Dot => return Err(self.error(ParseErrorKind::UnexpectedToken)),
        }
        Ok(())
    }

    /// Resolve `.name` and `.name(args)` suffixes on the expression in `base`.
    ///
    /// Each link wraps the receiver one level deeper, so it counts against
    /// the nesting limit like any other level.
    fn parse_postfixes(&mut self, base: usize) -> Result<(), ParseError> {
        let mut links = 0;
        while self.peek() == TokenKind::Dot {
            self.descend()?;
            links += 1;
            self.advance();
            let name = self.expect(TokenKind::Name, ParseErrorKind::NameExpected)?;

            if self.peek() == TokenKind::LParen {
                self.advance();
                let (args, close) = self.parse_args(base + 1)?;
                self.wrap_receiver(base, close, |owner| ExprKind::Call {
                    owner,
                    method: name.text,
                    args,
                });
            } else {
                self.wrap_receiver(base, name.span, |owner| ExprKind::Access {
                    owner,
                    field: name.text,
                });
            }
        }
        self.depth -= links;
        Ok(())
    }

    /// Replace the receiver in `base` with `build(receiver)`.
    fn wrap_receiver(
        &mut self,
        base: usize,
        end: Span,
        build: impl FnOnce(&'a Expr<'a>) -> ExprKind<'a>,
    ) {
        debug_assert_eq!(self.stack.len(), base + 1);
        let receiver = self.stack[base];
        self.stack.truncate(base);
        let owner = self.arena.alloc(receiver);
        self.stack.push(Expr::new(build(owner), receiver.span.to(end)));
    }

    /// Parse call arguments onto slots from `base` up, then collapse them
    /// into an arena slice. The opening `(` is already consumed.
    fn parse_args(&mut self, base: usize) -> Result<(&'a [Expr<'a>], Span), ParseError> {
        let mut cursor = base;
        if self.peek() != TokenKind::RParen {
            loop {
                cursor += self.parse_expr(cursor)?;
                match self.peek() {
                    TokenKind::Comma => {
                        self.advance();
                    }
                    TokenKind::RParen => break,
                    _ => return Err(self.error(ParseErrorKind::CommaExpected)),
                }
            }
        }
        let close = self.advance();

        debug_assert_eq!(self.stack.len(), cursor);
        let args = self.arena.alloc_slice(&self.stack[base..cursor]);
        self.stack.truncate(base);
        Ok((args, close.span))
    }

    // =========================================================================
    // Object Literals
    // =========================================================================

    /// `{ field (, field)* }`. Each definition takes one slot from `base` up;
    /// the run is then collapsed into a single `Object` at `base`.
    fn parse_object(&mut self, base: usize) -> Result<(), ParseError> {
        let open = self.advance();
        let heads_base = self.heads.len();
        let mut cursor = base;

        loop {
            cursor += self.parse_field(cursor, heads_base)?;
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBrace => break,
                _ => return Err(self.error(ParseErrorKind::CommaExpected)),
            }
        }
        let close = self.advance();

        debug_assert_eq!(self.stack.len(), cursor);
        debug_assert_eq!(self.heads.len() - heads_base, cursor - base);

        for head in &self.heads[heads_base..] {
            if head.kind == FieldKind::Method {
                self.methods.remove(&(heads_base, head.name));
            }
        }

        let arena = self.arena;
        let heads = self.heads.drain(heads_base..);
        let defs = self.stack.drain(base..);
        let fields = arena.alloc_slice_from_iter(heads.zip(defs).map(|(head, def)| Field {
            name: head.name,
            kind: head.kind,
            params: head.params,
            def,
            span: Span::new(head.start, def.span.end),
        }));

        self.stack
            .push(Expr::new(ExprKind::Object(fields), open.span.to(close.span)));
        Ok(())
    }

    /// `name [ (params) ] : expr`. Pushes one header and one definition slot.
    ///
    /// `heads_base` marks the first header of the enclosing literal. A method
    /// name may appear once per literal; data names may repeat.
    fn parse_field(&mut self, slot: usize, heads_base: usize) -> Result<usize, ParseError> {
        let name = self.expect(TokenKind::Name, ParseErrorKind::NameExpected)?;

        let (kind, params): (FieldKind, &'a [&'a str]) = if self.peek() == TokenKind::LParen {
            if !self.methods.insert((heads_base, name.text)) {
                return Err(ParseError::new(ParseErrorKind::DuplicateField, &name));
            }
            self.advance();
            (FieldKind::Method, self.parse_params()?)
        } else {
            (FieldKind::Data, &[])
        };
        self.expect(TokenKind::Colon, ParseErrorKind::ColonExpected)?;

        self.heads.push(FieldHead {
            name: name.text,
            kind,
            params,
            start: name.span.start,
        });
        self.parse_expr(slot)
    }

    /// `NAME (, NAME)* )` or `)`. The opening `(` is already consumed.
    fn parse_params(&mut self) -> Result<&'a [&'a str], ParseError> {
        match self.peek() {
            TokenKind::RParen => {
                self.advance();
                return Ok(&[]);
            }
            TokenKind::Name => {}
            _ => return Err(self.error(ParseErrorKind::CloseParenExpected)),
        }

        let names_base = self.names.len();
        loop {
            let param = self.expect(TokenKind::Name, ParseErrorKind::NameExpected)?;
            self.names.push(param.text);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RParen => {
                    self.advance();
                    break;
                }
                _ => return Err(self.error(ParseErrorKind::CommaExpected)),
            }
        }

        let params = self.arena.alloc_slice(&self.names[names_base..]);
        self.names.truncate(names_base);
        Ok(params)
    }
}

/// Convert integer literal text with C-style base prefixes, saturating to
/// the `i32` range.
///
/// An optional sign is accepted; `0x` selects hexadecimal and a leading `0`
/// octal. Conversion stops at the first digit that is invalid for the base,
/// so `09` is `0`.
pub fn parse_int_literal(text: &str) -> i32 {
    let bytes = text.as_bytes();
    let (negative, rest) = match bytes {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, bytes),
    };
    let (radix, digits) = match rest {
        [b'0', b'x' | b'X', tail @ ..] if tail.first().is_some_and(u8::is_ascii_hexdigit) => {
            (16, tail)
        }
        [b'0', tail @ ..] if !tail.is_empty() => (8, tail),
        _ => (10, rest),
    };

    // Anything past 2^31 saturates either way, so clamp there.
    const LIMIT: i64 = 1 << 31;
    let mut value: i64 = 0;
    for &byte in digits {
        let Some(digit) = char::from(byte).to_digit(radix) else {
            break;
        };
        value = (value * i64::from(radix) + i64::from(digit)).min(LIMIT);
    }

    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_src<'a>(arena: &'a Arena, source: &'a str) -> Result<Expr<'a>, ParseError> {
        let tokens = tokenize(source);
        Parser::new(arena, &tokens).parse()
    }

    fn parse_err(source: &str) -> ParseError {
        let arena = Arena::new();
        match parse_src(&arena, source) {
            Ok(expr) => panic!("expected an error for {source:?}, got {expr:?}"),
            Err(err) => err,
        }
    }

    #[test]
    fn test_int() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "7").unwrap();
        assert!(matches!(expr.kind, ExprKind::Int(7)));
        assert_eq!(expr.span, Span::new(0, 1));
    }

    #[test]
    fn test_access_on_object() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "{foo: bar, baz: 7}.baz").unwrap();
        let ExprKind::Access { owner, field } = expr.kind else {
            panic!("expected access, got {expr:?}");
        };
        assert_eq!(field, "baz");
        let ExprKind::Object(fields) = owner.kind else {
            panic!("expected object, got {owner:?}");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "foo");
        assert_eq!(fields[0].kind, FieldKind::Data);
        assert!(matches!(fields[0].def.kind, ExprKind::Ident("bar")));
        assert_eq!(fields[1].name, "baz");
        assert!(matches!(fields[1].def.kind, ExprKind::Int(7)));
        assert_eq!(owner.span, Span::new(0, 18));
        assert_eq!(expr.span, Span::new(0, 22));
    }

    #[test]
    fn test_method_field() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "{foo(n): n.add(2, 3), baz: 7}.baz").unwrap();
        let ExprKind::Access { owner, .. } = expr.kind else {
            panic!("expected access");
        };
        let ExprKind::Object(fields) = owner.kind else {
            panic!("expected object");
        };
        assert_eq!(fields[0].kind, FieldKind::Method);
        assert_eq!(fields[0].params, &["n"]);
        let ExprKind::Call { owner, method, args } = fields[0].def.kind else {
            panic!("expected call");
        };
        assert!(matches!(owner.kind, ExprKind::Ident("n")));
        assert_eq!(method, "add");
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0].kind, ExprKind::Int(2)));
        assert!(matches!(args[1].kind, ExprKind::Int(3)));
    }

    #[test]
    fn test_zero_param_method_is_not_data() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "{get(): 1, val: 2}").unwrap();
        let ExprKind::Object(fields) = expr.kind else {
            panic!("expected object");
        };
        assert_eq!(fields[0].kind, FieldKind::Method);
        assert!(fields[0].params.is_empty());
        assert_eq!(fields[1].kind, FieldKind::Data);
    }

    #[test]
    fn test_postfix_chain() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "a.b.c(1)").unwrap();
        let ExprKind::Call { owner, method, args } = expr.kind else {
            panic!("expected call");
        };
        assert_eq!(method, "c");
        assert_eq!(args.len(), 1);
        assert!(matches!(args[0].kind, ExprKind::Int(1)));
        let ExprKind::Access { owner, field } = owner.kind else {
            panic!("expected access");
        };
        assert_eq!(field, "b");
        assert!(matches!(owner.kind, ExprKind::Ident("a")));
        assert_eq!(expr.span, Span::new(0, 8));
    }

    #[test]
    fn test_parenthesized() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "((a)).b").unwrap();
        let ExprKind::Access { owner, .. } = expr.kind else {
            panic!("expected access");
        };
        assert!(matches!(owner.kind, ExprKind::Ident("a")));
        assert_eq!(owner.span, Span::new(0, 5));
    }

    #[test]
    fn test_nested_calls_keep_argument_order() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "f.g(a.h(1, 2), {x: 3}, b)").unwrap();
        let ExprKind::Call { args, .. } = expr.kind else {
            panic!("expected call");
        };
        assert_eq!(args.len(), 3);
        assert!(matches!(args[0].kind, ExprKind::Call { method: "h", .. }));
        assert!(matches!(args[1].kind, ExprKind::Object(_)));
        assert!(matches!(args[2].kind, ExprKind::Ident("b")));
    }

    #[test]
    fn test_saturation() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "99999999999").unwrap();
        assert!(matches!(expr.kind, ExprKind::Int(i32::MAX)));
        assert_eq!(parse_int_literal("-99999999999"), i32::MIN);
        assert_eq!(parse_int_literal("2147483647"), i32::MAX);
        assert_eq!(parse_int_literal("2147483648"), i32::MAX);
        assert_eq!(parse_int_literal("-2147483648"), i32::MIN);
        assert_eq!(parse_int_literal("-2147483649"), i32::MIN);
    }

    #[test]
    fn test_int_literal_bases() {
        assert_eq!(parse_int_literal("0"), 0);
        assert_eq!(parse_int_literal("42"), 42);
        assert_eq!(parse_int_literal("017"), 15);
        assert_eq!(parse_int_literal("09"), 0);
        assert_eq!(parse_int_literal("0x1F"), 31);
        assert_eq!(parse_int_literal("0x"), 0);
        assert_eq!(parse_int_literal("+12"), 12);
        assert_eq!(parse_int_literal("0xFFFFFFFFFF"), i32::MAX);
    }

    // === Stack discipline ===

    fn sentinel() -> Expr<'static> {
        Expr::ident("sentinel", Span::empty(0))
    }

    /// Parse `source` with one unrelated expression already on the stack and
    /// check the call only touched slots above it.
    fn assert_nets_one(source: &str) {
        let arena = Arena::new();
        let tokens = tokenize(source);
        let mut parser = Parser::new(&arena, &tokens);
        parser.stack.push(sentinel());

        assert_eq!(parser.parse_expr(1).unwrap(), 1, "{source}");
        assert_eq!(parser.stack.len(), 2, "{source}");
        assert!(matches!(parser.stack[0].kind, ExprKind::Ident("sentinel")));
        assert!(parser.heads.is_empty());
        assert!(parser.names.is_empty());
        assert_eq!(parser.peek(), TokenKind::Eof);
    }

    #[test]
    fn test_object_nets_one_slot() {
        assert_nets_one("{a: 1}");
        assert_nets_one("{a: 1, b: 2, c(x, y): x, d: {e: 5}}");
    }

    #[test]
    fn test_call_nets_one_slot() {
        assert_nets_one("f.g()");
        assert_nets_one("f.g(1)");
        assert_nets_one("f.g(1, h.i(2, 3), {k: 4}, (5))");
    }

    #[test]
    fn test_max_stack_tracks_siblings() {
        let arena = Arena::new();
        let tokens = tokenize("f.g(1, 2, 3, 4)");
        let (_, stats) = Parser::new(&arena, &tokens).parse_with_stats().unwrap();
        // receiver + four arguments
        assert_eq!(stats.max_stack, 5);
        // receiver, the `.g` link, then each argument
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.tokens, tokens.len());
    }

    // === Errors ===

    #[test]
    fn test_unexpected_close_brace() {
        let err = parse_err("{foo: }");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.found, TokenKind::RBrace);
        assert_eq!(err.span, Span::new(6, 7));
    }

    #[test]
    fn test_unexpected_primaries() {
        for (source, found) in [
            ("", TokenKind::Eof),
            ("+", TokenKind::Invalid),
            (".", TokenKind::Dot),
            (")", TokenKind::RParen),
            (":", TokenKind::Colon),
            (",", TokenKind::Comma),
            ("a.b(1,)", TokenKind::RParen),
        ] {
            let err = parse_err(source);
            assert_eq!(err.kind, ParseErrorKind::UnexpectedToken, "{source}");
            assert_eq!(err.found, found, "{source}");
        }
    }

    #[test]
    fn test_name_expected() {
        assert_eq!(parse_err("a.1").kind, ParseErrorKind::NameExpected);
        assert_eq!(parse_err("a.1").found, TokenKind::Int);
        assert_eq!(parse_err("{}").found, TokenKind::RBrace);
        assert_eq!(parse_err("{1: 2}").kind, ParseErrorKind::NameExpected);
        assert_eq!(parse_err("{f(a,): 1}").kind, ParseErrorKind::NameExpected);
    }

    #[test]
    fn test_comma_expected() {
        let err = parse_err("{a: 1 b: 2}");
        assert_eq!(err.kind, ParseErrorKind::CommaExpected);
        assert_eq!(err.found, TokenKind::Name);

        let err = parse_err("f.g(1 2)");
        assert_eq!(err.kind, ParseErrorKind::CommaExpected);
        assert_eq!(err.found, TokenKind::Int);

        let err = parse_err("{f(a b): 1}");
        assert_eq!(err.kind, ParseErrorKind::CommaExpected);

        let err = parse_err("f.g(1");
        assert_eq!(err.kind, ParseErrorKind::CommaExpected);
        assert_eq!(err.found, TokenKind::Eof);
    }

    #[test]
    fn test_colon_expected() {
        let err = parse_err("{a 1}");
        assert_eq!(err.kind, ParseErrorKind::ColonExpected);
        assert_eq!(err.found, TokenKind::Int);
        assert_eq!(parse_err("{f(x) x}").kind, ParseErrorKind::ColonExpected);
    }

    #[test]
    fn test_close_paren_expected() {
        let err = parse_err("(a b");
        assert_eq!(err.kind, ParseErrorKind::CloseParenExpected);
        assert_eq!(err.found, TokenKind::Name);
        let err = parse_err("{f(1): 2}");
        assert_eq!(err.kind, ParseErrorKind::CloseParenExpected);
        assert_eq!(err.found, TokenKind::Int);
    }

    #[test]
    fn test_duplicate_method() {
        let err = parse_err("{a(x): x, b: 2, a(y): y}");
        assert_eq!(err.kind, ParseErrorKind::DuplicateField);
        assert_eq!(err.found, TokenKind::Name);
        assert_eq!(err.span, Span::new(16, 17));
        assert_eq!(parse_err("{f(): 1, f(): 2}").code(), "duplicate-field");
    }

    #[test]
    fn test_repeated_data_fields_are_accepted() {
        let arena = Arena::new();
        let expr = parse_src(&arena, "{a: 1, a: 2}").unwrap();
        let ExprKind::Object(fields) = expr.kind else {
            panic!("expected object, got {expr:?}");
        };
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.name == "a"));

        // A data field may share its name with a method.
        assert!(parse_src(&arena, "{f: 1, f(x): x, f: 2}").is_ok());
        // Method names are scoped to their own literal.
        assert!(parse_src(&arena, "{m(a): {m(b): b}, n: {m(c): c}}").is_ok());
        assert!(parse_src(&arena, "f.g({m(): 1}, {m(): 2})").is_ok());
    }

    #[test]
    fn test_postfix_chain_counts_toward_depth() {
        let arena = Arena::new();
        let options = ParserOptions { max_depth: 5 };

        let tokens = tokenize("a.b.c.d.e");
        let (_, stats) = Parser::with_options(&arena, &tokens, options.clone())
            .parse_with_stats()
            .unwrap();
        assert_eq!(stats.max_depth, 5);

        let tokens = tokenize("a.b.c.d.e.f");
        let err = Parser::with_options(&arena, &tokens, options).parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit: 5 });
        assert_eq!(err.found, TokenKind::Dot);
        assert_eq!(err.span, Span::new(9, 10));
    }

    #[test]
    fn test_long_chain_is_rejected_not_overflowed() {
        let source = format!("a{}", ".b".repeat(20_000));
        let err = parse_err(&source);
        assert_eq!(
            err.kind,
            ParseErrorKind::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            }
        );

        // Sibling chains each start from the depth of their own position.
        let arena = Arena::new();
        let chain = format!("x{}", ".b".repeat(200));
        let source = format!("f.g({chain}, {chain}, {{k: {chain}}})");
        assert!(parse_src(&arena, &source).is_ok());
    }

    #[test]
    fn test_trailing_input() {
        let err = parse_err("a b");
        assert_eq!(err.kind, ParseErrorKind::TrailingInput);
        assert_eq!(err.found, TokenKind::Name);
        assert_eq!(parse_err("a)").found, TokenKind::RParen);
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}a{}", "(".repeat(10), ")".repeat(10));
        let arena = Arena::new();
        let tokens = tokenize(&source);
        let options = ParserOptions { max_depth: 5 };
        let err = Parser::with_options(&arena, &tokens, options).parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit: 5 });
        assert_eq!(err.found, TokenKind::LParen);

        let tokens = tokenize(&source);
        assert!(Parser::new(&arena, &tokens).parse().is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = parse_err("{foo: }");
        assert_eq!(err.to_string(), "expected an expression, found `}` at 6..7");
        assert_eq!(err.code(), "unexpected-token");
    }
}

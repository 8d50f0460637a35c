//! The compile pipeline: tokenize, parse, lift, print.
//!
//! Each entry point runs in its own arena and returns owned, serializable
//! output, so callers never see arena lifetimes.

use crate::config::Config;
use crate::error::Error;
use oblift_parser::{
    lift, print_expr, Arena, Expr, LineIndex, ParseError, ParseStats, Parser, Printer, Token,
    MAX_SOURCE_LEN,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, trace};

/// Schema version for `Report` and `ParseOutput`. Bump when changing the format.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// One token of the input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenOutput {
    /// Token kind, e.g. `Name` or `LBrace`.
    pub kind: String,
    pub text: String,
    pub start: u32,
    pub end: u32,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, in bytes).
    pub column: u32,
}

/// Result of parsing without lifting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseOutput {
    pub schema_version: u32,
    /// The parsed tree, printed.
    pub tree: String,
    pub tokens: usize,
    pub max_stack: usize,
    pub max_depth: usize,
}

/// A lifted definition in printed form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefinitionOutput {
    pub name: String,
    /// The whole definition, e.g. `obj0 = {baz: 7}`.
    pub text: String,
}

/// Size counters for one compile run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Counts {
    pub tokens: usize,
    /// Highest operand-stack occupancy while parsing.
    pub max_stack: usize,
    pub max_depth: usize,
    pub objects: usize,
    pub methods: usize,
    /// Bytes held by the run's arena.
    pub arena_bytes: usize,
}

/// Result of a full compile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub schema_version: u32,
    /// The parsed tree before lifting, printed.
    pub tree: String,
    pub objects: Vec<DefinitionOutput>,
    pub methods: Vec<DefinitionOutput>,
    pub residual: String,
    pub counts: Counts,
}

impl Report {
    /// Objects, then methods, then the residual, one per line.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for def in self.objects.iter().chain(&self.methods) {
            out.push_str(&def.text);
            out.push('\n');
        }
        out.push_str(&self.residual);
        out.push('\n');
        out
    }
}

/// Tokenize `source`, including the final end-of-input token.
///
/// Offsets past [`MAX_SOURCE_LEN`] saturate; [`parse`] and [`compile`]
/// reject such inputs instead.
#[must_use]
pub fn tokens(source: &str) -> Vec<TokenOutput> {
    let index = LineIndex::new(source);
    oblift_parser::tokenize(source)
        .iter()
        .map(|token| {
            let (line, column) = index.line_col(token.span.start);
            TokenOutput {
                kind: format!("{:?}", token.kind),
                text: token.text.to_string(),
                start: token.span.start,
                end: token.span.end,
                line,
                column,
            }
        })
        .collect()
}

/// Parse `source` and print the tree.
pub fn parse(source: &str, config: &Config) -> Result<ParseOutput, Error> {
    let _span = info_span!("parse", bytes = source.len()).entered();
    check_source_len(source.len())?;
    let arena = Arena::new();
    let tokens = oblift_parser::tokenize(source);
    let (expr, stats) = parse_tokens(&arena, source, &tokens, config)?;

    Ok(ParseOutput {
        schema_version: REPORT_SCHEMA_VERSION,
        tree: print_expr(&expr),
        tokens: stats.tokens,
        max_stack: stats.max_stack,
        max_depth: stats.max_depth,
    })
}

/// Parse and lift `source`, returning the printed definitions.
///
/// Stops at the first parse error; lifting and printing cannot fail.
pub fn compile(source: &str, config: &Config) -> Result<Report, Error> {
    let _span = info_span!("compile", bytes = source.len()).entered();
    check_source_len(source.len())?;
    let arena = Arena::new();
    let tokens = oblift_parser::tokenize(source);
    let (expr, stats) = parse_tokens(&arena, source, &tokens, config)?;

    let lifted = lift(&arena, &expr);
    debug!(
        objects = lifted.objects.len(),
        methods = lifted.methods.len(),
        "lifted"
    );

    let objects = lifted
        .objects
        .iter()
        .map(|obj| {
            let mut printer = Printer::new();
            printer.print_object(obj);
            let text = printer.finish();
            trace!(id = obj.id, %text, "object");
            DefinitionOutput {
                name: obj.name.to_string(),
                text,
            }
        })
        .collect::<Vec<_>>();
    let methods = lifted
        .methods
        .iter()
        .map(|method| {
            let mut printer = Printer::new();
            printer.print_method(method);
            let text = printer.finish();
            trace!(object = method.object, %text, "method");
            DefinitionOutput {
                name: method.name.to_string(),
                text,
            }
        })
        .collect::<Vec<_>>();

    let counts = Counts {
        tokens: stats.tokens,
        max_stack: stats.max_stack,
        max_depth: stats.max_depth,
        objects: objects.len(),
        methods: methods.len(),
        arena_bytes: arena.allocated_bytes(),
    };
    debug!(arena_bytes = counts.arena_bytes, "compile finished");

    Ok(Report {
        schema_version: REPORT_SCHEMA_VERSION,
        tree: print_expr(&expr),
        objects,
        methods,
        residual: print_expr(&lifted.residual),
        counts,
    })
}

fn check_source_len(len: usize) -> Result<(), Error> {
    if len > MAX_SOURCE_LEN {
        debug!(len, "source too large");
        return Err(Error::SourceTooLarge {
            len,
            limit: MAX_SOURCE_LEN,
        });
    }
    Ok(())
}

fn parse_tokens<'a>(
    arena: &'a Arena,
    source: &str,
    tokens: &[Token<'a>],
    config: &Config,
) -> Result<(Expr<'a>, ParseStats), Error> {
    debug!(tokens = tokens.len(), "tokenized");
    let result = Parser::with_options(arena, tokens, config.parser_options()).parse_with_stats();
    match result {
        Ok((expr, stats)) => {
            debug!(
                max_stack = stats.max_stack,
                max_depth = stats.max_depth,
                "parsed"
            );
            Ok((expr, stats))
        }
        Err(err) => {
            debug!(code = err.code(), error = %err, "parse failed");
            Err(locate(source, err))
        }
    }
}

fn locate(source: &str, err: ParseError) -> Error {
    let (line, column) = LineIndex::new(source).line_col(err.span.start);
    Error::Parse {
        line,
        column,
        source: err,
    }
}

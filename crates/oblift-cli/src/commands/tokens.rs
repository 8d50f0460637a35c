use super::InputArgs;
use oblift_core::TokenOutput;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct TokensResult<'a> {
    ok: bool,
    source: &'a str,
    tokens: &'a [TokenOutput],
}

/// Print the token stream. Tokenizing never fails; invalid characters show
/// up as `Invalid` tokens.
pub fn run(input: &InputArgs, json: bool) -> Result<()> {
    let source = input.load()?;
    let tokens = oblift_core::tokens(&source.text);
    tracing::debug!(count = tokens.len(), source = %source.name, "tokenized");

    if json {
        let result = TokensResult {
            ok: true,
            source: &source.name,
            tokens: &tokens,
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
        return Ok(());
    }

    let mut out = io::stdout().lock();
    for token in &tokens {
        writeln!(
            out,
            "{:>4}:{:<4} {:<7} {:?}",
            token.line, token.column, token.kind, token.text
        )
        .into_diagnostic()?;
    }
    Ok(())
}

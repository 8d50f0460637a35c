use super::{fail, InputArgs};
use oblift_core::{Config, ParseOutput};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ParseResult<'a> {
    ok: bool,
    source: &'a str,
    #[serde(flatten)]
    output: &'a ParseOutput,
}

/// Parse the program and print its tree.
pub fn run(input: &InputArgs, config: &Config, json: bool) -> Result<()> {
    let source = input.load()?;
    let output = match oblift_core::parse(&source.text, config) {
        Ok(output) => output,
        Err(err) => return fail(&source, err, json),
    };

    if json {
        let result = ParseResult {
            ok: true,
            source: &source.name,
            output: &output,
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        println!("{}", output.tree);
    }
    Ok(())
}

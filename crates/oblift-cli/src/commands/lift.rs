use super::{fail, InputArgs};
use oblift_core::{Config, Report};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

#[derive(Serialize)]
struct LiftResult<'a> {
    ok: bool,
    source: &'a str,
    #[serde(flatten)]
    report: &'a Report,
}

/// Parse and lift the program, printing definitions then the residual.
pub fn run(input: &InputArgs, config: &Config, json: bool) -> Result<()> {
    let source = input.load()?;
    let report = match oblift_core::compile(&source.text, config) {
        Ok(report) => report,
        Err(err) => return fail(&source, err, json),
    };

    if json {
        let result = LiftResult {
            ok: true,
            source: &source.name,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else {
        print!("{}", report.text());
    }
    Ok(())
}

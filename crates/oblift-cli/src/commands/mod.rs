pub mod lift;
pub mod parse;
pub mod tokens;
pub mod version;

use crate::diagnostic::SourceDiagnostic;
use oblift_core::Error;
use serde::Serialize;
use std::path::PathBuf;

/// Program used when neither a file nor `-e` is given.
pub const DEMO_PROGRAM: &str = "{foo: bar, baz: 7}.baz";

/// Where a command reads its program from.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Source file to read (`-` for stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Program text given inline
    #[arg(short = 'e', long = "expr", value_name = "EXPR", conflicts_with = "input")]
    pub expr: Option<String>,
}

/// A loaded program plus the name used in diagnostics.
#[derive(Debug)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl InputArgs {
    pub fn load(&self) -> miette::Result<Source> {
        if let Some(expr) = &self.expr {
            return Ok(Source {
                name: "<expr>".to_string(),
                text: expr.clone(),
            });
        }

        match &self.input {
            Some(path) if path.as_os_str() == "-" => {
                let text = std::io::read_to_string(std::io::stdin())
                    .map_err(|e| miette::miette!("Failed to read stdin: {}", e))?;
                Ok(Source {
                    name: "<stdin>".to_string(),
                    text,
                })
            }
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
                Ok(Source {
                    name: path.display().to_string(),
                    text,
                })
            }
            None => Ok(Source {
                name: "<demo>".to_string(),
                text: DEMO_PROGRAM.to_string(),
            }),
        }
    }
}

/// Error payload for `--json` output.
#[derive(Serialize)]
pub struct ErrorOutput {
    /// Stable code, e.g. `unexpected-token`.
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl From<&Error> for ErrorOutput {
    fn from(err: &Error) -> Self {
        match err {
            Error::Parse {
                line,
                column,
                source,
            } => Self {
                code: source.code().to_string(),
                message: source.kind.to_string(),
                found: Some(source.found.to_string()),
                line: Some(*line),
                column: Some(*column),
                start: Some(source.span.start),
                end: Some(source.span.end),
            },
            other => Self {
                code: "error".to_string(),
                message: other.to_string(),
                found: None,
                line: None,
                column: None,
                start: None,
                end: None,
            },
        }
    }
}

#[derive(Serialize)]
struct FailureOutput<'a> {
    ok: bool,
    source: &'a str,
    error: ErrorOutput,
}

/// Report a pipeline failure and exit non-zero.
///
/// With `json`, prints a single `ok: false` object to stdout; otherwise
/// renders a diagnostic against the source text.
pub fn fail(source: &Source, err: Error, json: bool) -> miette::Result<()> {
    if json {
        let result = FailureOutput {
            ok: false,
            source: &source.name,
            error: ErrorOutput::from(&err),
        };
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| miette::miette!("Failed to serialize error: {}", e))?;
        println!("{json}");
        std::process::exit(1);
    }

    match SourceDiagnostic::from_error(source, &err) {
        Some(diagnostic) => Err(diagnostic.into()),
        None => Err(miette::miette!("{}", err)),
    }
}

//! Rich rendering of parse errors.

use crate::commands::Source;
use miette::{Diagnostic, NamedSource, SourceSpan};
use oblift_core::Error;
use oblift_parser::{ParseErrorKind, TokenKind};
use thiserror::Error;

/// A parse error pointed at its location in the program text.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(oblift::parse))]
pub struct SourceDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("found {found}")]
    span: SourceSpan,
    found: String,
    #[help]
    help: Option<String>,
}

impl SourceDiagnostic {
    /// Build a diagnostic for parse errors; other errors have no location.
    pub fn from_error(source: &Source, err: &Error) -> Option<Self> {
        let parse_error = err.as_parse_error()?;
        let start = parse_error.span.start as usize;
        let len = parse_error.span.len() as usize;

        Some(Self {
            message: format!("{} [{}]", parse_error.kind, parse_error.code()),
            src: NamedSource::new(&source.name, source.text.clone()),
            span: (start, len).into(),
            found: parse_error.found.to_string(),
            help: help_for(parse_error.kind, parse_error.found),
        })
    }
}

fn help_for(kind: ParseErrorKind, found: TokenKind) -> Option<String> {
    match (kind, found) {
        (ParseErrorKind::UnexpectedToken, TokenKind::Invalid) => {
            Some("only names, integers, `.`, `,`, `:` and brackets are allowed".to_string())
        }
        (ParseErrorKind::UnexpectedToken, TokenKind::Eof) => {
            Some("the program ends where an expression was expected".to_string())
        }
        (ParseErrorKind::TrailingInput, _) => {
            Some("a program is a single expression".to_string())
        }
        (ParseErrorKind::NestingTooDeep { .. }, _) => {
            Some("raise `max_depth` in the config file to allow deeper nesting".to_string())
        }
        (ParseErrorKind::DuplicateField, _) => {
            Some("each method name may appear once per object literal".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblift_core::{compile, Config};
    use std::path::PathBuf;

    fn source(text: &str) -> Source {
        Source {
            name: "<test>".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_error_becomes_diagnostic() {
        let src = source("{foo: }");
        let err = compile(&src.text, &Config::default()).unwrap_err();
        let diagnostic = SourceDiagnostic::from_error(&src, &err).unwrap();
        assert_eq!(diagnostic.to_string(), "expected an expression [unexpected-token]");
        assert_eq!(diagnostic.span, SourceSpan::from((6, 1)));
        assert_eq!(diagnostic.found, "`}`");
        assert!(diagnostic.help.is_none());
    }

    #[test]
    fn test_eof_error_has_empty_span_and_help() {
        let src = source("a.b(");
        let err = compile(&src.text, &Config::default()).unwrap_err();
        let diagnostic = SourceDiagnostic::from_error(&src, &err).unwrap();
        assert_eq!(diagnostic.span, SourceSpan::from((4, 0)));
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn test_other_errors_have_no_location() {
        let src = source("");
        let err = Error::ConfigRead {
            path: PathBuf::from("oblift.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(SourceDiagnostic::from_error(&src, &err).is_none());
    }
}

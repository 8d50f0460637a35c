use oblift_parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for oblift operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The input is not a well-formed program. `line` and `column` are
    /// 1-based and point at the offending token.
    #[error("Parse error at {line}:{column}: {source}")]
    Parse {
        line: u32,
        column: u32,
        #[source]
        source: ParseError,
    },

    /// The input is longer than spans can address.
    #[error("Source is {len} bytes, more than the {limit} byte limit")]
    SourceTooLarge { len: usize, limit: usize },
}

impl Error {
    /// The underlying parse error, if this is one.
    #[must_use]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

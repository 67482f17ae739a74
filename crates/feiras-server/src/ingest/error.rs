//! Import error types
//!
//! [`ImportError`] aborts a run before any record is produced. [`ReadError`]
//! describes a single skipped row and is only ever counted.

use std::path::PathBuf;

use thiserror::Error;

use super::parser::ParseError;

/// Fatal import failures
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not open source '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read header row: {0}")]
    Header(#[source] csv::Error),

    #[error("could not read header row: source is empty")]
    MissingHeader,

    #[error("invalid import configuration: {0}")]
    Config(String),

    #[error("import task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A source row that was skipped
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("could not read row {}: {source}", line_label(*.line))]
    Row {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    #[error("could not read row {line}: bare or extraneous quote in field {field}")]
    Quote { line: u64, field: usize },

    #[error("could not parse row {line}: {source}")]
    Parse {
        line: u64,
        #[source]
        source: ParseError,
    },
}

impl ReadError {
    /// Whether the source can make no further progress after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReadError::Row { source, .. } if source.is_io_error())
    }
}

fn line_label(line: Option<u64>) -> String {
    line.map_or_else(|| "?".to_string(), |l| l.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_names_line_and_column() {
        let err = ReadError::Parse {
            line: 7,
            source: ParseError::InsufficientColumns {
                expected: 17,
                found: 3,
            },
        };
        assert_eq!(
            err.to_string(),
            "could not parse row 7: expected at least 17 columns, found 3"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_io_row_error_is_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err = ReadError::Row {
            line: None,
            source: csv::Error::from(io),
        };
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("could not read row ?"));
    }

    #[test]
    fn test_quote_error_names_field() {
        let err = ReadError::Quote { line: 4, field: 12 };
        assert_eq!(
            err.to_string(),
            "could not read row 4: bare or extraneous quote in field 12"
        );
        assert!(!err.is_fatal());
    }
}

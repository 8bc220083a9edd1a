//! Error types for zipcrack
//!
//! Only failures that make a whole search meaningless surface here. A rejected
//! candidate is never an error: wrong passwords, unreadable archives and
//! mid-stream read failures are all folded into a `false` verdict by the tester.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the search core
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request was rejected before any worker started
    #[error("Invalid request")]
    InvalidRequest(#[from] RequestError),

    /// A worker thread panicked, so the search space was not fully covered
    #[error("Worker thread panicked during search")]
    WorkerPanic,

    /// The background search thread could not be spawned
    #[error("Failed to spawn search thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Reasons a search request is invalid
#[derive(Error, Debug)]
pub enum RequestError {
    /// Maximum candidate length below 1
    #[error("maximum password length must be at least 1 (got {0})")]
    MaxLength(i64),

    /// Archive path does not exist
    #[error("archive not found: {}", .0.display())]
    ArchiveMissing(PathBuf),

    /// Archive path exists but is not a regular file
    #[error("archive is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Archive could not be opened for reading
    #[error("archive is not readable: {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Custom alphabet rejected
    #[error(transparent)]
    Charset(#[from] CharsetError),
}

/// Reasons a custom alphabet is rejected
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CharsetError {
    #[error("charset must contain at least one symbol")]
    Empty,

    /// Duplicates would make two workers share a leading symbol
    #[error("charset contains duplicate symbol {0:?}")]
    Duplicate(char),

    #[error("charset symbol {0:?} is not printable ASCII")]
    NotPrintable(char),
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_converts_into_search_error() {
        let err: SearchError = RequestError::MaxLength(0).into();
        assert!(matches!(err, SearchError::InvalidRequest(RequestError::MaxLength(0))));
        assert_eq!(err.to_string(), "Invalid request");
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("at least 1"));
    }

    #[test]
    fn test_charset_error_message() {
        let err: RequestError = CharsetError::Duplicate('a').into();
        assert_eq!(err.to_string(), "charset contains duplicate symbol 'a'");
    }
}

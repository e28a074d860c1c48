//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.
//! Lookup failures have their own type, [`LookupError`], since every one of
//! them is recoverable by re-entering the citation.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Malformed Bible document or catalog
    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        /// The underlying serde error.
        source: serde_json::Error,
        /// File that failed to parse, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Library/catalog error
    #[error("Library error: {0}")]
    Library(String),

    /// Citation could not be resolved
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a JSON error with file context
    pub fn json(source: serde_json::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Json { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { source: e, path: None }
    }
}

/// Why a citation could not be turned into a passage.
///
/// Each variant maps to a distinct message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Input does not follow `<book> <chapter>[,<verses>]`.
    #[error("Unrecognized reference {input:?}. Use <book> <chapter>[,<verses>], e.g. \"Gn 30,5-7.15\" or \"Jo 3,16-\"")]
    Parse {
        /// The rejected input.
        input: String,
    },

    /// No book in the document answers to the token.
    #[error("Book \"{book}\" not found{}", suggestion_hint(.suggestion.as_deref()))]
    BookNotFound {
        /// Book token as typed.
        book: String,
        /// Closest book name, when one is close enough.
        suggestion: Option<String>,
    },

    /// Chapter number is zero or past the last chapter.
    #[error("Chapter {chapter} not found in {book} (it has {available} chapters)")]
    ChapterOutOfRange {
        /// Display name of the resolved book.
        book: String,
        /// Requested chapter.
        chapter: u32,
        /// Number of chapters in the book.
        available: usize,
    },

    /// No Bible has been loaded yet.
    #[error("Load a Bible file first")]
    DocumentUnavailable,
}

fn suggestion_hint(suggestion: Option<&str>) -> String {
    suggestion.map(|s| format!(" (did you mean \"{s}\"?)")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn book_not_found_mentions_suggestion() {
        let err = LookupError::BookNotFound { book: "Gns".into(), suggestion: Some("Gênesis".into()) };
        assert_eq!(err.to_string(), "Book \"Gns\" not found (did you mean \"Gênesis\"?)");

        let err = LookupError::BookNotFound { book: "Xyz".into(), suggestion: None };
        assert_eq!(err.to_string(), "Book \"Xyz\" not found");
    }

    #[test]
    fn lookup_errors_convert() {
        let err: Error = LookupError::DocumentUnavailable.into();
        match err {
            Error::Lookup(LookupError::DocumentUnavailable) => {}
            other => panic!("Expected lookup error, got {other:?}"),
        }
    }
}

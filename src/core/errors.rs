//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for errdrop operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Parsing errors
    #[error("Parse error in {file}:{line}:{column}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Directory walk errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        let path = path.into();
        Self::FileSystem {
            message: format!("{} '{}': {}", message.into(), path.display(), source),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Create a parse error from a `syn` error, keeping its location
    pub fn parse(file: impl Into<PathBuf>, error: &syn::Error) -> Self {
        let start = error.span().start();
        Self::Parse {
            file: file.into(),
            line: start.line,
            column: start.column + 1,
            message: error.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_keeps_location() {
        let err = syn::parse_str::<syn::File>("fn broken( {}").expect_err("invalid source");
        let error = Error::parse("lib.rs", &err);
        match &error {
            Error::Parse { file, line, .. } => {
                assert_eq!(file, &PathBuf::from("lib.rs"));
                assert_eq!(*line, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(error.to_string().starts_with("Parse error in lib.rs:1:"));
    }
}

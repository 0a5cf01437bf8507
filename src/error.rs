use std::path::PathBuf;

use thiserror::Error;

/// Main error type for duodex operations
#[derive(Error, Debug)]
pub enum DuodexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed {file}: {reason}")]
    Format { file: String, reason: String },

    #[error("query parse error: {0}")]
    QueryParse(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for duodex operations
pub type Result<T> = std::result::Result<T, DuodexError>;

impl DuodexError {
    pub fn open(path: &std::path::Path, source: std::io::Error) -> Self {
        DuodexError::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn format(file: &str, reason: impl Into<String>) -> Self {
        DuodexError::Format {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DuodexError::format("terms.tsv", "line 3: expected 4 tab-separated fields");
        assert_eq!(
            err.to_string(),
            "malformed terms.tsv: line 3: expected 4 tab-separated fields"
        );

        let err = DuodexError::QueryParse("trailing tokens".to_string());
        assert_eq!(err.to_string(), "query parse error: trailing tokens");
    }
}

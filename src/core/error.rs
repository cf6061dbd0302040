//! Error types for document, preview and export operations

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF render error: {0}")]
    Render(String),

    #[error("Document is read-only")]
    ReadOnly,

    #[error("Document has not been saved yet")]
    Untitled,
}

impl NoteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Results with NoteError
pub type Result<T> = std::result::Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = NoteError::io("/tmp/missing.md", io_err);
        assert!(matches!(err, NoteError::Io { .. }));
        assert!(err.to_string().contains("/tmp/missing.md"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display() {
        let err = NoteError::Render("exit status 1".to_string());
        assert_eq!(err.to_string(), "PDF render error: exit status 1");
        assert_eq!(NoteError::ReadOnly.to_string(), "Document is read-only");
    }
}

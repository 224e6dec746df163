//! Error type for settings file operations.
//!
//! Only the `try_*` entry points on [`crate::ConfigStore`] surface these
//! errors.  The plain `load_file` / `save_file` calls log them at `warn`
//! level and carry on, so a UI caller never has to handle them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing a settings document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A save was requested but the store was constructed with an empty path.
    #[error("settings file path is empty")]
    EmptyPath,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML reader rejected the document (bad syntax, mismatched tags,
    /// unknown entity, invalid encoding).
    #[error("failed to parse settings XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is well-formed XML but not a settings document.
    #[error("malformed settings document: {0}")]
    Malformed(String),

    /// A registered key cannot be written as an XML element name.
    #[error("setting key {0:?} is not a valid XML element name")]
    InvalidElementName(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_includes_path() {
        // Arrange
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/Config.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("/tmp/Config.xml"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }

    #[test]
    fn test_invalid_element_name_message_quotes_key() {
        let err = StoreError::InvalidElementName("font size".to_string());
        assert_eq!(
            err.to_string(),
            "setting key \"font size\" is not a valid XML element name"
        );
    }

    #[test]
    fn test_io_error_exposes_source() {
        use std::error::Error as _;

        let err = StoreError::Io {
            path: PathBuf::from("x.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }
}

//! Error types for tempman operations
//!
//! Only creation, listing and explicit deletion surface errors. Removal
//! failures during `close()` or a reclamation sweep are swallowed and never
//! reach this type.

use std::fmt;
use std::error::Error;
use std::path::{Path, PathBuf};

/// tempman error types with detailed context
#[derive(Debug, Clone)]
pub enum TempError {
    /// Filesystem operation failed (parent missing, permission denied, disk full)
    Filesystem {
        /// The path where the error occurred
        path: Option<PathBuf>,
        /// The underlying I/O error kind
        kind: std::io::ErrorKind,
        /// Human-readable description
        message: String,
    },

    /// Timeout is negative, NaN or infinite
    InvalidTimeout {
        /// The rejected value in seconds
        seconds: f64,
    },
}

impl TempError {
    /// Wrap an I/O error with the path and operation it came from.
    pub(crate) fn io(path: &Path, what: &str, err: std::io::Error) -> Self {
        TempError::Filesystem {
            path: Some(path.to_path_buf()),
            kind: err.kind(),
            message: format!("{}: {}", what, err),
        }
    }

    /// The I/O error kind, if this is a filesystem error.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            TempError::Filesystem { kind, .. } => Some(*kind),
            TempError::InvalidTimeout { .. } => None,
        }
    }
}

impl fmt::Display for TempError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempError::Filesystem { path, kind, message } => {
                if let Some(path) = path {
                    write!(f, "Filesystem error in {}: {} ({})", path.display(), message, kind)
                } else {
                    write!(f, "Filesystem error: {} ({})", message, kind)
                }
            }

            TempError::InvalidTimeout { seconds } => {
                write!(f, "Invalid timeout: {} seconds (must be finite and >= 0)", seconds)
            }
        }
    }
}

impl Error for TempError {}

/// Convert std::io::Error to TempError::Filesystem
impl From<std::io::Error> for TempError {
    fn from(err: std::io::Error) -> Self {
        TempError::Filesystem {
            path: None,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for tempman operations
pub type TempResult<T> = Result<T, TempError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TempError::io(
            Path::new("/tmp/missing"),
            "Failed to create temp directory",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        );

        let display = format!("{}", err);
        assert!(display.contains("/tmp/missing"));
        assert!(display.contains("Failed to create temp directory"));
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_invalid_timeout_display() {
        let err = TempError::InvalidTimeout { seconds: -5.0 };
        assert!(format!("{}", err).contains("-5"));
        assert_eq!(err.io_kind(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let temp_err: TempError = io_err.into();

        match temp_err {
            TempError::Filesystem { kind, path, .. } => {
                assert_eq!(kind, std::io::ErrorKind::PermissionDenied);
                assert!(path.is_none());
            }
            _ => panic!("Expected Filesystem error"),
        }
    }
}

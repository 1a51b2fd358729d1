//! Error handling types and result definitions for sign and verify calls.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for signing operations
pub type SigningResult<T> = Result<T, SigningError>;

/// Error taxonomy for remote signing operations
#[derive(Error, Debug, miette::Diagnostic)]
pub enum SigningError {
    /// Missing or malformed local configuration. Fatal for the whole session.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network failure or non-success HTTP status from the signing service.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Malformed reply or unrecognized enumeration value.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Malformed PEM/base64/DER in a certificate field.
    #[error("Certificate error: {0}")]
    CertificateError(String),

    /// Missing or unresolvable input file path.
    #[error("Input error: {0}")]
    InputError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<std::io::Error> for SigningError {
    fn from(error: std::io::Error) -> Self {
        SigningError::IoError(error.to_string())
    }
}

impl From<reqwest::Error> for SigningError {
    fn from(error: reqwest::Error) -> Self {
        SigningError::TransportError(error.to_string())
    }
}

impl From<serde_json::Error> for SigningError {
    fn from(error: serde_json::Error) -> Self {
        SigningError::DecodeError(error.to_string())
    }
}

impl From<der::Error> for SigningError {
    fn from(error: der::Error) -> Self {
        SigningError::CertificateError(error.to_string())
    }
}

impl From<base64::DecodeError> for SigningError {
    fn from(error: base64::DecodeError) -> Self {
        SigningError::CertificateError(format!("invalid base64 payload: {error}"))
    }
}

/// A failure tied to the input path that produced it.
#[derive(Debug)]
pub struct PathFailure {
    pub path: PathBuf,
    pub error: SigningError,
}

impl PathFailure {
    #[must_use]
    pub fn new(path: impl AsRef<Path>, error: SigningError) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            error,
        }
    }
}

impl fmt::Display for PathFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

impl std::error::Error for PathFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SigningError::TransportError("Upload failed: HTTP 500".to_string());
        assert_eq!(error.to_string(), "Transport error: Upload failed: HTTP 500");

        let error = SigningError::InputError("File not found: a.exe".to_string());
        assert_eq!(error.to_string(), "Input error: File not found: a.exe");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        match SigningError::from(json_err) {
            SigningError::DecodeError(_) => {}
            other => panic!("Wrong error type: {other:?}"),
        }

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        match SigningError::from(io_err) {
            SigningError::IoError(msg) => assert_eq!(msg, "gone"),
            other => panic!("Wrong error type: {other:?}"),
        }
    }

    #[test]
    fn test_path_failure_display() {
        let failure = PathFailure::new(
            "/tmp/app.exe",
            SigningError::DecodeError("bad reply".to_string()),
        );
        assert_eq!(failure.to_string(), "/tmp/app.exe: Decode error: bad reply");
    }
}

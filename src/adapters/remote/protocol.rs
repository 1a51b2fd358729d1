//! Protocol definitions for the remote signing service.
//!
//! Requests are a `POST` to the configured endpoint with the command and its
//! arguments in the query string and the file as a multipart upload. Sign
//! replies carry the signed file; verify replies carry a JSON object using
//! the field names in [`fields`].

use crate::domain::{Certificate, HashAlgorithm, TimestampUrl};
use crate::infra::error::{SigningError, SigningResult};
use indexmap::IndexMap;

/// Name of the multipart form field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Operation requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Sign,
    Verify,
}

impl Command {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Sign => "sign",
            Command::Verify => "verify",
        }
    }
}

/// Query parameter names.
pub mod params {
    pub const COMMAND: &str = "command";
    /// Timestamp server URL.
    pub const TIMESTAMP_SERVER: &str = "t";
    /// File digest algorithm.
    pub const FILE_DIGEST: &str = "fd";
    /// SHA-1 thumbprint of the signing certificate.
    pub const THUMBPRINT: &str = "sha1";
}

/// Field names in a verify reply.
pub mod fields {
    pub const PATH: &str = "Path";
    pub const STATUS: &str = "Status";
    pub const STATUS_MESSAGE: &str = "StatusMessage";
    pub const SIGNER_CERTIFICATE: &str = "SignerCertificate";
    pub const TIMESTAMP_CERTIFICATE: &str = "TimeStamperCertificate";
    pub const IS_OS_BINARY: &str = "IsOSBinary";
    pub const SIGNATURE_TYPE: &str = "SignatureType";

    /// Fields holding PEM certificate text.
    pub const CERTIFICATES: [&str; 2] = [SIGNER_CERTIFICATE, TIMESTAMP_CERTIFICATE];
}

/// Ordered query parameters with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(IndexMap<String, String>);

impl QueryParams {
    /// Parameters for `command` alone.
    #[must_use]
    pub fn for_command(command: Command) -> Self {
        let mut query = Self::default();
        query
            .0
            .insert(params::COMMAND.to_string(), command.as_str().to_string());
        query
    }

    /// Parameters of a sign request.
    #[must_use]
    pub fn sign(
        timestamp_server: &TimestampUrl,
        hash_algorithm: &HashAlgorithm,
        certificate: &Certificate,
    ) -> Self {
        let mut query = Self::for_command(Command::Sign);
        query.0.insert(
            params::TIMESTAMP_SERVER.to_string(),
            timestamp_server.as_str().to_string(),
        );
        query.0.insert(
            params::FILE_DIGEST.to_string(),
            hash_algorithm.as_str().to_string(),
        );
        query
            .0
            .insert(params::THUMBPRINT.to_string(), certificate.thumbprint());
        query
    }

    /// Parameters of a verify request.
    #[must_use]
    pub fn verify() -> Self {
        Self::for_command(Command::Verify)
    }

    /// Append a parameter.
    ///
    /// # Errors
    /// Returns `ValidationError` if `key` is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> SigningResult<()> {
        let key = key.into();
        if self.0.contains_key(&key) {
            return Err(SigningError::ValidationError(format!(
                "Duplicate query parameter: {key}"
            )));
        }
        self.0.insert(key, value.into());
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `key=value` pairs joined by `&`, values form-urlencoded.
    #[must_use]
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| {
                let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
                format!("{key}={encoded}")
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Endpoint joined to the encoded query with `?`.
#[must_use]
pub fn request_url(endpoint: &str, query: &QueryParams) -> String {
    format!("{endpoint}?{}", query.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_query() {
        let query = QueryParams::verify();
        assert_eq!(query.encode(), "command=verify");
        assert_eq!(
            request_url("https://sign.example.com/api", &query),
            "https://sign.example.com/api?command=verify"
        );
    }

    #[test]
    fn test_values_are_urlencoded_in_order() {
        let mut query = QueryParams::for_command(Command::Sign);
        query.insert("t", "http://ts.example.com/tsa?x=1&y=2").unwrap();
        query.insert("fd", "SHA256").unwrap();
        query.insert("note", "a b").unwrap();

        assert_eq!(
            query.encode(),
            "command=sign&t=http%3A%2F%2Fts.example.com%2Ftsa%3Fx%3D1%26y%3D2&fd=SHA256&note=a+b"
        );
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut query = QueryParams::verify();
        assert!(query.insert("command", "sign").is_err());
        assert_eq!(query.get("command"), Some("verify"));
        assert_eq!(query.len(), 1);
    }
}

//! Type-safe wrappers for signing request parameters.

use crate::infra::error::{SigningError, SigningResult};
use std::fmt;
use std::str::FromStr;

/// File digest algorithm requested from the service (`fd` parameter).
///
/// The name is passed through to the service, which decides what it
/// accepts. The SHA family is recognised case-insensitively and sent in its
/// canonical spelling; any other name is sent as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Named(String),
}

impl HashAlgorithm {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
            HashAlgorithm::Named(name) => name,
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_graphic()) {
            return Err(SigningError::ValidationError(format!(
                "Invalid hash algorithm name: '{s}'"
            )));
        }

        match name.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Ok(HashAlgorithm::Named(name.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe wrapper for RFC 3161 timestamp server URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampUrl(String);

impl TimestampUrl {
    /// Create a new `TimestampUrl` after validation
    pub fn new(url: impl AsRef<str>) -> SigningResult<Self> {
        let url = url.as_ref();
        Self::validate_url(url)?;
        Ok(TimestampUrl(url.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate_url(url: &str) -> SigningResult<()> {
        let parsed = url::Url::parse(url).map_err(|e| {
            SigningError::ValidationError(format!("Invalid timestamp URL '{url}': {e}"))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SigningError::ValidationError(format!(
                "Timestamp URL must start with http:// or https://, got: {url}"
            )));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(SigningError::ValidationError(format!(
                "Timestamp URL must contain a host: {url}"
            )));
        }

        Ok(())
    }
}

impl FromStr for TimestampUrl {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for TimestampUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

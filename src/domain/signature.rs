//! Signature result domain types.
//!
//! A `SignatureResult` is built fresh for every sign or verify call. When a
//! verify reply does not fit the typed schema the decoder hands back a
//! `PropertyBag` instead, wrapped in `DecodedReply::Raw`.

use super::certificate::Certificate;
use super::status::{SignatureStatus, SignatureType};
use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Typed outcome of a sign or verify call for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureResult {
    path: PathBuf,
    status: SignatureStatus,
    status_message: String,
    signer_certificate: Option<Certificate>,
    timestamp_certificate: Option<Certificate>,
    is_os_binary: Option<bool>,
    signature_type: Option<SignatureType>,
}

impl SignatureResult {
    /// Result for `path` with the canonical message of `status` and no
    /// optional fields.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, status: SignatureStatus) -> Self {
        Self {
            path: path.into(),
            status,
            status_message: status.canonical_message().to_string(),
            signer_certificate: None,
            timestamp_certificate: None,
            is_os_binary: None,
            signature_type: None,
        }
    }

    #[must_use]
    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = message.into();
        self
    }

    #[must_use]
    pub fn with_signer_certificate(mut self, certificate: Certificate) -> Self {
        self.signer_certificate = Some(certificate);
        self
    }

    #[must_use]
    pub fn with_timestamp_certificate(mut self, certificate: Certificate) -> Self {
        self.timestamp_certificate = Some(certificate);
        self
    }

    #[must_use]
    pub fn with_is_os_binary(mut self, is_os_binary: bool) -> Self {
        self.is_os_binary = Some(is_os_binary);
        self
    }

    #[must_use]
    pub fn with_signature_type(mut self, signature_type: SignatureType) -> Self {
        self.signature_type = Some(signature_type);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn status(&self) -> SignatureStatus {
        self.status
    }

    /// Stable numeric code of the status.
    #[must_use]
    pub fn status_code(&self) -> u32 {
        self.status.code()
    }

    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    #[must_use]
    pub fn signer_certificate(&self) -> Option<&Certificate> {
        self.signer_certificate.as_ref()
    }

    #[must_use]
    pub fn timestamp_certificate(&self) -> Option<&Certificate> {
        self.timestamp_certificate.as_ref()
    }

    #[must_use]
    pub fn is_os_binary(&self) -> Option<bool> {
        self.is_os_binary
    }

    #[must_use]
    pub fn signature_type(&self) -> Option<SignatureType> {
        self.signature_type
    }
}

/// Value kept in a passthrough property bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    /// Certificate text that extracted cleanly.
    Certificate(Certificate),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Certificate(cert) => {
                write!(f, "[Subject]\n  {}\n[Thumbprint]\n  {}", cert.subject(), cert.thumbprint())
            }
        }
    }
}

/// Reply fields in the order the service sent them.
pub type PropertyBag = IndexMap<String, RawValue>;

/// Decoded verify reply: typed when the reply fits the schema, otherwise
/// every field the service sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedReply {
    Decoded(SignatureResult),
    Raw(PropertyBag),
}

impl DecodedReply {
    #[must_use]
    pub fn as_result(&self) -> Option<&SignatureResult> {
        match self {
            DecodedReply::Decoded(result) => Some(result),
            DecodedReply::Raw(_) => None,
        }
    }

    #[must_use]
    pub fn as_raw(&self) -> Option<&PropertyBag> {
        match self {
            DecodedReply::Decoded(_) => None,
            DecodedReply::Raw(bag) => Some(bag),
        }
    }
}

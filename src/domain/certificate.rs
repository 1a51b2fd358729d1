//! X.509 certificate values and PEM fragment extraction.
//!
//! The signing service reports certificates as marker-delimited base64 text.
//! Extraction looks for literal markers rather than running a full PEM
//! parser: the first begin marker and the last end marker, with the payload
//! taken strictly between the first newline after the begin marker and the
//! last newline before the end marker. The markers are substrings of the
//! standard `-----BEGIN CERTIFICATE-----` lines, so regular PEM text is
//! recognised as well.

use crate::infra::error::{SigningError, SigningResult};
use base64::Engine;
use der::Decode;
use sha1::{Digest, Sha1};
use std::fmt;

/// Literal begin marker searched for in certificate text.
pub const BEGIN_CERTIFICATE: &str = "--BEGIN CERTIFICATE--";
/// Literal end marker searched for in certificate text.
pub const END_CERTIFICATE: &str = "--END CERTIFICATE--";

/// Owned, parsed X.509 certificate.
#[derive(Clone)]
pub struct Certificate {
    der: Box<[u8]>,
    parsed: x509_cert::Certificate,
}

impl Certificate {
    /// Parse a DER encoded certificate.
    ///
    /// # Errors
    /// Returns `CertificateError` if the bytes are not a single DER certificate.
    pub fn from_der(der: impl Into<Vec<u8>>) -> SigningResult<Self> {
        let der = der.into();
        let parsed = x509_cert::Certificate::from_der(&der)?;
        Ok(Self {
            der: der.into_boxed_slice(),
            parsed,
        })
    }

    /// Load a certificate from either PEM text or raw DER bytes.
    ///
    /// # Errors
    /// Returns `CertificateError` if neither form yields a certificate.
    pub fn from_pem_or_der(bytes: &[u8]) -> SigningResult<Self> {
        if let Ok(text) = std::str::from_utf8(bytes) {
            if let Some(cert) = extract_certificate(text)? {
                return Ok(cert);
            }
        }
        Self::from_der(bytes.to_vec())
    }

    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    #[must_use]
    pub fn x509(&self) -> &x509_cert::Certificate {
        &self.parsed
    }

    /// SHA-1 thumbprint as upper-case hex, the form signtool expects.
    #[must_use]
    pub fn thumbprint(&self) -> String {
        hex::encode_upper(Sha1::digest(&self.der))
    }

    /// Subject distinguished name (RFC 4514).
    #[must_use]
    pub fn subject(&self) -> String {
        self.parsed.tbs_certificate.subject.to_string()
    }

    /// Issuer distinguished name (RFC 4514).
    #[must_use]
    pub fn issuer(&self) -> String {
        self.parsed.tbs_certificate.issuer.to_string()
    }

    #[must_use]
    pub fn serial_number(&self) -> String {
        hex::encode_upper(self.parsed.tbs_certificate.serial_number.as_bytes())
    }

    /// Standard PEM encoding with 64 column lines.
    #[must_use]
    pub fn to_pem(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.der);
        let mut pem = String::from("-----BEGIN CERTIFICATE-----\n");
        for line in encoded.as_bytes().chunks(64) {
            // base64 output is ASCII
            pem.push_str(std::str::from_utf8(line).unwrap_or_default());
            pem.push('\n');
        }
        pem.push_str("-----END CERTIFICATE-----\n");
        pem
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Certificate(subject={}, thumbprint={})",
            self.subject(),
            self.thumbprint()
        )
    }
}

/// Extract the first marker-delimited certificate from `s`.
///
/// Returns `Ok(None)` when no complete, newline-bounded block is present.
///
/// # Errors
/// Returns `CertificateError` when a block is found but its payload is not
/// valid base64 or not a DER certificate.
pub fn extract_certificate(s: &str) -> SigningResult<Option<Certificate>> {
    let Some(begin) = s.find(BEGIN_CERTIFICATE) else {
        return Ok(None);
    };
    let Some(end) = s.rfind(END_CERTIFICATE) else {
        return Ok(None);
    };

    let after_marker = begin + BEGIN_CERTIFICATE.len();
    let Some(start) = s[after_marker..].find('\n').map(|i| after_marker + i) else {
        return Ok(None);
    };
    let Some(stop) = s[..end].rfind('\n') else {
        return Ok(None);
    };
    if stop <= start {
        return Ok(None);
    }

    let payload: String = s[start + 1..stop]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Ok(None);
    }

    let der = base64::engine::general_purpose::STANDARD.decode(payload.as_bytes())?;
    Certificate::from_der(der)
        .map(Some)
        .map_err(|e| SigningError::CertificateError(format!("invalid certificate payload: {e}")))
}

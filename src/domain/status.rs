//! Signature status and signature type enumerations.
//!
//! `SignatureStatus` carries a stable 32-bit code used when results are
//! reported to other processes. The mapping is total in both directions over
//! the closed set of statuses.

use crate::infra::error::SigningError;
use std::fmt;
use std::str::FromStr;

/// Outcome of a signature check as reported by the signing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureStatus {
    Valid,
    Incompatible,
    UnknownError,
    NotSupportedFileFormat,
    NotTrusted,
    HashMismatch,
    NotSigned,
}

impl SignatureStatus {
    /// Every status, in declaration order.
    pub const ALL: [SignatureStatus; 7] = [
        SignatureStatus::Valid,
        SignatureStatus::Incompatible,
        SignatureStatus::UnknownError,
        SignatureStatus::NotSupportedFileFormat,
        SignatureStatus::NotTrusted,
        SignatureStatus::HashMismatch,
        SignatureStatus::NotSigned,
    ];

    /// Stable numeric code for this status.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            SignatureStatus::Valid => 0x0000_0000,
            SignatureStatus::Incompatible => 0x8009_0008,
            SignatureStatus::UnknownError => 0xFFFF_FFFF,
            SignatureStatus::NotSupportedFileFormat => 0x800B_0001,
            SignatureStatus::NotTrusted => 0x800B_0111,
            SignatureStatus::HashMismatch => 0x8009_200D,
            SignatureStatus::NotSigned => 0x800B_0100,
        }
    }

    /// Inverse of [`SignatureStatus::code`]; `None` for codes outside the table.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SignatureStatus::Valid => "Valid",
            SignatureStatus::Incompatible => "Incompatible",
            SignatureStatus::UnknownError => "UnknownError",
            SignatureStatus::NotSupportedFileFormat => "NotSupportedFileFormat",
            SignatureStatus::NotTrusted => "NotTrusted",
            SignatureStatus::HashMismatch => "HashMismatch",
            SignatureStatus::NotSigned => "NotSigned",
        }
    }

    /// Default human-readable text for this status.
    #[must_use]
    pub const fn canonical_message(self) -> &'static str {
        match self {
            SignatureStatus::Valid => "Signature verified.",
            SignatureStatus::Incompatible => {
                "The signature uses an algorithm that is not supported on this system."
            }
            SignatureStatus::UnknownError => "An unknown error occurred while checking the signature.",
            SignatureStatus::NotSupportedFileFormat => {
                "The form specified for the subject is not one supported or known by the specified trust provider."
            }
            SignatureStatus::NotTrusted => {
                "The certificate chain was issued by an authority that is not trusted."
            }
            SignatureStatus::HashMismatch => {
                "The contents of the file may have been tampered with because the hash of the file does not match the hash stored in the digital signature."
            }
            SignatureStatus::NotSigned => "The file is not digitally signed.",
        }
    }
}

impl fmt::Display for SignatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureStatus {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SigningError::DecodeError(format!("Unknown signature status: {s}")))
    }
}

impl From<SignatureStatus> for u32 {
    fn from(status: SignatureStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u32> for SignatureStatus {
    type Error = SigningError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| {
            SigningError::DecodeError(format!("Unknown signature status code: 0x{code:08X}"))
        })
    }
}

/// Kind of signature found on a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureType {
    None,
    Authenticode,
    Catalog,
}

impl SignatureType {
    pub const ALL: [SignatureType; 3] = [
        SignatureType::None,
        SignatureType::Authenticode,
        SignatureType::Catalog,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SignatureType::None => "None",
            SignatureType::Authenticode => "Authenticode",
            SignatureType::Catalog => "Catalog",
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureType {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SigningError::DecodeError(format!("Unknown signature type: {s}")))
    }
}

//! Domain types: certificates, statuses, request parameters and results.

pub mod certificate;
pub mod signature;
pub mod status;
pub mod types;

pub use certificate::{extract_certificate, Certificate};
pub use signature::{DecodedReply, PropertyBag, RawValue, SignatureResult};
pub use status::{SignatureStatus, SignatureType};
pub use types::{HashAlgorithm, TimestampUrl};

//! Remote Authenticode signing client
//!
//! Submits files to a remote code-signing service, either to sign them in
//! place or to inspect their existing signatures, and turns the service's
//! replies into strongly-typed `SignatureResult` values.

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use adapters::remote::client::SigningClient;
pub use adapters::remote::protocol::{Command, QueryParams};
pub use domain::{
    extract_certificate, Certificate, DecodedReply, HashAlgorithm, PropertyBag, RawValue,
    SignatureResult, SignatureStatus, SignatureType, TimestampUrl,
};
pub use infra::config::{ConfigManager, ServiceConfig};
pub use infra::error::{PathFailure, SigningError, SigningResult};
pub use infra::paths::InputPath;
pub use pipelines::{FileOutcome, SignOptions, SignWorkflow, SigningSession, VerifyWorkflow};
pub use services::decoder::ResponseDecoder;

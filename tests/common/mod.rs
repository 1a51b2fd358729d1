//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mock_service;

use base64::Engine;
use signtool_client::{Certificate, ServiceConfig, SigningSession};
use std::path::{Path, PathBuf};

pub const SIGNER_PEM: &str = include_str!("../data/signer.pem");
pub const TSA_PEM: &str = include_str!("../data/tsa.pem");

/// SHA-1 thumbprint of `SIGNER_PEM`.
pub const SIGNER_THUMBPRINT: &str = "E492F21E7563A55AF8D5A3A107569A4A9CBB3580";

pub const TOKEN: &str = "Bearer test-token";

pub fn signer_certificate() -> Certificate {
    Certificate::from_pem_or_der(SIGNER_PEM.as_bytes()).expect("signer fixture")
}

pub fn tsa_certificate() -> Certificate {
    Certificate::from_pem_or_der(TSA_PEM.as_bytes()).expect("tsa fixture")
}

/// Certificate in the abbreviated marker form the service emits.
pub fn service_pem(cert: &Certificate) -> String {
    let body = base64::engine::general_purpose::STANDARD.encode(cert.as_der());
    format!("--BEGIN CERTIFICATE--\n{body}\n--END CERTIFICATE--")
}

pub fn session_for(endpoint: &str) -> SigningSession {
    SigningSession::with_config(ServiceConfig::new(endpoint, TOKEN))
}

pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test file");
    path
}

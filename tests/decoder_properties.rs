//! Reply decoding and status table behavior through the public API.

mod common;

use base64::Engine;
use common::*;
use signtool_client::{
    extract_certificate, DecodedReply, RawValue, ResponseDecoder, SignatureStatus, SigningError,
};
use std::path::Path;

const LOCAL_PATH: &str = "/builds/output/app.exe";

fn decode(body: &str) -> Result<DecodedReply, SigningError> {
    ResponseDecoder::new(LOCAL_PATH).decode(body.as_bytes())
}

#[test]
fn status_codes_round_trip_through_the_table() {
    let expected = [
        (SignatureStatus::Valid, 0x0000_0000),
        (SignatureStatus::NotSigned, 0x800B_0100),
        (SignatureStatus::HashMismatch, 0x8009_200D),
        (SignatureStatus::NotSupportedFileFormat, 0x800B_0001),
        (SignatureStatus::NotTrusted, 0x800B_0111),
        (SignatureStatus::Incompatible, 0x8009_0008),
        (SignatureStatus::UnknownError, 0xFFFF_FFFF),
    ];

    for (status, code) in expected {
        assert_eq!(status.code(), code, "{status}");
        assert_eq!(SignatureStatus::from_code(code), Some(status));
        assert_eq!(status.as_str().parse::<SignatureStatus>().unwrap(), status);
    }
    assert_eq!(SignatureStatus::from_code(1), None);
}

#[test]
fn extracts_certificate_from_abbreviated_markers() {
    let der = signer_certificate().as_der().to_vec();
    let body = base64::engine::general_purpose::STANDARD.encode(&der);
    let text = format!("--BEGIN CERTIFICATE--\n{body}\n--END CERTIFICATE--");

    let cert = extract_certificate(&text).unwrap().expect("certificate");
    assert_eq!(cert.as_der(), der.as_slice());
    assert_eq!(cert.thumbprint(), SIGNER_THUMBPRINT);
}

#[test]
fn extraction_is_empty_without_markers_or_lines() {
    assert!(extract_certificate("").unwrap().is_none());
    assert!(extract_certificate("no certificate here").unwrap().is_none());
    assert!(extract_certificate("--BEGIN CERTIFICATE-- MIIB --END CERTIFICATE--")
        .unwrap()
        .is_none());
    assert!(extract_certificate("--END CERTIFICATE--\n--BEGIN CERTIFICATE--\n")
        .unwrap()
        .is_none());
}

#[test]
fn full_pem_is_accepted_too() {
    let cert = extract_certificate(TSA_PEM).unwrap().expect("certificate");
    assert_eq!(cert, tsa_certificate());
}

#[test]
fn not_signed_reply_gets_canonical_message() {
    let reply = decode(r#"{"Status":"NotSigned"}"#).unwrap();
    let result = reply.as_result().expect("typed result");

    assert_eq!(result.status(), SignatureStatus::NotSigned);
    assert_eq!(result.status_code(), 0x800B_0100);
    assert_eq!(result.status_message(), "The file is not digitally signed.");
    assert_eq!(result.path(), Path::new(LOCAL_PATH));
    assert!(result.signer_certificate().is_none());
}

#[test]
fn unknown_error_keeps_service_message() {
    let reply = decode(r#"{"Status":"UnknownError","StatusMessage":"custom"}"#).unwrap();
    let result = reply.as_result().expect("typed result");

    assert_eq!(result.status(), SignatureStatus::UnknownError);
    assert_eq!(result.status_code(), 0xFFFF_FFFF);
    assert_eq!(result.status_message(), "custom");
}

#[test]
fn typed_reply_decodes_both_certificates() {
    let reply = serde_json::json!({
        "Path": "D:\\remote\\app.exe",
        "Status": "Valid",
        "SignerCertificate": service_pem(&signer_certificate()),
        "TimeStamperCertificate": service_pem(&tsa_certificate()),
        "IsOSBinary": true,
    });
    let reply = decode(&reply.to_string()).unwrap();
    let result = reply.as_result().expect("typed result");

    assert_eq!(result.path(), Path::new(LOCAL_PATH));
    assert_eq!(result.signer_certificate(), Some(&signer_certificate()));
    assert_eq!(result.timestamp_certificate(), Some(&tsa_certificate()));
    assert_eq!(result.is_os_binary(), Some(true));
    assert_eq!(result.signature_type(), None);
}

#[test]
fn malformed_json_is_decode_error() {
    for body in ["", "{", "{\"Status\":\"Valid\"", "not json at all"] {
        match decode(body) {
            Err(SigningError::DecodeError(_)) => {}
            Ok(DecodedReply::Raw(bag)) if body.is_empty() => {
                // An empty reply carries no objects at all.
                assert_eq!(bag.len(), 1);
            }
            other => panic!("{body:?}: expected DecodeError, got {other:?}"),
        }
    }
}

#[test]
fn reply_without_status_is_passed_through() {
    let cert_text = service_pem(&signer_certificate());
    let reply = serde_json::json!({
        "Path": "D:\\remote\\app.exe",
        "Result": "ok",
        "SignerCertificate": cert_text,
        "Attempts": 3,
    });

    let bag = match decode(&reply.to_string()).unwrap() {
        DecodedReply::Raw(bag) => bag,
        other => panic!("Expected raw reply, got: {other:?}"),
    };

    let keys: Vec<&str> = bag.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Path", "Result", "SignerCertificate", "Attempts"]);
    assert_eq!(bag["Path"], RawValue::Text(LOCAL_PATH.to_string()));
    assert_eq!(bag["Result"], RawValue::Text("ok".to_string()));
    assert_eq!(
        bag["SignerCertificate"],
        RawValue::Certificate(signer_certificate())
    );
    assert_eq!(bag["Attempts"], RawValue::Text("3".to_string()));
}

#[test]
fn several_objects_are_passed_through() {
    let body = r#"{"Status":"Valid","Index":1} {"Status":"NotSigned","Extra":"x"}"#;
    let bag = match decode(body).unwrap() {
        DecodedReply::Raw(bag) => bag,
        other => panic!("Expected raw reply, got: {other:?}"),
    };

    // Later objects win on shared keys.
    assert_eq!(bag["Status"], RawValue::Text("NotSigned".to_string()));
    assert_eq!(bag["Index"], RawValue::Text("1".to_string()));
    assert_eq!(bag["Extra"], RawValue::Text("x".to_string()));
    assert_eq!(bag["Path"], RawValue::Text(LOCAL_PATH.to_string()));
}

#[test]
fn decoding_is_deterministic() {
    let reply = serde_json::json!({
        "Status": "HashMismatch",
        "SignerCertificate": service_pem(&signer_certificate()),
        "SignatureType": "Catalog",
    })
    .to_string();

    let decoder = ResponseDecoder::new(LOCAL_PATH);
    let first = decoder.decode(reply.as_bytes()).unwrap();
    let second = decoder.decode(reply.as_bytes()).unwrap();

    let (first, second) = (first.as_result().unwrap(), second.as_result().unwrap());
    assert_eq!(first.status(), second.status());
    assert_eq!(first.status_message(), second.status_message());
    assert_eq!(first.signer_certificate(), second.signer_certificate());
    assert_eq!(first.signature_type(), second.signature_type());
}

#[test]
fn unknown_enumeration_values_fail_outside_typed_mode() {
    for body in [
        r#"{"SignatureType":"Bogus","IsOSBinary":true}"#,
        r#"{"Status":"Valid"} {"Status":"Bogus"}"#,
    ] {
        assert!(
            matches!(decode(body), Err(SigningError::DecodeError(_))),
            "{body}"
        );
    }
}

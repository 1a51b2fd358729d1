//! Verify reply decoding.
//!
//! Replies are decoded typed-first: a single JSON object carrying a `Status`
//! becomes a `SignatureResult`. Anything else (no objects, several objects,
//! or an object without a status) falls back to an ordered property bag that
//! keeps every non-null field the service sent.

use crate::adapters::remote::protocol::fields;
use crate::domain::{
    extract_certificate, DecodedReply, PropertyBag, RawValue, SignatureResult, SignatureStatus,
    SignatureType,
};
use crate::infra::error::{SigningError, SigningResult};
use serde_json::{Map, Value};
use std::path::PathBuf;

type JsonObject = Map<String, Value>;

/// Decodes verify replies for one local file.
#[derive(Debug, Clone)]
pub struct ResponseDecoder {
    path: PathBuf,
}

impl ResponseDecoder {
    /// `path` replaces whatever path the service reports.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Decode raw reply bytes.
    ///
    /// # Errors
    /// `DecodeError` for non-UTF-8 or malformed JSON and for unrecognized
    /// `Status` or `SignatureType` values in either decoding mode;
    /// `CertificateError` for a typed certificate field whose payload does
    /// not decode.
    pub fn decode(&self, body: &[u8]) -> SigningResult<DecodedReply> {
        let text = std::str::from_utf8(body)
            .map_err(|e| SigningError::DecodeError(format!("Reply is not valid UTF-8: {e}")))?;
        let text = text.trim_start_matches('\u{feff}');

        let values = serde_json::Deserializer::from_str(text)
            .into_iter::<Value>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SigningError::DecodeError(format!("Malformed JSON reply: {e}")))?;

        let objects = collect_objects(values);

        match objects.as_slice() {
            [object] if has_status(object) => {
                self.decode_typed(object).map(DecodedReply::Decoded)
            }
            _ => {
                log::debug!(
                    "Reply for {} does not match the result schema ({} objects), keeping raw fields",
                    self.path.display(),
                    objects.len()
                );
                self.decode_passthrough(&objects).map(DecodedReply::Raw)
            }
        }
    }

    fn decode_typed(&self, object: &JsonObject) -> SigningResult<SignatureResult> {
        let status = match object.get(fields::STATUS) {
            Some(value) => parse_status(value)?,
            None => {
                return Err(SigningError::DecodeError(
                    "Reply has no Status".to_string(),
                ))
            }
        };

        let mut result = SignatureResult::new(self.path.clone(), status);

        if status == SignatureStatus::UnknownError {
            if let Some(Value::String(message)) = object.get(fields::STATUS_MESSAGE) {
                if message != status.canonical_message() {
                    result = result.with_status_message(message.clone());
                }
            }
        }

        if let Some(Value::String(text)) = object.get(fields::SIGNER_CERTIFICATE) {
            match extract_certificate(text)? {
                Some(cert) => result = result.with_signer_certificate(cert),
                None => log::debug!("No certificate block in {}", fields::SIGNER_CERTIFICATE),
            }
        }

        if let Some(Value::String(text)) = object.get(fields::TIMESTAMP_CERTIFICATE) {
            match extract_certificate(text)? {
                Some(cert) => result = result.with_timestamp_certificate(cert),
                None => log::debug!("No certificate block in {}", fields::TIMESTAMP_CERTIFICATE),
            }
        }

        if let Some(Value::Bool(flag)) = object.get(fields::IS_OS_BINARY) {
            result = result.with_is_os_binary(*flag);
        }

        if let Some(Value::String(kind)) = object.get(fields::SIGNATURE_TYPE) {
            result = result.with_signature_type(kind.parse::<SignatureType>()?);
        }

        Ok(result)
    }

    fn decode_passthrough(&self, objects: &[JsonObject]) -> SigningResult<PropertyBag> {
        let mut bag = PropertyBag::new();

        for object in objects {
            for (name, value) in object {
                if value.is_null() {
                    continue;
                }
                check_enumeration(name, value)?;
                let raw = if name == fields::PATH {
                    RawValue::Text(self.path.display().to_string())
                } else {
                    match value {
                        Value::String(text) if fields::CERTIFICATES.contains(&name.as_str()) => {
                            raw_certificate(name, text)
                        }
                        Value::String(text) => RawValue::Text(text.clone()),
                        other => RawValue::Text(other.to_string()),
                    }
                };
                bag.insert(name.clone(), raw);
            }
        }

        if !bag.contains_key(fields::PATH) {
            bag.insert(
                fields::PATH.to_string(),
                RawValue::Text(self.path.display().to_string()),
            );
        }

        Ok(bag)
    }
}

fn has_status(object: &JsonObject) -> bool {
    object.get(fields::STATUS).is_some_and(|v| !v.is_null())
}

/// Top-level objects, with arrays contributing their object elements.
fn collect_objects(values: Vec<Value>) -> Vec<JsonObject> {
    let mut objects = Vec::new();
    for value in values {
        match value {
            Value::Object(object) => objects.push(object),
            Value::Array(items) => objects.extend(items.into_iter().filter_map(|item| match item {
                Value::Object(object) => Some(object),
                _ => None,
            })),
            other => log::debug!("Ignoring non-object reply value: {other}"),
        }
    }
    objects
}

fn parse_status(value: &Value) -> SigningResult<SignatureStatus> {
    match value {
        Value::String(name) => name.parse(),
        Value::Number(number) => number
            .as_u64()
            .and_then(|code| u32::try_from(code).ok())
            .ok_or_else(|| SigningError::DecodeError(format!("Invalid status code: {number}")))
            .and_then(SignatureStatus::try_from),
        other => Err(SigningError::DecodeError(format!(
            "Status must be a string or code, got: {other}"
        ))),
    }
}

/// Enumeration fields must name a known value even when kept as text.
fn check_enumeration(name: &str, value: &Value) -> SigningResult<()> {
    match (name, value) {
        (fields::STATUS, value) => parse_status(value).map(|_| ()),
        (fields::SIGNATURE_TYPE, Value::String(kind)) => kind.parse::<SignatureType>().map(|_| ()),
        _ => Ok(()),
    }
}

fn raw_certificate(name: &str, text: &str) -> RawValue {
    match extract_certificate(text) {
        Ok(Some(cert)) => RawValue::Certificate(cert),
        Ok(None) => RawValue::Text(text.to_string()),
        Err(e) => {
            log::warn!("Keeping {name} as text: {e}");
            RawValue::Text(text.to_string())
        }
    }
}

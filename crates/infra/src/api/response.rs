//! Response normalizer
//!
//! Turns a [`RawResponse`] into a decoded DTO or an [`IncapsulaError`].
//! Two success families exist upstream:
//!
//! - HTTP-status-only: success iff the status is one of the expected codes,
//!   otherwise the whole body becomes the error detail;
//! - envelope-encoded: HTTP 200 with `res`, `errorCode` or `errors[]` in the
//!   body deciding success.
//!
//! Every failure carries the request context and the raw body.

use incapsula_domain::{
    DataEnvelope, EnvelopeStatus, ErrorCodeEnvelope, IncapsulaError, LegacyEnvelope,
    RequestContext, Result,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::http::RawResponse;

/// Fail with a status error unless `raw.status` is one of `expected`.
///
/// # Errors
/// `IncapsulaError::Status` carrying the received code and the body verbatim.
pub fn expect_status(
    context: &RequestContext,
    raw: &RawResponse,
    expected: &[StatusCode],
) -> Result<()> {
    if expected.contains(&raw.status) {
        return Ok(());
    }
    Err(IncapsulaError::Status {
        context: context.clone(),
        status: raw.status.as_u16(),
        body: raw.text(),
    })
}

/// Decode the body as JSON.
///
/// An empty body decodes as JSON `null`, which suits `()` and `Option<T>`.
///
/// # Errors
/// `IncapsulaError::Decode` with the parser message and the raw body.
pub fn decode_json<T: DeserializeOwned>(context: &RequestContext, raw: &RawResponse) -> Result<T> {
    let decoded = if raw.is_empty() {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(&raw.body)
    };
    decoded.map_err(|e| decode_error(context, raw, &e))
}

/// HTTP 200, then the legacy `res` envelope, then the DTO.
///
/// # Errors
/// Status, envelope or decode error, in that order of checking.
pub fn decode_legacy<T: DeserializeOwned>(
    context: &RequestContext,
    raw: &RawResponse,
) -> Result<T> {
    expect_status(context, raw, &[StatusCode::OK])?;
    let envelope: LegacyEnvelope = decode_json(context, raw)?;
    if let EnvelopeStatus::Failure { code } = envelope.status() {
        return Err(envelope_error(context, raw, code, envelope.message()));
    }
    decode_json(context, raw)
}

/// JSON:API style `{"data": [...], "errors": [...]}` body.
///
/// # Errors
/// Status error for an unexpected code, envelope error when `errors` is not
/// empty, decode error for a malformed body.
pub fn decode_data_envelope<T: DeserializeOwned>(
    context: &RequestContext,
    raw: &RawResponse,
    expected: &[StatusCode],
) -> Result<Vec<T>> {
    expect_status(context, raw, expected)?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let envelope: DataEnvelope<T> = decode_json(context, raw)?;
    if let EnvelopeStatus::Failure { code } = envelope.status() {
        return Err(envelope_error(context, raw, code, &envelope.error_message()));
    }
    Ok(envelope.data)
}

/// HTTP 200 plus an absent or zero `errorCode`.
///
/// # Errors
/// Status, envelope or decode error.
pub fn check_error_code(context: &RequestContext, raw: &RawResponse) -> Result<()> {
    expect_status(context, raw, &[StatusCode::OK])?;
    if raw.is_empty() {
        return Ok(());
    }
    let envelope: ErrorCodeEnvelope = decode_json(context, raw)?;
    match envelope.status() {
        EnvelopeStatus::Success => Ok(()),
        EnvelopeStatus::Failure { code } => {
            Err(envelope_error(context, raw, code, envelope.message()))
        }
    }
}

/// [`check_error_code`] followed by decoding the body as `T`.
///
/// # Errors
/// Status, envelope or decode error.
pub fn decode_error_code<T: DeserializeOwned>(
    context: &RequestContext,
    raw: &RawResponse,
) -> Result<T> {
    check_error_code(context, raw)?;
    decode_json(context, raw)
}

fn decode_error(context: &RequestContext, raw: &RawResponse, err: &serde_json::Error) -> IncapsulaError {
    IncapsulaError::Decode { context: context.clone(), message: err.to_string(), body: raw.text() }
}

fn envelope_error(
    context: &RequestContext,
    raw: &RawResponse,
    code: String,
    message: &str,
) -> IncapsulaError {
    IncapsulaError::Envelope {
        context: context.clone(),
        code,
        message: message.to_string(),
        body: raw.text(),
    }
}

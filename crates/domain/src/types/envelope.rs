//! Response envelopes
//!
//! Three families of in-body success signalling exist upstream:
//!
//! - legacy form endpoints answer `{"res": 0, "res_message": "OK", ...}`,
//!   where `res` is sometimes a number and sometimes a string;
//! - JSON:API style endpoints answer `{"data": [...], "errors": [...]}`;
//! - a few JSON endpoints report `{"errorCode": ..., "message": ...}`.
//!
//! Each envelope is decoded into a typed view and reduced to a single
//! [`EnvelopeStatus`] before any decision is made on it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Legacy `res` value: either a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResCode {
    Number(serde_json::Number),
    Text(String),
}

impl ResCode {
    /// Normalise to success (zero or empty) or failure carrying the code.
    pub fn status(&self) -> EnvelopeStatus {
        match self {
            Self::Number(n) if n.as_f64() == Some(0.0) => EnvelopeStatus::Success,
            Self::Number(n) => EnvelopeStatus::Failure { code: n.to_string() },
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() || text.parse::<f64>() == Ok(0.0) {
                    EnvelopeStatus::Success
                } else {
                    EnvelopeStatus::Failure { code: text.to_string() }
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == EnvelopeStatus::Success
    }
}

impl fmt::Display for ResCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ResCode {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ResCode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Canonical outcome of an envelope check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeStatus {
    Success,
    Failure { code: String },
}

/// `res` / `res_message` / `debug_info` fields shared by legacy responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res: Option<ResCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<serde_json::Value>,
}

impl LegacyEnvelope {
    /// Absent `res` counts as success.
    pub fn status(&self) -> EnvelopeStatus {
        self.res.as_ref().map_or(EnvelopeStatus::Success, ResCode::status)
    }

    /// Upstream message, or a generic one when the body had none.
    pub fn message(&self) -> &str {
        self.res_message.as_deref().unwrap_or("no res_message in response")
    }
}

/// Pointer into the request that caused a JSON:API error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiErrorSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// One JSON:API error object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ResCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<JsonApiErrorSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl fmt::Display for JsonApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => write!(f, "{title}: {detail}")?,
            (Some(text), None) | (None, Some(text)) => f.write_str(text)?,
            (None, None) => f.write_str("unspecified error")?,
        }
        if let Some(pointer) = self.source.as_ref().and_then(|s| s.pointer.as_deref()) {
            write!(f, " (at {pointer})")?;
        }
        Ok(())
    }
}

/// `data[]` / `errors[]` envelope of the newer JSON endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonApiError>,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data, errors: Vec::new() }
    }

    /// Failure when any error object is present; the code is taken from the
    /// first error's `code`, then its `status`.
    pub fn status(&self) -> EnvelopeStatus {
        match self.errors.first() {
            None => EnvelopeStatus::Success,
            Some(first) => EnvelopeStatus::Failure {
                code: first
                    .code
                    .as_ref()
                    .or(first.status.as_ref())
                    .map_or_else(|| "unknown".to_string(), ToString::to_string),
            },
        }
    }

    /// All error objects joined into one message.
    pub fn error_message(&self) -> String {
        self.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    }
}

/// `errorCode` envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCodeEnvelope {
    #[serde(rename = "errorCode", default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ResCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ErrorCodeEnvelope {
    /// Absent or zero `errorCode` counts as success.
    pub fn status(&self) -> EnvelopeStatus {
        self.error_code.as_ref().map_or(EnvelopeStatus::Success, ResCode::status)
    }

    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("no message in response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn res_zero_as_number_or_string_is_success() {
        let numeric: LegacyEnvelope = serde_json::from_str(r#"{"res": 0}"#).unwrap();
        let textual: LegacyEnvelope = serde_json::from_str(r#"{"res": "0"}"#).unwrap();

        assert_eq!(numeric.status(), EnvelopeStatus::Success);
        assert_eq!(textual.status(), EnvelopeStatus::Success);
    }

    #[test]
    fn res_nonzero_reports_the_code() {
        let numeric: LegacyEnvelope =
            serde_json::from_str(r#"{"res": 9413, "res_message": "Unknown site"}"#).unwrap();
        let textual: LegacyEnvelope =
            serde_json::from_str(r#"{"res": "1", "res_message": "Unexpected error"}"#).unwrap();

        assert_eq!(numeric.status(), EnvelopeStatus::Failure { code: "9413".into() });
        assert_eq!(numeric.message(), "Unknown site");
        assert_eq!(textual.status(), EnvelopeStatus::Failure { code: "1".into() });
    }

    #[test]
    fn res_outside_i64_still_normalises() {
        let float_zero: LegacyEnvelope = serde_json::from_str(r#"{"res": 0.0}"#).unwrap();
        let huge: LegacyEnvelope = serde_json::from_str(r#"{"res": 18446744073709551615}"#).unwrap();
        let fractional: LegacyEnvelope = serde_json::from_str(r#"{"res": 2.5}"#).unwrap();

        assert_eq!(float_zero.status(), EnvelopeStatus::Success);
        assert_eq!(
            huge.status(),
            EnvelopeStatus::Failure { code: "18446744073709551615".into() }
        );
        assert_eq!(fractional.status(), EnvelopeStatus::Failure { code: "2.5".into() });
        assert!(ResCode::from(0).is_success());
    }

    #[test]
    fn missing_or_empty_res_is_success() {
        let absent: LegacyEnvelope = serde_json::from_str("{}").unwrap();
        let empty: LegacyEnvelope = serde_json::from_str(r#"{"res": ""}"#).unwrap();
        assert_eq!(absent.status(), EnvelopeStatus::Success);
        assert_eq!(empty.status(), EnvelopeStatus::Success);
    }

    #[test]
    fn data_envelope_with_errors_fails() {
        let body = r#"{
            "data": [],
            "errors": [{"status": 400, "id": "abc", "code": "INVALID", "title": "Bad Request",
                        "detail": "maxAge must be positive", "source": {"pointer": "/hstsConfiguration/maxAge"}}]
        }"#;
        let envelope: DataEnvelope<serde_json::Value> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.status(), EnvelopeStatus::Failure { code: "INVALID".into() });
        assert_eq!(
            envelope.error_message(),
            "Bad Request: maxAge must be positive (at /hstsConfiguration/maxAge)"
        );
    }

    #[test]
    fn data_envelope_without_errors_succeeds() {
        let envelope: DataEnvelope<u32> = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        assert_eq!(envelope.status(), EnvelopeStatus::Success);
        assert_eq!(envelope.data, vec![1, 2]);
    }

    #[test]
    fn error_code_envelope() {
        let ok: ErrorCodeEnvelope = serde_json::from_str(r#"{"rule_id": 5}"#).unwrap();
        assert_eq!(ok.status(), EnvelopeStatus::Success);

        let failed: ErrorCodeEnvelope =
            serde_json::from_str(r#"{"errorCode": 3015, "description": "Invalid filter"}"#)
                .unwrap();
        assert_eq!(failed.status(), EnvelopeStatus::Failure { code: "3015".into() });
        assert_eq!(failed.message(), "Invalid filter");
    }
}

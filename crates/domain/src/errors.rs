//! Error types used throughout the client
//!
//! Every failure coming back from an API call is normalised into one
//! [`IncapsulaError`]. Variants that originate from a request carry a
//! [`RequestContext`] naming the operation and the resource it targeted, so
//! the message alone is enough for an operator to find the failing call.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operation label and target identifier attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Human readable action, e.g. `"getting ATO allowlist"`.
    pub operation: String,
    /// Target resource, e.g. `"site 1234"` or `"account 55"`.
    pub target: String,
}

impl RequestContext {
    pub fn new(operation: impl Into<String>, target: impl Into<String>) -> Self {
        Self { operation: operation.into(), target: target.into() }
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.operation, self.target)
    }
}

/// Main error type for the Incapsula client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum IncapsulaError {
    /// Connection, DNS, TLS or timeout failure; no response was received.
    #[error("Error from Incapsula service when {context}: {message}")]
    Transport { context: RequestContext, message: String },

    /// A response arrived but its status code was not the expected one.
    #[error("Error status code {status} from Incapsula service when {context}: {body}")]
    Status { context: RequestContext, status: u16, body: String },

    /// HTTP succeeded but the body's `res` / `errorCode` / `errors[]` says otherwise.
    #[error("Error from Incapsula service when {context}: code {code}: {message}: {body}")]
    Envelope { context: RequestContext, code: String, message: String, body: String },

    /// The body was not valid JSON or did not match the expected shape.
    #[error("Error parsing response when {context}: {message}: {body}")]
    Decode { context: RequestContext, message: String, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IncapsulaError {
    /// Request context, for variants produced by an API call.
    pub fn context(&self) -> Option<&RequestContext> {
        match self {
            Self::Transport { context, .. }
            | Self::Status { context, .. }
            | Self::Envelope { context, .. }
            | Self::Decode { context, .. } => Some(context),
            Self::Config(_) | Self::InvalidInput(_) => None,
        }
    }

    /// HTTP status code, when the failure was a status mismatch.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Envelope { body, .. } | Self::Decode { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    /// Stable label suitable for logging fields.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::Envelope { .. } => "envelope",
            Self::Decode { .. } => "decode",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    /// Whether the upstream reported the resource as missing (HTTP 404).
    ///
    /// Read operations use this to drop a resource from state instead of
    /// failing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, IncapsulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new("getting ATO allowlist", "site 1234")
    }

    #[test]
    fn status_error_message_has_code_and_body() {
        let err = IncapsulaError::Status {
            context: ctx(),
            status: 500,
            body: r#"{"message":"boom"}"#.to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains(r#"{"message":"boom"}"#));
        assert!(message.contains("site 1234"));
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.kind_label(), "status");
    }

    #[test]
    fn decode_error_mentions_parsing_and_target() {
        let err = IncapsulaError::Decode {
            context: ctx(),
            message: "EOF while parsing an object".into(),
            body: "{".into(),
        };
        let message = err.to_string();
        assert!(message.contains("parsing"));
        assert!(message.contains("site 1234"));
        assert_eq!(err.body(), Some("{"));
    }

    #[test]
    fn config_errors_have_no_context() {
        let err = IncapsulaError::Config("missing api_id".into());
        assert!(err.context().is_none());
        assert!(err.body().is_none());
        assert!(!err.is_not_found());
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = IncapsulaError::InvalidInput("bad mask".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "InvalidInput");
    }
}

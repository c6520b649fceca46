//! Request description handed to the executor

use incapsula_domain::{IncapsulaError, RequestContext, Result};
use reqwest::Method;
use serde::Serialize;
use url::Url;

/// Where the API id and key travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `api_id` / `api_key` query parameters (legacy v1 endpoints).
    QueryParams,
    /// `x-API-Id` / `x-API-Key` headers (newer JSON endpoints).
    Headers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Pre-encoded JSON document.
    Json(Vec<u8>),
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
}

/// A single upstream call: method, absolute URL, body, auth placement and the
/// context used in every log line and error it produces.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: RequestBody,
    pub auth: AuthStyle,
    pub context: RequestContext,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url, context: RequestContext) -> Self {
        Self { method, url, body: RequestBody::Empty, auth: AuthStyle::Headers, context }
    }

    pub fn get(url: Url, context: RequestContext) -> Self {
        Self::new(Method::GET, url, context)
    }

    pub fn post(url: Url, context: RequestContext) -> Self {
        Self::new(Method::POST, url, context)
    }

    pub fn put(url: Url, context: RequestContext) -> Self {
        Self::new(Method::PUT, url, context)
    }

    pub fn delete(url: Url, context: RequestContext) -> Self {
        Self::new(Method::DELETE, url, context)
    }

    #[must_use]
    pub fn auth(mut self, auth: AuthStyle) -> Self {
        self.auth = auth;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let encoded = serde_json::to_vec(body).map_err(|e| {
            IncapsulaError::InvalidInput(format!(
                "failed to encode request body when {}: {e}",
                self.context
            ))
        })?;
        self.body = RequestBody::Json(encoded);
        Ok(self)
    }

    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }
}

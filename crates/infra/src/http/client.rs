use std::fmt;
use std::time::Duration;

use incapsula_domain::constants::{
    DEFAULT_TIMEOUT_SECONDS, HEADER_API_ID, HEADER_API_KEY, PARAM_API_ID, PARAM_API_KEY, USER_AGENT,
};
use incapsula_domain::Result;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, StatusCode};
use tracing::{debug, info};

use super::request::{ApiRequest, AuthStyle, RequestBody};
use crate::errors::conversions::client_build_error;
use crate::errors::IntoIncapsulaError;

/// API id / key pair.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(api_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { api_id: api_id.into(), api_key: api_key.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Fully read upstream response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// True for an empty or whitespace-only body.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Authenticated single-attempt HTTP executor.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    credentials: Credentials,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient").field("credentials", &self.credentials).finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Issue `request` once and read the whole response.
    ///
    /// Any status code is returned as a [`RawResponse`]; interpreting it is
    /// left to `crate::api::response`.
    ///
    /// # Errors
    /// Returns `IncapsulaError::Transport` when no complete response was
    /// received (DNS, connect, TLS, timeout, truncated body).
    pub async fn execute(&self, request: &ApiRequest) -> Result<RawResponse> {
        let context = &request.context;
        info!(
            operation = %context.operation,
            target = %context.target,
            method = %request.method,
            url = %request.url,
            "sending Incapsula API request"
        );

        let mut builder = self.client.request(request.method.clone(), request.url.clone());

        builder = match request.auth {
            AuthStyle::QueryParams => builder.query(&[
                (PARAM_API_ID, self.credentials.api_id.as_str()),
                (PARAM_API_KEY, self.credentials.api_key.as_str()),
            ]),
            AuthStyle::Headers => builder
                .header(HEADER_API_ID, self.credentials.api_id.as_str())
                .header(HEADER_API_KEY, self.credentials.api_key.as_str()),
        };

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => {
                builder.header(CONTENT_TYPE, "application/json").body(bytes.clone())
            }
            RequestBody::Form(fields) => builder.form(fields),
        };

        let response = builder.send().await.map_err(|err| err.into_incapsula(context))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|err| err.into_incapsula(context))?.to_vec();

        debug!(
            operation = %context.operation,
            target = %context.target,
            %status,
            body = %String::from_utf8_lossy(&body),
            "received Incapsula API response"
        );

        Ok(RawResponse { status, headers, body })
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: String,
    credentials: Credentials,
    default_headers: Option<HeaderMap>,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: USER_AGENT.to_string(),
            credentials: Credentials::default(),
            default_headers: None,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Test-only helper to allow insecure TLS (e.g., self-signed certs).
    #[cfg(test)]
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    /// # Errors
    /// Returns `IncapsulaError::Config` if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy();

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| client_build_error(&err))?;

        Ok(HttpClient { client, credentials: self.credentials })
    }
}

//! Incapsula API client
//!
//! [`IncapsulaClient`] owns the shared HTTP executor, the configuration and
//! the sleeper used between retry attempts. All three are fixed at
//! construction; endpoint methods live in the sibling modules.

use std::sync::Arc;
use std::time::Duration;

use incapsula_common::resilience::{BackoffSchedule, ScheduledRetry};
use incapsula_common::time::{Sleeper, TokioSleeper};
use incapsula_domain::constants::PARAM_ACCOUNT_ID;
use incapsula_domain::{ClientConfig, IncapsulaError, Result};
use url::Url;

use crate::http::{ApiRequest, Credentials, HttpClient, RawResponse};

/// Client for the Incapsula/Imperva management API.
#[derive(Debug, Clone)]
pub struct IncapsulaClient {
    http: Arc<HttpClient>,
    config: Arc<ClientConfig>,
    sleeper: Arc<dyn Sleeper>,
}

impl IncapsulaClient {
    /// Client with default transport settings for `config`.
    ///
    /// # Errors
    /// Returns `IncapsulaError::Config` if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> IncapsulaClientBuilder {
        IncapsulaClientBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL on the legacy v1 API.
    ///
    /// # Errors
    /// Returns `IncapsulaError::Config` if the joined URL does not parse.
    pub fn legacy_url(&self, path: &str) -> Result<Url> {
        join_url(&self.config.base_url, path)
    }

    /// URL on the v2 API.
    pub fn rev2_url(&self, path: &str) -> Result<Url> {
        join_url(&self.config.base_url_rev_2, path)
    }

    /// URL on `api.imperva.com`, scoped to `account_id` through `caid`.
    pub fn api_url(&self, path: &str, account_id: Option<u64>) -> Result<Url> {
        let mut url = join_url(&self.config.base_url_api, path)?;
        if let Some(account_id) = account_id {
            url.query_pairs_mut().append_pair(PARAM_ACCOUNT_ID, &account_id.to_string());
        }
        Ok(url)
    }

    pub(crate) async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        self.http.execute(request).await
    }

    /// Fixed-backoff retry waiting through this client's sleeper.
    pub(crate) fn retry(&self, seconds: &[u64]) -> ScheduledRetry {
        ScheduledRetry::with_sleeper(BackoffSchedule::from_secs(seconds), Arc::clone(&self.sleeper))
    }
}

fn join_url(base: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| IncapsulaError::Config(format!("invalid URL {joined}: {e}")))
}

/// Builder for [`IncapsulaClient`]
#[derive(Default)]
pub struct IncapsulaClientBuilder {
    config: Option<ClientConfig>,
    http: Option<HttpClient>,
    sleeper: Option<Arc<dyn Sleeper>>,
}

impl IncapsulaClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a preconfigured executor instead of one derived from the config.
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Set the sleeper used between retry attempts
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is missing or invalid, or the HTTP
    /// client cannot be created
    pub fn build(self) -> Result<IncapsulaClient> {
        let config =
            self.config.ok_or_else(|| IncapsulaError::Config("client configuration not set".into()))?;
        config.validate()?;

        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .credentials(Credentials::new(config.api_id.clone(), config.api_key.clone()))
                .build()?,
        };

        Ok(IncapsulaClient {
            http: Arc::new(http),
            config: Arc::new(config),
            sleeper: self.sleeper.unwrap_or_else(|| Arc::new(TokioSleeper)),
        })
    }
}

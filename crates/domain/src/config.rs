//! Client configuration
//!
//! Credentials, upstream base URLs and per-endpoint retry schedules. The
//! loader in the infrastructure crate fills this from the environment or a
//! JSON/TOML file.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    ATO_ALLOWLIST_BACKOFF_SECONDS, ATO_MITIGATION_BACKOFF_SECONDS, DEFAULT_BASE_URL,
    DEFAULT_BASE_URL_API, DEFAULT_BASE_URL_REV_2, DEFAULT_TIMEOUT_SECONDS,
};
use crate::errors::{IncapsulaError, Result};

/// Configuration for the API client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_id: String,
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_base_url_rev_2")]
    pub base_url_rev_2: String,
    #[serde(default = "default_base_url_api")]
    pub base_url_api: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub retry: RetrySchedules,
}

/// Backoff schedules, in seconds, for endpoints that need time to become
/// consistent after a dependent resource is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySchedules {
    #[serde(default = "default_ato_allowlist")]
    pub ato_allowlist_seconds: Vec<u64>,
    #[serde(default = "default_ato_mitigation")]
    pub ato_mitigation_seconds: Vec<u64>,
}

impl Default for RetrySchedules {
    fn default() -> Self {
        Self {
            ato_allowlist_seconds: default_ato_allowlist(),
            ato_mitigation_seconds: default_ato_mitigation(),
        }
    }
}

impl ClientConfig {
    /// Configuration with the given credentials and default endpoints.
    pub fn new(api_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            api_key: api_key.into(),
            base_url: default_base_url(),
            base_url_rev_2: default_base_url_rev_2(),
            base_url_api: default_base_url_api(),
            timeout_seconds: default_timeout_seconds(),
            retry: RetrySchedules::default(),
        }
    }

    /// Point every base URL at one host, keeping the upstream path layout.
    ///
    /// Used against mock servers and private deployments.
    pub fn with_endpoint_root(mut self, root: &str) -> Self {
        let root = root.trim_end_matches('/');
        self.base_url = format!("{root}/api/prov/v1");
        self.base_url_rev_2 = format!("{root}/api/prov/v2");
        self.base_url_api = root.to_string();
        self
    }

    /// Check credentials, URLs and timeout.
    ///
    /// # Errors
    /// Returns `IncapsulaError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.api_id.trim().is_empty() {
            return Err(IncapsulaError::Config("api_id must not be empty".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(IncapsulaError::Config("api_key must not be empty".into()));
        }
        for (name, value) in [
            ("base_url", &self.base_url),
            ("base_url_rev_2", &self.base_url_rev_2),
            ("base_url_api", &self.base_url_api),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| IncapsulaError::Config(format!("{name} is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(IncapsulaError::Config(format!(
                    "{name} must use http or https, got {}",
                    parsed.scheme()
                )));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(IncapsulaError::Config("timeout_seconds must be greater than zero".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_id", &self.api_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("base_url_rev_2", &self.base_url_rev_2)
            .field("base_url_api", &self.base_url_api)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry", &self.retry)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_base_url_rev_2() -> String {
    DEFAULT_BASE_URL_REV_2.to_string()
}

fn default_base_url_api() -> String {
    DEFAULT_BASE_URL_API.to_string()
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_ato_allowlist() -> Vec<u64> {
    ATO_ALLOWLIST_BACKOFF_SECONDS.to_vec()
}

fn default_ato_mitigation() -> Vec<u64> {
    ATO_MITIGATION_BACKOFF_SECONDS.to_vec()
}

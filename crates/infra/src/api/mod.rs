//! Incapsula management API
//!
//! [`IncapsulaClient`] and its endpoint operations, grouped by product area.
//! Every operation validates its input, issues one request through
//! [`crate::http::HttpClient`] and hands the raw response to [`response`].
//!
//! # Architecture
//!
//! - Legacy v1 endpoints: form encoded POST, query parameter auth, `res`
//!   envelope
//! - JSON endpoints: header auth, status-only, `errors[]` or `errorCode`
//! - Retrying variants wrap the plain operation with a fixed schedule taken
//!   from [`incapsula_domain::RetrySchedules`]

pub mod abp;
pub mod account;
pub mod ato;
pub mod client;
pub mod incap_rules;
pub mod response;
pub mod sites;
pub mod ssl_settings;

use incapsula_domain::{IncapsulaError, Result};

pub use client::{IncapsulaClient, IncapsulaClientBuilder};

/// Reject a zero identifier before any request is made.
pub(crate) fn ensure_id(kind: &str, id: u64) -> Result<()> {
    if id == 0 {
        return Err(IncapsulaError::InvalidInput(format!("{kind} id must be positive")));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use incapsula_common::testing::RecordingSleeper;
    use incapsula_domain::ClientConfig;
    use wiremock::MockServer;

    use super::IncapsulaClient;

    /// Client pointed at `server`, with a sleeper that records instead of waiting.
    pub(crate) fn client_for(server: &MockServer) -> (IncapsulaClient, RecordingSleeper) {
        let sleeper = RecordingSleeper::new();
        let config = ClientConfig::new("123", "secret").with_endpoint_root(&server.uri());
        let client = IncapsulaClient::builder()
            .config(config)
            .sleeper(Arc::new(sleeper.clone()))
            .build()
            .expect("client");
        (client, sleeper)
    }
}

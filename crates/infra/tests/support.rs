//! Shared helpers for infra integration tests.

use std::sync::Arc;

use incapsula_common::testing::RecordingSleeper;
use incapsula_domain::ClientConfig;
use incapsula_infra::IncapsulaClient;
use wiremock::MockServer;

pub const API_ID: &str = "12345";
pub const API_KEY: &str = "integration-secret";

/// Client wired to `server` and the sleeper that records its backoff.
pub struct TestClient {
    pub client: IncapsulaClient,
    pub sleeper: RecordingSleeper,
}

impl TestClient {
    pub fn new(server: &MockServer) -> Self {
        Self::with_config(ClientConfig::new(API_ID, API_KEY).with_endpoint_root(&server.uri()))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let sleeper = RecordingSleeper::new();
        let client = IncapsulaClient::builder()
            .config(config)
            .sleeper(Arc::new(sleeper.clone()))
            .build()
            .expect("client should build against the mock server");
        Self { client, sleeper }
    }
}

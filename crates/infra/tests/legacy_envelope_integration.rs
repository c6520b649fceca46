//! Integration tests for legacy `res` envelope handling over HTTP.

#[path = "support.rs"]
mod support;

use std::net::TcpListener;

use incapsula_domain::{ClientConfig, Diagnostic, IncapsulaError, SiteAddRequest};
use support::{TestClient, API_ID, API_KEY};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn status_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/prov/v1/sites/status"))
        .and(query_param("api_id", API_ID))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn res_zero_is_success_in_either_spelling() {
    for body in [
        r#"{"site_id": 7, "domain": "a.example.com", "res": 0}"#,
        r#"{"site_id": 7, "domain": "a.example.com", "res": "0"}"#,
        r#"{"site_id": 7, "domain": "a.example.com"}"#,
    ] {
        let server = status_server(body).await;
        let test = TestClient::new(&server);
        let status = test.client.site_status(7).await.expect("status");
        assert_eq!(status.domain, "a.example.com");
    }
}

#[tokio::test]
async fn non_zero_res_is_failure_in_either_spelling() {
    for (body, code) in [
        (r#"{"res": 1, "res_message": "Unexpected error"}"#, "1"),
        (r#"{"res": "9415", "res_message": "Operation not allowed"}"#, "9415"),
    ] {
        let server = status_server(body).await;
        let test = TestClient::new(&server);
        let err = test.client.site_status(7).await.unwrap_err();

        match &err {
            IncapsulaError::Envelope { code: actual, message, .. } => {
                assert_eq!(actual, code);
                assert!(!message.is_empty());
            }
            other => panic!("expected envelope error, got {other:?}"),
        }
        assert!(err.to_string().contains(code));
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error_naming_the_site() {
    let server = status_server("{").await;
    let test = TestClient::new(&server);

    let err = test.client.site_status(7).await.unwrap_err();
    assert!(matches!(err, IncapsulaError::Decode { .. }));
    let message = err.to_string();
    assert!(message.contains("parsing"));
    assert!(message.contains("site 7"));
}

#[tokio::test]
async fn site_lifecycle() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/prov/v1/sites/add"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"site_id": "88", "res": 0}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/prov/v1/sites/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"res": "0", "res_message": "OK"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestClient::new(&server);
    let created = test.client.add_site(&SiteAddRequest::new("b.example.com")).await?;
    assert_eq!(created.site_id, 88);
    test.client.delete_site(created.site_id).await?;
    Ok(())
}

#[tokio::test]
async fn transport_failure_never_exposes_the_api_key() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let config =
        ClientConfig::new(API_ID, API_KEY).with_endpoint_root(&format!("http://{addr}"));
    let test = TestClient::with_config(config);

    let err = test.client.site_status(7).await.unwrap_err();
    assert!(matches!(err, IncapsulaError::Transport { .. }));

    let message = err.to_string();
    assert!(!message.contains(API_KEY), "key leaked: {message}");
    assert!(message.contains("site 7"));
    assert!(!Diagnostic::from(&err).detail.contains(API_KEY));
}

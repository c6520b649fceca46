//! Conversions from external infrastructure errors into domain errors.

use incapsula_domain::constants::PARAM_API_KEY;
use incapsula_domain::{IncapsulaError, RequestContext};
use reqwest::Error as HttpError;
use url::Url;

const REDACTED: &str = "REDACTED";

/// Extension trait attaching the request context while converting.
pub trait IntoIncapsulaError {
    fn into_incapsula(self, context: &RequestContext) -> IncapsulaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → IncapsulaError */
/* -------------------------------------------------------------------------- */

impl IntoIncapsulaError for HttpError {
    fn into_incapsula(self, context: &RequestContext) -> IncapsulaError {
        // reqwest renders the full URL, which carries the key on legacy calls.
        let url = self.url().map(redact_url);
        let err = self.without_url();
        let cause = match url {
            Some(url) => format!("{err} for url ({url})"),
            None => err.to_string(),
        };

        let message = if err.is_timeout() {
            format!("HTTP request timed out: {cause}")
        } else if err.is_connect() {
            format!("HTTP connection failure: {cause}")
        } else if err.is_body() || err.is_decode() {
            format!("failed to read response body: {cause}")
        } else if err.is_builder() {
            format!("invalid HTTP request: {cause}")
        } else {
            cause
        };

        IncapsulaError::Transport { context: context.clone(), message }
    }
}

/// `url` with the value of the API key query parameter masked.
fn redact_url(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == PARAM_API_KEY) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == PARAM_API_KEY { REDACTED.to_string() } else { value.into_owned() };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Client construction failures are configuration problems.
pub(crate) fn client_build_error(err: &HttpError) -> IncapsulaError {
    IncapsulaError::Config(format!("failed to build HTTP client: {err}"))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn context() -> RequestContext {
        RequestContext::new("reading site status", "site 42")
    }

    #[tokio::test]
    async fn connection_refused_maps_to_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        match error.into_incapsula(&context()) {
            IncapsulaError::Transport { context, message } => {
                assert_eq!(context.target, "site 42");
                assert!(message.contains("connection failure"), "unexpected message: {message}");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_error_masks_api_key_in_url() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client
            .post(format!("http://{addr}/api/prov/v1/sites/status"))
            .query(&[("api_id", "12345"), ("api_key", "very-secret")])
            .send()
            .await
            .unwrap_err();

        let message = error.into_incapsula(&context()).to_string();
        assert!(!message.contains("very-secret"), "key leaked: {message}");
        assert!(message.contains("api_key=REDACTED"), "unexpected message: {message}");
        assert!(message.contains("api_id=12345"));
        assert!(message.contains("/api/prov/v1/sites/status"));
    }

    #[test]
    fn redact_url_leaves_urls_without_key_untouched() {
        let url = Url::parse("https://api.imperva.com/ato/v2/sites/1/allowlist?caid=7").unwrap();
        assert_eq!(redact_url(&url), url.as_str());
    }

    #[tokio::test]
    async fn timeout_maps_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client =
            Client::builder().no_proxy().timeout(Duration::from_millis(50)).build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap_err();

        let mapped = error.into_incapsula(&context());
        assert!(matches!(mapped, IncapsulaError::Transport { .. }));
        assert!(mapped.to_string().contains("timed out"));
        assert!(mapped.to_string().contains("reading site status for site 42"));
    }
}

//! Account takeover protection endpoints
//!
//! Freshly created sites take a while to become visible to the ATO service,
//! so the read of the allowlist and the write of the mitigation config have
//! retrying variants driven by [`incapsula_domain::RetrySchedules`].

use incapsula_domain::{
    AllowlistBody, AtoAllowlistEntry, AtoMitigationItem, AtoSiteAllowlist, IncapsulaError,
    RequestContext, Result,
};
use reqwest::StatusCode;

use super::client::IncapsulaClient;
use super::ensure_id;
use super::response::{decode_json, expect_status};
use crate::http::ApiRequest;

fn site_context(operation: &str, site_id: u64) -> RequestContext {
    RequestContext::new(operation, format!("site {site_id}"))
}

fn account_scope(account_id: u64) -> Option<u64> {
    (account_id != 0).then_some(account_id)
}

fn validate_mitigation(site_id: u64, items: &[AtoMitigationItem]) -> Result<()> {
    ensure_id("site", site_id)?;
    if items.iter().any(|item| item.endpoint_id.trim().is_empty()) {
        return Err(IncapsulaError::InvalidInput("mitigation endpoint id must not be empty".into()));
    }
    Ok(())
}

impl IncapsulaClient {
    fn allowlist_path(site_id: u64) -> String {
        format!("/ato/v2/sites/{site_id}/allowlist")
    }

    fn mitigation_path(site_id: u64) -> String {
        format!("/ato/v2/sites/{site_id}/mitigation")
    }

    /// Allowlist of `site_id`. `account_id` 0 means the API key's own account.
    ///
    /// # Errors
    /// Any transport, status or decode error.
    pub async fn get_ato_allowlist(&self, site_id: u64, account_id: u64) -> Result<AtoSiteAllowlist> {
        ensure_id("site", site_id)?;
        let context = site_context("getting ATO allowlist", site_id);
        let url = self.api_url(&Self::allowlist_path(site_id), account_scope(account_id))?;
        let request = ApiRequest::get(url, context.clone());

        let raw = self.send(&request).await?;
        expect_status(&context, &raw, &[StatusCode::OK])?;
        let body: AllowlistBody = decode_json(&context, &raw)?;

        Ok(AtoSiteAllowlist { site_id, account_id, allowlist: body.into_entries() })
    }

    /// [`get_ato_allowlist`](Self::get_ato_allowlist) retried on the
    /// allowlist schedule.
    ///
    /// # Errors
    /// `InvalidInput` for a zero site id without any attempt, otherwise the
    /// error of the last attempt once the schedule is exhausted.
    pub async fn get_ato_allowlist_with_retries(
        &self,
        site_id: u64,
        account_id: u64,
    ) -> Result<AtoSiteAllowlist> {
        ensure_id("site", site_id)?;
        self.retry(&self.config().retry.ato_allowlist_seconds)
            .execute("getting ATO allowlist", || self.get_ato_allowlist(site_id, account_id))
            .await
    }

    /// Replace the allowlist of `allowlist.site_id`.
    ///
    /// # Errors
    /// `InvalidInput` for a bad entry, otherwise any request error.
    pub async fn update_ato_allowlist(&self, allowlist: &AtoSiteAllowlist) -> Result<()> {
        allowlist.validate()?;
        self.put_allowlist(
            allowlist.site_id,
            allowlist.account_id,
            &allowlist.allowlist,
            "updating ATO allowlist",
        )
        .await
    }

    /// Clear the allowlist of `site_id`.
    ///
    /// # Errors
    /// Any transport or status error.
    pub async fn delete_ato_allowlist(&self, site_id: u64, account_id: u64) -> Result<()> {
        ensure_id("site", site_id)?;
        self.put_allowlist(site_id, account_id, &[], "deleting ATO allowlist").await
    }

    async fn put_allowlist(
        &self,
        site_id: u64,
        account_id: u64,
        entries: &[AtoAllowlistEntry],
        operation: &str,
    ) -> Result<()> {
        let context = site_context(operation, site_id);
        let url = self.api_url(&Self::allowlist_path(site_id), account_scope(account_id))?;
        let request = ApiRequest::put(url, context.clone()).json(entries)?;

        let raw = self.send(&request).await?;
        expect_status(&context, &raw, &[StatusCode::OK])
    }

    /// # Errors
    /// Any transport, status or decode error.
    pub async fn get_ato_mitigation(
        &self,
        site_id: u64,
        account_id: u64,
    ) -> Result<Vec<AtoMitigationItem>> {
        ensure_id("site", site_id)?;
        let context = site_context("getting ATO mitigation configuration", site_id);
        let url = self.api_url(&Self::mitigation_path(site_id), account_scope(account_id))?;
        let request = ApiRequest::get(url, context.clone());

        let raw = self.send(&request).await?;
        expect_status(&context, &raw, &[StatusCode::OK])?;
        decode_json(&context, &raw)
    }

    /// # Errors
    /// `InvalidInput` for an item without endpoint id, otherwise any request error.
    pub async fn update_ato_mitigation(
        &self,
        site_id: u64,
        account_id: u64,
        items: &[AtoMitigationItem],
    ) -> Result<()> {
        validate_mitigation(site_id, items)?;
        let context = site_context("updating ATO mitigation configuration", site_id);
        let url = self.api_url(&Self::mitigation_path(site_id), account_scope(account_id))?;
        let request = ApiRequest::put(url, context.clone()).json(items)?;

        let raw = self.send(&request).await?;
        expect_status(&context, &raw, &[StatusCode::OK])
    }

    /// [`update_ato_mitigation`](Self::update_ato_mitigation) retried on the
    /// mitigation schedule.
    ///
    /// # Errors
    /// `InvalidInput` for bad arguments without any attempt, otherwise the
    /// error of the last attempt once the schedule is exhausted.
    pub async fn update_ato_mitigation_with_retries(
        &self,
        site_id: u64,
        account_id: u64,
        items: &[AtoMitigationItem],
    ) -> Result<()> {
        validate_mitigation(site_id, items)?;
        self.retry(&self.config().retry.ato_mitigation_seconds)
            .execute("updating ATO mitigation configuration", || {
                self.update_ato_mitigation(site_id, account_id, items)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use incapsula_domain::AtoMitigationAction;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::test_support::client_for;

    const ALLOWLIST: &str = r#"[{"ip":"192.10.20.0","mask":"24","desc":"Test IP 1"},
                                {"ip":"192.10.20.1","mask":"8","desc":"Test IP 2"}]"#;

    #[tokio::test]
    async fn allowlist_fetch_decodes_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ato/v2/sites/42/allowlist"))
            .and(query_param("caid", "55"))
            .and(header("x-api-id", "123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ALLOWLIST))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let allowlist = client.get_ato_allowlist(42, 55).await.unwrap();

        assert_eq!(allowlist.allowlist.len(), 2);
        let (first, second) = (&allowlist.allowlist[0], &allowlist.allowlist[1]);
        assert_eq!(first.ip, "192.10.20.0");
        assert_eq!(first.mask, "24");
        assert_eq!(first.desc, "Test IP 1");
        assert_ne!(first.ip, second.ip);
        assert_ne!(first.mask, second.mask);
        assert_ne!(first.desc, second.desc);
    }

    #[tokio::test]
    async fn allowlist_bad_json_mentions_parsing_and_site() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ato/v2/sites/42/allowlist"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{"))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let message = client.get_ato_allowlist(42, 0).await.unwrap_err().to_string();
        assert!(message.contains("parsing"), "{message}");
        assert!(message.contains("site 42"), "{message}");
    }

    #[tokio::test]
    async fn allowlist_object_without_entries_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ato/v2/sites/42/allowlist"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"message":"site not provisioned"}"#),
            )
            .expect(5)
            .mount(&server)
            .await;

        let (client, sleeper) = client_for(&server);
        let err = client.get_ato_allowlist_with_retries(42, 0).await.unwrap_err();

        assert!(matches!(err, IncapsulaError::Decode { .. }));
        assert!(err.to_string().contains("site not provisioned"));
        assert_eq!(sleeper.count(), 4);
    }

    #[tokio::test]
    async fn allowlist_without_account_has_no_caid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ato/v2/sites/42/allowlist"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        client.get_ato_allowlist(42, 0).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn allowlist_retries_until_the_site_is_visible() {
        let server = MockServer::start().await;
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        Mock::given(method("GET"))
            .and(path("/ato/v2/sites/42/allowlist"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if calls_clone.fetch_add(1, Ordering::SeqCst) < 3 {
                    ResponseTemplate::new(404).set_body_string("site not found")
                } else {
                    ResponseTemplate::new(200).set_body_string(ALLOWLIST)
                }
            })
            .expect(4)
            .mount(&server)
            .await;

        let (client, sleeper) = client_for(&server);
        let allowlist = client.get_ato_allowlist_with_retries(42, 55).await.unwrap();

        assert_eq!(allowlist.allowlist.len(), 2);
        assert_eq!(
            sleeper.recorded(),
            vec![Duration::from_secs(5), Duration::from_secs(15), Duration::from_secs(30)]
        );
    }

    #[tokio::test]
    async fn allowlist_retries_exhaust_with_last_error() {
        let server = MockServer::start().await;
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                let n = calls_clone.fetch_add(1, Ordering::SeqCst);
                ResponseTemplate::new(500).set_body_string(format!("attempt {n}"))
            })
            .expect(5)
            .mount(&server)
            .await;

        let (client, sleeper) = client_for(&server);
        let err = client.get_ato_allowlist_with_retries(42, 55).await.unwrap_err();

        assert_eq!(err.body(), Some("attempt 4"));
        assert_eq!(sleeper.total(), Duration::from_secs(110));
    }

    #[tokio::test]
    async fn update_allowlist_puts_entries() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/ato/v2/sites/42/allowlist"))
            .and(query_param("caid", "55"))
            .and(body_json(serde_json::json!([{"ip": "10.0.0.0", "mask": "8", "desc": "office"}])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/ato/v2/sites/42/allowlist"))
            .and(body_json(serde_json::json!([])))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        let allowlist = AtoSiteAllowlist {
            site_id: 42,
            account_id: 55,
            allowlist: vec![AtoAllowlistEntry::new("10.0.0.0", "8", "office")],
        };
        client.update_ato_allowlist(&allowlist).await.unwrap();
        client.delete_ato_allowlist(42, 0).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_mask_is_rejected_before_sending() {
        let server = MockServer::start().await;
        let (client, _) = client_for(&server);
        let allowlist = AtoSiteAllowlist {
            site_id: 42,
            account_id: 0,
            allowlist: vec![AtoAllowlistEntry::new("10.0.0.0", "40", "")],
        };

        let err = client.update_ato_allowlist(&allowlist).await.unwrap_err();
        assert!(matches!(err, IncapsulaError::InvalidInput(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mitigation_round_trip() {
        let items = vec![AtoMitigationItem {
            endpoint_id: "login-1".into(),
            low_action: AtoMitigationAction::None,
            medium_action: AtoMitigationAction::Captcha,
            high_action: AtoMitigationAction::Block,
        }];
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ato/v2/sites/42/mitigation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&items))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/ato/v2/sites/42/mitigation"))
            .and(body_json(&items))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server);
        assert_eq!(client.get_ato_mitigation(42, 55).await.unwrap(), items);
        client.update_ato_mitigation(42, 55, &items).await.unwrap();
    }

    #[tokio::test]
    async fn mitigation_update_retries_on_its_own_schedule() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/ato/v2/sites/42/mitigation"))
            .respond_with(ResponseTemplate::new(409).set_body_string("endpoint not ready"))
            .expect(4)
            .mount(&server)
            .await;

        let (client, sleeper) = client_for(&server);
        let err = client.update_ato_mitigation_with_retries(42, 55, &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(409));
        assert_eq!(
            sleeper.recorded(),
            vec![Duration::from_secs(5), Duration::from_secs(15), Duration::from_secs(30)]
        );
    }

    #[tokio::test]
    async fn retrying_variants_reject_bad_arguments_without_sleeping() {
        let server = MockServer::start().await;
        let (client, sleeper) = client_for(&server);

        let err = client.get_ato_allowlist_with_retries(0, 55).await.unwrap_err();
        assert!(matches!(err, IncapsulaError::InvalidInput(_)));

        let items = vec![AtoMitigationItem { endpoint_id: " ".into(), ..Default::default() }];
        let err = client.update_ato_mitigation_with_retries(42, 55, &items).await.unwrap_err();
        assert!(matches!(err, IncapsulaError::InvalidInput(_)));

        assert!(sleeper.recorded().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

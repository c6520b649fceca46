//! Advanced bot protection website selection

use incapsula_domain::{AbpWebsites, RequestContext, Result};
use reqwest::StatusCode;

use super::client::IncapsulaClient;
use super::ensure_id;
use super::response::{decode_json, expect_status};
use crate::http::ApiRequest;

fn account_context(operation: &str, account_id: u64) -> RequestContext {
    RequestContext::new(operation, format!("account {account_id}"))
}

impl IncapsulaClient {
    fn abp_selection_path(account_id: u64) -> String {
        format!("/abp/v1/accounts/{account_id}/selection")
    }

    /// # Errors
    /// Any transport, status or decode error.
    pub async fn get_abp_websites(&self, account_id: u64) -> Result<AbpWebsites> {
        ensure_id("account", account_id)?;
        let context = account_context("reading ABP websites", account_id);
        let request =
            ApiRequest::get(self.api_url(&Self::abp_selection_path(account_id), None)?, context.clone());

        let raw = self.send(&request).await?;
        expect_status(&context, &raw, &[StatusCode::OK])?;
        decode_json(&context, &raw)
    }

    /// Replace the selection and return it as stored upstream.
    ///
    /// # Errors
    /// `InvalidInput` for unnamed or overlapping groups, otherwise any request error.
    pub async fn update_abp_websites(
        &self,
        account_id: u64,
        websites: &AbpWebsites,
    ) -> Result<AbpWebsites> {
        ensure_id("account", account_id)?;
        websites.validate()?;
        let context = account_context("updating ABP websites", account_id);
        let request =
            ApiRequest::put(self.api_url(&Self::abp_selection_path(account_id), None)?, context.clone())
                .json(websites)?;

        let raw = self.send(&request).await?;
        expect_status(&context, &raw, &[StatusCode::OK])?;
        decode_json(&context, &raw)
    }

    /// Clear the selection.
    ///
    /// # Errors
    /// Any transport or status error.
    pub async fn delete_abp_websites(&self, account_id: u64) -> Result<()> {
        ensure_id("account", account_id)?;
        let context = account_context("deleting ABP websites", account_id);
        let request =
            ApiRequest::put(self.api_url(&Self::abp_selection_path(account_id), None)?, context.clone())
                .json(&AbpWebsites::empty())?;

        let raw = self.send(&request).await?;
        expect_status(&context, &raw, &[StatusCode::OK])
    }
}

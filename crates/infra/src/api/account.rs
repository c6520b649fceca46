//! Account endpoints (legacy v1)

use incapsula_domain::{
    AccountStatusResponse, IncapsulaError, LegacyEnvelope, RequestContext, Result, SubAccount,
    SubAccountAddResponse,
};
use tracing::info;

use super::client::IncapsulaClient;
use super::ensure_id;
use super::response::decode_legacy;
use crate::http::{ApiRequest, AuthStyle};

impl IncapsulaClient {
    /// Check that the configured credentials are accepted.
    ///
    /// # Errors
    /// Any transport, status or envelope error from `POST /account`.
    pub async fn verify(&self) -> Result<()> {
        let context =
            RequestContext::new("verifying credentials", format!("API id {}", self.config().api_id));
        let request = ApiRequest::post(self.legacy_url("/account")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(Vec::new());

        let raw = self.send(&request).await?;
        decode_legacy::<AccountStatusResponse>(&context, &raw)?;
        info!(api_id = %self.config().api_id, "Incapsula credentials verified");
        Ok(())
    }

    /// # Errors
    /// Any transport, status, envelope or decode error.
    pub async fn account_status(&self, account_id: u64) -> Result<AccountStatusResponse> {
        ensure_id("account", account_id)?;
        let context = RequestContext::new("reading account status", format!("account {account_id}"));
        let request = ApiRequest::post(self.legacy_url("/account")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(vec![("account_id".into(), account_id.to_string())]);

        let raw = self.send(&request).await?;
        decode_legacy(&context, &raw)
    }

    /// # Errors
    /// `InvalidInput` for a blank name, otherwise any request error.
    pub async fn add_sub_account(
        &self,
        name: &str,
        parent_id: Option<u64>,
        ref_id: Option<&str>,
    ) -> Result<SubAccount> {
        if name.trim().is_empty() {
            return Err(IncapsulaError::InvalidInput("sub account name must not be empty".into()));
        }
        let context = RequestContext::new("adding sub account", format!("sub account {name}"));

        let mut form = vec![("sub_account_name".to_string(), name.to_string())];
        if let Some(parent_id) = parent_id {
            form.push(("parent_id".into(), parent_id.to_string()));
        }
        if let Some(ref_id) = ref_id {
            form.push(("ref_id".into(), ref_id.to_string()));
        }

        let request = ApiRequest::post(self.legacy_url("/subaccounts/add")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(form);

        let raw = self.send(&request).await?;
        let response: SubAccountAddResponse = decode_legacy(&context, &raw)?;
        Ok(response.sub_account)
    }

    /// # Errors
    /// Any transport, status or envelope error.
    pub async fn delete_sub_account(&self, sub_account_id: u64) -> Result<()> {
        ensure_id("sub account", sub_account_id)?;
        let context =
            RequestContext::new("deleting sub account", format!("sub account {sub_account_id}"));
        let request = ApiRequest::post(self.legacy_url("/subaccounts/delete")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(vec![("sub_account_id".into(), sub_account_id.to_string())]);

        let raw = self.send(&request).await?;
        decode_legacy::<LegacyEnvelope>(&context, &raw).map(|_| ())
    }
}

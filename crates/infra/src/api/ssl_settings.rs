//! Site SSL settings (JSON:API envelope)

use incapsula_domain::{RequestContext, Result, SslSettings, SslSettingsDto};
use reqwest::StatusCode;

use super::client::IncapsulaClient;
use super::ensure_id;
use super::response::decode_data_envelope;
use crate::http::ApiRequest;

impl IncapsulaClient {
    fn ssl_settings_url(&self, site_id: u64, account_id: u64) -> Result<url::Url> {
        self.api_url(
            &format!("/certificates-ui/v3/sites/{site_id}/ssl-settings"),
            (account_id != 0).then_some(account_id),
        )
    }

    /// # Errors
    /// Any transport, status, envelope or decode error.
    pub async fn get_ssl_settings(&self, site_id: u64, account_id: u64) -> Result<SslSettings> {
        ensure_id("site", site_id)?;
        let context = RequestContext::new("reading SSL settings", format!("site {site_id}"));
        let request = ApiRequest::get(self.ssl_settings_url(site_id, account_id)?, context.clone());

        let raw = self.send(&request).await?;
        let data: Vec<SslSettingsDto> = decode_data_envelope(&context, &raw, &[StatusCode::OK])?;
        Ok(data.into_iter().next().map(SslSettings::from).unwrap_or_default())
    }

    /// Write the settings and return them as stored upstream.
    ///
    /// # Errors
    /// `InvalidInput` for an enabled HSTS without max age, otherwise any
    /// request error.
    pub async fn update_ssl_settings(
        &self,
        site_id: u64,
        account_id: u64,
        settings: &SslSettings,
    ) -> Result<SslSettings> {
        ensure_id("site", site_id)?;
        settings.validate()?;
        let context = RequestContext::new("updating SSL settings", format!("site {site_id}"));
        let request = ApiRequest::post(self.ssl_settings_url(site_id, account_id)?, context.clone())
            .json(&SslSettingsDto::from(settings))?;

        let raw = self.send(&request).await?;
        let data: Vec<SslSettingsDto> = decode_data_envelope(&context, &raw, &[StatusCode::OK])?;
        Ok(data.into_iter().next().map(SslSettings::from).unwrap_or_default())
    }
}

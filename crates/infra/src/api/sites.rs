//! Site endpoints (legacy v1)

use incapsula_domain::{
    DataCenter, DataCentersResponse, LegacyEnvelope, RequestContext, Result, SiteAddRequest,
    SiteAddResponse, SiteStatusResponse,
};
use tracing::info;

use super::client::IncapsulaClient;
use super::ensure_id;
use super::response::decode_legacy;
use crate::http::{ApiRequest, AuthStyle};

fn site_context(operation: &str, site_id: u64) -> RequestContext {
    RequestContext::new(operation, format!("site {site_id}"))
}

impl IncapsulaClient {
    /// Create a site and return its id.
    ///
    /// # Errors
    /// `InvalidInput` for a blank domain, otherwise any request error.
    pub async fn add_site(&self, site: &SiteAddRequest) -> Result<SiteAddResponse> {
        site.validate()?;
        let context = RequestContext::new("adding site", format!("domain {}", site.domain));
        let request = ApiRequest::post(self.legacy_url("/sites/add")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(site.to_form());

        let raw = self.send(&request).await?;
        let response: SiteAddResponse = decode_legacy(&context, &raw)?;
        info!(site_id = response.site_id, domain = %site.domain, "site created");
        Ok(response)
    }

    /// # Errors
    /// Any transport, status, envelope or decode error.
    pub async fn site_status(&self, site_id: u64) -> Result<SiteStatusResponse> {
        ensure_id("site", site_id)?;
        let context = site_context("reading site status", site_id);
        let request = ApiRequest::post(self.legacy_url("/sites/status")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(vec![("site_id".into(), site_id.to_string())]);

        let raw = self.send(&request).await?;
        decode_legacy(&context, &raw)
    }

    /// # Errors
    /// Any transport, status or envelope error.
    pub async fn delete_site(&self, site_id: u64) -> Result<()> {
        ensure_id("site", site_id)?;
        let context = site_context("deleting site", site_id);
        let request = ApiRequest::post(self.legacy_url("/sites/delete")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(vec![("site_id".into(), site_id.to_string())]);

        let raw = self.send(&request).await?;
        decode_legacy::<LegacyEnvelope>(&context, &raw)?;
        info!(site_id, "site deleted");
        Ok(())
    }

    /// # Errors
    /// Any transport, status, envelope or decode error.
    pub async fn list_data_centers(&self, site_id: u64) -> Result<Vec<DataCenter>> {
        ensure_id("site", site_id)?;
        let context = site_context("listing data centers", site_id);
        let request = ApiRequest::post(self.legacy_url("/sites/dataCenters/list")?, context.clone())
            .auth(AuthStyle::QueryParams)
            .form(vec![("site_id".into(), site_id.to_string())]);

        let raw = self.send(&request).await?;
        let response: DataCentersResponse = decode_legacy(&context, &raw)?;
        Ok(response.data_centers)
    }
}

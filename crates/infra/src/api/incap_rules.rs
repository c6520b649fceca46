//! Incap rules (v2, `errorCode` envelope)

use incapsula_domain::{IncapRule, IncapRuleCreated, RequestContext, Result};
use tracing::info;

use super::client::IncapsulaClient;
use super::ensure_id;
use super::response::{check_error_code, decode_error_code};
use crate::http::ApiRequest;

fn rule_context(operation: &str, site_id: u64, rule_id: Option<u64>) -> RequestContext {
    let target = match rule_id {
        Some(rule_id) => format!("rule {rule_id} on site {site_id}"),
        None => format!("site {site_id}"),
    };
    RequestContext::new(operation, target)
}

impl IncapsulaClient {
    fn rules_url(&self, site_id: u64, rule_id: Option<u64>) -> Result<url::Url> {
        match rule_id {
            Some(rule_id) => self.rev2_url(&format!("/sites/{site_id}/rules/{rule_id}")),
            None => self.rev2_url(&format!("/sites/{site_id}/rules")),
        }
    }

    /// # Errors
    /// `InvalidInput` for a rule without name or action, otherwise any request error.
    pub async fn create_incap_rule(&self, site_id: u64, rule: &IncapRule) -> Result<IncapRuleCreated> {
        ensure_id("site", site_id)?;
        rule.validate()?;
        let context = rule_context("creating Incap rule", site_id, None);
        let request = ApiRequest::post(self.rules_url(site_id, None)?, context.clone()).json(rule)?;

        let raw = self.send(&request).await?;
        let created: IncapRuleCreated = decode_error_code(&context, &raw)?;
        info!(site_id, rule_id = created.rule_id, "Incap rule created");
        Ok(created)
    }

    /// # Errors
    /// Any transport, status, envelope or decode error.
    pub async fn read_incap_rule(&self, site_id: u64, rule_id: u64) -> Result<IncapRuleCreated> {
        ensure_id("site", site_id)?;
        ensure_id("rule", rule_id)?;
        let context = rule_context("reading Incap rule", site_id, Some(rule_id));
        let request = ApiRequest::get(self.rules_url(site_id, Some(rule_id))?, context.clone());

        let raw = self.send(&request).await?;
        decode_error_code(&context, &raw)
    }

    /// # Errors
    /// `InvalidInput` for a rule without name or action, otherwise any request error.
    pub async fn update_incap_rule(
        &self,
        site_id: u64,
        rule_id: u64,
        rule: &IncapRule,
    ) -> Result<IncapRuleCreated> {
        ensure_id("site", site_id)?;
        ensure_id("rule", rule_id)?;
        rule.validate()?;
        let context = rule_context("updating Incap rule", site_id, Some(rule_id));
        let request =
            ApiRequest::put(self.rules_url(site_id, Some(rule_id))?, context.clone()).json(rule)?;

        let raw = self.send(&request).await?;
        decode_error_code(&context, &raw)
    }

    /// # Errors
    /// Any transport, status or envelope error.
    pub async fn delete_incap_rule(&self, site_id: u64, rule_id: u64) -> Result<()> {
        ensure_id("site", site_id)?;
        ensure_id("rule", rule_id)?;
        let context = rule_context("deleting Incap rule", site_id, Some(rule_id));
        let request = ApiRequest::delete(self.rules_url(site_id, Some(rule_id))?, context.clone());

        let raw = self.send(&request).await?;
        check_error_code(&context, &raw)
    }
}

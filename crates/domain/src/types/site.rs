//! Site DTOs (legacy v1 endpoints)
//!
//! Site creation is form encoded; status and data center listings come back
//! inside the legacy `res` envelope, which the client strips before these
//! types are decoded.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::errors::{IncapsulaError, Result};
use crate::utils::serde::{bool_or_string, u64_or_string};

/// Arguments of `POST /sites/add`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAddRequest {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_site_setup_emails: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_ssl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs_account_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naked_domain_san: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_san: Option<bool>,
}

impl SiteAddRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self { domain: domain.into(), ..Self::default() }
    }

    /// # Errors
    /// Returns `InvalidInput` when the domain is blank.
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(IncapsulaError::InvalidInput("site domain must not be empty".into()));
        }
        Ok(())
    }

    /// Form fields in upstream order. Unset options are omitted.
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![("domain".to_string(), self.domain.clone())];
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                form.push((key.to_string(), value));
            }
        };
        push("account_id", self.account_id.map(|v| v.to_string()));
        push("ref_id", self.ref_id.clone());
        push("send_site_setup_emails", self.send_site_setup_emails.map(|v| v.to_string()));
        push("site_ip", self.site_ip.clone());
        push("force_ssl", self.force_ssl.map(|v| v.to_string()));
        push("log_level", self.log_level.clone());
        push("logs_account_id", self.logs_account_id.map(|v| v.to_string()));
        push("naked_domain_san", self.naked_domain_san.map(|v| v.to_string()));
        push("wildcard_san", self.wildcard_san.map(|v| v.to_string()));
        form
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAddResponse {
    #[serde(with = "u64_or_string")]
    pub site_id: u64,
}

/// DNS change the customer has to make for a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsInstruction {
    #[serde(default)]
    pub dns_record_name: String,
    #[serde(default)]
    pub set_type_to: String,
    #[serde(default)]
    pub set_data_to: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteWarning {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /sites/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStatusResponse {
    #[serde(with = "u64_or_string")]
    pub site_id: u64,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub acceleration_level: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub site_creation_date: i64,
    #[serde(default)]
    pub active: String,
    #[serde(default)]
    pub ips: Vec<String>,
    #[serde(default)]
    pub dns: Vec<DnsInstruction>,
    #[serde(default)]
    pub original_dns: Vec<DnsInstruction>,
    #[serde(default)]
    pub warnings: Vec<SiteWarning>,
}

impl SiteStatusResponse {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.site_creation_date).single()
    }

    /// Upstream warnings as warning diagnostics, one per entry.
    pub fn warning_diagnostics(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for warning in &self.warnings {
            let summary = if warning.kind.is_empty() {
                format!("Warning for site {}", self.domain)
            } else {
                format!("{} for site {}", warning.kind, self.domain)
            };
            diags.warning(summary, warning.message.clone());
        }
        diags
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCenterServer {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "isEnabled", default, with = "bool_or_string")]
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCenter {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "bool_or_string")]
    pub enabled: bool,
    #[serde(default)]
    pub servers: Vec<DataCenterServer>,
}

/// Body of `POST /sites/dataCenters/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCentersResponse {
    #[serde(rename = "DCs", default)]
    pub data_centers: Vec<DataCenter>,
}

//! Account takeover protection DTOs
//!
//! The allowlist endpoint answers either a bare array of entries or an object
//! wrapping it under `allowlist`; [`AllowlistBody`] accepts both.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::errors::{IncapsulaError, Result};

/// One allowlisted address or network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtoAllowlistEntry {
    pub ip: String,
    /// Prefix length as a decimal string; empty for a single address.
    #[serde(default)]
    pub mask: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
}

impl AtoAllowlistEntry {
    pub fn new(ip: impl Into<String>, mask: impl Into<String>, desc: impl Into<String>) -> Self {
        Self { ip: ip.into(), mask: mask.into(), desc: desc.into(), updated: None }
    }

    /// # Errors
    /// Returns `InvalidInput` for an unparsable address or an out of range mask.
    pub fn validate(&self) -> Result<()> {
        let ip: IpAddr = self
            .ip
            .trim()
            .parse()
            .map_err(|_| IncapsulaError::InvalidInput(format!("invalid IP address: {:?}", self.ip)))?;

        let mask = self.mask.trim();
        if mask.is_empty() {
            return Ok(());
        }
        let max = if ip.is_ipv4() { 32 } else { 128 };
        match mask.parse::<u8>() {
            Ok(bits) if (1..=max).contains(&bits) => Ok(()),
            _ => Err(IncapsulaError::InvalidInput(format!(
                "invalid mask {mask:?} for {}: expected 1..={max}",
                self.ip
            ))),
        }
    }
}

/// Allowlist of one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtoSiteAllowlist {
    pub site_id: u64,
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub allowlist: Vec<AtoAllowlistEntry>,
}

impl AtoSiteAllowlist {
    pub fn validate(&self) -> Result<()> {
        if self.site_id == 0 {
            return Err(IncapsulaError::InvalidInput("site id must be positive".into()));
        }
        self.allowlist.iter().try_for_each(AtoAllowlistEntry::validate)
    }
}

/// Wire shape of the allowlist GET response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AllowlistBody {
    Entries(Vec<AtoAllowlistEntry>),
    Wrapped { allowlist: Vec<AtoAllowlistEntry> },
}

impl AllowlistBody {
    pub fn into_entries(self) -> Vec<AtoAllowlistEntry> {
        match self {
            Self::Entries(entries) | Self::Wrapped { allowlist: entries } => entries,
        }
    }
}

/// Mitigation applied at a risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AtoMitigationAction {
    #[default]
    None,
    Captcha,
    Block,
    Tarpit,
}

crate::impl_wire_enum_conversions!(AtoMitigationAction {
    None => "NONE",
    Captcha => "CAPTCHA",
    Block => "BLOCK",
    Tarpit => "TARPIT",
});

/// Mitigation configuration of one login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtoMitigationItem {
    pub endpoint_id: String,
    #[serde(default)]
    pub low_action: AtoMitigationAction,
    #[serde(default)]
    pub medium_action: AtoMitigationAction,
    #[serde(default)]
    pub high_action: AtoMitigationAction,
}

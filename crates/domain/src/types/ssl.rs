//! Site SSL settings
//!
//! The wire format nests HSTS and inbound TLS under separate objects; callers
//! work with the flat [`SslSettings`] and the client converts at the boundary.
//! Absent wire sections map to `None` fields and back, so a round trip through
//! the flat model does not invent sections the server never sent.

use serde::{Deserialize, Serialize};

use crate::errors::{IncapsulaError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HstsConfiguration {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub max_age: u64,
    #[serde(default)]
    pub sub_domains_included: bool,
    #[serde(default)]
    pub pre_loaded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfiguration {
    pub tls_version: String,
    #[serde(default)]
    pub ciphers_support: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundTlsSettingsConfiguration {
    #[serde(default)]
    pub configuration_profile: String,
    #[serde(rename = "tlsConfiguration", default)]
    pub tls_configurations: Vec<TlsConfiguration>,
}

/// Wire shape, one element of the `data` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslSettingsDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsts_configuration: Option<HstsConfiguration>,
    #[serde(
        rename = "inboundTLSSettingsConfiguration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inbound_tls_settings_configuration: Option<InboundTlsSettingsConfiguration>,
}

/// Flat view of a site's SSL settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslSettings {
    pub hsts_enabled: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_sub_domains_included: Option<bool>,
    pub hsts_pre_loaded: Option<bool>,
    pub inbound_tls_profile: Option<String>,
    pub inbound_tls_configurations: Option<Vec<TlsConfiguration>>,
}

impl SslSettings {
    fn has_hsts(&self) -> bool {
        self.hsts_enabled.is_some()
            || self.hsts_max_age.is_some()
            || self.hsts_sub_domains_included.is_some()
            || self.hsts_pre_loaded.is_some()
    }

    /// # Errors
    /// Returns `InvalidInput` when HSTS is enabled without a positive max age.
    pub fn validate(&self) -> Result<()> {
        if self.hsts_enabled == Some(true) && self.hsts_max_age.unwrap_or(0) == 0 {
            return Err(IncapsulaError::InvalidInput(
                "hsts max_age must be positive when HSTS is enabled".into(),
            ));
        }
        if let Some(configurations) = &self.inbound_tls_configurations {
            if configurations.iter().any(|c| c.tls_version.trim().is_empty()) {
                return Err(IncapsulaError::InvalidInput("tls version must not be empty".into()));
            }
        }
        Ok(())
    }
}

impl From<SslSettingsDto> for SslSettings {
    fn from(dto: SslSettingsDto) -> Self {
        let mut settings = Self::default();
        if let Some(hsts) = dto.hsts_configuration {
            settings.hsts_enabled = Some(hsts.is_enabled);
            settings.hsts_max_age = Some(hsts.max_age);
            settings.hsts_sub_domains_included = Some(hsts.sub_domains_included);
            settings.hsts_pre_loaded = Some(hsts.pre_loaded);
        }
        if let Some(inbound) = dto.inbound_tls_settings_configuration {
            settings.inbound_tls_profile = Some(inbound.configuration_profile);
            settings.inbound_tls_configurations = Some(inbound.tls_configurations);
        }
        settings
    }
}

impl From<&SslSettings> for SslSettingsDto {
    fn from(settings: &SslSettings) -> Self {
        let hsts_configuration = settings.has_hsts().then(|| HstsConfiguration {
            is_enabled: settings.hsts_enabled.unwrap_or_default(),
            max_age: settings.hsts_max_age.unwrap_or_default(),
            sub_domains_included: settings.hsts_sub_domains_included.unwrap_or_default(),
            pre_loaded: settings.hsts_pre_loaded.unwrap_or_default(),
        });
        let inbound_tls_settings_configuration = (settings.inbound_tls_profile.is_some()
            || settings.inbound_tls_configurations.is_some())
        .then(|| InboundTlsSettingsConfiguration {
            configuration_profile: settings.inbound_tls_profile.clone().unwrap_or_default(),
            tls_configurations: settings.inbound_tls_configurations.clone().unwrap_or_default(),
        });
        Self { hsts_configuration, inbound_tls_settings_configuration }
    }
}

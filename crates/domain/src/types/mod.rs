//! Request and response DTOs
//!
//! Plain serde structures mirroring the upstream JSON shapes, plus the
//! client-side validation each one needs before it is sent.

pub mod abp;
pub mod account;
pub mod ato;
pub mod envelope;
pub mod incap_rule;
pub mod site;
pub mod ssl;

pub use abp::{AbpWebsite, AbpWebsiteGroup, AbpWebsites};
pub use account::{AccountInfo, AccountStatusResponse, SubAccount, SubAccountAddResponse};
pub use ato::{
    AllowlistBody, AtoAllowlistEntry, AtoMitigationAction, AtoMitigationItem, AtoSiteAllowlist,
};
pub use envelope::{
    DataEnvelope, EnvelopeStatus, ErrorCodeEnvelope, JsonApiError, JsonApiErrorSource,
    LegacyEnvelope, ResCode,
};
pub use incap_rule::{IncapRule, IncapRuleCreated};
pub use site::{
    DataCenter, DataCenterServer, DataCentersResponse, DnsInstruction, SiteAddRequest,
    SiteAddResponse, SiteStatusResponse, SiteWarning,
};
pub use ssl::{
    HstsConfiguration, InboundTlsSettingsConfiguration, SslSettings, SslSettingsDto,
    TlsConfiguration,
};

//! Account and sub-account DTOs (legacy v1 endpoints)

use serde::{Deserialize, Serialize};

use crate::utils::serde::u64_or_string;

/// Body of `POST /account`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatusResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(with = "u64_or_string")]
    pub account_id: u64,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub plan_name: String,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub support_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end_date: Option<String>,
}

/// Body of `POST /subaccounts/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAccountAddResponse {
    pub sub_account: SubAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAccount {
    #[serde(with = "u64_or_string")]
    pub sub_account_id: u64,
    #[serde(default)]
    pub sub_account_name: String,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub is_for_special_ssl_configuration: bool,
}

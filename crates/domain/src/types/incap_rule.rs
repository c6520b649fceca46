//! Incap rule DTOs (v2 site rules API)

use serde::{Deserialize, Serialize};

use crate::errors::{IncapsulaError, Result};

fn is_zero(value: &u32) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A site rule. Only `name`, `action` and `enabled` are always sent; the
/// remaining fields apply to specific actions (redirects, rewrites, rate
/// rules, error overrides) and are omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncapRule {
    pub name: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filter: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub response_code: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub add_missing: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rewrite_name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dc_id: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rate_context: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rate_interval: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_response_format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_response_data: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub multiple_deletions: bool,
    #[serde(default)]
    pub enabled: bool,
}

impl IncapRule {
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self { name: name.into(), action: action.into(), enabled: true, ..Self::default() }
    }

    /// # Errors
    /// Returns `InvalidInput` when the name or action is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(IncapsulaError::InvalidInput("rule name must not be empty".into()));
        }
        if self.action.trim().is_empty() {
            return Err(IncapsulaError::InvalidInput("rule action must not be empty".into()));
        }
        Ok(())
    }
}

/// Rule as returned by create and read: the rule plus its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncapRuleCreated {
    pub rule_id: u64,
    #[serde(flatten)]
    pub rule: IncapRule,
}

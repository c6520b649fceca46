//! Advanced bot protection website selection

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{IncapsulaError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbpWebsite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub website_id: u64,
    #[serde(default)]
    pub mitigation_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbpWebsiteGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub websites: Vec<AbpWebsite>,
}

/// Protected websites of one account, grouped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbpWebsites {
    #[serde(default)]
    pub auto_publish: bool,
    pub website_groups: Vec<AbpWebsiteGroup>,
}

impl AbpWebsites {
    /// Selection that protects nothing; sent when the resource is deleted.
    pub fn empty() -> Self {
        Self { auto_publish: true, website_groups: Vec::new() }
    }

    /// # Errors
    /// Returns `InvalidInput` for an unnamed group or a website listed in two groups.
    pub fn validate(&self) -> Result<()> {
        let mut owners: HashMap<u64, &str> = HashMap::new();
        for group in &self.website_groups {
            if group.name.trim().is_empty() {
                return Err(IncapsulaError::InvalidInput("website group name must not be empty".into()));
            }
            for website in &group.websites {
                if let Some(previous) = owners.insert(website.website_id, &group.name) {
                    return Err(IncapsulaError::InvalidInput(format!(
                        "website {} appears in groups {previous:?} and {:?}",
                        website.website_id, group.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, ids: &[u64]) -> AbpWebsiteGroup {
        AbpWebsiteGroup {
            id: None,
            name: name.to_string(),
            websites: ids
                .iter()
                .map(|&website_id| AbpWebsite { id: None, website_id, mitigation_enabled: true })
                .collect(),
        }
    }

    #[test]
    fn distinct_groups_validate() {
        let websites = AbpWebsites {
            auto_publish: false,
            website_groups: vec![group("shop", &[1, 2]), group("blog", &[3])],
        };
        assert!(websites.validate().is_ok());
    }

    #[test]
    fn website_in_two_groups_is_rejected() {
        let websites = AbpWebsites {
            auto_publish: false,
            website_groups: vec![group("shop", &[1, 2]), group("blog", &[2])],
        };
        let err = websites.validate().unwrap_err();
        assert!(err.to_string().contains("website 2"));
    }

    #[test]
    fn unnamed_group_is_rejected() {
        let websites = AbpWebsites { auto_publish: true, website_groups: vec![group(" ", &[])] };
        assert!(websites.validate().is_err());
    }

    #[test]
    fn selection_requires_website_groups() {
        assert!(serde_json::from_str::<AbpWebsites>("{}").is_err());
        assert!(serde_json::from_str::<AbpWebsites>(r#"{"message":"no ABP license"}"#).is_err());

        let empty: AbpWebsites = serde_json::from_str(r#"{"website_groups": []}"#).unwrap();
        assert!(empty.website_groups.is_empty());
    }

    #[test]
    fn ids_are_omitted_when_unknown() {
        let json = serde_json::to_value(AbpWebsites {
            auto_publish: true,
            website_groups: vec![group("shop", &[9])],
        })
        .unwrap();
        assert!(json["website_groups"][0].get("id").is_none());
        assert_eq!(json["website_groups"][0]["websites"][0]["website_id"], 9);
    }
}

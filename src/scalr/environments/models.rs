//! Environment data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, RelationshipMany, Relationships};
use crate::scalr::traits::ScalrResource;
use crate::scalr::ListOptions;

/// Environment data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct Environment {
    pub id: String,
    #[serde(default)]
    pub attributes: EnvironmentAttributes,
    #[serde(default)]
    pub relationships: EnvironmentRelationships,
}

/// Environment attributes from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EnvironmentAttributes {
    #[serde(default)]
    pub name: String,
    pub status: Option<String>,
    #[serde(rename = "cost-estimation-enabled")]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Environment relationships from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EnvironmentRelationships {
    #[serde(default)]
    pub account: Relationship,
    #[serde(rename = "created-by", default)]
    pub created_by: Relationship,
    #[serde(rename = "default-provider-configurations", default)]
    pub default_provider_configurations: RelationshipMany,
    #[serde(default)]
    pub tags: RelationshipMany,
}

crate::single_resource!(Environment);

impl ScalrResource for Environment {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Environment {
    pub fn account_id(&self) -> Option<&str> {
        self.relationships.account.id()
    }

    pub fn tag_ids(&self) -> Vec<&str> {
        self.relationships.tags.ids()
    }
}

/// Query options for listing environments
#[derive(Serialize, Debug, Clone, Default)]
pub struct EnvironmentListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[name]")]
    pub name: Option<String>,
    #[serde(rename = "filter[environment]")]
    pub environment_id: Option<String>,
    #[serde(rename = "filter[account]")]
    pub account_id: Option<String>,
    #[serde(rename = "filter[tag]")]
    pub tag_id: Option<String>,
    pub include: Option<Vec<String>>,
}

/// Body for creating an environment
#[derive(Serialize, Debug, Clone, Default)]
pub struct EnvironmentCreateOptions {
    pub name: String,
    #[serde(
        rename = "cost-estimation-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(skip)]
    pub account_id: String,
    #[serde(skip)]
    pub default_provider_configuration_ids: Option<Vec<String>>,
    #[serde(skip)]
    pub tag_ids: Option<Vec<String>>,
}

impl Payload for EnvironmentCreateOptions {
    const TYPE: &'static str = "environments";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_one("account", "accounts", Some(&self.account_id))
            .to_many(
                "default-provider-configurations",
                "provider-configurations",
                self.default_provider_configuration_ids.as_ref(),
            )
            .to_many("tags", "tags", self.tag_ids.as_ref())
    }
}

/// Body for updating an environment; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct EnvironmentUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "cost-estimation-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_estimation_enabled: Option<bool>,
    #[serde(skip)]
    pub default_provider_configuration_ids: Option<Vec<String>>,
}

impl Payload for EnvironmentUpdateOptions {
    const TYPE: &'static str = "environments";

    fn relationships(&self) -> Relationships {
        Relationships::new().to_many(
            "default-provider-configurations",
            "provider-configurations",
            self.default_provider_configuration_ids.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalr::jsonapi;

    #[test]
    fn test_deserialize_environment() {
        let json = r#"{
            "id": "env-v0oqvsr9qv4uqo6a9",
            "type": "environments",
            "attributes": {
                "name": "production",
                "status": "Active",
                "cost-estimation-enabled": true,
                "created-at": "2024-03-01T10:20:30Z"
            },
            "relationships": {
                "account": { "data": { "id": "acc-1", "type": "accounts" } },
                "tags": { "data": [{ "id": "tag-1", "type": "tags" }] }
            }
        }"#;

        let env: Environment = serde_json::from_str(json).unwrap();
        assert_eq!(env.id, "env-v0oqvsr9qv4uqo6a9");
        assert_eq!(env.attributes.name, "production");
        assert_eq!(env.attributes.cost_estimation_enabled, Some(true));
        assert!(env.attributes.created_at.is_some());
        assert_eq!(env.account_id(), Some("acc-1"));
        assert_eq!(env.tag_ids(), vec!["tag-1"]);
        assert!(env.matches("production"));
    }

    #[test]
    fn test_minimal_environment() {
        let env: Environment = serde_json::from_str(r#"{"id": "env-1"}"#).unwrap();
        assert_eq!(env.attributes.name, "");
        assert_eq!(env.account_id(), None);
    }

    #[test]
    fn test_create_document() {
        let opts = EnvironmentCreateOptions {
            name: "staging".to_string(),
            account_id: "acc-1".to_string(),
            tag_ids: Some(vec!["tag-1".to_string()]),
            ..Default::default()
        };
        let doc = jsonapi::marshal(&opts).unwrap();
        assert_eq!(doc["data"]["type"], "environments");
        assert_eq!(doc["data"]["attributes"]["name"], "staging");
        assert!(doc["data"]["attributes"]
            .get("cost-estimation-enabled")
            .is_none());
        assert_eq!(doc["data"]["relationships"]["account"]["data"]["id"], "acc-1");
        assert!(doc["data"]["relationships"]
            .get("default-provider-configurations")
            .is_none());
    }
}

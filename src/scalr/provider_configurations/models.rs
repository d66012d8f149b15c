//! Provider configuration data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, RelationshipMany, Relationships};
use crate::scalr::traits::ScalrResource;
use crate::scalr::ListOptions;

/// Provider configuration data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct ProviderConfiguration {
    pub id: String,
    pub attributes: ProviderConfigurationAttributes,
    #[serde(default)]
    pub relationships: ProviderConfigurationRelationships,
}

/// Provider configuration attributes from Scalr API
///
/// Only provider independent fields are modelled; credentials for custom
/// providers live in parameters.
#[derive(Deserialize, Debug, Clone)]
pub struct ProviderConfigurationAttributes {
    pub name: String,
    #[serde(rename = "provider-name")]
    pub provider_name: String,
    #[serde(rename = "export-shell-variables", default)]
    pub export_shell_variables: bool,
    #[serde(rename = "is-shared", default)]
    pub is_shared: bool,
    #[serde(rename = "is-custom", default)]
    pub is_custom: bool,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Provider configuration relationships from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProviderConfigurationRelationships {
    #[serde(default)]
    pub account: Relationship,
    #[serde(default)]
    pub environments: RelationshipMany,
    #[serde(default)]
    pub parameters: RelationshipMany,
    #[serde(default)]
    pub owners: RelationshipMany,
}

crate::single_resource!(ProviderConfiguration);

impl ScalrResource for ProviderConfiguration {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl ProviderConfiguration {
    pub fn parameter_ids(&self) -> Vec<&str> {
        self.relationships.parameters.ids()
    }
}

/// Query options for listing provider configurations
#[derive(Serialize, Debug, Clone, Default)]
pub struct ProviderConfigurationListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[provider-configuration]")]
    pub provider_configuration_id: Option<String>,
    #[serde(rename = "filter[name]")]
    pub name: Option<String>,
    #[serde(rename = "filter[provider-name]")]
    pub provider_name: Option<String>,
    #[serde(rename = "filter[account]")]
    pub account_id: Option<String>,
    #[serde(rename = "filter[environment]")]
    pub environment_id: Option<String>,
    pub include: Option<Vec<String>>,
}

/// Body for creating a provider configuration
#[derive(Serialize, Debug, Clone, Default)]
pub struct ProviderConfigurationCreateOptions {
    pub name: String,
    #[serde(rename = "provider-name")]
    pub provider_name: String,
    #[serde(
        rename = "export-shell-variables",
        skip_serializing_if = "Option::is_none"
    )]
    pub export_shell_variables: Option<bool>,
    #[serde(rename = "is-shared", skip_serializing_if = "Option::is_none")]
    pub is_shared: Option<bool>,
    #[serde(rename = "is-custom", skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
    #[serde(skip)]
    pub account_id: String,
    #[serde(skip)]
    pub environment_ids: Option<Vec<String>>,
    #[serde(skip)]
    pub owner_ids: Option<Vec<String>>,
}

impl Payload for ProviderConfigurationCreateOptions {
    const TYPE: &'static str = "provider-configurations";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_one("account", "accounts", Some(&self.account_id))
            .to_many("environments", "environments", self.environment_ids.as_ref())
            .to_many("owners", "teams", self.owner_ids.as_ref())
    }
}

/// Body for updating a provider configuration; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct ProviderConfigurationUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "export-shell-variables",
        skip_serializing_if = "Option::is_none"
    )]
    pub export_shell_variables: Option<bool>,
    #[serde(rename = "is-shared", skip_serializing_if = "Option::is_none")]
    pub is_shared: Option<bool>,
    #[serde(skip)]
    pub environment_ids: Option<Vec<String>>,
    #[serde(skip)]
    pub owner_ids: Option<Vec<String>>,
}

impl Payload for ProviderConfigurationUpdateOptions {
    const TYPE: &'static str = "provider-configurations";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_many("environments", "environments", self.environment_ids.as_ref())
            .to_many("owners", "teams", self.owner_ids.as_ref())
    }
}

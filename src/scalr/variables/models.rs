//! Variable data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, Relationships};
use crate::scalr::ListOptions;

/// Where a variable is exposed during a run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableCategory {
    /// Terraform input variable
    #[default]
    Terraform,
    /// Environment variable
    Shell,
}

/// Variable data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct Variable {
    pub id: String,
    pub attributes: VariableAttributes,
    #[serde(default)]
    pub relationships: VariableRelationships,
}

/// Variable attributes from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct VariableAttributes {
    pub key: String,
    /// Empty for sensitive variables
    #[serde(default)]
    pub value: String,
    pub category: VariableCategory,
    #[serde(default)]
    pub hcl: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(rename = "final", default)]
    pub is_final: bool,
    pub description: Option<String>,
    #[serde(rename = "updated-at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Variable relationships; exactly one scope is set
#[derive(Deserialize, Debug, Clone, Default)]
pub struct VariableRelationships {
    #[serde(default)]
    pub account: Relationship,
    #[serde(default)]
    pub environment: Relationship,
    #[serde(default)]
    pub workspace: Relationship,
}

crate::single_resource!(Variable);

impl Variable {
    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships.workspace.id()
    }

    pub fn environment_id(&self) -> Option<&str> {
        self.relationships.environment.id()
    }
}

/// Query options for listing variables
#[derive(Serialize, Debug, Clone, Default)]
pub struct VariableListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[key]")]
    pub key: Option<String>,
    #[serde(rename = "filter[category]")]
    pub category: Option<VariableCategory>,
    #[serde(rename = "filter[account]")]
    pub account_id: Option<String>,
    #[serde(rename = "filter[environment]")]
    pub environment_id: Option<String>,
    #[serde(rename = "filter[workspace]")]
    pub workspace_id: Option<String>,
    pub include: Option<Vec<String>>,
}

/// Body for creating a variable
#[derive(Serialize, Debug, Clone, Default)]
pub struct VariableCreateOptions {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub category: VariableCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub is_final: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub account_id: Option<String>,
    #[serde(skip)]
    pub environment_id: Option<String>,
    #[serde(skip)]
    pub workspace_id: Option<String>,
}

impl Payload for VariableCreateOptions {
    const TYPE: &'static str = "vars";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_one("account", "accounts", self.account_id.as_deref())
            .to_one("environment", "environments", self.environment_id.as_deref())
            .to_one("workspace", "workspaces", self.workspace_id.as_deref())
    }
}

/// Body for updating a variable; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct VariableUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub is_final: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Payload for VariableUpdateOptions {
    const TYPE: &'static str = "vars";
}

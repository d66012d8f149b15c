//! State version data models

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::scalr::jsonapi::Relationship;

/// State version data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct StateVersion {
    pub id: String,
    pub attributes: StateVersionAttributes,
    #[serde(default)]
    pub relationships: StateVersionRelationships,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StateVersionAttributes {
    #[serde(default)]
    pub serial: u64,
    /// State file size in bytes
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StateVersionRelationships {
    #[serde(default)]
    pub workspace: Relationship,
    #[serde(default)]
    pub run: Relationship,
}

crate::single_resource!(StateVersion);

impl StateVersion {
    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships.workspace.id()
    }
}

//! Team data models

use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, RelationshipMany, Relationships};
use crate::scalr::traits::ScalrResource;
use crate::scalr::ListOptions;

/// Team data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct Team {
    pub id: String,
    pub attributes: TeamAttributes,
    #[serde(default)]
    pub relationships: TeamRelationships,
}

/// Team attributes from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct TeamAttributes {
    pub name: String,
    pub description: Option<String>,
}

/// Team relationships from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TeamRelationships {
    #[serde(default)]
    pub account: Relationship,
    #[serde(rename = "identity-provider", default)]
    pub identity_provider: Relationship,
    #[serde(default)]
    pub users: RelationshipMany,
}

crate::single_resource!(Team);

impl ScalrResource for Team {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Team {
    /// Get users count from relationships
    pub fn users_count(&self) -> usize {
        self.relationships.users.data.len()
    }
}

/// Query options for listing teams
#[derive(Serialize, Debug, Clone, Default)]
pub struct TeamListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[name]")]
    pub name: Option<String>,
    #[serde(rename = "filter[team]")]
    pub team_id: Option<String>,
    #[serde(rename = "filter[account]")]
    pub account_id: Option<String>,
    #[serde(rename = "filter[identity-provider]")]
    pub identity_provider_id: Option<String>,
    pub query: Option<String>,
    pub include: Option<Vec<String>>,
}

/// Body for creating a team
#[derive(Serialize, Debug, Clone, Default)]
pub struct TeamCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub account_id: String,
    #[serde(skip)]
    pub identity_provider_id: Option<String>,
    #[serde(skip)]
    pub user_ids: Option<Vec<String>>,
}

impl Payload for TeamCreateOptions {
    const TYPE: &'static str = "teams";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_one("account", "accounts", Some(&self.account_id))
            .to_one(
                "identity-provider",
                "identity-providers",
                self.identity_provider_id.as_deref(),
            )
            .to_many("users", "users", self.user_ids.as_ref())
    }
}

/// Body for updating a team; `user_ids: Some(vec![])` removes every member
#[derive(Serialize, Debug, Clone, Default)]
pub struct TeamUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub user_ids: Option<Vec<String>>,
}

impl Payload for TeamUpdateOptions {
    const TYPE: &'static str = "teams";

    fn relationships(&self) -> Relationships {
        Relationships::new().to_many("users", "users", self.user_ids.as_ref())
    }
}

//! Webhook integration data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, RelationshipMany, Relationships};
use crate::scalr::traits::ScalrResource;
use crate::scalr::ListOptions;

/// Webhook integration data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct Webhook {
    pub id: String,
    pub attributes: WebhookAttributes,
    #[serde(default)]
    pub relationships: WebhookRelationships,
}

/// Webhook integration attributes from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct WebhookAttributes {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub enabled: bool,
    /// Request timeout in seconds
    pub timeout: Option<u32>,
    #[serde(rename = "max-attempts")]
    pub max_attempts: Option<u32>,
    #[serde(rename = "is-shared", default)]
    pub is_shared: bool,
    #[serde(rename = "last-triggered-at")]
    pub last_triggered_at: Option<DateTime<Utc>>,
}

/// Webhook integration relationships from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WebhookRelationships {
    #[serde(default)]
    pub account: Relationship,
    #[serde(default)]
    pub environments: RelationshipMany,
    #[serde(default)]
    pub events: RelationshipMany,
}

crate::single_resource!(Webhook);

impl ScalrResource for Webhook {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Webhook {
    /// Event definition ids the webhook fires on, e.g. `run:completed`
    pub fn events(&self) -> Vec<&str> {
        self.relationships.events.ids()
    }
}

/// Query options for listing webhook integrations
#[derive(Serialize, Debug, Clone, Default)]
pub struct WebhookListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[name]")]
    pub name: Option<String>,
    #[serde(rename = "filter[enabled]")]
    pub enabled: Option<bool>,
    #[serde(rename = "filter[event]")]
    pub event: Option<String>,
    #[serde(rename = "filter[environment]")]
    pub environment_id: Option<String>,
    #[serde(rename = "filter[account]")]
    pub account_id: Option<String>,
    pub query: Option<String>,
}

/// Body for creating a webhook integration
#[derive(Serialize, Debug, Clone, Default)]
pub struct WebhookCreateOptions {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "secret-key", skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(rename = "max-attempts", skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(rename = "is-shared", skip_serializing_if = "Option::is_none")]
    pub is_shared: Option<bool>,
    #[serde(skip)]
    pub account_id: String,
    #[serde(skip)]
    pub environment_ids: Option<Vec<String>>,
    #[serde(skip)]
    pub events: Option<Vec<String>>,
}

impl Payload for WebhookCreateOptions {
    const TYPE: &'static str = "webhook-integrations";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_one("account", "accounts", Some(&self.account_id))
            .to_many("environments", "environments", self.environment_ids.as_ref())
            .to_many("events", "event-definitions", self.events.as_ref())
    }
}

/// Body for updating a webhook integration; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct WebhookUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "secret-key", skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(rename = "max-attempts", skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(skip)]
    pub environment_ids: Option<Vec<String>>,
    #[serde(skip)]
    pub events: Option<Vec<String>>,
}

impl Payload for WebhookUpdateOptions {
    const TYPE: &'static str = "webhook-integrations";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_many("environments", "environments", self.environment_ids.as_ref())
            .to_many("events", "event-definitions", self.events.as_ref())
    }
}

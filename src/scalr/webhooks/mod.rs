//! Webhooks module - webhook integrations

mod api;
mod models;

pub use api::Webhooks;
pub use models::{
    Webhook, WebhookAttributes, WebhookCreateOptions, WebhookListOptions, WebhookRelationships,
    WebhookUpdateOptions,
};

//! Scalr API client module
//!
//! The shared request pipeline (build, send with retry, map errors, decode)
//! and one typed client per resource family on top of it.

mod client;
pub mod configuration_versions;
mod credentials;
mod decode;
pub mod environments;
pub mod jsonapi;
mod pages;
pub mod provider_configuration_parameters;
pub mod provider_configurations;
mod request;
mod retry;
pub mod runs;
pub mod state_versions;
pub mod tags;
pub mod teams;
pub mod traits;
pub mod variables;
pub mod webhooks;
pub mod workspaces;

use serde::{Deserialize, Deserializer, Serialize};

pub use client::{Config, ScalrClient};
pub use configuration_versions::{
    ConfigurationVersion, ConfigurationVersionAttributes, ConfigurationVersionCreateOptions,
    ConfigurationVersions,
};
pub use credentials::TokenResolver;
pub use decode::{
    decode_collection, decode_single, CollectionTarget, List, RawBody, ResponseTarget,
    SingleResourceTarget,
};
pub use environments::{
    Environment, EnvironmentAttributes, EnvironmentCreateOptions, EnvironmentListOptions,
    EnvironmentUpdateOptions, Environments,
};
pub use jsonapi::{Payload, Relationship, RelationshipMany, Relationships, ResourceIdentifier};
pub use provider_configuration_parameters::{
    ParameterChangeError, ParameterChangeOptions, ParameterChangeResults,
    ProviderConfigurationParameter, ProviderConfigurationParameterAttributes,
    ProviderConfigurationParameterCreateOptions, ProviderConfigurationParameterListOptions,
    ProviderConfigurationParameterUpdateOptions, ProviderConfigurationParameters,
};
pub use provider_configurations::{
    ProviderConfiguration, ProviderConfigurationAttributes, ProviderConfigurationCreateOptions,
    ProviderConfigurationListOptions, ProviderConfigurationUpdateOptions, ProviderConfigurations,
};
pub use request::RequestBody;
pub use retry::{backoff, Attempt, DefaultRetryPolicy, RetryDecision, RetryLogHook, RetryPolicy};
pub use runs::{Run, RunActionOptions, RunAttributes, RunCreateOptions, RunListOptions, Runs};
pub use state_versions::{StateVersion, StateVersionAttributes, StateVersions};
pub use tags::{Tag, TagAttributes, TagCreateOptions, TagListOptions, TagUpdateOptions, Tags};
pub use teams::{
    Team, TeamAttributes, TeamCreateOptions, TeamListOptions, TeamUpdateOptions, Teams,
};
pub use traits::{find_match, ScalrResource};
pub use variables::{
    Variable, VariableAttributes, VariableCategory, VariableCreateOptions, VariableListOptions,
    VariableUpdateOptions, Variables,
};
pub use webhooks::{
    Webhook, WebhookAttributes, WebhookCreateOptions, WebhookListOptions, WebhookUpdateOptions,
    Webhooks,
};
pub use workspaces::{
    Workspace, WorkspaceAttributes, WorkspaceCreateOptions, WorkspaceListOptions,
    WorkspaceUpdateOptions, Workspaces,
};

/// Pagination details from `meta.pagination`.
///
/// Missing or null values read as zero.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    #[serde(rename = "current-page", default, deserialize_with = "zero_if_null")]
    pub current_page: u32,
    #[serde(rename = "prev-page", default, deserialize_with = "zero_if_null")]
    pub prev_page: u32,
    #[serde(rename = "next-page", default, deserialize_with = "zero_if_null")]
    pub next_page: u32,
    #[serde(rename = "total-pages", default, deserialize_with = "zero_if_null")]
    pub total_pages: u32,
    #[serde(rename = "total-count", default, deserialize_with = "zero_if_null")]
    pub total_count: u32,
}

impl Pagination {
    pub fn has_next_page(&self) -> bool {
        self.next_page > self.current_page
    }
}

fn zero_if_null<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u32>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Page selection shared by list operations
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    #[serde(rename = "page[number]", skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(rename = "page[size]", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ListOptions {
    pub fn page(number: u32, size: u32) -> Self {
        Self {
            page_number: Some(number),
            page_size: Some(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_nulls_are_zero() {
        let p: Pagination = serde_json::from_value(serde_json::json!({
            "current-page": 1,
            "prev-page": null,
            "next-page": 2,
            "total-pages": 3,
            "total-count": 250
        }))
        .unwrap();
        assert_eq!(p.current_page, 1);
        assert_eq!(p.prev_page, 0);
        assert_eq!(p.next_page, 2);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.total_count, 250);
        assert!(p.has_next_page());
    }

    #[test]
    fn test_pagination_missing_fields() {
        let p: Pagination = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p, Pagination::default());
        assert!(!p.has_next_page());
    }

    #[test]
    fn test_list_options_query() {
        let RequestBody::Query(pairs) = RequestBody::query(&ListOptions::page(2, 50)).unwrap()
        else {
            panic!("Expected query body");
        };
        assert!(pairs.contains(&("page[number]".to_string(), "2".to_string())));
        assert!(pairs.contains(&("page[size]".to_string(), "50".to_string())));

        let RequestBody::Query(pairs) = RequestBody::query(&ListOptions::default()).unwrap()
        else {
            panic!("Expected query body");
        };
        assert!(pairs.is_empty());
    }
}

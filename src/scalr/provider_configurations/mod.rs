//! Provider configurations module - shared provider credentials

mod api;
mod models;

pub use api::ProviderConfigurations;
pub use models::{
    ProviderConfiguration, ProviderConfigurationAttributes, ProviderConfigurationCreateOptions,
    ProviderConfigurationListOptions, ProviderConfigurationRelationships,
    ProviderConfigurationUpdateOptions,
};

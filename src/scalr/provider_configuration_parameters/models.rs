//! Provider configuration parameter data models

use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::Payload;
use crate::scalr::ListOptions;

/// Parameter of a custom provider configuration
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProviderConfigurationParameter {
    pub id: String,
    pub attributes: ProviderConfigurationParameterAttributes,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProviderConfigurationParameterAttributes {
    pub key: String,
    /// Empty for sensitive parameters
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub sensitive: bool,
    pub description: Option<String>,
}

crate::single_resource!(ProviderConfigurationParameter);

#[derive(Serialize, Debug, Clone, Default)]
pub struct ProviderConfigurationParameterListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[key]")]
    pub key: Option<String>,
}

/// Body for creating a parameter
#[derive(Serialize, Debug, Clone, Default)]
pub struct ProviderConfigurationParameterCreateOptions {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Payload for ProviderConfigurationParameterCreateOptions {
    const TYPE: &'static str = "provider-configuration-parameters";
}

/// Body for updating a parameter; `id` selects the parameter
#[derive(Serialize, Debug, Clone, Default)]
pub struct ProviderConfigurationParameterUpdateOptions {
    #[serde(skip)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Payload for ProviderConfigurationParameterUpdateOptions {
    const TYPE: &'static str = "provider-configuration-parameters";

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

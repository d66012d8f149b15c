//! Provider configuration API operations

use log::debug;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{
    ProviderConfiguration, ProviderConfigurationCreateOptions, ProviderConfigurationListOptions,
    ProviderConfigurationUpdateOptions,
};

/// Provider configuration operations, see
/// [`ScalrClient::provider_configurations`]
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfigurations<'a> {
    client: &'a ScalrClient,
}

impl<'a> ProviderConfigurations<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of provider configurations, filtered by `options`
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: &ProviderConfigurationListOptions,
    ) -> Result<List<ProviderConfiguration>> {
        self.client
            .call(
                ctx,
                Method::GET,
                api::PROVIDER_CONFIGURATIONS,
                RequestBody::query(options)?,
            )
            .await
    }

    /// Create a provider configuration
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        options: &ProviderConfigurationCreateOptions,
    ) -> Result<ProviderConfiguration> {
        if !valid_string(&options.name) {
            return Err(ScalrError::RequiredValue("name"));
        }
        if !valid_string(&options.provider_name) {
            return Err(ScalrError::RequiredValue("provider name"));
        }
        if !valid_string_id(&options.account_id) {
            return Err(ScalrError::InvalidValue("account ID"));
        }

        debug!(
            "Creating {} provider configuration '{}'",
            options.provider_name, options.name
        );
        self.client
            .call(
                ctx,
                Method::POST,
                api::PROVIDER_CONFIGURATIONS,
                RequestBody::document(options)?,
            )
            .await
    }

    /// Get a provider configuration by ID
    pub async fn read(
        &self,
        ctx: &CancellationToken,
        provider_configuration_id: &str,
    ) -> Result<ProviderConfiguration> {
        let path = provider_configuration_path(provider_configuration_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Update a provider configuration; unset option fields are left unchanged
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        provider_configuration_id: &str,
        options: &ProviderConfigurationUpdateOptions,
    ) -> Result<ProviderConfiguration> {
        let path = provider_configuration_path(provider_configuration_id)?;
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete a provider configuration
    pub async fn delete(
        &self,
        ctx: &CancellationToken,
        provider_configuration_id: &str,
    ) -> Result<()> {
        let path = provider_configuration_path(provider_configuration_id)?;
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }
}

fn provider_configuration_path(provider_configuration_id: &str) -> Result<String> {
    if !valid_string_id(provider_configuration_id) {
        return Err(ScalrError::InvalidValue("provider configuration ID"));
    }
    Ok(format!(
        "{}/{}",
        api::PROVIDER_CONFIGURATIONS,
        urlencoding::encode(provider_configuration_id)
    ))
}

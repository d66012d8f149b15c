//! Provider configuration parameter API operations

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{
    ProviderConfigurationParameter, ProviderConfigurationParameterCreateOptions,
    ProviderConfigurationParameterListOptions, ProviderConfigurationParameterUpdateOptions,
};

/// Provider configuration parameter operations, see
/// [`ScalrClient::provider_configuration_parameters`]
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfigurationParameters<'a> {
    pub(super) client: &'a ScalrClient,
}

impl<'a> ProviderConfigurationParameters<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of parameters of a provider configuration
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        provider_configuration_id: &str,
        options: &ProviderConfigurationParameterListOptions,
    ) -> Result<List<ProviderConfigurationParameter>> {
        let path = parameters_path(provider_configuration_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::query(options)?)
            .await
    }

    /// Create a parameter in a provider configuration
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        provider_configuration_id: &str,
        options: &ProviderConfigurationParameterCreateOptions,
    ) -> Result<ProviderConfigurationParameter> {
        let path = parameters_path(provider_configuration_id)?;
        if !valid_string(&options.key) {
            return Err(ScalrError::RequiredValue("key"));
        }
        self.client
            .call(ctx, Method::POST, &path, RequestBody::document(options)?)
            .await
    }

    /// Get a parameter by ID
    pub async fn read(
        &self,
        ctx: &CancellationToken,
        parameter_id: &str,
    ) -> Result<ProviderConfigurationParameter> {
        let path = parameter_path(parameter_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Update the parameter named by `options.id`
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        options: &ProviderConfigurationParameterUpdateOptions,
    ) -> Result<ProviderConfigurationParameter> {
        let path = parameter_path(&options.id)?;
        if options.key.as_deref().is_some_and(|k| !valid_string(k)) {
            return Err(ScalrError::InvalidValue("key"));
        }
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete a parameter
    pub async fn delete(&self, ctx: &CancellationToken, parameter_id: &str) -> Result<()> {
        let path = parameter_path(parameter_id)?;
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }
}

pub(super) fn parameters_path(provider_configuration_id: &str) -> Result<String> {
    if !valid_string_id(provider_configuration_id) {
        return Err(ScalrError::InvalidValue("provider configuration ID"));
    }
    Ok(format!(
        "{}/{}/parameters",
        api::PROVIDER_CONFIGURATIONS,
        urlencoding::encode(provider_configuration_id)
    ))
}

fn parameter_path(parameter_id: &str) -> Result<String> {
    if !valid_string_id(parameter_id) {
        return Err(ScalrError::InvalidValue("parameter ID"));
    }
    Ok(format!(
        "{}/{}",
        api::PROVIDER_CONFIGURATION_PARAMETERS,
        urlencoding::encode(parameter_id)
    ))
}

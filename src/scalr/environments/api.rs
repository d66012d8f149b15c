//! Environment API operations

use log::debug;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::request::query_pairs;
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{
    Environment, EnvironmentCreateOptions, EnvironmentListOptions, EnvironmentUpdateOptions,
};

/// Environment operations, see [`ScalrClient::environments`]
#[derive(Debug, Clone, Copy)]
pub struct Environments<'a> {
    client: &'a ScalrClient,
}

impl<'a> Environments<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of environments
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: &EnvironmentListOptions,
    ) -> Result<List<Environment>> {
        self.client
            .call(ctx, Method::GET, api::ENVIRONMENTS, RequestBody::query(options)?)
            .await
    }

    /// Every environment matching the filters, across all pages
    pub async fn list_all(
        &self,
        ctx: &CancellationToken,
        options: &EnvironmentListOptions,
    ) -> Result<Vec<Environment>> {
        let filters = query_pairs(options)?;
        self.client
            .fetch_all_pages(ctx, api::ENVIRONMENTS, &filters)
            .await
    }

    /// Create an environment in an account
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        options: &EnvironmentCreateOptions,
    ) -> Result<Environment> {
        if !valid_string(&options.name) {
            return Err(ScalrError::RequiredValue("name"));
        }
        if !valid_string_id(&options.account_id) {
            return Err(ScalrError::InvalidValue("account ID"));
        }

        debug!("Creating environment '{}'", options.name);
        self.client
            .call(
                ctx,
                Method::POST,
                api::ENVIRONMENTS,
                RequestBody::document(options)?,
            )
            .await
    }

    /// Get an environment by ID
    pub async fn read(&self, ctx: &CancellationToken, environment_id: &str) -> Result<Environment> {
        let path = environment_path(environment_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Update an environment; unset option fields are left unchanged
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        environment_id: &str,
        options: &EnvironmentUpdateOptions,
    ) -> Result<Environment> {
        let path = environment_path(environment_id)?;
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete an environment
    pub async fn delete(&self, ctx: &CancellationToken, environment_id: &str) -> Result<()> {
        let path = environment_path(environment_id)?;
        debug!("Deleting environment {}", environment_id);
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }
}

fn environment_path(environment_id: &str) -> Result<String> {
    if !valid_string_id(environment_id) {
        return Err(ScalrError::InvalidValue("environment ID"));
    }
    Ok(format!(
        "{}/{}",
        api::ENVIRONMENTS,
        urlencoding::encode(environment_id)
    ))
}

//! Variable API operations

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{Variable, VariableCreateOptions, VariableListOptions, VariableUpdateOptions};

/// Variable operations, see [`ScalrClient::variables`]
#[derive(Debug, Clone, Copy)]
pub struct Variables<'a> {
    client: &'a ScalrClient,
}

impl<'a> Variables<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of variables
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: &VariableListOptions,
    ) -> Result<List<Variable>> {
        self.client
            .call(ctx, Method::GET, api::VARIABLES, RequestBody::query(options)?)
            .await
    }

    /// Create a variable scoped to an account, environment or workspace
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        options: &VariableCreateOptions,
    ) -> Result<Variable> {
        if !valid_string(&options.key) {
            return Err(ScalrError::RequiredValue("key"));
        }
        let scopes = [
            ("account ID", options.account_id.as_deref()),
            ("environment ID", options.environment_id.as_deref()),
            ("workspace ID", options.workspace_id.as_deref()),
        ];
        for (label, id) in scopes {
            if id.is_some_and(|id| !valid_string_id(id)) {
                return Err(ScalrError::InvalidValue(label));
            }
        }

        self.client
            .call(
                ctx,
                Method::POST,
                api::VARIABLES,
                RequestBody::document(options)?,
            )
            .await
    }

    /// Get a variable by ID
    pub async fn read(&self, ctx: &CancellationToken, variable_id: &str) -> Result<Variable> {
        let path = variable_path(variable_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Update a variable; unset option fields are left unchanged
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        variable_id: &str,
        options: &VariableUpdateOptions,
    ) -> Result<Variable> {
        let path = variable_path(variable_id)?;
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete a variable
    pub async fn delete(&self, ctx: &CancellationToken, variable_id: &str) -> Result<()> {
        let path = variable_path(variable_id)?;
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }
}

fn variable_path(variable_id: &str) -> Result<String> {
    if !valid_string_id(variable_id) {
        return Err(ScalrError::InvalidValue("variable ID"));
    }
    Ok(format!(
        "{}/{}",
        api::VARIABLES,
        urlencoding::encode(variable_id)
    ))
}

//! Workspace API operations

use log::debug;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{ResourceNotFound, Result, ScalrError};
use crate::scalr::request::query_pairs;
use crate::scalr::traits::find_match;
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{
    Workspace, WorkspaceCreateOptions, WorkspaceListOptions, WorkspaceUpdateOptions,
};

/// Workspace operations, see [`ScalrClient::workspaces`]
#[derive(Debug, Clone, Copy)]
pub struct Workspaces<'a> {
    client: &'a ScalrClient,
}

impl<'a> Workspaces<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of workspaces
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: &WorkspaceListOptions,
    ) -> Result<List<Workspace>> {
        self.client
            .call(ctx, Method::GET, api::WORKSPACES, RequestBody::query(options)?)
            .await
    }

    /// Every workspace matching the filters, across all pages
    pub async fn list_all(
        &self,
        ctx: &CancellationToken,
        options: &WorkspaceListOptions,
    ) -> Result<Vec<Workspace>> {
        let filters = query_pairs(options)?;
        self.client
            .fetch_all_pages(ctx, api::WORKSPACES, &filters)
            .await
    }

    /// Create a workspace in an environment
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        options: &WorkspaceCreateOptions,
    ) -> Result<Workspace> {
        if !valid_string(&options.name) {
            return Err(ScalrError::RequiredValue("name"));
        }
        if !valid_string_id(&options.environment_id) {
            return Err(ScalrError::InvalidValue("environment ID"));
        }

        debug!(
            "Creating workspace '{}' in environment {}",
            options.name, options.environment_id
        );
        self.client
            .call(
                ctx,
                Method::POST,
                api::WORKSPACES,
                RequestBody::document(options)?,
            )
            .await
    }

    /// Get a workspace by ID
    pub async fn read(&self, ctx: &CancellationToken, workspace_id: &str) -> Result<Workspace> {
        let path = workspace_path(workspace_id, None)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Look a workspace up by its exact name within an environment
    pub async fn read_by_name(
        &self,
        ctx: &CancellationToken,
        environment_id: &str,
        name: &str,
    ) -> Result<Workspace> {
        if !valid_string_id(environment_id) {
            return Err(ScalrError::InvalidValue("environment ID"));
        }
        if !valid_string(name) {
            return Err(ScalrError::RequiredValue("workspace name"));
        }

        let options = WorkspaceListOptions {
            name: Some(name.to_string()),
            environment_id: Some(environment_id.to_string()),
            ..Default::default()
        };
        let page = self.list(ctx, &options).await?;

        find_match(&page.items, name)
            .cloned()
            .ok_or_else(|| {
                ResourceNotFound::with_message(format!(
                    "workspace '{}' not found in environment {}",
                    name, environment_id
                ))
                .into()
            })
    }

    /// Update a workspace; unset option fields are left unchanged
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
        options: &WorkspaceUpdateOptions,
    ) -> Result<Workspace> {
        if options.name.as_deref().is_some_and(|n| !valid_string(n)) {
            return Err(ScalrError::InvalidValue("name"));
        }
        let path = workspace_path(workspace_id, None)?;
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete a workspace
    pub async fn delete(&self, ctx: &CancellationToken, workspace_id: &str) -> Result<()> {
        let path = workspace_path(workspace_id, None)?;
        debug!("Deleting workspace {}", workspace_id);
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }

    /// Lock a workspace. Fails with [`ScalrError::ResourceLocked`] when it
    /// is already locked.
    pub async fn lock(&self, ctx: &CancellationToken, workspace_id: &str) -> Result<Workspace> {
        self.action(ctx, workspace_id, "lock").await
    }

    /// Unlock a workspace locked by the caller. Fails with
    /// [`ScalrError::ResourceNotLocked`] when it is not locked.
    pub async fn unlock(&self, ctx: &CancellationToken, workspace_id: &str) -> Result<Workspace> {
        self.action(ctx, workspace_id, "unlock").await
    }

    /// Unlock a workspace regardless of who locked it
    pub async fn force_unlock(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
    ) -> Result<Workspace> {
        self.action(ctx, workspace_id, "force-unlock").await
    }

    async fn action(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
        action: &str,
    ) -> Result<Workspace> {
        let path = workspace_path(workspace_id, Some(action))?;
        debug!("Workspace {} action: {}", workspace_id, action);
        self.client
            .call(ctx, Method::POST, &path, RequestBody::Empty)
            .await
    }
}

fn workspace_path(workspace_id: &str, action: Option<&str>) -> Result<String> {
    if !valid_string_id(workspace_id) {
        return Err(ScalrError::InvalidValue("workspace ID"));
    }
    let base = format!("{}/{}", api::WORKSPACES, urlencoding::encode(workspace_id));
    Ok(match action {
        Some(action) => format!("{}/actions/{}", base, action),
        None => base,
    })
}

//! Tag API operations, including tag assignment on workspaces

use log::debug;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::jsonapi::marshal_identifiers;
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{Tag, TagCreateOptions, TagListOptions, TagUpdateOptions};

/// Tag operations, see [`ScalrClient::tags`]
#[derive(Debug, Clone, Copy)]
pub struct Tags<'a> {
    client: &'a ScalrClient,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of tags
    pub async fn list(&self, ctx: &CancellationToken, options: &TagListOptions) -> Result<List<Tag>> {
        self.client
            .call(ctx, Method::GET, api::TAGS, RequestBody::query(options)?)
            .await
    }

    /// Create a tag
    pub async fn create(&self, ctx: &CancellationToken, options: &TagCreateOptions) -> Result<Tag> {
        if !valid_string(&options.name) {
            return Err(ScalrError::RequiredValue("name"));
        }
        if !valid_string_id(&options.account_id) {
            return Err(ScalrError::InvalidValue("account ID"));
        }
        self.client
            .call(ctx, Method::POST, api::TAGS, RequestBody::document(options)?)
            .await
    }

    /// Get a tag by ID
    pub async fn read(&self, ctx: &CancellationToken, tag_id: &str) -> Result<Tag> {
        let path = tag_path(tag_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Update a tag; unset option fields are left unchanged
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        tag_id: &str,
        options: &TagUpdateOptions,
    ) -> Result<Tag> {
        if !valid_string(&options.name) {
            return Err(ScalrError::RequiredValue("name"));
        }
        let path = tag_path(tag_id)?;
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete a tag
    pub async fn delete(&self, ctx: &CancellationToken, tag_id: &str) -> Result<()> {
        let path = tag_path(tag_id)?;
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }

    /// Attach tags to a workspace, keeping the ones it already has
    pub async fn add_to_workspace(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
        tag_ids: &[String],
    ) -> Result<()> {
        self.workspace_tags(ctx, Method::POST, workspace_id, tag_ids)
            .await
    }

    /// Replace the full tag set of a workspace
    pub async fn replace_on_workspace(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
        tag_ids: &[String],
    ) -> Result<()> {
        self.workspace_tags(ctx, Method::PATCH, workspace_id, tag_ids)
            .await
    }

    /// Detach tags from a workspace
    pub async fn remove_from_workspace(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
        tag_ids: &[String],
    ) -> Result<()> {
        self.workspace_tags(ctx, Method::DELETE, workspace_id, tag_ids)
            .await
    }

    async fn workspace_tags(
        &self,
        ctx: &CancellationToken,
        method: Method,
        workspace_id: &str,
        tag_ids: &[String],
    ) -> Result<()> {
        if !valid_string_id(workspace_id) {
            return Err(ScalrError::InvalidValue("workspace ID"));
        }
        if tag_ids.iter().any(|id| !valid_string_id(id)) {
            return Err(ScalrError::InvalidValue("tag ID"));
        }

        let path = format!(
            "{}/{}/relationships/tags",
            api::WORKSPACES,
            urlencoding::encode(workspace_id)
        );
        debug!(
            "{} {} tag(s) on workspace {}",
            method,
            tag_ids.len(),
            workspace_id
        );
        let body = RequestBody::Json(marshal_identifiers(api::TAGS, tag_ids));
        self.client.call(ctx, method, &path, body).await
    }
}

fn tag_path(tag_id: &str) -> Result<String> {
    if !valid_string_id(tag_id) {
        return Err(ScalrError::InvalidValue("tag ID"));
    }
    Ok(format!("{}/{}", api::TAGS, urlencoding::encode(tag_id)))
}

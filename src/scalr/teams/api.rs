//! Team API operations

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{Team, TeamCreateOptions, TeamListOptions, TeamUpdateOptions};

/// Team operations, see [`ScalrClient::teams`]
#[derive(Debug, Clone, Copy)]
pub struct Teams<'a> {
    client: &'a ScalrClient,
}

impl<'a> Teams<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of teams
    pub async fn list(&self, ctx: &CancellationToken, options: &TeamListOptions) -> Result<List<Team>> {
        self.client
            .call(ctx, Method::GET, api::TEAMS, RequestBody::query(options)?)
            .await
    }

    /// Create a team
    pub async fn create(&self, ctx: &CancellationToken, options: &TeamCreateOptions) -> Result<Team> {
        if !valid_string(&options.name) {
            return Err(ScalrError::RequiredValue("name"));
        }
        if !valid_string_id(&options.account_id) {
            return Err(ScalrError::InvalidValue("account ID"));
        }
        self.client
            .call(ctx, Method::POST, api::TEAMS, RequestBody::document(options)?)
            .await
    }

    /// Get a team by ID
    pub async fn read(&self, ctx: &CancellationToken, team_id: &str) -> Result<Team> {
        let path = team_path(team_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Update a team; unset option fields are left unchanged
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        team_id: &str,
        options: &TeamUpdateOptions,
    ) -> Result<Team> {
        let path = team_path(team_id)?;
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete a team
    pub async fn delete(&self, ctx: &CancellationToken, team_id: &str) -> Result<()> {
        let path = team_path(team_id)?;
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }
}

fn team_path(team_id: &str) -> Result<String> {
    if !valid_string_id(team_id) {
        return Err(ScalrError::InvalidValue("team ID"));
    }
    Ok(format!("{}/{}", api::TEAMS, urlencoding::encode(team_id)))
}

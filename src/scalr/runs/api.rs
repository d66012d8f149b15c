//! Run API operations

use log::debug;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::valid_string_id;

use super::models::{Run, RunActionOptions, RunCreateOptions, RunListOptions};

/// Run operations, see [`ScalrClient::runs`]
#[derive(Debug, Clone, Copy)]
pub struct Runs<'a> {
    client: &'a ScalrClient,
}

impl<'a> Runs<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of runs matching the filters
    pub async fn list(&self, ctx: &CancellationToken, options: &RunListOptions) -> Result<List<Run>> {
        self.client
            .call(ctx, Method::GET, api::RUNS, RequestBody::query(options)?)
            .await
    }

    /// One page of runs for a workspace, newest first
    pub async fn list_for_workspace(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
        options: &RunListOptions,
    ) -> Result<List<Run>> {
        if !valid_string_id(workspace_id) {
            return Err(ScalrError::InvalidValue("workspace ID"));
        }
        let options = RunListOptions {
            workspace_id: Some(workspace_id.to_string()),
            ..options.clone()
        };
        self.list(ctx, &options).await
    }

    /// Queue a run
    pub async fn create(&self, ctx: &CancellationToken, options: &RunCreateOptions) -> Result<Run> {
        if !valid_string_id(&options.workspace_id) {
            return Err(ScalrError::InvalidValue("workspace ID"));
        }
        if let Some(cv) = options.configuration_version_id.as_deref() {
            if !valid_string_id(cv) {
                return Err(ScalrError::InvalidValue("configuration version ID"));
            }
        }

        debug!("Queueing run for workspace {}", options.workspace_id);
        self.client
            .call(ctx, Method::POST, api::RUNS, RequestBody::document(options)?)
            .await
    }

    /// Get a run by ID
    pub async fn read(&self, ctx: &CancellationToken, run_id: &str) -> Result<Run> {
        let path = run_path(run_id, None)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Confirm a planned run
    pub async fn apply(
        &self,
        ctx: &CancellationToken,
        run_id: &str,
        options: &RunActionOptions,
    ) -> Result<()> {
        self.action(ctx, run_id, "apply", options).await
    }

    /// Skip applying a planned run
    pub async fn discard(
        &self,
        ctx: &CancellationToken,
        run_id: &str,
        options: &RunActionOptions,
    ) -> Result<()> {
        self.action(ctx, run_id, "discard", options).await
    }

    /// Interrupt a run in progress
    pub async fn cancel(
        &self,
        ctx: &CancellationToken,
        run_id: &str,
        options: &RunActionOptions,
    ) -> Result<()> {
        self.action(ctx, run_id, "cancel", options).await
    }

    async fn action(
        &self,
        ctx: &CancellationToken,
        run_id: &str,
        action: &str,
        options: &RunActionOptions,
    ) -> Result<()> {
        let path = run_path(run_id, Some(action))?;
        let body = match options.comment {
            Some(_) => RequestBody::json(options)?,
            None => RequestBody::Empty,
        };
        debug!("Run {} action: {}", run_id, action);
        self.client.call(ctx, Method::POST, &path, body).await
    }
}

fn run_path(run_id: &str, action: Option<&str>) -> Result<String> {
    if !valid_string_id(run_id) {
        return Err(ScalrError::InvalidValue("run ID"));
    }
    let base = format!("{}/{}", api::RUNS, urlencoding::encode(run_id));
    Ok(match action {
        Some(action) => format!("{}/actions/{}", base, action),
        None => base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_for_workspace() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/iacp/v3/runs"))
            .and(query_param("filter[workspace]", "ws-1"))
            .and(query_param("filter[status]", "in:pending,planning"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": "run-2", "attributes": { "status": "planning" } },
                    { "id": "run-1", "attributes": { "status": "pending" } }
                ],
                "meta": { "pagination": { "current-page": 1, "total-pages": 1, "total-count": 2 } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let runs = client
            .runs()
            .list_for_workspace(
                &CancellationToken::new(),
                "ws-1",
                &RunListOptions {
                    status: Some("in:pending,planning".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(runs.items.len(), 2);
        assert_eq!(runs.items[0].id, "run-2");
    }

    #[tokio::test]
    async fn test_create_run() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/iacp/v3/runs"))
            .and(body_partial_json(json!({
                "data": {
                    "type": "runs",
                    "attributes": { "message": "deploy", "is-dry": true },
                    "relationships": {
                        "workspace": { "data": { "type": "workspaces", "id": "ws-1" } },
                        "configuration-version": {
                            "data": { "type": "configuration-versions", "id": "cv-1" }
                        }
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": { "id": "run-9", "type": "runs", "attributes": { "status": "pending" } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let run = client
            .runs()
            .create(
                &CancellationToken::new(),
                &RunCreateOptions {
                    message: Some("deploy".to_string()),
                    is_dry: Some(true),
                    workspace_id: "ws-1".to_string(),
                    configuration_version_id: Some("cv-1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(run.id, "run-9");
        assert_eq!(run.attributes.status, "pending");
    }

    #[tokio::test]
    async fn test_actions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/iacp/v3/runs/run-1/actions/apply"))
            .and(body_json(json!({ "comment": "ship it" })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/iacp/v3/runs/run-1/actions/discard"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/iacp/v3/runs/run-1/actions/cancel"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let ctx = CancellationToken::new();
        let runs = client.runs();

        runs.apply(
            &ctx,
            "run-1",
            &RunActionOptions {
                comment: Some("ship it".to_string()),
            },
        )
        .await
        .unwrap();
        runs.discard(&ctx, "run-1", &RunActionOptions::default())
            .await
            .unwrap();
        runs.cancel(&ctx, "run-1", &RunActionOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_requires_workspace() {
        let client = ScalrClient::test_client("http://127.0.0.1:1");
        let err = client
            .runs()
            .create(&CancellationToken::new(), &RunCreateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScalrError::InvalidValue("workspace ID")));
    }
}

//! State version API operations

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{RawBody, RequestBody, ScalrClient};
use crate::validation::valid_string_id;

use super::models::StateVersion;

/// State version operations, see [`ScalrClient::state_versions`]
#[derive(Debug, Clone, Copy)]
pub struct StateVersions<'a> {
    client: &'a ScalrClient,
}

impl<'a> StateVersions<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// Get a state version by ID
    pub async fn read(
        &self,
        ctx: &CancellationToken,
        state_version_id: &str,
    ) -> Result<StateVersion> {
        let path = state_version_path(state_version_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Latest state version of a workspace; not found while the workspace
    /// has no state
    pub async fn read_current(
        &self,
        ctx: &CancellationToken,
        workspace_id: &str,
    ) -> Result<StateVersion> {
        if !valid_string_id(workspace_id) {
            return Err(ScalrError::InvalidValue("workspace ID"));
        }
        let path = format!(
            "{}/{}/current-state-version",
            api::WORKSPACES,
            urlencoding::encode(workspace_id)
        );
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Raw state file of a state version
    pub async fn download(
        &self,
        ctx: &CancellationToken,
        state_version_id: &str,
    ) -> Result<Vec<u8>> {
        let path = format!("{}/download", state_version_path(state_version_id)?);
        debug!("Downloading state version {}", state_version_id);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(api::PLAIN_JSON));
        let request = self.client.new_request_with_headers(
            Method::GET,
            &path,
            RequestBody::Empty,
            &headers,
        )?;
        let body: RawBody = self.client.execute(ctx, request).await?;
        Ok(body.into_inner())
    }
}

fn state_version_path(state_version_id: &str) -> Result<String> {
    if !valid_string_id(state_version_id) {
        return Err(ScalrError::InvalidValue("state version ID"));
    }
    Ok(format!(
        "{}/{}",
        api::STATE_VERSIONS,
        urlencoding::encode(state_version_id)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_read_current_and_download() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/iacp/v3/workspaces/ws-1/current-state-version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": "sv-7",
                    "type": "state-versions",
                    "attributes": { "serial": 7, "size": 42 },
                    "relationships": {
                        "workspace": { "data": { "id": "ws-1", "type": "workspaces" } }
                    }
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/iacp/v3/state-versions/sv-7/download"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"version":4,"serial":7}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let ctx = CancellationToken::new();

        let current = client.state_versions().read_current(&ctx, "ws-1").await.unwrap();
        assert_eq!(current.attributes.serial, 7);
        assert_eq!(current.workspace_id(), Some("ws-1"));

        let state = client.state_versions().download(&ctx, &current.id).await.unwrap();
        assert_eq!(state, br#"{"version":4,"serial":7}"#.to_vec());
    }

    #[tokio::test]
    async fn test_workspace_without_state() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/iacp/v3/workspaces/ws-empty/current-state-version"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{ "status": "404", "title": "Not Found", "detail": "no state" }]
            })))
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let err = client
            .state_versions()
            .read_current(&CancellationToken::new(), "ws-empty")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_ids() {
        let client = ScalrClient::test_client("http://127.0.0.1:1");
        let ctx = CancellationToken::new();
        assert!(matches!(
            client.state_versions().read(&ctx, "sv/1").await.unwrap_err(),
            ScalrError::InvalidValue("state version ID")
        ));
        assert!(matches!(
            client.state_versions().download(&ctx, "").await.unwrap_err(),
            ScalrError::InvalidValue("state version ID")
        ));
    }
}

//! Webhook integration API operations

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{List, RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{Webhook, WebhookCreateOptions, WebhookListOptions, WebhookUpdateOptions};

/// Webhook operations, see [`ScalrClient::webhooks`]
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    client: &'a ScalrClient,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// One page of webhooks
    pub async fn list(
        &self,
        ctx: &CancellationToken,
        options: &WebhookListOptions,
    ) -> Result<List<Webhook>> {
        self.client
            .call(ctx, Method::GET, api::WEBHOOKS, RequestBody::query(options)?)
            .await
    }

    /// Create a webhook; the URL must be http(s) and events non-empty
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        options: &WebhookCreateOptions,
    ) -> Result<Webhook> {
        if !valid_string(&options.name) {
            return Err(ScalrError::RequiredValue("name"));
        }
        validate_url(&options.url)?;
        if !valid_string_id(&options.account_id) {
            return Err(ScalrError::InvalidValue("account ID"));
        }
        validate_events(options.events.as_deref())?;

        self.client
            .call(
                ctx,
                Method::POST,
                api::WEBHOOKS,
                RequestBody::document(options)?,
            )
            .await
    }

    /// Get a webhook by ID
    pub async fn read(&self, ctx: &CancellationToken, webhook_id: &str) -> Result<Webhook> {
        let path = webhook_path(webhook_id)?;
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// Update a webhook; unset option fields are left unchanged
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        webhook_id: &str,
        options: &WebhookUpdateOptions,
    ) -> Result<Webhook> {
        if let Some(url) = options.url.as_deref() {
            validate_url(url)?;
        }
        validate_events(options.events.as_deref())?;
        let path = webhook_path(webhook_id)?;
        self.client
            .call(ctx, Method::PATCH, &path, RequestBody::document(options)?)
            .await
    }

    /// Delete a webhook
    pub async fn delete(&self, ctx: &CancellationToken, webhook_id: &str) -> Result<()> {
        let path = webhook_path(webhook_id)?;
        self.client
            .call(ctx, Method::DELETE, &path, RequestBody::Empty)
            .await
    }
}

fn validate_url(url: &str) -> Result<()> {
    if !valid_string(url) {
        return Err(ScalrError::RequiredValue("url"));
    }
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ScalrError::InvalidValue("url")),
    }
}

fn validate_events(events: Option<&[String]>) -> Result<()> {
    if events.is_some_and(|events| events.iter().any(|e| !valid_string(e))) {
        return Err(ScalrError::InvalidValue("event"));
    }
    Ok(())
}

fn webhook_path(webhook_id: &str) -> Result<String> {
    if !valid_string_id(webhook_id) {
        return Err(ScalrError::InvalidValue("webhook ID"));
    }
    Ok(format!("{}/{}", api::WEBHOOKS, urlencoding::encode(webhook_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn webhook_json() -> serde_json::Value {
        json!({
            "id": "wh-1",
            "type": "webhook-integrations",
            "attributes": {
                "name": "notify",
                "url": "https://hooks.example.com/scalr",
                "enabled": true,
                "timeout": 15,
                "max-attempts": 3
            },
            "relationships": {
                "events": { "data": [{ "id": "run:completed", "type": "event-definitions" }] }
            }
        })
    }

    #[tokio::test]
    async fn test_create_webhook() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/iacp/v3/integrations/webhooks"))
            .and(body_partial_json(json!({
                "data": {
                    "type": "webhook-integrations",
                    "attributes": { "name": "notify", "url": "https://hooks.example.com/scalr" },
                    "relationships": {
                        "events": { "data": [{ "type": "event-definitions", "id": "run:completed" }] }
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": webhook_json() })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let webhook = client
            .webhooks()
            .create(
                &CancellationToken::new(),
                &WebhookCreateOptions {
                    name: "notify".to_string(),
                    url: "https://hooks.example.com/scalr".to_string(),
                    account_id: "acc-1".to_string(),
                    events: Some(vec!["run:completed".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(webhook.events(), vec!["run:completed"]);
        assert_eq!(webhook.attributes.max_attempts, Some(3));
    }

    #[tokio::test]
    async fn test_read_and_delete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/iacp/v3/integrations/webhooks/wh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": webhook_json() })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/iacp/v3/integrations/webhooks/wh-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ScalrClient::test_client(&mock_server.uri());
        let ctx = CancellationToken::new();
        let webhook = client.webhooks().read(&ctx, "wh-1").await.unwrap();
        assert!(webhook.attributes.enabled);
        client.webhooks().delete(&ctx, "wh-1").await.unwrap();
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_url("https://hooks.example.com").is_ok());
        assert!(matches!(
            validate_url(""),
            Err(ScalrError::RequiredValue("url"))
        ));
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(ScalrError::InvalidValue("url"))
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(ScalrError::InvalidValue("url"))
        ));
    }
}

//! scalr-api - typed client for the Scalr IaC platform API
//!
//! Builds JSON:API requests, retries transient failures, maps error
//! responses to [`ScalrError`] and decodes resources into typed models.
//!
//! # Features
//!
//! - One sub-client per resource family (workspaces, runs, environments,
//!   variables, tags, teams, webhooks, provider configurations and more)
//! - Retry with exponential backoff and `Retry-After` support
//! - Cancellation through [`CancellationToken`](tokio_util::sync::CancellationToken)
//! - Parallel fetching of every page of a list
//! - Bounded-concurrency batch changes of provider configuration parameters
//!
//! # Example
//!
//! ```no_run
//! use scalr_api::{Config, ScalrClient, WorkspaceListOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> scalr_api::Result<()> {
//! // Address and token fall back to SCALR_ADDRESS and SCALR_TOKEN
//! let client = ScalrClient::new(Config::default())?;
//! let ctx = CancellationToken::new();
//!
//! let options = WorkspaceListOptions {
//!     environment_id: Some("env-123".to_string()),
//!     ..Default::default()
//! };
//! for ws in client.workspaces().list_all(&ctx, &options).await? {
//!     println!("{} {}", ws.id, ws.attributes.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod scalr;
pub mod validation;

pub use error::{map_status, ResourceNotFound, Result, ScalrError};
pub use scalr::{
    Config, ConfigurationVersion, ConfigurationVersionCreateOptions, Environment,
    EnvironmentCreateOptions, EnvironmentListOptions, EnvironmentUpdateOptions, List, ListOptions,
    Pagination, ParameterChangeError, ParameterChangeOptions, ParameterChangeResults,
    ProviderConfiguration, ProviderConfigurationCreateOptions, ProviderConfigurationListOptions,
    ProviderConfigurationParameter, ProviderConfigurationParameterCreateOptions,
    ProviderConfigurationParameterListOptions, ProviderConfigurationParameterUpdateOptions,
    ProviderConfigurationUpdateOptions, RawBody, RequestBody, RetryPolicy, Run, RunActionOptions,
    RunCreateOptions, RunListOptions, ScalrClient, ScalrResource, StateVersion, Tag,
    TagCreateOptions, TagListOptions, TagUpdateOptions, Team, TeamCreateOptions, TeamListOptions,
    TeamUpdateOptions, TokenResolver, Variable, VariableCategory, VariableCreateOptions,
    VariableListOptions, VariableUpdateOptions, Webhook, WebhookCreateOptions, WebhookListOptions,
    WebhookUpdateOptions, Workspace, WorkspaceCreateOptions, WorkspaceListOptions,
    WorkspaceUpdateOptions,
};

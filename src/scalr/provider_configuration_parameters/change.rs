//! Batch reconciliation of provider configuration parameters

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::error::ScalrError;

use super::api::{parameters_path, ProviderConfigurationParameters};
use super::models::{
    ProviderConfigurationParameter, ProviderConfigurationParameterCreateOptions,
    ProviderConfigurationParameterUpdateOptions,
};

/// Parameters to delete, update and create in one batch
#[derive(Debug, Clone, Default)]
pub struct ParameterChangeOptions {
    pub create: Option<Vec<ProviderConfigurationParameterCreateOptions>>,
    pub update: Option<Vec<ProviderConfigurationParameterUpdateOptions>>,
    /// Parameter ids
    pub delete: Option<Vec<String>>,
}

/// What a batch (or the part of it that ran) did, in completion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterChangeResults {
    pub created: Vec<ProviderConfigurationParameter>,
    pub updated: Vec<ProviderConfigurationParameter>,
    pub deleted: Vec<String>,
}

impl ParameterChangeResults {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// First failure of a batch, with everything that succeeded before it
#[derive(Debug, thiserror::Error)]
#[error("provider configuration parameter change failed: {source}")]
pub struct ParameterChangeError {
    pub source: ScalrError,
    pub partial: ParameterChangeResults,
}

enum Task {
    Delete(String),
    Update(ProviderConfigurationParameterUpdateOptions),
    Create(ProviderConfigurationParameterCreateOptions),
}

enum Outcome {
    Created(ProviderConfigurationParameter),
    Updated(ProviderConfigurationParameter),
    Deleted(String),
}

impl ProviderConfigurationParameters<'_> {
    /// Apply a batch of parameter changes with bounded concurrency.
    ///
    /// Work is queued as deletes, then updates, then creates, and dispatched
    /// to at most `max_parallel_changes` concurrent requests. The first
    /// failure stops the batch: queued work is dropped, in-flight requests
    /// are cancelled and the error is returned with the results collected so
    /// far. Cancelling `ctx` stops the batch the same way.
    pub async fn change(
        &self,
        ctx: &CancellationToken,
        provider_configuration_id: &str,
        options: ParameterChangeOptions,
    ) -> Result<ParameterChangeResults, ParameterChangeError> {
        if let Err(source) = parameters_path(provider_configuration_id) {
            return Err(ParameterChangeError {
                source,
                partial: ParameterChangeResults::default(),
            });
        }

        let tasks: Vec<Task> = options
            .delete
            .into_iter()
            .flatten()
            .map(Task::Delete)
            .chain(options.update.into_iter().flatten().map(Task::Update))
            .chain(options.create.into_iter().flatten().map(Task::Create))
            .collect();

        let mut results = ParameterChangeResults::default();
        if tasks.is_empty() {
            return Ok(results);
        }

        let workers = self.client.max_parallel_changes().min(tasks.len());
        debug!(
            "Applying {} parameter change(s) to {} with {} worker(s)",
            tasks.len(),
            provider_configuration_id,
            workers
        );

        let batch = ctx.child_token();
        let mut outcomes = stream::iter(tasks)
            .map(|task| self.run_task(&batch, provider_configuration_id, task))
            .buffer_unordered(workers);

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                Ok(Outcome::Created(parameter)) => results.created.push(parameter),
                Ok(Outcome::Updated(parameter)) => results.updated.push(parameter),
                Ok(Outcome::Deleted(id)) => results.deleted.push(id),
                Err(source) => {
                    batch.cancel();
                    warn!(
                        "Parameter change on {} stopped after {} created, {} updated, {} deleted: {}",
                        provider_configuration_id,
                        results.created.len(),
                        results.updated.len(),
                        results.deleted.len(),
                        source
                    );
                    return Err(ParameterChangeError {
                        source,
                        partial: results,
                    });
                }
            }
        }

        Ok(results)
    }

    async fn run_task(
        &self,
        ctx: &CancellationToken,
        provider_configuration_id: &str,
        task: Task,
    ) -> crate::Result<Outcome> {
        match task {
            Task::Delete(id) => {
                self.delete(ctx, &id).await?;
                Ok(Outcome::Deleted(id))
            }
            Task::Update(options) => self.update(ctx, &options).await.map(Outcome::Updated),
            Task::Create(options) => self
                .create(ctx, provider_configuration_id, &options)
                .await
                .map(Outcome::Created),
        }
    }
}

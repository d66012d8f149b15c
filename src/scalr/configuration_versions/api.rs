//! Configuration version API operations

use log::debug;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{RequestBody, ScalrClient};
use crate::validation::{valid_string, valid_string_id};

use super::models::{ConfigurationVersion, ConfigurationVersionCreateOptions};

/// Configuration version operations, see [`ScalrClient::configuration_versions`]
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationVersions<'a> {
    client: &'a ScalrClient,
}

impl<'a> ConfigurationVersions<'a> {
    pub(crate) fn new(client: &'a ScalrClient) -> Self {
        Self { client }
    }

    /// Create a pending configuration version; upload to its
    /// [`upload_url`](ConfigurationVersion::upload_url) next
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        options: &ConfigurationVersionCreateOptions,
    ) -> Result<ConfigurationVersion> {
        if !valid_string_id(&options.workspace_id) {
            return Err(ScalrError::InvalidValue("workspace ID"));
        }
        debug!(
            "Creating configuration version for workspace {}",
            options.workspace_id
        );
        self.client
            .call(
                ctx,
                Method::POST,
                api::CONFIGURATION_VERSIONS,
                RequestBody::document(options)?,
            )
            .await
    }

    /// Get a configuration version by ID
    pub async fn read(
        &self,
        ctx: &CancellationToken,
        configuration_version_id: &str,
    ) -> Result<ConfigurationVersion> {
        if !valid_string_id(configuration_version_id) {
            return Err(ScalrError::InvalidValue("configuration version ID"));
        }
        let path = format!(
            "{}/{}",
            api::CONFIGURATION_VERSIONS,
            urlencoding::encode(configuration_version_id)
        );
        self.client
            .call(ctx, Method::GET, &path, RequestBody::Empty)
            .await
    }

    /// PUT a packed configuration archive (tar.gz) to an upload URL
    pub async fn upload(
        &self,
        ctx: &CancellationToken,
        upload_url: &str,
        archive: impl Into<Vec<u8>>,
    ) -> Result<()> {
        if !valid_string(upload_url) {
            return Err(ScalrError::RequiredValue("upload URL"));
        }
        let archive = archive.into();
        debug!("Uploading {} bytes of configuration", archive.len());
        self.client
            .call(ctx, Method::PUT, upload_url, RequestBody::raw(archive))
            .await
    }
}

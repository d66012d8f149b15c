//! Configuration version data models

use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, Relationships};

/// Configuration version data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct ConfigurationVersion {
    pub id: String,
    pub attributes: ConfigurationVersionAttributes,
    #[serde(default)]
    pub relationships: ConfigurationVersionRelationships,
}

/// Configuration version attributes from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigurationVersionAttributes {
    /// pending, uploaded, errored
    #[serde(default)]
    pub status: String,
    #[serde(rename = "auto-queue-runs", default)]
    pub auto_queue_runs: bool,
    #[serde(rename = "is-dry", default)]
    pub is_dry: bool,
    /// Where the configuration archive is PUT, present while pending
    #[serde(rename = "upload-url")]
    pub upload_url: Option<String>,
    #[serde(rename = "error-message")]
    pub error_message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigurationVersionRelationships {
    #[serde(default)]
    pub workspace: Relationship,
}

crate::single_resource!(ConfigurationVersion);

impl ConfigurationVersion {
    pub fn is_uploaded(&self) -> bool {
        self.attributes.status == "uploaded"
    }

    pub fn upload_url(&self) -> Option<&str> {
        self.attributes.upload_url.as_deref()
    }
}

/// Body for creating a configuration version in a workspace
#[derive(Serialize, Debug, Clone, Default)]
pub struct ConfigurationVersionCreateOptions {
    #[serde(rename = "auto-queue-runs", skip_serializing_if = "Option::is_none")]
    pub auto_queue_runs: Option<bool>,
    #[serde(rename = "is-dry", skip_serializing_if = "Option::is_none")]
    pub is_dry: Option<bool>,
    #[serde(skip)]
    pub workspace_id: String,
}

impl Payload for ConfigurationVersionCreateOptions {
    const TYPE: &'static str = "configuration-versions";

    fn relationships(&self) -> Relationships {
        Relationships::new().to_one("workspace", "workspaces", Some(&self.workspace_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pending_version() {
        let json = r#"{
            "id": "cv-1",
            "type": "configuration-versions",
            "attributes": {
                "status": "pending",
                "auto-queue-runs": true,
                "upload-url": "https://scalr.example/uploads/abc"
            },
            "relationships": {
                "workspace": { "data": { "id": "ws-1", "type": "workspaces" } }
            }
        }"#;

        let cv: ConfigurationVersion = serde_json::from_str(json).unwrap();
        assert!(!cv.is_uploaded());
        assert!(cv.attributes.auto_queue_runs);
        assert_eq!(cv.upload_url(), Some("https://scalr.example/uploads/abc"));
        assert_eq!(cv.relationships.workspace.id(), Some("ws-1"));
    }
}

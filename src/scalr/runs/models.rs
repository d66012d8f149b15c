//! Run data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, Relationships};
use crate::scalr::ListOptions;

/// Run data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct Run {
    pub id: String,
    pub attributes: RunAttributes,
    #[serde(default)]
    pub relationships: RunRelationships,
}

/// Run attributes from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunAttributes {
    #[serde(default)]
    pub status: String,
    pub source: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "is-destroy", default)]
    pub is_destroy: bool,
    #[serde(rename = "is-dry", default)]
    pub is_dry: bool,
    #[serde(rename = "has-changes")]
    pub has_changes: Option<bool>,
    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Run relationships from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunRelationships {
    #[serde(default)]
    pub workspace: Relationship,
    #[serde(default)]
    pub environment: Relationship,
    #[serde(rename = "configuration-version", default)]
    pub configuration_version: Relationship,
    #[serde(rename = "created-by", default)]
    pub created_by: Relationship,
}

crate::single_resource!(Run);

/// Terminal run states
const FINAL_STATUSES: &[&str] = &[
    "applied",
    "planned_and_finished",
    "discarded",
    "errored",
    "canceled",
];

impl Run {
    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships.workspace.id()
    }

    /// True once the run can no longer change state
    pub fn is_final(&self) -> bool {
        FINAL_STATUSES.contains(&self.attributes.status.as_str())
    }
}

/// Query options for listing runs
#[derive(Serialize, Debug, Clone, Default)]
pub struct RunListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[workspace]")]
    pub workspace_id: Option<String>,
    #[serde(rename = "filter[environment]")]
    pub environment_id: Option<String>,
    /// Single status or `in:` operator string
    #[serde(rename = "filter[status]")]
    pub status: Option<String>,
    pub include: Option<Vec<String>>,
}

/// Body for queueing a run
#[derive(Serialize, Debug, Clone, Default)]
pub struct RunCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "is-destroy", skip_serializing_if = "Option::is_none")]
    pub is_destroy: Option<bool>,
    #[serde(rename = "is-dry", skip_serializing_if = "Option::is_none")]
    pub is_dry: Option<bool>,
    #[serde(skip)]
    pub workspace_id: String,
    #[serde(skip)]
    pub configuration_version_id: Option<String>,
}

impl Payload for RunCreateOptions {
    const TYPE: &'static str = "runs";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_one("workspace", "workspaces", Some(&self.workspace_id))
            .to_one(
                "configuration-version",
                "configuration-versions",
                self.configuration_version_id.as_deref(),
            )
    }
}

/// Optional comment on apply, discard and cancel actions
#[derive(Serialize, Debug, Clone, Default)]
pub struct RunActionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_deserialization() {
        let json = r#"{
            "id": "run-1",
            "type": "runs",
            "attributes": {
                "status": "planned_and_finished",
                "source": "api",
                "message": "Triggered via API",
                "is-destroy": false,
                "is-dry": true,
                "created-at": "2024-01-02T03:04:05Z"
            },
            "relationships": {
                "workspace": { "data": { "id": "ws-1", "type": "workspaces" } }
            }
        }"#;

        let run: Run = serde_json::from_str(json).unwrap();
        assert_eq!(run.workspace_id(), Some("ws-1"));
        assert!(run.attributes.is_dry);
        assert!(run.is_final());
    }

    #[test]
    fn test_pending_run_is_not_final() {
        let run: Run =
            serde_json::from_str(r#"{"id": "run-2", "attributes": {"status": "pending"}}"#)
                .unwrap();
        assert!(!run.is_final());
    }
}

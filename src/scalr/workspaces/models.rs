//! Workspace data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, RelationshipMany, Relationships};
use crate::scalr::traits::ScalrResource;
use crate::scalr::ListOptions;

/// Workspace data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
    #[serde(default)]
    pub relationships: WorkspaceRelationships,
}

/// Workspace attributes from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorkspaceAttributes {
    pub name: String,

    #[serde(rename = "auto-apply")]
    pub auto_apply: Option<bool>,

    #[serde(rename = "execution-mode")]
    pub execution_mode: Option<String>,

    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,

    #[serde(rename = "iac-platform")]
    pub iac_platform: Option<String>,

    #[serde(rename = "working-directory")]
    pub working_directory: Option<String>,

    pub locked: Option<bool>,

    #[serde(rename = "has-resources")]
    pub has_resources: Option<bool>,

    #[serde(rename = "deletion-protection-enabled")]
    pub deletion_protection_enabled: Option<bool>,

    #[serde(rename = "var-files", default)]
    pub var_files: Vec<String>,

    #[serde(rename = "created-at")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Workspace relationships from Scalr API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorkspaceRelationships {
    #[serde(default)]
    pub environment: Relationship,
    #[serde(rename = "current-run", default)]
    pub current_run: Relationship,
    #[serde(rename = "vcs-provider", default)]
    pub vcs_provider: Relationship,
    #[serde(rename = "agent-pool", default)]
    pub agent_pool: Relationship,
    #[serde(default)]
    pub tags: RelationshipMany,
}

crate::single_resource!(Workspace);

impl ScalrResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Workspace {
    /// Check if workspace is locked
    pub fn is_locked(&self) -> bool {
        self.attributes.locked.unwrap_or(false)
    }

    /// Get execution mode, defaulting to "remote" if not available
    pub fn execution_mode(&self) -> &str {
        self.attributes
            .execution_mode
            .as_deref()
            .unwrap_or("remote")
    }

    pub fn environment_id(&self) -> Option<&str> {
        self.relationships.environment.id()
    }

    pub fn current_run_id(&self) -> Option<&str> {
        self.relationships.current_run.id()
    }
}

/// Query options for listing workspaces
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorkspaceListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    /// Exact name, or an operator string such as `like:app`
    #[serde(rename = "filter[name]")]
    pub name: Option<String>,
    #[serde(rename = "filter[environment]")]
    pub environment_id: Option<String>,
    #[serde(rename = "filter[workspace]")]
    pub workspace_id: Option<String>,
    #[serde(rename = "filter[tag]")]
    pub tag_id: Option<String>,
    pub include: Option<Vec<String>>,
}

/// Body for creating a workspace
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorkspaceCreateOptions {
    pub name: String,
    #[serde(rename = "auto-apply", skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(rename = "execution-mode", skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<String>,
    #[serde(rename = "terraform-version", skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(rename = "iac-platform", skip_serializing_if = "Option::is_none")]
    pub iac_platform: Option<String>,
    #[serde(rename = "working-directory", skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(
        rename = "deletion-protection-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub deletion_protection_enabled: Option<bool>,
    #[serde(rename = "var-files", skip_serializing_if = "Option::is_none")]
    pub var_files: Option<Vec<String>>,
    #[serde(skip)]
    pub environment_id: String,
    #[serde(skip)]
    pub vcs_provider_id: Option<String>,
    #[serde(skip)]
    pub agent_pool_id: Option<String>,
    #[serde(skip)]
    pub tag_ids: Option<Vec<String>>,
}

impl Payload for WorkspaceCreateOptions {
    const TYPE: &'static str = "workspaces";

    fn relationships(&self) -> Relationships {
        Relationships::new()
            .to_one("environment", "environments", Some(&self.environment_id))
            .to_one(
                "vcs-provider",
                "vcs-providers",
                self.vcs_provider_id.as_deref(),
            )
            .to_one("agent-pool", "agent-pools", self.agent_pool_id.as_deref())
            .to_many("tags", "tags", self.tag_ids.as_ref())
    }
}

/// Body for updating a workspace; unset fields are left unchanged
#[derive(Serialize, Debug, Clone, Default)]
pub struct WorkspaceUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "auto-apply", skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(rename = "execution-mode", skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<String>,
    #[serde(rename = "terraform-version", skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(rename = "working-directory", skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(
        rename = "deletion-protection-enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub deletion_protection_enabled: Option<bool>,
    #[serde(rename = "var-files", skip_serializing_if = "Option::is_none")]
    pub var_files: Option<Vec<String>>,
    #[serde(skip)]
    pub agent_pool_id: Option<String>,
}

impl Payload for WorkspaceUpdateOptions {
    const TYPE: &'static str = "workspaces";

    fn relationships(&self) -> Relationships {
        Relationships::new().to_one("agent-pool", "agent-pools", self.agent_pool_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalr::jsonapi;

    #[test]
    fn test_workspace_deserialization() {
        let json = r#"{
            "id": "ws-abc123",
            "type": "workspaces",
            "attributes": {
                "name": "my-workspace",
                "auto-apply": false,
                "execution-mode": "local",
                "terraform-version": "1.6.0",
                "locked": true,
                "var-files": ["prod.tfvars"],
                "created-at": "2024-05-10T08:00:00Z"
            },
            "relationships": {
                "environment": { "data": { "id": "env-1", "type": "environments" } },
                "current-run": { "data": null }
            }
        }"#;

        let ws: Workspace = serde_json::from_str(json).unwrap();
        assert_eq!(ws.id, "ws-abc123");
        assert_eq!(ws.name(), "my-workspace");
        assert!(ws.is_locked());
        assert_eq!(ws.execution_mode(), "local");
        assert_eq!(ws.attributes.var_files, vec!["prod.tfvars"]);
        assert_eq!(ws.environment_id(), Some("env-1"));
        assert_eq!(ws.current_run_id(), None);
    }

    #[test]
    fn test_workspace_defaults() {
        let ws: Workspace =
            serde_json::from_str(r#"{"id": "ws-1", "attributes": {"name": "w"}}"#).unwrap();
        assert!(!ws.is_locked());
        assert_eq!(ws.execution_mode(), "remote");
        assert!(ws.attributes.var_files.is_empty());
    }

    #[test]
    fn test_create_document_skips_unset_relationships() {
        let opts = WorkspaceCreateOptions {
            name: "app".to_string(),
            auto_apply: Some(true),
            environment_id: "env-1".to_string(),
            ..Default::default()
        };
        let doc = jsonapi::marshal(&opts).unwrap();
        let data = &doc["data"];
        assert_eq!(data["type"], "workspaces");
        assert_eq!(data["attributes"]["auto-apply"], true);
        assert!(data["attributes"].get("environment_id").is_none());
        let rels = data["relationships"].as_object().unwrap();
        assert_eq!(rels.len(), 1);
        assert_eq!(rels["environment"]["data"]["id"], "env-1");
    }
}

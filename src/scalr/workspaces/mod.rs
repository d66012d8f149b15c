//! Workspaces module - models and API for workspaces

mod api;
mod models;

pub use api::Workspaces;
pub use models::{
    Workspace, WorkspaceAttributes, WorkspaceCreateOptions, WorkspaceListOptions,
    WorkspaceRelationships, WorkspaceUpdateOptions,
};

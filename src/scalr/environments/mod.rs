//! Environments module - models and API for environments

mod api;
mod models;

pub use api::Environments;
pub use models::{
    Environment, EnvironmentAttributes, EnvironmentCreateOptions, EnvironmentListOptions,
    EnvironmentRelationships, EnvironmentUpdateOptions,
};

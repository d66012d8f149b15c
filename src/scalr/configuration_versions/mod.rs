//! Configuration versions module - models and API for uploaded configuration

mod api;
mod models;

pub use api::ConfigurationVersions;
pub use models::{
    ConfigurationVersion, ConfigurationVersionAttributes, ConfigurationVersionCreateOptions,
    ConfigurationVersionRelationships,
};

//! State versions module - models and API for workspace state

mod api;
mod models;

pub use api::StateVersions;
pub use models::{StateVersion, StateVersionAttributes, StateVersionRelationships};

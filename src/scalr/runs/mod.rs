//! Runs module - models and API for runs

mod api;
mod models;

pub use api::Runs;
pub use models::{
    Run, RunActionOptions, RunAttributes, RunCreateOptions, RunListOptions, RunRelationships,
};

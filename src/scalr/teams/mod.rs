//! Teams module - models and API for IAM teams

mod api;
mod models;

pub use api::Teams;
pub use models::{
    Team, TeamAttributes, TeamCreateOptions, TeamListOptions, TeamRelationships, TeamUpdateOptions,
};

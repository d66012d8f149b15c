//! Variables module - models and API for Terraform and shell variables

mod api;
mod models;

pub use api::Variables;
pub use models::{
    Variable, VariableAttributes, VariableCategory, VariableCreateOptions, VariableListOptions,
    VariableRelationships, VariableUpdateOptions,
};

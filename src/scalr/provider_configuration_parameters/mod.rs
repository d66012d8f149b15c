//! Provider configuration parameters module
//!
//! Single-item operations plus [`ProviderConfigurationParameters::change`],
//! which applies a batch of deletes, updates and creates concurrently.

mod api;
mod change;
mod models;

pub use api::ProviderConfigurationParameters;
pub use change::{ParameterChangeError, ParameterChangeOptions, ParameterChangeResults};
pub use models::{
    ProviderConfigurationParameter, ProviderConfigurationParameterAttributes,
    ProviderConfigurationParameterCreateOptions, ProviderConfigurationParameterListOptions,
    ProviderConfigurationParameterUpdateOptions,
};

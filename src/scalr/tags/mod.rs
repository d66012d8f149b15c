//! Tags module - account tags and workspace tag assignment

mod api;
mod models;

pub use api::Tags;
pub use models::{Tag, TagAttributes, TagCreateOptions, TagListOptions, TagUpdateOptions};

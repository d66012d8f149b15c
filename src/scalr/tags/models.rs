//! Tag data models

use serde::{Deserialize, Serialize};

use crate::scalr::jsonapi::{Payload, Relationship, Relationships};
use crate::scalr::traits::ScalrResource;
use crate::scalr::ListOptions;

/// Tag data from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct Tag {
    pub id: String,
    pub attributes: TagAttributes,
    #[serde(default)]
    pub relationships: TagRelationships,
}

/// Tag attributes from Scalr API
#[derive(Deserialize, Debug, Clone)]
pub struct TagAttributes {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TagRelationships {
    #[serde(default)]
    pub account: Relationship,
}

crate::single_resource!(Tag);

impl ScalrResource for Tag {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Query options for listing tags
#[derive(Serialize, Debug, Clone, Default)]
pub struct TagListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(rename = "filter[name]")]
    pub name: Option<String>,
    #[serde(rename = "filter[tag]")]
    pub tag_id: Option<String>,
    #[serde(rename = "filter[account]")]
    pub account_id: Option<String>,
    /// Free text search across tag names
    pub query: Option<String>,
}

/// Body for creating a tag
#[derive(Serialize, Debug, Clone, Default)]
pub struct TagCreateOptions {
    pub name: String,
    #[serde(skip)]
    pub account_id: String,
}

impl Payload for TagCreateOptions {
    const TYPE: &'static str = "tags";

    fn relationships(&self) -> Relationships {
        Relationships::new().to_one("account", "accounts", Some(&self.account_id))
    }
}

/// Body for renaming a tag
#[derive(Serialize, Debug, Clone, Default)]
pub struct TagUpdateOptions {
    pub name: String,
}

impl Payload for TagUpdateOptions {
    const TYPE: &'static str = "tags";
}

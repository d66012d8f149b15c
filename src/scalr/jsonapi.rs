//! JSON:API document encoding
//!
//! Payload types derive `Serialize` for their attribute fields and implement
//! [`Payload`] to declare the primary type and any relationships. Fields that
//! feed relationships are marked `#[serde(skip)]` so they never leak into
//! `attributes`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Result, ScalrError};

/// A value that can be sent as the primary data of a JSON:API document
pub trait Payload: Serialize {
    /// JSON:API resource type, e.g. `"workspaces"`
    const TYPE: &'static str;

    /// Primary identifier. Omitted from the document when `None` or empty.
    fn id(&self) -> Option<&str> {
        None
    }

    fn relationships(&self) -> Relationships {
        Relationships::default()
    }
}

/// `{ "type": ..., "id": ... }` reference to another resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResourceIdentifier {
    pub fn new(kind: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// To-one relationship as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
}

impl Relationship {
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

/// To-many relationship as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipMany {
    #[serde(default)]
    pub data: Vec<ResourceIdentifier>,
}

impl RelationshipMany {
    pub fn ids(&self) -> Vec<&str> {
        self.data.iter().map(|d| d.id.as_str()).collect()
    }
}

/// Outgoing `relationships` object
#[derive(Debug, Clone, Default)]
pub struct Relationships(Map<String, Value>);

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a to-one relationship. Empty or missing ids are skipped.
    pub fn to_one(mut self, name: &str, kind: &str, id: Option<&str>) -> Self {
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            self.0.insert(
                name.to_string(),
                json!({ "data": ResourceIdentifier::new(kind, id) }),
            );
        }
        self
    }

    /// Add a to-many relationship. `None` leaves it out entirely, while an
    /// empty list is sent as `[]` to clear it.
    pub fn to_many<I, S>(mut self, name: &str, kind: &str, ids: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(ids) = ids {
            let data: Vec<ResourceIdentifier> = ids
                .into_iter()
                .map(|id| ResourceIdentifier::new(kind, id.as_ref()))
                .collect();
            self.0.insert(name.to_string(), json!({ "data": data }));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Encode one payload as `{"data": {...}}`
pub fn marshal<P: Payload>(payload: &P) -> Result<Value> {
    Ok(json!({ "data": resource_object(payload)? }))
}

/// Encode several payloads as `{"data": [...]}`
pub fn marshal_many<P: Payload>(payloads: &[P]) -> Result<Value> {
    let data = payloads
        .iter()
        .map(resource_object)
        .collect::<Result<Vec<_>>>()?;
    Ok(json!({ "data": data }))
}

/// Encode bare identifiers for relationship endpoints
pub fn marshal_identifiers<S: AsRef<str>>(kind: &str, ids: &[S]) -> Value {
    let data: Vec<ResourceIdentifier> = ids
        .iter()
        .map(|id| ResourceIdentifier::new(kind, id.as_ref()))
        .collect();
    json!({ "data": data })
}

fn resource_object<P: Payload>(payload: &P) -> Result<Value> {
    let mut object = Map::new();
    object.insert("type".to_string(), Value::from(P::TYPE));

    if let Some(id) = payload.id().filter(|id| !id.is_empty()) {
        object.insert("id".to_string(), Value::from(id));
    }

    match serde_json::to_value(payload)? {
        Value::Object(attributes) if !attributes.is_empty() => {
            object.insert("attributes".to_string(), Value::Object(attributes));
        }
        Value::Object(_) | Value::Null => {}
        _ => return Err(ScalrError::InvalidValue("payload attributes")),
    }

    let relationships = payload.relationships();
    if !relationships.is_empty() {
        object.insert("relationships".to_string(), relationships.into_value());
    }

    Ok(Value::Object(object))
}

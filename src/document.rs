// src/document.rs

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Media type mandated by JSONAPI.org for all documents.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// JSONAPI.org specification version advertised in `jsonapi` members.
pub const JSONAPI_VERSION: &str = "1.0";

/// The `jsonapi` member: `{"version": "1.0"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub version: String,
}

impl Default for Version {
    fn default() -> Self {
        Self {
            version: JSONAPI_VERSION.to_string(),
        }
    }
}

/// A single JSONAPI error object.
///
/// `status` is a string on the wire, as JSONAPI.org requires. `detail` and
/// `meta` are omitted entirely when absent, never serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl ErrorObject {
    /// Builds the error object for an HTTP status code. The title is the
    /// canonical reason phrase, or "Unknown Error" for unregistered codes.
    pub fn from_status(status: StatusCode) -> Self {
        Self {
            status: status.as_u16().to_string(),
            title: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            detail: None,
            meta: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Top-level `{"errors": [...]}` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn new(error: ErrorObject) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn from_status(status: StatusCode) -> Self {
        Self::new(ErrorObject::from_status(status))
    }
}

/// A resource object: `id`, `type`, `attributes`, and an optional
/// `jsonapi` version member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Version>,
}

impl Resource {
    /// Wraps a plain text body in a resource object with a fresh random id,
    /// so handlers can return bare strings as primary data.
    pub fn from_text(body: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert("body".to_string(), Value::String(body.into()));
        Self {
            id: Some(Uuid::new_v4().to_string()),
            resource_type: None,
            attributes,
            jsonapi: Some(Version::default()),
        }
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        let mut map = Map::new();
        if let Some(id) = resource.id {
            map.insert("id".to_string(), Value::String(id));
        }
        if let Some(resource_type) = resource.resource_type {
            map.insert("type".to_string(), Value::String(resource_type));
        }
        map.insert("attributes".to_string(), Value::Object(resource.attributes));
        if let Some(version) = resource.jsonapi {
            let mut jsonapi = Map::new();
            jsonapi.insert("version".to_string(), Value::String(version.version));
            map.insert("jsonapi".to_string(), Value::Object(jsonapi));
        }
        Value::Object(map)
    }
}

/// Success document. `data` is always serialized and defaults to `[]`;
/// `included`, `meta` and `links` are omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Version>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            data: Value::Array(Vec::new()),
            included: None,
            meta: None,
            links: None,
            jsonapi: Some(Version::default()),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary data. Resource objects without an `id` get one, and
    /// a lone resource object is wrapped so primary data is always an array
    /// on the wire.
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        let data = sanitise(data.into());
        self.data = match data {
            Value::Object(_) => Value::Array(vec![data]),
            other => other,
        };
        self
    }

    /// Sets the primary data to a single resource object, wrapped in an array.
    pub fn resource(mut self, resource: Resource) -> Self {
        self.data = Value::Array(vec![resource.into()]);
        self
    }

    /// Sets `included`; sanitised the same way as primary data.
    pub fn included(mut self, included: impl Into<Value>) -> Self {
        self.included = Some(sanitise(included.into()));
        self
    }

    /// Sets `meta`, passed through untouched.
    pub fn meta(mut self, meta: impl Into<Value>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Sets `links`, passed through untouched.
    pub fn links(mut self, links: impl Into<Value>) -> Self {
        self.links = Some(links.into());
        self
    }

    /// Drops the `jsonapi` version member from the document.
    pub fn without_version(mut self) -> Self {
        self.jsonapi = None;
        self
    }
}

/// Adds a random `id` to resource objects that lack one. Arrays are handled
/// element by element; existing ids are never overwritten.
fn sanitise(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            map.entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            Value::Object(map)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sanitise).collect()),
        other => other,
    }
}

use serde_json::{Map, Value};

use crate::document::{Resource, Version};

/// Implement on application types to expose them as JSONAPI resource objects.
///
/// Only [`attributes`](Self::attributes) is required; `resource_id` and
/// `resource_type` default to `None`. Values should already be formatted as
/// the API wants them on the wire.
pub trait JsonApiResource {
    /// The `attributes` member of the resource object.
    fn attributes(&self) -> Map<String, Value>;

    fn resource_id(&self) -> Option<String> {
        None
    }

    fn resource_type(&self) -> Option<String> {
        None
    }

    /// The full resource object.
    fn resource(&self) -> Resource {
        Resource {
            id: self.resource_id(),
            resource_type: self.resource_type(),
            attributes: self.attributes(),
            jsonapi: Some(Version::default()),
        }
    }

    /// A representation for public display: attribute keys are kept but every
    /// value is nulled, and `id` is hidden unless `show_id` asks for it.
    fn resource_limited(&self, show_id: bool) -> Resource {
        let mut resource = self.resource();
        if !show_id {
            resource.id = None;
        }
        for value in resource.attributes.values_mut() {
            *value = Value::Null;
        }
        resource
    }
}

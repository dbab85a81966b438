//! Generic API resources.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the discriminator field carried by every entity.
pub const DISCRIMINATOR: &str = "entity";

/// A JSON object returned by the API, discriminated by its `entity` field.
///
/// The attributes are kept exactly as received. Serializing an entity yields
/// the original object, so it can be passed back as request parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    attributes: Map<String, Value>,
}

impl Entity {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// The `entity` discriminator, if present and a string.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        self.attributes.get(DISCRIMINATOR).and_then(Value::as_str)
    }

    /// The `id` attribute, if present and a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").and_then(Value::as_str)
    }

    /// A single attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// All attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Consume into the attribute map.
    #[must_use]
    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }

    /// Deserialize the attributes into a caller-defined struct.
    ///
    /// # Errors
    ///
    /// Returns a path-aware error if the attributes do not match `T`.
    pub fn to_typed<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        serde_path_to_error::deserialize(Value::Object(self.attributes.clone())).map_err(|e| {
            crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
        })
    }
}

impl From<Map<String, Value>> for Entity {
    fn from(attributes: Map<String, Value>) -> Self {
        Self::new(attributes)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Self::Object(entity.attributes)
    }
}

/// Result of interpreting a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// An array or empty body, returned as received.
    Raw(Value),
    /// A resolved entity.
    Entity(T),
}

impl<T> Payload<T> {
    /// The resolved entity, if this is not a raw payload.
    #[must_use]
    pub fn into_entity(self) -> Option<T> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::Raw(_) => None,
        }
    }

    /// Returns `true` for pass-through payloads.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

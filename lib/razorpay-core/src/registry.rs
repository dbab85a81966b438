//! Discriminator to constructor lookup.
//!
//! Responses name their type in a `snake_case` discriminator, such as
//! `"entity": "virtual_account"` or `"code": "BAD_REQUEST_ERROR"`. The registry
//! converts it to a type name (`VirtualAccount`, `BadRequestError`) and looks
//! that name up in an explicit table filled at startup. Lookups never fail: unknown
//! entities resolve to the registry's fallback constructor and unknown error
//! codes to [`ApiError::unknown`].

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::{ApiError, Entity, ErrorDetails};

/// Builds the registry's output type from a generic entity.
pub type EntityFactory<T> = fn(Entity) -> T;

/// Builds an API error from the server's error details.
pub type ErrorFactory = fn(ErrorDetails) -> ApiError;

/// Convert a `snake_case` discriminator to a type name.
///
/// Each underscore-separated segment is capitalized and the rest of the
/// segment lowercased, so `BAD_REQUEST_ERROR` and `bad_request_error` both
/// become `BadRequestError`.
#[must_use]
pub fn pascal_case(discriminator: &str) -> String {
    discriminator
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect()
}

/// Lookup table from type names to entity and error constructors.
pub struct TypeRegistry<T> {
    entities: HashMap<String, EntityFactory<T>>,
    errors: HashMap<String, ErrorFactory>,
    fallback: EntityFactory<T>,
}

impl<T> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entities: Vec<_> = self.entities.keys().collect();
        entities.sort();
        let mut errors: Vec<_> = self.errors.keys().collect();
        errors.sort();

        f.debug_struct("TypeRegistry")
            .field("entities", &entities)
            .field("errors", &errors)
            .finish_non_exhaustive()
    }
}

impl<T> Clone for TypeRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            entities: self.entities.clone(),
            errors: self.errors.clone(),
            fallback: self.fallback,
        }
    }
}

impl<T> TypeRegistry<T> {
    /// Create an empty registry that resolves every entity to `fallback`.
    #[must_use]
    pub fn new(fallback: EntityFactory<T>) -> Self {
        Self {
            entities: HashMap::new(),
            errors: HashMap::new(),
            fallback,
        }
    }

    /// Register an entity constructor under its type name (e.g. `Payment`).
    pub fn register_entity(
        &mut self,
        type_name: impl Into<String>,
        factory: EntityFactory<T>,
    ) -> &mut Self {
        self.entities.insert(type_name.into(), factory);
        self
    }

    /// Register an error constructor under its type name (e.g. `BadRequestError`).
    pub fn register_error(
        &mut self,
        type_name: impl Into<String>,
        factory: ErrorFactory,
    ) -> &mut Self {
        self.errors.insert(type_name.into(), factory);
        self
    }

    /// Resolve an entity discriminator. Falls back to the generic constructor.
    #[must_use]
    pub fn resolve_entity(&self, discriminator: &str) -> EntityFactory<T> {
        let type_name = pascal_case(discriminator);
        self.entities.get(&type_name).copied().unwrap_or_else(|| {
            debug!(
                discriminator,
                type_name = %type_name,
                "unregistered entity, using generic entity"
            );
            self.fallback
        })
    }

    /// Build the output for a generic entity from its own discriminator.
    ///
    /// Entities without a string `entity` attribute go to the fallback.
    #[must_use]
    pub fn resolve(&self, entity: Entity) -> T {
        let factory = entity
            .entity()
            .map_or_else(|| self.fallback, |name| self.resolve_entity(name));
        factory(entity)
    }

    /// Resolve an error code. Falls back to [`ApiError::unknown`].
    #[must_use]
    pub fn resolve_error(&self, code: &str) -> ErrorFactory {
        let type_name = pascal_case(code);
        self.errors.get(&type_name).copied().unwrap_or_else(|| {
            debug!(code, type_name = %type_name, "unregistered error code, using unknown error");
            ApiError::unknown
        })
    }

    /// The constructor used for unregistered or missing discriminators.
    #[must_use]
    pub fn fallback(&self) -> EntityFactory<T> {
        self.fallback
    }

    /// Whether a type name is registered as an entity.
    #[must_use]
    pub fn has_entity(&self, type_name: &str) -> bool {
        self.entities.contains_key(type_name)
    }

    /// Whether a type name is registered as an error.
    #[must_use]
    pub fn has_error(&self, type_name: &str) -> bool {
        self.errors.contains_key(type_name)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::ApiErrorKind;

    #[derive(Debug, PartialEq)]
    enum Resolved {
        Payment(Entity),
        Generic(Entity),
    }

    fn registry() -> TypeRegistry<Resolved> {
        let mut registry = TypeRegistry::new(Resolved::Generic);
        registry
            .register_entity("Payment", Resolved::Payment)
            .register_error("BadRequestError", ApiError::validation);
        registry
    }

    fn entity(discriminator: &str) -> Entity {
        let mut map = Map::new();
        map.insert("entity".to_string(), Value::from(discriminator));
        Entity::new(map)
    }

    fn details(code: &str) -> ErrorDetails {
        ErrorDetails {
            code: code.to_string(),
            description: "Invalid id".to_string(),
            status: 400,
            field: Some("id".to_string()),
        }
    }

    #[test]
    fn pascal_case_conversion() {
        assert_eq!(pascal_case("payment"), "Payment");
        assert_eq!(pascal_case("virtual_account"), "VirtualAccount");
        assert_eq!(pascal_case("BAD_REQUEST_ERROR"), "BadRequestError");
        assert_eq!(pascal_case("bad_request_error"), "BadRequestError");
        assert_eq!(pascal_case("a__b"), "AB");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn resolves_registered_entity() {
        let registry = registry();
        let factory = registry.resolve_entity("payment");
        assert_eq!(
            factory(entity("payment")),
            Resolved::Payment(entity("payment"))
        );
    }

    #[test]
    fn unknown_entity_falls_back() {
        let registry = registry();
        for discriminator in ["settlement", "", "__", "PAYMENT_LINK", "ünïcode"] {
            let factory = registry.resolve_entity(discriminator);
            assert_eq!(
                factory(entity(discriminator)),
                Resolved::Generic(entity(discriminator))
            );
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        let registry = registry();
        let first = registry.resolve_entity("payment")(entity("payment"));
        let second = registry.resolve_entity("payment")(entity("payment"));
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_reads_the_discriminator() {
        let registry = registry();
        assert_eq!(
            registry.resolve(entity("payment")),
            Resolved::Payment(entity("payment"))
        );
        assert_eq!(
            registry.resolve(entity("settlement")),
            Resolved::Generic(entity("settlement"))
        );

        let Value::Object(map) = json!({"entity": 7, "id": "pay_1"}) else {
            unreachable!("object literal");
        };
        assert_eq!(
            registry.resolve(Entity::new(map.clone())),
            Resolved::Generic(Entity::new(map))
        );
        assert_eq!(
            registry.resolve(Entity::default()),
            Resolved::Generic(Entity::default())
        );
    }

    #[test]
    fn resolves_registered_error() {
        let registry = registry();
        let err = registry.resolve_error("bad_request_error")(details("bad_request_error"));

        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.message(), "Invalid id");
        assert_eq!(err.field(), Some("id"));
    }

    #[test]
    fn unknown_error_code_falls_back() {
        let registry = registry();
        let err = registry.resolve_error("totally_unrecognized_code")(details("x"));

        assert_eq!(err.kind(), ApiErrorKind::Unknown);
        assert_eq!(err.message(), "Unknown Error");
    }

    #[test]
    fn registration_is_visible() {
        let registry = registry();
        assert!(registry.has_entity("Payment"));
        assert!(!registry.has_entity("Refund"));
        assert!(registry.has_error("BadRequestError"));

        let debug = format!("{registry:?}");
        assert!(debug.contains("Payment"), "{debug}");
    }

    #[test]
    fn fallback_accessor() {
        let registry = registry();
        let value = json!({"count": 0});
        let Value::Object(map) = value else {
            unreachable!("object literal");
        };
        assert_eq!(
            registry.fallback()(Entity::new(map.clone())),
            Resolved::Generic(Entity::new(map))
        );
    }
}

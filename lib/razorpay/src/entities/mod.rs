//! Typed API resources.
//!
//! Every typed resource is a thin newtype over [`Entity`] that derefs to it,
//! so all attributes stay reachable through [`Entity::get`]. The types add
//! actions that issue follow-up requests, such as [`Payment::capture`].
//!
//! [`Resource`] is what the default registry resolves responses into.

mod collection;
mod customer;
mod oauth_token;
mod order;
mod payment;
mod refund;

pub use collection::Collection;
pub use customer::Customer;
pub use oauth_token::OAuthToken;
pub use order::Order;
pub use payment::Payment;
pub use refund::Refund;

use razorpay_core::{Entity, Payload};
use serde_json::Value;

use crate::dispatcher::encode_segment;
use crate::{Error, Result};

/// A resolved API resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// `"entity": "payment"`
    Payment(Payment),
    /// `"entity": "refund"`
    Refund(Refund),
    /// `"entity": "order"`
    Order(Order),
    /// `"entity": "customer"`
    Customer(Customer),
    /// `"entity": "collection"`
    Collection(Collection),
    /// Any other entity, or an object without a discriminator.
    Entity(Entity),
}

impl Resource {
    /// The discriminator this resource was resolved from.
    ///
    /// Generic entities without a discriminator report `"entity"`.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Payment(_) => Payment::ENTITY,
            Self::Refund(_) => Refund::ENTITY,
            Self::Order(_) => Order::ENTITY,
            Self::Customer(_) => Customer::ENTITY,
            Self::Collection(_) => Collection::ENTITY,
            Self::Entity(entity) => entity.entity().unwrap_or("entity"),
        }
    }

    /// The underlying generic entity.
    #[must_use]
    pub fn as_entity(&self) -> &Entity {
        match self {
            Self::Payment(inner) => inner,
            Self::Refund(inner) => inner,
            Self::Order(inner) => inner,
            Self::Customer(inner) => inner,
            Self::Collection(inner) => inner,
            Self::Entity(entity) => entity,
        }
    }

    /// Consume into the underlying generic entity.
    #[must_use]
    pub fn into_entity(self) -> Entity {
        match self {
            Self::Payment(inner) => inner.into_inner(),
            Self::Refund(inner) => inner.into_inner(),
            Self::Order(inner) => inner.into_inner(),
            Self::Customer(inner) => inner.into_inner(),
            Self::Collection(inner) => inner.into_inner(),
            Self::Entity(entity) => entity,
        }
    }
}

impl From<Entity> for Resource {
    fn from(entity: Entity) -> Self {
        Self::Entity(entity)
    }
}

/// A resource type with a fixed discriminator.
pub trait TypedEntity: Sized + TryFrom<Resource, Error = Error> {
    /// Discriminator value carried in the `entity` field.
    const ENTITY: &'static str;
}

/// Convert an interpreted payload into the typed resource the caller asked for.
pub(crate) fn expect_typed<T: TypedEntity>(payload: Payload<Resource>) -> Result<T> {
    match payload {
        Payload::Entity(resource) => T::try_from(resource),
        Payload::Raw(value) => Err(Error::unexpected_entity(T::ENTITY, raw_kind(&value))),
    }
}

fn raw_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Null => "empty body",
        _ => "raw payload",
    }
}

/// The percent-encoded `id` of an entity, required by instance actions.
pub(crate) fn require_id(entity: &Entity, kind: &'static str) -> Result<String> {
    entity
        .id()
        .map(encode_segment)
        .ok_or_else(|| Error::invalid_request(format!("{kind} has no `id` attribute")))
}

macro_rules! typed_entity {
    ($(#[$meta:meta])* $name:ident => $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(razorpay_core::Entity);

        impl $name {
            /// Consume into the generic entity.
            #[must_use]
            pub fn into_inner(self) -> razorpay_core::Entity {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = razorpay_core::Entity;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<razorpay_core::Entity> for $name {
            fn from(entity: razorpay_core::Entity) -> Self {
                Self(entity)
            }
        }

        impl From<$name> for $crate::entities::Resource {
            fn from(value: $name) -> Self {
                Self::$name(value)
            }
        }

        impl TryFrom<$crate::entities::Resource> for $name {
            type Error = $crate::Error;

            fn try_from(resource: $crate::entities::Resource) -> $crate::Result<Self> {
                match resource {
                    $crate::entities::Resource::$name(value) => Ok(value),
                    other => Err($crate::Error::unexpected_entity($entity, other.kind())),
                }
            }
        }

        impl $crate::entities::TypedEntity for $name {
            const ENTITY: &'static str = $entity;
        }
    };
}

pub(crate) use typed_entity;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entity(value: Value) -> Entity {
        serde_json::from_value(value).expect("object")
    }

    #[test]
    fn kind_reports_discriminator() {
        let payment = Resource::Payment(Payment::from(entity(json!({"entity": "payment"}))));
        assert_eq!(payment.kind(), "payment");

        let other = Resource::Entity(entity(json!({"entity": "settlement"})));
        assert_eq!(other.kind(), "settlement");

        let bare = Resource::Entity(entity(json!({"access_token": "t"})));
        assert_eq!(bare.kind(), "entity");
    }

    #[test]
    fn try_from_rejects_other_resources() {
        let refund = Resource::Refund(Refund::from(entity(json!({"entity": "refund"}))));

        let err = Payment::try_from(refund).expect_err("not a payment");

        let Error::UnexpectedEntity { expected, found } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(*expected, "payment");
        assert_eq!(found, "refund");
    }

    #[test]
    fn expect_typed_rejects_raw_payloads() {
        let err = expect_typed::<Payment>(Payload::Raw(json!([]))).expect_err("raw payload");
        assert!(err.to_string().contains("array"), "{err}");
    }

    #[test]
    fn typed_entities_deref_to_attributes() {
        let attributes = json!({"entity": "order", "id": "order_1", "amount": 500});
        let order = Order::from(entity(attributes.clone()));

        assert_eq!(order.id(), Some("order_1"));
        assert_eq!(order.get("amount"), Some(&json!(500)));
        assert_eq!(serde_json::to_value(&order).expect("serialize"), attributes);
    }

    #[test]
    fn require_id_escapes_and_reports_missing() {
        let with_id = entity(json!({"id": "pay 1"}));
        assert_eq!(require_id(&with_id, "payment").expect("id"), "pay%201");

        let without = entity(json!({}));
        let err = require_id(&without, "payment").expect_err("no id");
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}

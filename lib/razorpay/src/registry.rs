//! The SDK's default type registry.
//!
//! Built once on first use from the known entity and error types. Callers
//! that need more types start from [`base_registry`], register their own, and
//! hand the result to [`crate::Razorpay::with_registry`].

use std::sync::{Arc, LazyLock};

use razorpay_core::{ApiError, TypeRegistry};

use crate::entities::{Collection, Customer, Order, Payment, Refund, Resource};

static DEFAULT_REGISTRY: LazyLock<Arc<TypeRegistry<Resource>>> =
    LazyLock::new(|| Arc::new(base_registry()));

/// Shared handle to the default registry.
#[must_use]
pub fn default_registry() -> Arc<TypeRegistry<Resource>> {
    Arc::clone(&DEFAULT_REGISTRY)
}

/// A fresh registry holding the SDK's entity and error types.
#[must_use]
pub fn base_registry() -> TypeRegistry<Resource> {
    let mut registry = TypeRegistry::new(Resource::Entity);

    registry
        .register_entity("Payment", |entity| Resource::Payment(Payment::from(entity)))
        .register_entity("Refund", |entity| Resource::Refund(Refund::from(entity)))
        .register_entity("Order", |entity| Resource::Order(Order::from(entity)))
        .register_entity("Customer", |entity| {
            Resource::Customer(Customer::from(entity))
        })
        .register_entity("Collection", |entity| {
            Resource::Collection(Collection::from(entity))
        });

    registry
        .register_error("BadRequestError", ApiError::validation)
        .register_error("ValidationError", ApiError::validation)
        .register_error("AuthenticationError", ApiError::authentication)
        .register_error("PermissionError", ApiError::permission)
        .register_error("GatewayError", ApiError::gateway)
        .register_error("ServerError", ApiError::server);

    registry
}

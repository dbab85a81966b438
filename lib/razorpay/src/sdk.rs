//! The SDK entry point.

use std::sync::Arc;

use razorpay_core::TypeRegistry;

use crate::config::{Config, Host};
use crate::dispatcher::Dispatcher;
use crate::entities::Resource;
use crate::registry::default_registry;
use crate::{HyperClient, Result};

/// Handle tying together configuration, transport, and type registry.
///
/// Cloning is cheap. Dispatchers created from a handle capture its
/// configuration and share its transport.
///
/// # Example
///
/// ```ignore
/// use razorpay::{Config, Payment, Razorpay};
///
/// let razorpay = Razorpay::new(Config::basic("rzp_test_key", "secret"))?;
///
/// let payment = Payment::fetch(&razorpay, "pay_29QQoUBi66xm2f").await?;
/// let orders = razorpay.dispatcher("orders").all(&serde_json::json!({"count": 5})).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Razorpay<C = HyperClient> {
    client: C,
    config: Arc<Config>,
    registry: Arc<TypeRegistry<Resource>>,
}

impl Razorpay<HyperClient> {
    /// Create a handle with the default hyper transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS connector cannot be built, for example
    /// when the configured CA bundle is unreadable.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = HyperClient::builder().config(config.client_config());
        if config.logging() {
            builder = builder.with_logging();
        }
        Ok(Self::with_client(config, builder.build()?))
    }
}

impl<C> Razorpay<C> {
    /// Create a handle over a custom transport.
    #[must_use]
    pub fn with_client(config: Config, client: C) -> Self {
        Self {
            client,
            config: Arc::new(config),
            registry: default_registry(),
        }
    }

    /// Replace the type registry, e.g. one extended from [`crate::base_registry`].
    #[must_use]
    pub fn with_registry(mut self, registry: TypeRegistry<Resource>) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Dispatcher for an entity collection on the data API.
    #[must_use]
    pub fn dispatcher(&self, entity: impl Into<String>) -> Dispatcher<C>
    where
        C: Clone,
    {
        self.dispatcher_on(entity, Host::Api)
    }

    /// Dispatcher for an endpoint on the OAuth server.
    #[must_use]
    pub fn auth_dispatcher(&self, entity: impl Into<String>) -> Dispatcher<C>
    where
        C: Clone,
    {
        self.dispatcher_on(entity, Host::Auth)
    }

    fn dispatcher_on(&self, entity: impl Into<String>, host: Host) -> Dispatcher<C>
    where
        C: Clone,
    {
        Dispatcher::new(
            self.client.clone(),
            Arc::clone(&self.config),
            Arc::clone(&self.registry),
            entity,
            host,
        )
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The type registry responses are resolved with.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry<Resource> {
        &self.registry
    }

    /// The transport.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_uses_configured_timeout() {
        let config = Config::builder()
            .basic_auth("key", "secret")
            .timeout(std::time::Duration::from_secs(7))
            .logging(true)
            .build()
            .expect("config");

        let razorpay = Razorpay::new(config).expect("sdk");

        assert_eq!(
            razorpay.client().config().timeout,
            std::time::Duration::from_secs(7)
        );
    }

    #[tokio::test]
    async fn dispatchers_target_hosts() {
        let razorpay = Razorpay::new(Config::basic("key", "secret")).expect("sdk");

        let payments = razorpay.dispatcher("payments");
        let tokens = razorpay.auth_dispatcher("token");

        assert_eq!(payments.host(), Host::Api);
        assert_eq!(payments.entity_name(), "payments");
        assert_eq!(tokens.host(), Host::Auth);
    }

    #[test]
    fn custom_registry_replaces_default() {
        let mut registry = crate::base_registry();
        registry.register_entity("Settlement", Resource::Entity);

        let config = Config::basic("key", "secret");
        let razorpay = Razorpay::with_client(config, ()).with_registry(registry);

        assert!(razorpay.registry().has_entity("Settlement"));
    }
}

//! Async client for the Razorpay payments API.
//!
//! Requests are dispatched per entity collection (`payments`, `orders`, ...)
//! against versioned paths. Parameters are flattened into the bracket syntax
//! the API expects, and responses are resolved into typed resources or
//! structured [`ApiError`]s through a [`TypeRegistry`].
//!
//! # Example
//!
//! ```ignore
//! use razorpay::prelude::*;
//! use serde_json::json;
//!
//! let razorpay = Razorpay::new(Config::basic("rzp_test_key", "secret"))?;
//!
//! let order = Order::create(&razorpay, &json!({
//!     "amount": 50000,
//!     "currency": "INR",
//!     "notes": {"purpose": "checkout"},
//! }))
//! .await?;
//!
//! match Payment::fetch(&razorpay, "pay_missing").await {
//!     Err(Error::Api(err)) if err.kind() == ApiErrorKind::Validation => {
//!         eprintln!("{}: {err}", err.field().unwrap_or("request"));
//!     }
//!     other => { other?; }
//! }
//! ```
//!
//! Logging goes through `tracing`; install a subscriber to see it, and enable
//! per-request transport logs with [`ConfigBuilder::logging`].

mod client;
mod config;
mod connector;
mod dispatcher;
pub mod entities;
pub mod middleware;
pub mod prelude;
mod registry;
mod sdk;

pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    API_URL, AUTH_URL, ClientConfig, ClientConfigBuilder, Config, ConfigBuilder, Credentials,
    DEFAULT_TIMEOUT, DEFAULT_VERSION, Host,
};
pub use dispatcher::{Dispatcher, USER_AGENT, encode_segment, merge_headers};
pub use entities::{Collection, Customer, OAuthToken, Order, Payment, Refund, Resource, TypedEntity};
pub use registry::{base_registry, default_registry};
pub use sdk::Razorpay;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use razorpay_core::{
    ApiError, ApiErrorKind, ContentType, DISCRIMINATOR, Entity, EntityFactory, Error, ErrorDetails,
    ErrorFactory, HttpClient, Method, ParamPlacement, Payload, Request, RequestBuilder, Response,
    Result, TypeRegistry, UNKNOWN_ERROR_MESSAGE, interpret, params, pascal_case,
};

// Re-export http types for status codes and headers
pub use razorpay_core::{StatusCode, header};

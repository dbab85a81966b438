//! Prelude module for convenient imports.
//!
//! ```ignore
//! use razorpay::prelude::*;
//! ```

pub use crate::{
    ApiError, ApiErrorKind, Collection, Config, Customer, Dispatcher, Entity, Error, HttpClient,
    HyperClient, Method, OAuthToken, Order, Payload, Payment, Razorpay, Refund, Resource, Result,
    TypedEntity,
};
pub use serde::{Deserialize, Serialize};

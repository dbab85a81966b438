//! Prelude module for convenient imports.
//!
//! ```ignore
//! use razorpay_core::prelude::*;
//! ```

pub use crate::{
    ApiError, ApiErrorKind, Entity, Error, HttpClient, Method, Payload, Request, RequestBuilder,
    Response, Result, TypeRegistry, interpret,
};

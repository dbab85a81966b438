//! Core types and traits for the Razorpay API client.
//!
//! This crate holds the transport-independent half of the SDK:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`HttpClient`] - Transport trait the dispatcher executes requests through
//! - [`params`] - Nested parameter flattening (`a[b][0][c]=...`)
//! - [`Entity`] and [`Payload`] - Generic API resources
//! - [`TypeRegistry`] - Discriminator to constructor lookup with fallback
//! - [`interpret`] - Turns a status and JSON body into an entity or an [`ApiError`]
//! - [`Error`] and [`Result`] - Error handling

mod body;
mod client;
mod entity;
mod error;
mod interpret;
mod method;
pub mod params;
pub mod prelude;
mod registry;
mod request;
mod response;

pub use body::{ContentType, from_json, parse_body, to_form, to_query_string};
pub use client::HttpClient;
pub use entity::{DISCRIMINATOR, Entity, Payload};
pub use error::{ApiError, ApiErrorKind, Error, ErrorDetails, Result, UNKNOWN_ERROR_MESSAGE};
pub use interpret::interpret;
pub use method::{Method, ParamPlacement};
pub use registry::{EntityFactory, ErrorFactory, TypeRegistry, pascal_case};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};

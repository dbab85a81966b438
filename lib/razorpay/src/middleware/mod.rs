//! Tower middleware layers for the transport.
//!
//! Layers wrap [`crate::HyperClient`] through [`crate::HyperClientBuilder::layer`]
//! and see every request the dispatcher sends, after headers and
//! authentication have been applied.
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};

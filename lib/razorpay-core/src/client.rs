//! HTTP transport trait.
//!
//! The dispatcher never talks to the network itself; it hands fully built
//! requests to an [`HttpClient`]. The `razorpay` crate ships a hyper-based
//! implementation. Implement the trait directly for tests or for a custom
//! transport.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations must be safe to share between concurrent callers.
///
/// # Example
///
/// ```ignore
/// use razorpay_core::{HttpClient, Request, Response, Result};
/// use bytes::Bytes;
///
/// #[derive(Clone)]
/// struct Canned;
///
/// impl HttpClient for Canned {
///     async fn execute(&self, _request: Request<Bytes>) -> Result<Response<Bytes>> {
///         Ok(Response::new(200, Default::default(), Bytes::from(r#"{"entity":"payment"}"#)))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// Any status code is a successful execution; only transport failures
    /// are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

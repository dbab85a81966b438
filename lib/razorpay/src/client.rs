//! The hyper transport behind [`crate::Razorpay`].
//!
//! Requests run through a stack of tower layers over a pooled hyper-util
//! client. The stack is type-erased so layers can be added at runtime
//! through [`HyperClientBuilder::layer`].

use std::collections::HashMap;
use std::error::Error as _;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderName, HeaderValue};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{
    Error, Request, Response, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
    middleware::LoggingLayer,
};

/// Type-erased transport stack.
pub type BoxedService = BoxCloneService<Request<Bytes>, Response<Bytes>, Error>;

/// Future returned by the transport stack.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

/// `BoxCloneService` is not `Sync`. The lock is held only to clone the stack
/// for one call.
#[derive(Clone)]
struct SharedStack {
    inner: Arc<Mutex<BoxedService>>,
}

impl SharedStack {
    fn new(service: BoxedService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn call(&self, request: Request<Bytes>) -> ServiceFuture {
        let mut service = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        Box::pin(async move { service.call(request).await })
    }
}

/// Innermost service: converts requests to hyper and enforces the timeout.
#[derive(Clone)]
struct HyperTransport {
    pool: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    timeout: Duration,
}

impl HyperTransport {
    fn new(config: &ClientConfig) -> Result<Self> {
        let pool = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(config)?);

        Ok(Self {
            pool,
            timeout: config.timeout,
        })
    }

    async fn send(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = to_hyper(request)?;

        // One deadline covers both the response head and the body.
        tokio::time::timeout(self.timeout, async {
            let response = self.pool.request(request).await.map_err(classify)?;
            let status = response.status().as_u16();
            let headers = from_hyper_headers(response.headers());
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| Error::connection(format!("reading response body: {e}")))?
                .to_bytes();
            Ok::<_, Error>(Response::new(status, headers, body))
        })
        .await
        .map_err(|_| Error::Timeout)?
    }
}

impl Service<Request<Bytes>> for HyperTransport {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().send(request))
    }
}

/// Convert a request, rejecting header names or values HTTP cannot carry.
fn to_hyper(request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body) = request.into_parts();

    let mut hyper_request = http::Request::new(body.map_or_else(Full::default, Full::new));
    *hyper_request.method_mut() = method.into();
    *hyper_request.uri_mut() = url
        .as_str()
        .parse()
        .map_err(|e| Error::invalid_request(format!("invalid URI `{url}`: {e}")))?;

    let target = hyper_request.headers_mut();
    for (name, value) in headers {
        let header_name = HeaderName::try_from(name.as_str())
            .map_err(|_| Error::invalid_request(format!("invalid header name `{name}`")))?;
        let header_value = HeaderValue::try_from(value)
            .map_err(|_| Error::invalid_request(format!("invalid value for header `{name}`")))?;
        target.insert(header_name, header_value);
    }

    Ok(hyper_request)
}

fn from_hyper_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

/// TLS failures surface as a `rustls::Error` somewhere in the source chain.
#[allow(clippy::needless_pass_by_value)]
fn classify(err: hyper_util::client::legacy::Error) -> Error {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<rustls::Error>() {
            return Error::tls(format!("{err}: {cause}"));
        }
        source = cause.source();
    }

    Error::connection(match err.source() {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    })
}

/// HTTP transport over hyper-util with connection pooling, rustls, and tower
/// layers.
///
/// # Example
///
/// ```ignore
/// use razorpay::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_debug_logging()
///     .build()?;
/// ```
#[derive(Clone)]
pub struct HyperClient {
    stack: SharedStack,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Create a transport with default settings and no layers.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS connector cannot be built.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// The transport settings.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl razorpay_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.stack.call(request).await
    }
}

type LayerFn = Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>;

/// Builder for [`HyperClient`].
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    layers: Vec<LayerFn>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Start from existing transport settings.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        let mut builder = ClientConfig::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_per_host(config.pool_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout);
        if let Some(path) = config.ca_bundle {
            builder = builder.ca_bundle(path);
        }
        self.config = builder;
        self
    }

    /// Set the per-request timeout, covering the response body.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Add a tower layer. The first layer added is the innermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send,
    {
        let wrap: LayerFn = Arc::new(move |service| BoxCloneService::new(layer.layer(service)));
        self.layers.push(wrap);
        self
    }

    /// Log every request at info level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log every request at debug level, including redacted headers.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the transport with its layers.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS connector cannot be built.
    pub fn build(self) -> Result<HyperClient> {
        let config = self.config.build();
        let stack = self.layers.into_iter().fold(
            BoxCloneService::new(HyperTransport::new(&config)?),
            |service, layer| layer(service),
        );

        Ok(HyperClient {
            stack: SharedStack::new(stack),
            config,
        })
    }
}

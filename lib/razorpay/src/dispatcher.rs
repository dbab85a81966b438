//! Entity-scoped request dispatch.
//!
//! A [`Dispatcher`] is bound to one entity collection (`payments`, `orders`,
//! ...), one host, and one API version. Every operation builds a path of the
//! form `/{version}/{entity}[/{suffix}]`, flattens the parameters with
//! [`razorpay_core::params`], sends the request through the transport, and
//! interprets the response.
//!
//! # Example
//!
//! ```ignore
//! use razorpay::{Config, Razorpay};
//! use serde_json::json;
//!
//! let razorpay = Razorpay::new(Config::basic("rzp_test_key", "secret"))?;
//! let payments = razorpay.dispatcher("payments");
//!
//! let payment = payments.fetch("pay_29QQoUBi66xm2f").await?;
//! let page = payments.all(&json!({"count": 10})).await?;
//! let captured = payments
//!     .post("pay_29QQoUBi66xm2f/capture", &json!({"amount": 5000, "currency": "INR"}))
//!     .await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use razorpay_core::{ParamPlacement, Payload, TypeRegistry, interpret, params};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::{Config, DEFAULT_VERSION, Host};
use crate::entities::Resource;
use crate::{Error, HttpClient, HyperClient, Method, Request, Response, Result};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("Razorpay-Rust/", env!("CARGO_PKG_VERSION"));

/// Characters escaped in caller-supplied path segments.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode an id so it stays a single path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Merge headers in two phases: caller headers first, then the SDK's required
/// headers, which replace any caller header with the same (case-insensitive) name.
#[must_use]
pub fn merge_headers(
    custom: &[(String, String)],
    required: impl IntoIterator<Item = (String, String)>,
) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = custom.iter().cloned().collect();
    for (name, value) in required {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        headers.insert(name, value);
    }
    headers
}

/// Request dispatcher for one entity collection.
#[derive(Debug)]
pub struct Dispatcher<C = HyperClient> {
    client: C,
    config: Arc<Config>,
    registry: Arc<TypeRegistry<Resource>>,
    entity: String,
    host: Host,
    version: String,
}

impl<C: Clone> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
            registry: Arc::clone(&self.registry),
            entity: self.entity.clone(),
            host: self.host,
            version: self.version.clone(),
        }
    }
}

impl<C> Dispatcher<C> {
    /// Create a dispatcher for `entity` on `host`, targeting the default API version.
    #[must_use]
    pub fn new(
        client: C,
        config: Arc<Config>,
        registry: Arc<TypeRegistry<Resource>>,
        entity: impl Into<String>,
        host: Host,
    ) -> Self {
        Self {
            client,
            config,
            registry,
            entity: entity.into(),
            host,
            version: DEFAULT_VERSION.to_string(),
        }
    }

    /// A copy of this dispatcher targeting another API version.
    ///
    /// An empty version drops the version segment from paths.
    #[must_use]
    pub fn version(&self, version: impl Into<String>) -> Self
    where
        C: Clone,
    {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }

    /// Entity collection name.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity
    }

    /// Target host.
    #[must_use]
    pub const fn host(&self) -> Host {
        self.host
    }

    /// Target API version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.version
    }

    /// Path for this entity, with an optional suffix.
    #[must_use]
    pub fn path(&self, suffix: Option<&str>) -> String {
        let segments = [self.version.as_str(), self.entity.as_str()];
        segments
            .into_iter()
            .chain(suffix)
            .filter(|segment| !segment.is_empty())
            .fold(String::new(), |path, segment| path + "/" + segment)
    }

    fn url(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url(self.host);
        let base = base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Headers every request must carry. These win over custom headers.
    fn required_headers(&self) -> [(String, String); 2] {
        [
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            (
                "Authorization".to_string(),
                self.config.credentials().authorization(),
            ),
        ]
    }

    fn build_request(
        &self,
        method: Method,
        url: Url,
        params: &Map<String, Value>,
    ) -> Result<Request<Bytes>> {
        let builder = Request::<Bytes>::builder(method, url);
        let builder = match method.param_placement() {
            ParamPlacement::Query => builder.query_pairs(params::normalize(params)),
            ParamPlacement::Body => builder.form(&params::normalize(params))?,
            ParamPlacement::None => builder,
        };

        let mut request = builder.build();
        let own: Vec<_> = request.headers_mut().drain().collect();
        *request.headers_mut() = merge_headers(
            self.config.custom_headers(),
            own.into_iter().chain(self.required_headers()),
        );
        Ok(request)
    }
}

/// Convert caller parameters to a JSON object. `null` means no parameters.
fn to_params<P: Serialize + ?Sized>(params: &P) -> Result<Map<String, Value>> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::invalid_request(format!(
            "parameters must serialize to a JSON object, got `{other}`"
        ))),
    }
}

impl<C: HttpClient> Dispatcher<C> {
    /// `GET /{version}/{entity}/{id}`
    pub async fn fetch(&self, id: &str) -> Result<Payload<Resource>> {
        let path = self.path(Some(&encode_segment(id)));
        self.request(Method::Get, &path, &Map::new()).await
    }

    /// `GET /{version}/{entity}` with `params` as query string.
    pub async fn all<P: Serialize + ?Sized>(&self, params: &P) -> Result<Payload<Resource>> {
        let path = self.path(None);
        self.request(Method::Get, &path, &to_params(params)?).await
    }

    /// `POST /{version}/{entity}` with `params` as form body.
    pub async fn create<P: Serialize + ?Sized>(&self, params: &P) -> Result<Payload<Resource>> {
        let path = self.path(None);
        self.request(Method::Post, &path, &to_params(params)?).await
    }

    /// `GET /{version}/{entity}/{suffix}` with `params` as query string.
    pub async fn get<P: Serialize + ?Sized>(
        &self,
        suffix: &str,
        params: &P,
    ) -> Result<Payload<Resource>> {
        self.verb(Method::Get, suffix, params).await
    }

    /// `POST /{version}/{entity}/{suffix}` with `params` as form body.
    pub async fn post<P: Serialize + ?Sized>(
        &self,
        suffix: &str,
        params: &P,
    ) -> Result<Payload<Resource>> {
        self.verb(Method::Post, suffix, params).await
    }

    /// `PUT /{version}/{entity}/{suffix}` with `params` as form body.
    pub async fn put<P: Serialize + ?Sized>(
        &self,
        suffix: &str,
        params: &P,
    ) -> Result<Payload<Resource>> {
        self.verb(Method::Put, suffix, params).await
    }

    /// `PATCH /{version}/{entity}/{suffix}` with `params` as form body.
    pub async fn patch<P: Serialize + ?Sized>(
        &self,
        suffix: &str,
        params: &P,
    ) -> Result<Payload<Resource>> {
        self.verb(Method::Patch, suffix, params).await
    }

    /// `DELETE /{version}/{entity}/{suffix}`
    pub async fn delete(&self, suffix: &str) -> Result<Payload<Resource>> {
        let path = self.path(Some(suffix));
        self.request(Method::Delete, &path, &Map::new()).await
    }

    async fn verb<P: Serialize + ?Sized>(
        &self,
        method: Method,
        suffix: &str,
        params: &P,
    ) -> Result<Payload<Resource>> {
        let path = self.path(Some(suffix));
        self.request(method, &path, &to_params(params)?).await
    }

    /// Send a request to `path` (relative to the host) and interpret the response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for errors reported by the API, and transport
    /// errors unchanged.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Map<String, Value>,
    ) -> Result<Payload<Resource>> {
        let response = self.raw_request(method, path, params).await?;
        let status = response.status();

        interpret(status, response.parsed(), self.registry.as_ref()).inspect_err(|err| {
            if let Error::Api(api) = err {
                warn!(
                    entity = %self.entity,
                    status,
                    code = api.code(),
                    kind = %api.kind(),
                    "API returned an error"
                );
            }
        })
    }

    /// Send a request to `path` and return the transport response untouched.
    pub async fn raw_request(
        &self,
        method: Method,
        path: &str,
        params: &Map<String, Value>,
    ) -> Result<Response<Bytes>> {
        let url = self.url(path)?;
        debug!(
            method = %method,
            path,
            host = ?self.host,
            entity = %self.entity,
            "dispatching request"
        );

        let request = self.build_request(method, url, params)?;
        self.client.execute(request).await
    }

    /// Send an authenticated `GET` to the host root, to check connectivity
    /// and credentials.
    pub async fn ping(&self) -> Result<Response<Bytes>> {
        self.raw_request(Method::Get, "/", &Map::new()).await
    }
}

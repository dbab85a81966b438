//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers, flattened
//! query parameters, and form bodies.
//!
//! # Example
//!
//! ```
//! use razorpay_core::{Method, Request};
//!
//! let url = "https://api.razorpay.com/v1/payments".parse().expect("valid URL");
//! let request: Request = Request::builder(Method::Get, url)
//!     .header("Accept", "application/json")
//!     .query_pairs([("count".to_string(), "10".to_string())])
//!     .build();
//!
//! assert_eq!(request.url().query(), Some("count=10"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{ContentType, Method, params::Pair};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers. Later values replace earlier ones.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends flattened query parameters to the URL.
    ///
    /// An empty iterator leaves the URL without a `?`.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = Pair>) -> Self {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_some() {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(&name, &value);
            }
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a form-urlencoded body from flattened parameter pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form(self, pairs: &[Pair]) -> crate::Result<Self> {
        let body = crate::to_form(pairs)?;
        Ok(self
            .header("Content-Type", ContentType::FormUrlEncoded.as_str())
            .body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> url::Url {
        url::Url::parse("https://api.razorpay.com/v1/payments").expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::<Bytes>::builder(Method::Get, url())
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(
            request.url().as_str(),
            "https://api.razorpay.com/v1/payments"
        );
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_builder_with_nested_query() {
        let request = Request::<Bytes>::builder(Method::Get, url())
            .query_pairs([
                ("count".to_string(), "2".to_string()),
                ("notes[key]".to_string(), "a b".to_string()),
            ])
            .build();

        assert_eq!(
            request.url().as_str(),
            "https://api.razorpay.com/v1/payments?count=2&notes%5Bkey%5D=a+b"
        );
    }

    #[test]
    fn request_builder_without_query_pairs() {
        let request = Request::<Bytes>::builder(Method::Get, url())
            .query_pairs(Vec::new())
            .build();

        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn request_builder_form() {
        let request = Request::<Bytes>::builder(Method::Post, url())
            .form(&[("amount".to_string(), "100".to_string())])
            .expect("form")
            .build();

        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.body(), Some(&Bytes::from_static(b"amount=100")));
    }

    #[test]
    fn later_headers_win() {
        let request = Request::<Bytes>::builder(Method::Get, url())
            .header("User-Agent", "custom")
            .headers([("User-Agent".to_string(), "sdk".to_string())])
            .build();

        assert_eq!(request.header("User-Agent"), Some("sdk"));
    }
}

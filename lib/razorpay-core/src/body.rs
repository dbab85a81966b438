//! Body serialization utilities.

use bytes::Bytes;
use serde_json::Value;

use crate::Result;
use crate::params::Pair;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize flattened parameter pairs to a form URL-encoded body.
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use razorpay_core::to_form;
///
/// let pairs = vec![("notes[key]".to_string(), "value".to_string())];
/// let bytes = to_form(&pairs).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"notes%5Bkey%5D=value");
/// ```
pub fn to_form(pairs: &[Pair]) -> Result<Bytes> {
    to_query_string(pairs).map(|s| Bytes::from(s.into_bytes()))
}

/// Serialize flattened parameter pairs to a query string.
///
/// Uses `application/x-www-form-urlencoded` rules: a space becomes `+`, and
/// only ASCII alphanumerics and `*-._` stay unescaped, so `~` is sent as
/// `%7E`. The same encoding is used for GET query strings and form bodies,
/// and servers decode `+` and `%20` alike.
///
/// # Errors
///
/// Returns an error if query serialization fails.
///
/// # Example
///
/// ```
/// use razorpay_core::to_query_string;
///
/// let pairs = vec![
///     ("count".to_string(), "10".to_string()),
///     ("skip".to_string(), "0".to_string()),
/// ];
/// assert_eq!(to_query_string(&pairs).expect("serialize"), "count=10&skip=0");
/// ```
pub fn to_query_string(pairs: &[Pair]) -> Result<String> {
    serde_urlencoded::to_string(pairs).map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` to provide detailed error messages that include
/// the exact path to the field that failed to deserialize.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "card.network").
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Parse a raw response body the way the API client sees it.
///
/// An empty (or whitespace-only) body is `null`, a body that is not JSON is
/// kept as a JSON string so it can still be inspected.
#[must_use]
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

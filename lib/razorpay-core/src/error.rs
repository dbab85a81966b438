//! Error types for the Razorpay client.
//!
//! [`Error`] covers everything a call can fail with. Errors reported by the
//! API itself arrive as [`Error::Api`] carrying an [`ApiError`]; everything
//! else (connection, TLS, timeouts, encoding) is a local or transport failure
//! and is never reinterpreted as an API error.

use derive_more::{Display, Error, From};

/// Message carried by errors whose code could not be resolved.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";

// ============================================================================
// API Error Taxonomy
// ============================================================================

/// Kind of a server-reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ApiErrorKind {
    /// The request was rejected, usually because of a specific field.
    #[display("validation")]
    Validation,
    /// Credentials were missing or invalid.
    #[display("authentication")]
    Authentication,
    /// Credentials are valid but not allowed to perform the action.
    #[display("permission")]
    Permission,
    /// An upstream payment gateway failed.
    #[display("gateway")]
    Gateway,
    /// The API failed internally.
    #[display("server")]
    Server,
    /// The error code did not map to any known kind.
    #[display("unknown")]
    Unknown,
}

/// The `error` object of a failed response, plus the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    /// Machine-readable code, e.g. `BAD_REQUEST_ERROR`.
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// HTTP status of the response.
    pub status: u16,
    /// Input field the error refers to, if any.
    pub field: Option<String>,
}

/// A structured error returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    code: String,
    status: u16,
    field: Option<String>,
    message: String,
}

impl ApiError {
    /// Build an error of the given kind, using the server description as message.
    #[must_use]
    pub fn new(kind: ApiErrorKind, details: ErrorDetails) -> Self {
        Self {
            kind,
            code: details.code,
            status: details.status,
            field: details.field,
            message: details.description,
        }
    }

    /// Validation error.
    #[must_use]
    pub fn validation(details: ErrorDetails) -> Self {
        Self::new(ApiErrorKind::Validation, details)
    }

    /// Authentication error.
    #[must_use]
    pub fn authentication(details: ErrorDetails) -> Self {
        Self::new(ApiErrorKind::Authentication, details)
    }

    /// Permission error.
    #[must_use]
    pub fn permission(details: ErrorDetails) -> Self {
        Self::new(ApiErrorKind::Permission, details)
    }

    /// Gateway error.
    #[must_use]
    pub fn gateway(details: ErrorDetails) -> Self {
        Self::new(ApiErrorKind::Gateway, details)
    }

    /// Server error.
    #[must_use]
    pub fn server(details: ErrorDetails) -> Self {
        Self::new(ApiErrorKind::Server, details)
    }

    /// Fallback for codes that do not resolve to a known kind.
    ///
    /// The server description is dropped in favour of a fixed message.
    #[must_use]
    pub fn unknown(details: ErrorDetails) -> Self {
        Self {
            message: UNKNOWN_ERROR_MESSAGE.to_string(),
            ..Self::new(ApiErrorKind::Unknown, details)
        }
    }

    /// Unknown error for a malformed `error` object, where only the status is known.
    #[must_use]
    pub fn malformed(status: u16) -> Self {
        Self::unknown(ErrorDetails {
            code: String::new(),
            description: String::new(),
            status,
            field: None,
        })
    }

    /// Error kind.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Error code as sent by the server.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Offending input field, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for Razorpay client operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Error reported by the API.
    #[display("API error: {_0}")]
    #[from]
    Api(ApiError),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Response body that is neither an entity, an error, nor a pass-through payload.
    #[display("invalid response (HTTP {status}): {message}")]
    #[from(skip)]
    InvalidResponse {
        /// HTTP status code.
        status: u16,
        /// What was wrong with the body.
        message: String,
    },

    /// A typed helper received a different resource than it asked for.
    #[display("expected a `{expected}` entity, got `{found}`")]
    #[from(skip)]
    UnexpectedEntity {
        /// Entity the caller expected.
        expected: &'static str,
        /// Entity that was resolved.
        found: String,
    },

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "card.network").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_urlencoded::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(status: u16, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            status,
            message: message.into(),
        }
    }

    /// Create an unexpected entity error.
    #[must_use]
    pub fn unexpected_entity(expected: &'static str, found: impl Into<String>) -> Self {
        Self::UnexpectedEntity {
            expected,
            found: found.into(),
        }
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the API reported this error.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// The API error, if the API reported this error.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::InvalidResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

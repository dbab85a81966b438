//! HTTP method types.

use derive_more::Display;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - fetch a resource or a collection.
    #[display("GET")]
    Get,
    /// POST method - create a resource or trigger an action.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
}

/// Where a method sends its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPlacement {
    /// Encoded in the URL query string.
    Query,
    /// Encoded as a form body.
    Body,
    /// Not sent at all.
    None,
}

impl Method {
    /// Where parameters passed alongside this method end up on the wire.
    #[must_use]
    pub const fn param_placement(&self) -> ParamPlacement {
        match self {
            Self::Get => ParamPlacement::Query,
            Self::Post | Self::Put | Self::Patch => ParamPlacement::Body,
            Self::Delete => ParamPlacement::None,
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

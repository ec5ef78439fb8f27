//! Method and error definitions shared by the gateway.

use std::fmt;

use thiserror::Error;

use crate::http::response::ResponseSnapshot;

/// HTTP method of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    Get,
    /// Used when a descriptor does not name a method.
    #[default]
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Errors surfaced by gateway calls and the helpers built on them.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response arrived: DNS, TCP, TLS, timeout, unusable URL, or a broken body stream.
    #[error("{method} {url} failed without a response: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived with a status outside [200, 300).
    #[error("{method} {url} returned status {}", .response.status)]
    Status {
        method: Method,
        url: String,
        response: ResponseSnapshot,
    },

    /// A descriptor header is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A body was read as JSON but is not JSON.
    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A web service answered 2xx with an unexpected document shape.
    #[error("Unexpected response payload: {0}")]
    Payload(String),

    /// The session's HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Status code of the rejected response, if one arrived.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// The rejected response, if one arrived.
    pub fn response(&self) -> Option<&ResponseSnapshot> {
        match self {
            GatewayError::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Whether the call failed before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport { .. })
    }

    /// Whether the call failed because the client-side timeout fired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Transport { source, .. } if source.is_timeout())
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

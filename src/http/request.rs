//! Request descriptors.
//!
//! # Responsibilities
//! - Describe one outbound call (URL, method, body, headers, timeout)
//! - Convert descriptor headers into a validated `HeaderMap`
//!
//! # Design Decisions
//! - A descriptor is built fresh per call and moved into the gateway, so a
//!   template body can never leak between concurrent calls
//! - The URL is optional on purpose: the gateway logs and still attempts the call

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::http::types::{GatewayError, GatewayResult, Method};

/// Request body of an outbound call.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    Empty,
    /// Serialized as `application/json`.
    Json(Value),
    /// Serialized as `application/x-www-form-urlencoded`, in order.
    Form(Vec<(String, String)>),
    /// Sent verbatim (SMILES, molfiles, XML).
    Raw(String),
}

/// Everything needed to issue one call through the gateway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDescriptor {
    pub url: Option<String>,
    /// `None` means POST.
    pub method: Option<Method>,
    pub body: Payload,
    pub headers: BTreeMap<String, String>,
    /// Passed to the HTTP client untouched.
    pub timeout_ms: Option<u64>,
    /// Decode a successful body as JSON (falls back to raw bytes if it is not JSON).
    pub decode_json: bool,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Payload::Json(body);
        self
    }

    pub fn form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Payload::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn raw(mut self, body: impl Into<String>) -> Self {
        self.body = Payload::Raw(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn decode_json(mut self) -> Self {
        self.decode_json = true;
        self
    }

    /// The method this descriptor will be sent with.
    pub fn effective_method(&self) -> Method {
        self.method.unwrap_or_default()
    }

    /// Whether the caller set a header, ignoring case.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }
}

/// Convert descriptor headers into a `HeaderMap`, skipping empty names.
pub fn build_headers(input: &BTreeMap<String, String>) -> GatewayResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (key, value) in input {
        if key.is_empty() {
            continue;
        }

        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| GatewayError::InvalidHeader(format!("name `{}`: {}", key, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::InvalidHeader(format!("value for `{}`: {}", key, e)))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

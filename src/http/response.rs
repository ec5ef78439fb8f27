//! Response values handed back to callers.

use std::borrow::Cow;
use std::collections::BTreeMap;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::http::types::GatewayResult;

/// Body of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The exact bytes received.
    Raw(Bytes),
    /// Decoded JSON, when the descriptor asked for it and the body parsed.
    Json(Value),
}

impl ResponseBody {
    /// Decode `bytes` as JSON, keeping them raw if they are not JSON.
    pub(crate) fn decode_lenient(bytes: Bytes) -> Self {
        match serde_json::from_slice(&bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(e) => {
                tracing::debug!(error = %e, len = bytes.len(), "Body is not JSON, returning it raw");
                ResponseBody::Raw(bytes)
            }
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Raw(bytes) => Some(bytes),
            ResponseBody::Json(_) => None,
        }
    }

    /// The body as text (lossy for raw bytes, re-serialized for JSON).
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes),
            ResponseBody::Json(value) => Cow::Owned(value.to_string()),
        }
    }

    /// The body as JSON, parsing raw bytes if needed.
    pub fn into_json(self) -> GatewayResult<Value> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Raw(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }
}

/// A rejected response, kept for diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

impl ResponseSnapshot {
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Flatten a `HeaderMap` for logging; repeated headers are joined with ", ".
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        flat.entry(name.to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }

    flat
}

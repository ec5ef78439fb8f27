//! Request gateway: one outbound call, one normalized outcome.
//!
//! # Responsibilities
//! - Issue the call described by a `RequestDescriptor` through a `Session`
//! - Resolve 2xx bodies unchanged, reject everything else with diagnostics
//! - Time every call and flag the slow ones
//!
//! # Design Decisions
//! - No retries; callers own retry policy
//! - A missing URL is logged, then attempted anyway (it fails as a transport error)
//! - The slow-call warning is emitted once per call, whatever the outcome

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::http::request::{build_headers, Payload, RequestDescriptor};
use crate::http::response::{flatten_headers, ResponseBody, ResponseSnapshot};
use crate::http::session::Session;
use crate::http::types::{GatewayError, GatewayResult, Method};
use crate::observability::{metrics, SLOW_CALL_TARGET};

/// Entry point for every outbound call.
#[derive(Debug, Clone)]
pub struct Gateway {
    session: Session,
    slow_call_threshold: Duration,
}

impl Gateway {
    /// Create a gateway with its own fresh session.
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        Ok(Self::with_parts(
            Session::new(config)?,
            Duration::from_millis(config.slow_call_threshold_ms),
        ))
    }

    pub fn with_parts(session: Session, slow_call_threshold: Duration) -> Self {
        Self {
            session,
            slow_call_threshold,
        }
    }

    /// A gateway that sends through `session` instead, keeping the threshold.
    pub fn with_session(&self, session: Session) -> Self {
        Self::with_parts(session, self.slow_call_threshold)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn slow_call_threshold(&self) -> Duration {
        self.slow_call_threshold
    }

    /// Send `descriptor` as a GET.
    pub async fn get(&self, descriptor: RequestDescriptor) -> GatewayResult<ResponseBody> {
        self.request(descriptor.method(Method::Get)).await
    }

    /// Send `descriptor` as a POST.
    pub async fn post(&self, descriptor: RequestDescriptor) -> GatewayResult<ResponseBody> {
        self.request(descriptor.method(Method::Post)).await
    }

    /// Send `descriptor` with its own method (POST when unset).
    pub async fn request(&self, descriptor: RequestDescriptor) -> GatewayResult<ResponseBody> {
        let method = descriptor.effective_method();
        let url = match descriptor.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => {
                tracing::warn!(method = %method, descriptor = ?descriptor, "No URL specified");
                String::new()
            }
        };

        let span = tracing::debug_span!("gateway_call", call_id = %Uuid::new_v4(), method = %method);

        async move {
            tracing::debug!("{} {}", method, url);

            let start = Instant::now();
            let outcome = self.exchange(method, &url, &descriptor).await;
            let elapsed = start.elapsed();

            metrics::record_call(method.as_str(), outcome_label(&outcome), elapsed);

            if elapsed > self.slow_call_threshold {
                tracing::warn!(
                    target: SLOW_CALL_TARGET,
                    method = %method,
                    url = %url,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Slow request: {} {} ({} ms)",
                    method,
                    url,
                    elapsed.as_millis()
                );
                metrics::record_slow_call(method.as_str());
            }

            outcome.map(|(_, body)| body)
        }
        .instrument(span)
        .await
    }

    async fn exchange(
        &self,
        method: Method,
        url: &str,
        descriptor: &RequestDescriptor,
    ) -> GatewayResult<(u16, ResponseBody)> {
        let mut headers = build_headers(&descriptor.headers)?;
        if descriptor.decode_json && !descriptor.has_header(ACCEPT.as_str()) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }

        let mut builder = self
            .session
            .client_for(method)
            .request(method.into(), url)
            .headers(headers);

        if let Some(ms) = descriptor.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        builder = match &descriptor.body {
            Payload::Empty => builder,
            Payload::Json(value) => builder.json(value),
            Payload::Form(fields) => builder.form(fields),
            Payload::Raw(text) => builder.body(text.clone()),
        };

        let transport = |source: reqwest::Error| GatewayError::Transport {
            method,
            url: url.to_string(),
            source,
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = %method, url = %url, error = %e, "{} {} no response", method, url);
                return Err(transport(e));
            }
        };

        let status = response.status();
        let response_headers = flatten_headers(response.headers());
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, status = status.as_u16(), error = %e, "Failed to read response body");
            transport(e)
        })?;

        if !status.is_success() {
            let snapshot = ResponseSnapshot {
                status: status.as_u16(),
                headers: response_headers,
                body,
            };
            tracing::warn!(
                method = %method,
                url = %url,
                status = snapshot.status,
                request_headers = ?descriptor.headers,
                request_body = ?descriptor.body,
                response_headers = ?snapshot.headers,
                response_body = %snapshot.body_text(),
                "{} {}",
                snapshot.status,
                url
            );
            return Err(GatewayError::Status {
                method,
                url: url.to_string(),
                response: snapshot,
            });
        }

        let body = if descriptor.decode_json {
            ResponseBody::decode_lenient(body)
        } else {
            ResponseBody::Raw(body)
        };

        Ok((status.as_u16(), body))
    }
}

/// Metrics outcome label for a settled call.
fn outcome_label(outcome: &GatewayResult<(u16, ResponseBody)>) -> String {
    match outcome {
        Ok((status, _)) => status.to_string(),
        Err(e) => match e.status() {
            Some(status) => status.to_string(),
            None if e.is_transport() => "transport".to_string(),
            None => "invalid_request".to_string(),
        },
    }
}

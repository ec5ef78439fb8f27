//! Cookie-bearing HTTP sessions.
//!
//! # Responsibilities
//! - Own one `reqwest::Client` and the cookie jar it reads and writes
//! - Expose cookies the jar holds (e.g. a login security token)
//!
//! # Design Decisions
//! - Sessions are explicit values: create, reuse across calls, drop
//! - Clones share the client and jar; unrelated sessions never see each other's cookies
//! - Only GET follows redirects; any other method settles on the 3xx itself

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::config::ClientConfig;
use crate::http::request::build_headers;
use crate::http::types::{GatewayError, GatewayResult, Method};

/// HTTP client plus the cookie jar persisted across its calls.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    no_redirect: Client,
    jar: Arc<Jar>,
}

impl Session {
    /// Create a session with an empty cookie jar.
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: &ClientConfig) -> SessionBuilder {
        SessionBuilder {
            user_agent: config.user_agent.clone(),
            connect_timeout: config.connect_timeout_ms.map(Duration::from_millis),
            use_system_proxy: config.use_system_proxy,
            default_headers: BTreeMap::new(),
        }
    }

    /// Client that follows redirects (used for GET).
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Client to send `method` with. Both clients share the cookie jar.
    pub fn client_for(&self, method: Method) -> &Client {
        match method {
            Method::Get => &self.client,
            Method::Post => &self.no_redirect,
        }
    }

    /// Value of cookie `name` as the jar would send it to `url`.
    pub fn cookie(&self, url: &str, name: &str) -> Option<String> {
        let url = Url::parse(url).ok()?;
        let header = self.jar.cookies(&url)?;
        let header = header.to_str().ok()?;

        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }

    /// Seed the jar with a `Set-Cookie` style string scoped to `url`.
    pub fn add_cookie(&self, url: &str, cookie: &str) -> GatewayResult<()> {
        let url = Url::parse(url).map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.jar.add_cookie_str(cookie, &url);
        Ok(())
    }
}

/// Builder for sessions that need headers on every call.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    user_agent: String,
    connect_timeout: Option<Duration>,
    use_system_proxy: bool,
    default_headers: BTreeMap<String, String>,
}

impl SessionBuilder {
    /// Send `name: value` on every call through the built session.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> GatewayResult<Session> {
        let jar = Arc::new(Jar::default());

        let client = self.client(&jar, Policy::default())?;
        let no_redirect = self.client(&jar, Policy::none())?;

        Ok(Session {
            client,
            no_redirect,
            jar,
        })
    }

    fn client(&self, jar: &Arc<Jar>, redirect: Policy) -> GatewayResult<Client> {
        let mut builder = Client::builder()
            .cookie_provider(jar.clone())
            .redirect(redirect)
            .user_agent(self.user_agent.as_str())
            .default_headers(build_headers(&self.default_headers)?);

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }

        builder.build().map_err(GatewayError::Client)
    }
}

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::traits::TokenStore;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Base URL from the `BACKEND_URL` environment variable
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BACKEND_URL_VAR)
            .with_context(|| format!("{} is not set", BACKEND_URL_VAR))?;
        Ok(Self::new(base_url))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Authentication events signalled by the backend's status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientEvent {
    Forbidden,
    TokenExpired,
}

impl ClientEvent {
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::TokenExpired),
            403 => Some(Self::Forbidden),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "FORBIDDEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
        }
    }
}

/// Non-success HTTP status from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub url: String,
    pub status: u16,
    pub event: Option<ClientEvent>,
}

impl RequestError {
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
            event: ClientEvent::from_status(status),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} returned status {}", self.url, self.status)?;
        if let Some(event) = self.event {
            write!(f, " ({})", event.as_str())?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestError {}

/// HTTP client bound to one backend and one token store
///
/// Requests carry `Authorization: Bearer <access token>` whenever the store
/// has one. 401 and 403 responses come back as [`RequestError`] with the
/// matching [`ClientEvent`].
pub struct ApiClient<S: TokenStore> {
    config: ClientConfig,
    agent: ureq::Agent,
    tokens: S,
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(config: ClientConfig, tokens: S) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build();

        Self {
            config,
            agent: ureq::Agent::new_with_config(agent_config),
            tokens,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut S {
        &mut self.tokens
    }

    /// Join the base URL and `path` with exactly one `/`
    pub fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn authorization(&self) -> Option<String> {
        self.tokens
            .access_token()
            .map(|token| format!("Bearer {}", token))
    }

    pub fn get(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let mut request = self.agent.get(&url);
        if let Some(auth) = self.authorization() {
            request = request.header("Authorization", auth);
        }

        read_body(&url, request.call())
    }

    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get(path)?;
        serde_json::from_str(&body).with_context(|| format!("Invalid JSON from {}", self.url(path)))
    }

    pub fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = self.url(path);
        let json = serde_json::to_string(body).context("Failed to serialize request body")?;
        log::debug!("POST {} ({} bytes)", url, json.len());

        let mut request = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(auth) = self.authorization() {
            request = request.header("Authorization", auth);
        }

        read_body(&url, request.send(json))
    }
}

fn read_body(
    url: &str,
    result: std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<String> {
    match result {
        Ok(mut response) => response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read response from {}", url)),
        Err(ureq::Error::StatusCode(status)) => {
            let error = RequestError::new(url, status);
            if let Some(event) = error.event {
                log::warn!("{}: {}", event.as_str(), url);
            }
            Err(error.into())
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("Request to {} failed", url))),
    }
}

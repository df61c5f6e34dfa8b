//! HTTP Transport
//!
//! The client talks to the network through the [`Transport`] trait so that
//! request construction can be tested without a server. [`HttpTransport`]
//! is the production implementation on top of `reqwest::blocking`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::types::{FinnaError, FinnaResult};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> FinnaResult<Value> {
        serde_json::from_str(&self.body).map_err(|e| FinnaError::Decode(e.to_string()))
    }
}

pub trait Transport: Send + Sync {
    /// Perform a GET with the given query pairs, in order.
    fn get(&self, url: &str, query: &[(String, String)]) -> FinnaResult<HttpResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> FinnaResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS), default_user_agent())
    }

    pub fn with_timeout(timeout: Duration, user_agent: impl Into<String>) -> FinnaResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.into())
            .build()
            .map_err(|e| FinnaError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> FinnaResult<HttpResponse> {
        debug!(url = %url, params = query.len(), "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| FinnaError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FinnaError::Transport(format!("failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

pub fn default_user_agent() -> String {
    format!("finna-client/{}", env!("CARGO_PKG_VERSION"))
}

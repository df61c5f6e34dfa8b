//! Finna Client
//!
//! Thin synchronous wrapper around the Finna.fi REST API:
//! - `GET {base}record?id=...`   single record lookup
//! - `GET {base}record?id[]=...` batch lookup, unmatched ids are dropped
//! - `GET {base}search?...`      search with filters, facets, sort and paging
//!
//! Every call performs exactly one round trip. Nothing is cached or retried.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use super::payload::Payload;
use super::request::{RecordOptions, SearchRequest};
use super::transport::{HttpResponse, HttpTransport, Transport};
use crate::config::Config;
use crate::types::{FinnaError, FinnaResult};

/// Default API base URL.
pub const API_BASE: &str = "https://api.finna.fi/api/v1/";
/// Prefix for the relative image paths found in records.
pub const IMAGE_BASE: &str = "https://api.finna.fi";

#[derive(Clone)]
pub struct FinnaClient {
    api_base: String,
    transport: Arc<dyn Transport>,
}

impl FinnaClient {
    /// Create a client against the public Finna API.
    pub fn new() -> FinnaResult<Self> {
        Self::with_base(API_BASE)
    }

    /// Create a client against another base URL. The URL is stored as given;
    /// endpoint names are appended to it directly.
    pub fn with_base(api_base: impl Into<String>) -> FinnaResult<Self> {
        Ok(Self::with_transport(api_base, HttpTransport::new()?))
    }

    pub fn with_transport(api_base: impl Into<String>, transport: impl Transport + 'static) -> Self {
        Self {
            api_base: api_base.into(),
            transport: Arc::new(transport),
        }
    }

    pub fn from_config(config: &Config) -> FinnaResult<Self> {
        let transport = HttpTransport::with_timeout(
            Duration::from_secs(config.timeout_secs),
            config.user_agent.clone(),
        )?;
        Ok(Self::with_transport(config.api_base.clone(), transport))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Retrieve a single record by its ID.
    ///
    /// The API answers an unknown id with HTTP 400 and a `statusMessage`;
    /// that surfaces as [`FinnaError::RecordNotFound`].
    pub fn get_record(&self, record_id: &str, options: &RecordOptions) -> FinnaResult<Value> {
        let mut payload = Payload::new();
        payload.set("id", record_id);
        options.apply(&mut payload);

        let response = self.get("record", &payload)?;
        if response.status == 400 {
            return Err(record_not_found(&response, record_id));
        }
        let body = self.check_status(response, "record")?;

        let mut records = match body {
            Value::Object(mut map) => match map.remove("records") {
                Some(Value::Array(records)) => records,
                _ => return Err(FinnaError::Decode("response has no records array".to_string())),
            },
            _ => return Err(FinnaError::Decode("response is not a JSON object".to_string())),
        };

        if records.is_empty() {
            return Err(FinnaError::EmptyRecords {
                record_id: record_id.to_string(),
            });
        }

        info!(record_id = %record_id, "Record retrieved");
        Ok(records.swap_remove(0))
    }

    /// Retrieve multiple records by their IDs. IDs which don't match any
    /// record are left out of the result.
    pub fn get_records<S: AsRef<str>>(
        &self,
        record_ids: &[S],
        options: &RecordOptions,
    ) -> FinnaResult<Vec<Value>> {
        let ids: Vec<String> = record_ids.iter().map(|id| id.as_ref().to_string()).collect();
        let requested = ids.len();

        let mut payload = Payload::new();
        payload.set("id[]", ids);
        options.apply(&mut payload);

        let response = self.get("record", &payload)?;
        let body = self.check_status(response, "record")?;

        let records = match body {
            Value::Object(mut map) => match map.remove("records") {
                Some(Value::Array(records)) => records,
                None => Vec::new(),
                Some(_) => return Err(FinnaError::Decode("records is not an array".to_string())),
            },
            _ => return Err(FinnaError::Decode("response is not a JSON object".to_string())),
        };

        info!(requested, found = records.len(), "Records retrieved");
        Ok(records)
    }

    /// Perform a search and return the decoded response body unmodified.
    pub fn search(&self, request: &SearchRequest) -> FinnaResult<Value> {
        let payload = request.to_payload();

        let response = self.get("search", &payload)?;
        let body = self.check_status(response, "search")?;

        info!(
            lookfor = %request.lookfor,
            result_count = ?result_count(&body),
            "Search completed"
        );
        Ok(body)
    }

    fn get(&self, endpoint: &str, payload: &Payload) -> FinnaResult<HttpResponse> {
        let url = self.url(endpoint);
        debug!(url = %url, "Sending Finna API request");
        self.transport.get(&url, &payload.to_query_pairs())
    }

    fn check_status(&self, response: HttpResponse, endpoint: &str) -> FinnaResult<Value> {
        if !response.is_success() {
            return Err(FinnaError::Http {
                status: response.status,
                url: self.url(endpoint),
            });
        }
        response.json()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }
}

impl fmt::Display for FinnaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FinnaClient(api_base='{}')", self.api_base)
    }
}

impl fmt::Debug for FinnaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinnaClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

fn record_not_found(response: &HttpResponse, record_id: &str) -> FinnaError {
    let message = response.json().ok().and_then(|body| {
        body.get("statusMessage")
            .and_then(|v| v.as_str())
            .map(String::from)
    });

    match message {
        Some(message) => FinnaError::RecordNotFound {
            message,
            record_id: record_id.to_string(),
        },
        None => FinnaError::Decode(format!(
            "HTTP 400 without statusMessage for record_id '{}'",
            record_id
        )),
    }
}

/// The `resultCount` of a search response.
pub fn result_count(body: &Value) -> Option<u64> {
    body.get("resultCount").and_then(|v| v.as_u64())
}

/// The `records` of a response, empty when absent.
pub fn records(body: &Value) -> &[Value] {
    body.get("records")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Absolute URL for an image path taken from a record's `images` field.
pub fn image_url(path: &str) -> String {
    format!("{}{}", IMAGE_BASE, path)
}

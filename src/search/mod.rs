//! Search Module
//!
//! Client for the Finna.fi REST API:
//! - Record lookup, single or batch
//! - Search with filters, facets, sorting and paging
//!
//! Requests go through the [`Transport`] seam, `reqwest::blocking` by default.

pub mod client;
pub mod payload;
pub mod request;
pub mod transport;

pub use client::{image_url, records, result_count, FinnaClient, API_BASE, IMAGE_BASE};
pub use payload::{ExtraParams, ParamValue, Payload};
pub use request::{RecordOptions, SearchRequest};
pub use transport::{HttpResponse, HttpTransport, Transport};

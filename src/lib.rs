// Finna Client - client library for the Finna.fi REST API

pub mod config;
pub mod search;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use search::{
    image_url, ExtraParams, FinnaClient, ParamValue, RecordOptions, SearchRequest, API_BASE,
    IMAGE_BASE,
};
pub use types::{FinnaError, FinnaResult, Language, SearchType, SortMethod};

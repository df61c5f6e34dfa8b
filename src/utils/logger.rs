// Logger initialization

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Library and binary targets both log at info unless `RUST_LOG` says otherwise.
pub const DEFAULT_FILTER: &str = "finna_client=info,finna=info";

/// Install the global tracing subscriber. Output goes to stderr so that
/// stdout carries only results.
pub fn init_logger() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_library_and_binary() {
        let filter = EnvFilter::new(DEFAULT_FILTER).to_string();
        assert!(filter.contains("finna_client=info"));
        assert!(filter.contains("finna=info"));
    }
}

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "larder=info";

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

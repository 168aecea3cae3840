use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Level used with `--verbose` when `RUST_LOG` is unset
pub const VERBOSE_LOG_LEVEL: &str = "debug";

/// Install the global tracing subscriber. Logs go to stderr so that stdout only
/// carries progress lines and help text.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { VERBOSE_LOG_LEVEL } else { DEFAULT_LOG_LEVEL };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}

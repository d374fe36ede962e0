//! Logging setup for Canopy binaries.
//!
//! Library crates only emit `tracing` events; this crate installs the
//! subscriber that prints them. Console output is human readable. Debug
//! builds can also write JSON lines to `canopy.log`.

use std::path::Path;

use canopy_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info,canopy_template=info,canopy_decorator=info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE: &str = "canopy.log";

/// Picks the filter directive: the configured level if set, else [`DEFAULT_FILTER`].
fn filter_directive(config: Option<&Config>) -> &str {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => &config.debug.log_level,
        _ => DEFAULT_FILTER,
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.debug.log_level`. When
/// `debug_build` is set and `log_dir` is writable, events are also written as
/// JSON to `log_dir/canopy.log`. Panics if a global subscriber is already set.
///
/// ```no_run
/// use canopy_config::Config;
///
/// let config = Config::default();
/// canopy_log::init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::debug!(dir = %log_dir.display(), "file logging enabled");
        return;
    }

    subscriber.init();
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

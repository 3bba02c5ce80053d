//! Subscriber setup shared by `nukepy` and `nukecli`.

use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use crate::cfg::ENV_LOG;

/// Filter used when `NUKEPY_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global fmt subscriber.
///
/// Logs go to stderr; stdout belongs to the child or to printed scripts.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! Tracing setup for the binary. Library code only emits events.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CORPUS_BALANCE_LOG";

/// Install a stderr `fmt` subscriber.
///
/// `CORPUS_BALANCE_LOG` wins over `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

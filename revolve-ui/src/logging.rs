//! Tracing setup for hosts.

const DEFAULT_FILTER: &str = "error,revolve_ui=info,revolve_components=info";

/// Installs a formatted `tracing` subscriber.
///
/// The filter is read from `RUST_LOG` and falls back to
/// `error,revolve_ui=info,revolve_components=info`. Calling this more than
/// once, or after another subscriber was installed, does nothing.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

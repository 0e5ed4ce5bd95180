use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr.
///
/// The filter comes from `RUST_LOG` when set, otherwise `ipol_scan={level}`.
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(level: &str) {
    let default_filter = format!("ipol_scan={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!("logging initialized (default_filter={default_filter})");
    }
}

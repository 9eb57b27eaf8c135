//! Tracing setup. Logs go to stderr; stdout is reserved for response lines.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins unless `debug` is set.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Stdout carries the identifier list, so diagnostics never go there.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

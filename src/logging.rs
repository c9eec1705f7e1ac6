use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize tracing/logging.
///
/// Logs go to stderr so stdout carries only the rendered result. The level
/// defaults to `info` and can be overridden through `RUST_LOG`. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}

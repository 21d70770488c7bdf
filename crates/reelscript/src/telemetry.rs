//! Log subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a console subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG`, logs `warn` and above, or `info,reelscript=debug` when
/// `verbose` is set. Logs go to stderr so stdout stays clean for scripts.
pub fn init_console_telemetry(verbose: bool) {
    let default_filter = if verbose {
        "info,reelscript=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

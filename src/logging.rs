//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Console logging on stderr, `info` unless `RUST_LOG` says otherwise.
/// Stdout is left to tables and the terminal chart.
pub fn init_cli_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

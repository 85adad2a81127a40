//! Log output on stderr, driven by `-v` or `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// `-v` flags override `RUST_LOG`; without them only warnings are shown.
pub fn filter(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

pub fn init(verbosity: u8) {
    // Fails only when a global subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Logging setup shared by the studio binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at the default `warn` level
///
/// The CLI prints its own results to stdout, so routine ledger events stay
/// quiet unless `RUST_LOG` asks for them.
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// `RUST_LOG` still takes precedence when set. Output goes to stderr so it
/// never mixes with rendered command output.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

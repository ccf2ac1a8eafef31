//! Tracing subscriber setup for the binary

use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level
///
/// `quiet` wins over any verbosity and keeps only warnings and errors.
pub const fn filter_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install a formatted subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over the CLI verbosity. Calling this more
/// than once keeps the first subscriber.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

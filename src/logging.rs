use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count. `RUST_LOG` overrides it.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "connscan=info",
        2 => "connscan=debug",
        _ => "connscan=trace",
    }
}

/// Install the global subscriber, logging to stderr.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

//! Tracing setup for sorcererctl. Logs go to stderr so `--json` output
//! on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Default filter: warnings only, `-v` for debug. RUST_LOG wins over both.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "sorcerer_common=debug,sorcererctl=debug"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

//! Diagnostic logging setup.
//!
//! All output goes to stderr so stdout stays reserved for generated code.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "DOMSCRIBE_LOG";

/// Filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "domscribe=warn",
        1 => "domscribe=info",
        _ => "domscribe=debug",
    }
}

/// Build the filter: `DOMSCRIBE_LOG` when set and valid, else from verbosity.
pub fn filter(verbosity: u8) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbosity)))
}

/// Install the stderr subscriber. Calling it twice is harmless.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

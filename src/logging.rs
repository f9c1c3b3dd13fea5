//! Diagnostic logging setup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `MONLOX_LOG=monlox=trace`.
pub const LOG_ENV: &str = "MONLOX_LOG";

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. `filter` (from `--log`) wins over
/// `MONLOX_LOG`, which wins over `RUST_LOG`; with none of them set nothing
/// is installed. Logs go to stderr so they never interleave with `puts`.
pub fn init_tracing(filter: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = filter
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok());

        if let Some(directives) = directives {
            let filter = EnvFilter::new(directives);
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

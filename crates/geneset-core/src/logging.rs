//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GENESET_LOG";

/// Filter used when `GENESET_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "geneset_core=info,geneset=info";

/// Filter used by `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "geneset_core=debug,geneset=debug";

/// Initialize logging from `GENESET_LOG`.
///
/// Format: `GENESET_LOG=geneset_core::catalog=debug,geneset_core::prune=warn`
///
/// Idempotent. Logs go to stderr so they never interleave with command output.
pub fn init_tracing() {
    init_with(|| EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)));
}

/// Initialize logging with an explicit filter directive, ignoring `GENESET_LOG`.
pub fn init_tracing_with_filter(directive: &str) {
    init_with(|| EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)));
}

fn init_with(filter: impl FnOnce() -> EnvFilter) {
    INIT.call_once(|| {
        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter())
            .try_init();
    });
}

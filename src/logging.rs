//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing` and are silent by default.
//! Set `AREA_STATUS_LOG` (or `RUST_LOG`) to e.g. `area_status=debug` to see
//! every git invocation and filesystem walk.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "AREA_STATUS_LOG";

/// Installs the global subscriber. Later calls are no-ops.
pub fn init() {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("error"));
        // A subscriber may already be set by an embedding program.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    });
}

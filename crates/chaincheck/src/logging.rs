//! Diagnostic logging for the framework itself.
//!
//! Kept separate from the test report: nothing is installed unless
//! `CHAINCHECK_LOG` or `RUST_LOG` is set, so the report stream stays clean.

use std::sync::Once;

/// Environment variable holding the log filter, e.g. `chaincheck=debug`.
pub const LOG_ENV: &str = "CHAINCHECK_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once per process.
///
/// Reads the filter from `CHAINCHECK_LOG`, falling back to `RUST_LOG`, and
/// prints spans as an indented tree on stderr. Does nothing if a global
/// subscriber is already installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = if std::env::var_os(LOG_ENV).is_some() {
            EnvFilter::from_env(LOG_ENV)
        } else if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let layer = tracing_tree::HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_indent_lines(true);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init();
    });
}

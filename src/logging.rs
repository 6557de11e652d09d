//! Tracing setup for the spendscope binary
//!
//! The library only emits events; installing a subscriber is left to the
//! host. The binary calls [`init_tracing`] once at startup.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter directive when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = "spendscope=info";

/// Initializes the global tracing subscriber.
///
/// Events are written to stderr so that JSON/YAML/CSV output on stdout
/// stays clean. Repeated calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A subscriber may already be installed by an embedding host
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

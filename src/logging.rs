use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,parcel_cost_calculator=debug";

fn make_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Call once at startup.
///
/// - Level: `RUST_LOG`, falling back to info (debug for this crate).
/// - Colored output only when stderr is a terminal.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging() -> bool {
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false);

    tracing_subscriber::registry()
        .with(make_filter())
        .with(stderr_layer)
        .try_init()
        .is_ok()
}

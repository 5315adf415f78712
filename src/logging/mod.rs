//! Tracing setup for embedding hosts and tests
//!
//! The engine only emits `tracing` events; installing a subscriber is the
//! host's choice. This helper wires up the default fmt subscriber with an
//! env-filter (`RUST_LOG`) for hosts that have no subscriber of their own.

use tracing_subscriber::EnvFilter;

/// Install the default fmt subscriber. Safe to call more than once; later
/// calls are no-ops when a global subscriber is already set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

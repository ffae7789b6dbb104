//! Log output setup
//!
//! Native builds print `tracing` events to stderr, filtered by `SIMWALL_LOG`
//! (same syntax as `RUST_LOG`, default `info`). On WASM no subscriber is
//! installed and events are discarded.

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "SIMWALL_LOG";

#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init() {}

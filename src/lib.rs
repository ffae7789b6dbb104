//! simwall: a wall-layout editor
//!
//! Draw rectangular floor plans on a grid of pillars: every section between
//! two pillars cycles through None, Wall, Door and Window. Layouts are saved,
//! listed, loaded and deleted through a small JSON HTTP API.
//!
//! Runs natively or in the browser (`wasm32-unknown-unknown`) on macroquad.
//! Native builds also ship `simwall-server`, a local backend for the API.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod config;
pub mod editor;
pub mod logging;
pub mod storage;
pub mod ui;
pub mod world;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;

//! Editor configuration
//!
//! Settings come from, in increasing priority:
//! 1. Built-in defaults
//! 2. `<config dir>/simwall/config.ron` (native only)
//! 3. `SIMWALL_API_URL` environment variable (native only)
//!
//! Startup parameters (which layout to open) come from the page query string
//! on WASM and from the command line on native.

use serde::{Deserialize, Serialize};
use std::path::Path;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
use thiserror::Error;

use crate::world::{validate_dimensions, LayoutError, PILLAR_SIZE, SECTION_LENGTH};

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "SIMWALL_API_URL";

/// Local dev backend (see `simwall-server`)
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/";

/// Same origin as the page
#[cfg(target_arch = "wasm32")]
pub const DEFAULT_API_URL: &str = "/api/";

/// Grid size shown on startup
pub const INITIAL_WIDTH: usize = 5;
pub const INITIAL_HEIGHT: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid initial grid: {0}")]
    Grid(#[from] LayoutError),

    #[error("pillar_size and section_length must be positive")]
    InvalidSizes,
}

/// Editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Base URL of the layout API, e.g. `http://host/api/`
    pub api_base_url: String,
    pub initial_width: usize,
    pub initial_height: usize,
    /// Pillar edge length in pixels
    pub pillar_size: u32,
    /// Section length in pixels
    pub section_length: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            initial_width: INITIAL_WIDTH,
            initial_height: INITIAL_HEIGHT,
            pillar_size: PILLAR_SIZE,
            section_length: SECTION_LENGTH,
        }
    }
}

impl EditorConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.initial_width, self.initial_height)?;
        if self.pillar_size == 0 || self.section_length == 0 {
            return Err(ConfigError::InvalidSizes);
        }
        Ok(())
    }

    /// Replace the API URL if an override is given (empty values are ignored)
    pub fn with_api_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    /// Platform config file location
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("simwall").join("config.ron"))
    }

    /// Load settings for this run. A broken config file is reported and
    /// replaced by defaults rather than preventing startup.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let from_file = match Self::default_path() {
            Some(path) if path.exists() => match Self::load_file(&path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                    Self::default()
                }
            },
            _ => Self::default(),
        };
        from_file.with_api_override(std::env::var(API_URL_ENV).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Parameters given when the editor starts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupParams {
    /// Layout to load right away
    pub layout_name: Option<String>,
}

impl StartupParams {
    /// Parse a query string such as `?name=ground%20floor`
    pub fn from_query(query: &str) -> Self {
        let layout_name = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "name")
            .and_then(|(_, value)| decode_component(value));
        Self { layout_name }
    }

    /// Parse command-line arguments: `--name <layout>`, `--name=<layout>`,
    /// `name=<layout>` or a full `?name=<layout>` query
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--name" {
                let layout_name = args.next().filter(|n| !n.is_empty());
                return Self { layout_name };
            }
            if let Some(value) = arg.strip_prefix("--name=") {
                return Self {
                    layout_name: Some(value.to_string()).filter(|n| !n.is_empty()),
                };
            }
            if arg.starts_with('?') || arg.starts_with("name=") {
                let params = Self::from_query(&arg);
                if params.layout_name.is_some() {
                    return params;
                }
            }
        }
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn detect() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        extern "C" {
            fn simwall_query_len() -> usize;
            fn simwall_copy_query(dest_ptr: *mut u8, max_len: usize) -> usize;
        }

        let len = unsafe { simwall_query_len() };
        if len == 0 {
            return Self::default();
        }
        let mut buf = vec![0u8; len];
        let copied = unsafe { simwall_copy_query(buf.as_mut_ptr(), len) };
        buf.truncate(copied);
        Self::from_query(&String::from_utf8_lossy(&buf))
    }
}

/// Percent-decode one query component (`+` is a space)
fn decode_component(value: &str) -> Option<String> {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced)
        .ok()
        .map(|v| v.into_owned())
        .filter(|v| !v.is_empty())
}

//! Layout records
//!
//! A layout is a named grid size plus the panels that are not `None`.
//! Shapes here match the layout API on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{deserialize_panels, Panel, SavedPanel};

/// Largest accepted grid dimension (cells per axis)
pub const MAX_DIMENSION: usize = 64;

/// Name that collides with the `/layouts/names` route
pub const RESERVED_NAME: &str = "names";

/// Data model errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unknown panel type: {0}")]
    UnknownState(String),

    #[error("unknown panel color: #{0:06x}")]
    UnknownColor(u32),

    #[error("panel ({x}, {y}) lies outside a {width}x{height} grid")]
    PanelOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("border placeholder ({x}, {y}, horizontal: {horizontal}) cannot hold a wall")]
    PlaceholderPanel { x: usize, y: usize, horizontal: bool },

    #[error("invalid grid size {width}x{height} (allowed 1..={})", MAX_DIMENSION)]
    InvalidDimensions { width: usize, height: usize },

    #[error("layout name cannot be empty")]
    EmptyName,

    #[error("'{0}' is a reserved layout name")]
    ReservedName(String),

    #[error("malformed panel list: {0}")]
    MalformedPanels(String),
}

pub fn validate_dimensions(width: usize, height: usize) -> Result<(), LayoutError> {
    let ok = |d: usize| (1..=MAX_DIMENSION).contains(&d);
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimensions { width, height })
    }
}

pub fn validate_name(name: &str) -> Result<(), LayoutError> {
    if name.trim().is_empty() {
        return Err(LayoutError::EmptyName);
    }
    if name == RESERVED_NAME {
        return Err(LayoutError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// A stored layout as returned by `GET /layouts/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Some backends name this field `layout`
    #[serde(default, alias = "layout")]
    pub panels: Vec<SavedPanel>,
}

impl Layout {
    /// Check dimensions and that every panel fits the grid
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.grid_panels().map(|_| ())
    }

    /// Expand into the full `2 * width * height` panel list
    pub fn grid_panels(&self) -> Result<Vec<Panel>, LayoutError> {
        validate_dimensions(self.width, self.height)?;
        deserialize_panels(self.width, self.height, &self.panels)
    }
}

/// Body of `POST /layouts`.
///
/// `panels` travels as a JSON-encoded string of the panel array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub panels: String,
}

impl LayoutRequest {
    pub fn new(
        name: &str,
        width: usize,
        height: usize,
        panels: &[SavedPanel],
    ) -> Result<Self, LayoutError> {
        validate_name(name)?;
        validate_dimensions(width, height)?;
        let encoded = serde_json::to_string_pretty(panels)
            .map_err(|e| LayoutError::MalformedPanels(e.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            width,
            height,
            panels: encoded,
        })
    }

    pub fn decode_panels(&self) -> Result<Vec<SavedPanel>, LayoutError> {
        serde_json::from_str(&self.panels).map_err(|e| LayoutError::MalformedPanels(e.to_string()))
    }

    /// Decode into the stored form, validating the panel list against the grid
    pub fn into_layout(self) -> Result<Layout, LayoutError> {
        validate_name(&self.name)?;
        let panels = self.decode_panels()?;
        let layout = Layout {
            name: self.name,
            width: self.width,
            height: self.height,
            panels,
        };
        layout.validate()?;
        Ok(layout)
    }
}

/// Response of `GET /layouts/names`.
///
/// The documented shape is `{"names": [...]}`; a bare array is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NamesResponse {
    Wrapped { names: Vec<String> },
    Bare(Vec<String>),
}

impl NamesResponse {
    /// Names in ascending order (duplicates are kept)
    pub fn into_sorted(self) -> Vec<String> {
        let mut names = match self {
            NamesResponse::Wrapped { names } => names,
            NamesResponse::Bare(names) => names,
        };
        names.sort();
        names
    }
}

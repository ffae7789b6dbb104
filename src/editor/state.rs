//! Editor state and data

use crate::config::EditorConfig;
use crate::ui::TextInputState;
use crate::world::{
    empty_panels, is_interior, serialize_panels, validate_dimensions, GridGeometry, Layout,
    LayoutError, LayoutRequest, Panel, PanelState, SavedPanel,
};

/// Digits accepted by the width/height fields
const DIMENSION_DIGITS: usize = 2;

/// The grid being edited: geometry plus the full `2 * width * height` panel list.
///
/// A session is never resized. Changing dimensions or loading a layout
/// replaces it with a new one carrying the next generation number, so clicks
/// resolved against an older session can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSession {
    geometry: GridGeometry,
    panels: Vec<Panel>,
    generation: u64,
}

impl GridSession {
    /// Fresh grid with every panel `None`
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            panels: empty_panels(geometry.width, geometry.height),
            geometry,
            generation: 0,
        }
    }

    /// Grid for a stored layout; fails without side effects on bad data
    pub fn from_layout(
        layout: &Layout,
        pillar_size: u32,
        section_length: u32,
    ) -> Result<Self, LayoutError> {
        let panels = layout.grid_panels()?;
        Ok(Self {
            geometry: GridGeometry::new(layout.width, layout.height, pillar_size, section_length),
            panels,
            generation: 0,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn width(&self) -> usize {
        self.geometry.width
    }

    pub fn height(&self) -> usize {
        self.geometry.height
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    /// Cycle the panel at `index`, returning its new state.
    /// Placeholders and unknown indices are ignored.
    pub fn click(&mut self, index: usize) -> Option<PanelState> {
        let (width, height) = (self.geometry.width, self.geometry.height);
        let panel = self.panels.get_mut(index)?;
        if !is_interior(width, height, panel.x, panel.y, panel.horizontal) {
            return None;
        }
        panel.state = panel.state.cycle();
        Some(panel.state)
    }

    /// Non-`None` panels in grid order
    pub fn serialize(&self) -> Vec<SavedPanel> {
        serialize_panels(&self.panels)
    }

    pub fn to_request(&self, name: &str) -> Result<LayoutRequest, LayoutError> {
        LayoutRequest::new(name, self.width(), self.height(), &self.serialize())
    }
}

/// Main editor state
pub struct EditorState {
    pub grid: GridSession,
    pub pillar_size: u32,
    pub section_length: u32,

    // Controls
    pub width_input: TextInputState,
    pub height_input: TextInputState,
    pub save_name: TextInputState,

    /// Stored layout names, ascending
    pub layout_names: Vec<String>,
    pub selected_layout: Option<usize>,
    /// First visible row of the layouts list
    pub list_scroll: usize,
}

impl EditorState {
    pub fn new(width: usize, height: usize, pillar_size: u32, section_length: u32) -> Self {
        Self {
            grid: GridSession::new(GridGeometry::new(width, height, pillar_size, section_length)),
            pillar_size,
            section_length,
            width_input: TextInputState::digits(width, DIMENSION_DIGITS),
            height_input: TextInputState::digits(height, DIMENSION_DIGITS),
            save_name: TextInputState::new(""),
            layout_names: Vec::new(),
            selected_layout: None,
            list_scroll: 0,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.initial_width,
            config.initial_height,
            config.pillar_size,
            config.section_length,
        )
    }

    /// Start over with an empty `width × height` grid
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<(), LayoutError> {
        validate_dimensions(width, height)?;
        self.replace_grid(GridSession::new(GridGeometry::new(
            width,
            height,
            self.pillar_size,
            self.section_length,
        )));
        self.sync_dimension_inputs();
        self.save_name.clear();
        Ok(())
    }

    /// Rebuild the grid from the width/height fields.
    ///
    /// Returns `Ok(true)` if the grid was rebuilt, `Ok(false)` if the size did
    /// not change. Invalid input is reverted to the current size.
    pub fn apply_dimension_inputs(&mut self) -> Result<bool, LayoutError> {
        let width = self.width_input.value().unwrap_or(0);
        let height = self.height_input.value().unwrap_or(0);

        if let Err(e) = validate_dimensions(width, height) {
            self.sync_dimension_inputs();
            return Err(e);
        }
        if (width, height) == (self.grid.width(), self.grid.height()) {
            return Ok(false);
        }
        self.initialize(width, height)?;
        Ok(true)
    }

    /// Replace the grid with a stored layout. On error nothing changes.
    pub fn load_layout(&mut self, layout: &Layout) -> Result<(), LayoutError> {
        let grid = GridSession::from_layout(layout, self.pillar_size, self.section_length)?;
        self.replace_grid(grid);
        self.sync_dimension_inputs();
        self.save_name.set_text(&layout.name);
        if let Some(index) = self.layout_names.iter().position(|n| *n == layout.name) {
            self.selected_layout = Some(index);
        }
        Ok(())
    }

    pub fn click_panel(&mut self, index: usize) -> Option<PanelState> {
        self.grid.click(index)
    }

    /// Click resolved against grid `generation`; ignored once that grid is gone
    pub fn click_panel_in(&mut self, generation: u64, index: usize) -> Option<PanelState> {
        if generation != self.grid.generation {
            return None;
        }
        self.grid.click(index)
    }

    /// Create request for the current grid under the save-name field
    pub fn save_request(&self) -> Result<LayoutRequest, LayoutError> {
        self.grid.to_request(self.save_name.text.trim())
    }

    /// Replace the layouts list, keeping the selected name if it survived
    pub fn set_layout_names(&mut self, mut names: Vec<String>) {
        names.sort();
        let previous = self.selected_name().map(str::to_string);
        self.selected_layout = previous.and_then(|p| names.iter().position(|n| *n == p));
        self.layout_names = names;
        self.list_scroll = self.list_scroll.min(self.layout_names.len().saturating_sub(1));
    }

    pub fn select_layout(&mut self, index: usize) {
        if index < self.layout_names.len() {
            self.selected_layout = Some(index);
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected_layout
            .and_then(|i| self.layout_names.get(i))
            .map(String::as_str)
    }

    fn replace_grid(&mut self, mut grid: GridSession) {
        grid.generation = self.grid.generation.wrapping_add(1);
        self.grid = grid;
    }

    fn sync_dimension_inputs(&mut self) {
        self.width_input.set_text(&self.grid.width().to_string());
        self.height_input.set_text(&self.grid.height().to_string());
    }
}

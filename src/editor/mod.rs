//! Layout Editor
//!
//! Layout:
//! - Side panel (grid size, save name, stored layouts)
//! - Grid canvas (click a section to cycle None → Wall → Door → Window)
//! - Status bar

mod grid_view;
mod layout;
mod state;

pub use grid_view::{panel_at, CanvasPlacement};
pub use layout::*;
pub use state::*;

//! Immediate-mode UI for the layout editor
//!
//! Design principles:
//! - Immediate mode (widgets are redrawn and re-evaluated each frame)
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering

mod input;
mod rect;
mod text_input;
mod theme;
mod widgets;

pub use input::*;
pub use rect::*;
pub use text_input::*;
pub use theme::*;
pub use widgets::*;

//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the editor panels.

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Header/toolbar background
pub const HEADER_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

/// Side panel background
pub const PANEL_BG: Color = Color::new(0.13, 0.13, 0.15, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Accent color (cyan)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Error text in the status bar
pub const ERROR_COLOR: Color = Color::new(0.95, 0.4, 0.35, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 14.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 12.0;

// =============================================================================
// Buttons and lists
// =============================================================================

/// Button background
pub const BUTTON_BG: Color = Color::new(0.196, 0.196, 0.216, 1.0); // ~50, 50, 55

/// Button hover background
pub const BUTTON_HOVER: Color = Color::new(0.235, 0.235, 0.275, 1.0); // ~60, 60, 70

/// Even row background
pub const ROW_EVEN: Color = Color::new(0.13, 0.13, 0.15, 1.0);

/// Odd row background
pub const ROW_ODD: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Highlighted/selected row
pub const ROW_HIGHLIGHT: Color = Color::new(0.2, 0.25, 0.3, 1.0);

/// Convert a 0xRRGGBB value into an opaque macroquad color
pub fn rgb(hex: u32) -> Color {
    Color::from_rgba(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
        255,
    )
}

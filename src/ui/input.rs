//! Input state for UI interaction

use macroquad::prelude::*;

use super::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
    pub scroll: f32,        // Scroll wheel delta
}

impl MouseState {
    /// Sample macroquad's mouse for this frame
    pub fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            // Event-based press detection won't miss fast clicks
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            scroll: mouse_wheel().1,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
pub struct UiContext {
    pub mouse: MouseState,
    /// ID of the widget that is "hot" (mouse hovering)
    pub hot: Option<u64>,
    /// Counter for generating unique IDs
    id_counter: u64,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            hot: None,
            id_counter: 0,
        }
    }

    /// Generate a unique ID for a widget
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.hot = None;
        self.id_counter = 0;
    }

    /// Set hot widget (hovering)
    pub fn set_hot(&mut self, id: u64) {
        self.hot = Some(id);
    }

    /// Check if widget is hot
    pub fn is_hot(&self, id: u64) -> bool {
        self.hot == Some(id)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_requires_press_inside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mouse = MouseState { x: 5.0, y: 5.0, left_pressed: true, ..Default::default() };
        assert!(mouse.clicked(&rect));
        let held = MouseState { x: 5.0, y: 5.0, left_down: true, ..Default::default() };
        assert!(!held.clicked(&rect));
        assert!(held.clicking(&rect));
    }

    #[test]
    fn test_ids_reset_each_frame() {
        let mut ctx = UiContext::new();
        assert_eq!(ctx.next_id(), 1);
        assert_eq!(ctx.next_id(), 2);
        ctx.set_hot(2);
        ctx.begin_frame(MouseState::default());
        assert_eq!(ctx.next_id(), 1);
        assert!(!ctx.is_hot(2));
    }
}

//! Rectangle type for UI layout

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// Split horizontally at fixed pixel position from left
    pub fn split_h_px(&self, pixels: f32) -> (Self, Self) {
        let split_x = pixels.clamp(0.0, self.w);
        (
            Self::new(self.x, self.y, split_x, self.h),
            Self::new(self.x + split_x, self.y, self.w - split_x, self.h),
        )
    }

    /// Split into two equal columns separated by `gap`
    pub fn split_columns(&self, gap: f32) -> (Self, Self) {
        let w = ((self.w - gap) * 0.5).max(0.0);
        (
            Self::new(self.x, self.y, w, self.h),
            Self::new(self.x + w + gap, self.y, w, self.h),
        )
    }

    /// Get a horizontal slice (for toolbars, form rows)
    pub fn slice_top(&self, height: f32) -> Self {
        Self::new(self.x, self.y, self.w, height.min(self.h))
    }

    /// Get remaining area after slicing top
    pub fn remaining_after_top(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.y + h, self.w, self.h - h)
    }

    /// Get a horizontal slice from bottom
    pub fn slice_bottom(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.bottom() - h, self.w, h)
    }

    /// Get remaining area after slicing bottom
    pub fn remaining_after_bottom(&self, height: f32) -> Self {
        let h = height.min(self.h);
        Self::new(self.x, self.y, self.w, self.h - h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_h_px() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        let (left, right) = r.split_h_px(30.0);
        assert!((left.w - 30.0).abs() < 0.001);
        assert!((right.w - 70.0).abs() < 0.001);
        assert!((right.x - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_split_columns() {
        let r = Rect::new(10.0, 0.0, 104.0, 20.0);
        let (a, b) = r.split_columns(4.0);
        assert!((a.w - 50.0).abs() < 0.001);
        assert!((b.x - 64.0).abs() < 0.001);
        assert!((b.right() - r.right()).abs() < 0.001);
    }

    #[test]
    fn test_slices() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(r.slice_top(20.0), Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(r.remaining_after_top(20.0), Rect::new(0.0, 20.0, 100.0, 80.0));
        assert_eq!(r.slice_bottom(10.0), Rect::new(0.0, 90.0, 100.0, 10.0));
        assert_eq!(r.remaining_after_bottom(10.0), Rect::new(0.0, 0.0, 100.0, 90.0));
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(5.0, 40.0));
        assert!(!r.contains(50.0, 100.0));
    }
}

//! Grid geometry
//!
//! A layout is a `width × height` lattice of pillars. Between two horizontally
//! adjacent pillars sits a horizontal section, between two vertically adjacent
//! pillars a vertical one. All positions are canvas-local pixels with the
//! origin at the top-left pillar.

use super::panel_index;

/// Default pillar edge length in pixels
pub const PILLAR_SIZE: u32 = 20;

/// Default section length in pixels (distance between two pillars)
pub const SECTION_LENGTH: u32 = 80;

/// Axis-aligned pixel rectangle on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Check if a canvas-local point is inside
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && px < (self.x + self.w) as f32
            && py >= self.y as f32
            && py < (self.y + self.h) as f32
    }
}

/// Pixel placement of every pillar and section for one grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub width: usize,
    pub height: usize,
    pub pillar_size: u32,
    pub section_length: u32,
}

impl GridGeometry {
    pub fn new(width: usize, height: usize, pillar_size: u32, section_length: u32) -> Self {
        Self {
            width,
            height,
            pillar_size,
            section_length,
        }
    }

    /// Geometry with the default pillar and section sizes
    pub fn with_defaults(width: usize, height: usize) -> Self {
        Self::new(width, height, PILLAR_SIZE, SECTION_LENGTH)
    }

    /// Distance between the top-left corners of two neighbouring pillars
    pub fn stride(&self) -> u32 {
        self.pillar_size + self.section_length
    }

    /// Total canvas size `(width_px, height_px)`
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.axis_len(self.width), self.axis_len(self.height))
    }

    fn axis_len(&self, cells: usize) -> u32 {
        self.stride() * (cells.max(1) as u32 - 1) + self.pillar_size
    }

    /// Pillar at cell (i, j)
    pub fn pillar_rect(&self, i: usize, j: usize) -> PixelRect {
        PixelRect::new(
            i as u32 * self.stride(),
            j as u32 * self.stride(),
            self.pillar_size,
            self.pillar_size,
        )
    }

    /// Horizontal section to the right of pillar (i, j)
    pub fn horizontal_section_rect(&self, i: usize, j: usize) -> PixelRect {
        PixelRect::new(
            i as u32 * self.stride() + self.pillar_size,
            j as u32 * self.stride(),
            self.section_length,
            self.pillar_size,
        )
    }

    /// Vertical section below pillar (i, j)
    pub fn vertical_section_rect(&self, i: usize, j: usize) -> PixelRect {
        PixelRect::new(
            i as u32 * self.stride(),
            j as u32 * self.stride() + self.pillar_size,
            self.pillar_size,
            self.section_length,
        )
    }

    pub fn section_rect(&self, i: usize, j: usize, horizontal: bool) -> PixelRect {
        if horizontal {
            self.horizontal_section_rect(i, j)
        } else {
            self.vertical_section_rect(i, j)
        }
    }

    /// Find the interior section under a canvas-local point.
    ///
    /// Pillars, the empty square inside a cell, placeholder sections on the
    /// right/bottom border and anything outside the canvas all yield `None`.
    pub fn hit_test(&self, px: f32, py: f32) -> Option<usize> {
        if px < 0.0 || py < 0.0 || self.width == 0 || self.height == 0 {
            return None;
        }
        let stride = self.stride() as f32;
        let i = (px / stride) as usize;
        let j = (py / stride) as usize;
        if i >= self.width || j >= self.height {
            return None;
        }

        if i + 1 < self.width && self.horizontal_section_rect(i, j).contains(px, py) {
            return Some(panel_index(self.width, i, j, true));
        }
        if j + 1 < self.height && self.vertical_section_rect(i, j).contains(px, py) {
            return Some(panel_index(self.width, i, j, false));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_default_grid() {
        let geo = GridGeometry::with_defaults(5, 4);
        assert_eq!(geo.canvas_size(), (420, 320));
    }

    #[test]
    fn test_single_cell_canvas_is_one_pillar() {
        let geo = GridGeometry::with_defaults(1, 1);
        assert_eq!(geo.canvas_size(), (PILLAR_SIZE, PILLAR_SIZE));
    }

    #[test]
    fn test_section_placement() {
        let geo = GridGeometry::with_defaults(5, 4);
        assert_eq!(geo.pillar_rect(2, 1), PixelRect::new(200, 100, 20, 20));
        assert_eq!(geo.horizontal_section_rect(2, 1), PixelRect::new(220, 100, 80, 20));
        assert_eq!(geo.vertical_section_rect(2, 1), PixelRect::new(200, 120, 20, 80));
    }

    #[test]
    fn test_hit_test_sections() {
        let geo = GridGeometry::with_defaults(3, 3);
        // Middle of horizontal section (0, 0)
        assert_eq!(geo.hit_test(60.0, 10.0), Some(panel_index(3, 0, 0, true)));
        // Middle of vertical section (1, 1)
        assert_eq!(geo.hit_test(110.0, 160.0), Some(panel_index(3, 1, 1, false)));
    }

    #[test]
    fn test_hit_test_misses() {
        let geo = GridGeometry::with_defaults(3, 3);
        // Pillar
        assert_eq!(geo.hit_test(5.0, 5.0), None);
        // Cell interior
        assert_eq!(geo.hit_test(60.0, 60.0), None);
        // Outside the canvas
        assert_eq!(geo.hit_test(-1.0, 10.0), None);
        assert_eq!(geo.hit_test(1000.0, 10.0), None);
    }

    #[test]
    fn test_hit_test_skips_placeholders() {
        let geo = GridGeometry::with_defaults(3, 3);
        // Horizontal placeholder right of the last pillar column lies outside the canvas
        let placeholder = geo.horizontal_section_rect(2, 0);
        assert_eq!(geo.hit_test(placeholder.x as f32 + 1.0, 5.0), None);
        // Vertical placeholder below the last pillar row
        let placeholder = geo.vertical_section_rect(0, 2);
        assert_eq!(geo.hit_test(5.0, placeholder.y as f32 + 1.0), None);
    }
}

//! Grid view - pillars and clickable wall sections
//!
//! The canvas is drawn at 1:1 scale when it fits, otherwise scaled down
//! uniformly to fit the view.

use macroquad::prelude::*;
use crate::ui::{rgb, Rect, UiContext};
use crate::world::{is_interior, GridGeometry, PixelRect, PILLAR_COLOR};
use super::GridSession;

/// Gap between view border and canvas
const CANVAS_MARGIN: f32 = 16.0;

/// Color of the panel under the mouse
const HOVER_TINT: Color = Color::new(0.0, 0.75, 0.9, 0.35);

/// Where the canvas sits on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPlacement {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale: f32,
}

impl CanvasPlacement {
    /// Fit the canvas of `geometry` into `rect`, top-left aligned
    pub fn fit(rect: Rect, geometry: &GridGeometry) -> Self {
        let (cw, ch) = geometry.canvas_size();
        let avail = rect.pad(CANVAS_MARGIN);
        let scale = (avail.w / cw as f32).min(avail.h / ch as f32).clamp(0.05, 1.0);
        Self {
            origin_x: avail.x.round(),
            origin_y: avail.y.round(),
            scale,
        }
    }

    /// Screen rect of a canvas rect
    pub fn to_screen(&self, r: PixelRect) -> Rect {
        Rect::new(
            self.origin_x + r.x as f32 * self.scale,
            self.origin_y + r.y as f32 * self.scale,
            r.w as f32 * self.scale,
            r.h as f32 * self.scale,
        )
    }

    /// Canvas-local point of a screen point
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.origin_x) / self.scale, (y - self.origin_y) / self.scale)
    }
}

/// Panel index under a screen point
pub fn panel_at(placement: &CanvasPlacement, geometry: &GridGeometry, x: f32, y: f32) -> Option<usize> {
    let (cx, cy) = placement.to_canvas(x, y);
    geometry.hit_test(cx, cy)
}

fn fill(r: Rect, color: Color) {
    draw_rectangle(r.x, r.y, r.w, r.h, color);
}

/// Draw the grid, returns the index of the clicked panel
pub fn draw_grid_view(ctx: &mut UiContext, rect: Rect, grid: &GridSession) -> Option<usize> {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::from_rgba(20, 20, 25, 255));

    let geometry = grid.geometry();
    let placement = CanvasPlacement::fit(rect, geometry);

    let hovered = if ctx.mouse.inside(&rect) {
        panel_at(&placement, geometry, ctx.mouse.x, ctx.mouse.y)
    } else {
        None
    };

    // Canvas background matches the None color so empty sections blend in
    let (cw, ch) = geometry.canvas_size();
    fill(placement.to_screen(PixelRect::new(0, 0, cw, ch)), WHITE);

    for (index, panel) in grid.panels().iter().enumerate() {
        if !is_interior(geometry.width, geometry.height, panel.x, panel.y, panel.horizontal) {
            continue;
        }
        let section = geometry.section_rect(panel.x, panel.y, panel.horizontal);
        let screen = placement.to_screen(section);
        if !panel.state.is_none() {
            fill(screen, rgb(panel.state.color()));
        }
        if hovered == Some(index) {
            fill(screen, HOVER_TINT);
        }
    }

    let pillar = rgb(PILLAR_COLOR);
    for j in 0..geometry.height {
        for i in 0..geometry.width {
            fill(placement.to_screen(geometry.pillar_rect(i, j)), pillar);
        }
    }

    if ctx.mouse.left_pressed {
        hovered
    } else {
        None
    }
}

//! Basic UI widgets

use macroquad::prelude::*;
use super::{
    Rect, UiContext, ACCENT_COLOR, BUTTON_BG, BUTTON_HOVER, FONT_SIZE_CONTENT, ROW_EVEN,
    ROW_HIGHLIGHT, ROW_ODD, TEXT_COLOR, TEXT_DIM,
};

/// Height of one list box row
pub const LIST_ROW_HEIGHT: f32 = 20.0;

/// Draw a label vertically centered in `rect`
pub fn label(rect: Rect, text: &str, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    // Round to integer pixels for crisp rendering
    let text_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, rect.x.round(), text_y, font_size, color);
}

/// Draw a text button, returns true if clicked
pub fn text_button(ctx: &mut UiContext, rect: Rect, text: &str, enabled: bool) -> bool {
    let id = ctx.next_id();
    let hovered = enabled && ctx.mouse.inside(&rect);
    let pressed = enabled && ctx.mouse.clicking(&rect);
    let clicked = enabled && ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
    }

    let bg = if pressed {
        ACCENT_COLOR
    } else if hovered {
        BUTTON_HOVER
    } else {
        BUTTON_BG
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);

    let color = if enabled { TEXT_COLOR } else { TEXT_DIM };
    let dims = measure_text(text, None, FONT_SIZE_CONTENT as u16, 1.0);
    let text_x = (rect.x + (rect.w - dims.width) * 0.5).round();
    let text_y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, text_x, text_y, FONT_SIZE_CONTENT, color);

    clicked
}

/// Rect occupied by a list box showing `rows` rows, clipped to `area`
pub fn list_box_rect(area: Rect, rows: usize) -> Rect {
    area.slice_top(rows.max(1) as f32 * LIST_ROW_HEIGHT + 2.0)
}

/// Row index under a point inside a list box
pub fn list_row_at(rect: Rect, scroll: usize, y: f32) -> usize {
    scroll + ((y - rect.y - 1.0).max(0.0) / LIST_ROW_HEIGHT) as usize
}

/// Draw a selectable list, returns the clicked row index.
///
/// `scroll` is the first visible row and is adjusted by the mouse wheel.
pub fn list_box(
    ctx: &mut UiContext,
    rect: Rect,
    items: &[String],
    selected: Option<usize>,
    scroll: &mut usize,
) -> Option<usize> {
    let visible = ((rect.h - 2.0) / LIST_ROW_HEIGHT).floor().max(0.0) as usize;
    let max_scroll = items.len().saturating_sub(visible);

    if ctx.mouse.inside(&rect) && ctx.mouse.scroll != 0.0 {
        if ctx.mouse.scroll > 0.0 {
            *scroll = scroll.saturating_sub(1);
        } else {
            *scroll += 1;
        }
    }
    *scroll = (*scroll).min(max_scroll);

    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, BUTTON_HOVER);

    for (row, item) in items.iter().enumerate().skip(*scroll).take(visible) {
        let y = rect.y + 1.0 + (row - *scroll) as f32 * LIST_ROW_HEIGHT;
        let row_rect = Rect::new(rect.x + 1.0, y, rect.w - 2.0, LIST_ROW_HEIGHT);
        let bg = if selected == Some(row) {
            ROW_HIGHLIGHT
        } else if row % 2 == 0 {
            ROW_EVEN
        } else {
            ROW_ODD
        };
        draw_rectangle(row_rect.x, row_rect.y, row_rect.w, row_rect.h, bg);
        label(Rect::new(row_rect.x + 6.0, row_rect.y, row_rect.w - 6.0, row_rect.h), item, FONT_SIZE_CONTENT, TEXT_COLOR);
    }

    if ctx.mouse.clicked(&rect) {
        let row = list_row_at(rect, *scroll, ctx.mouse.y);
        if row < items.len() {
            return Some(row);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_box_rect_sized_by_rows() {
        let area = Rect::new(0.0, 0.0, 100.0, 500.0);
        assert_eq!(list_box_rect(area, 3).h, 3.0 * LIST_ROW_HEIGHT + 2.0);
        // Empty list still shows one row
        assert_eq!(list_box_rect(area, 0).h, LIST_ROW_HEIGHT + 2.0);
        // Clipped to the available area
        assert_eq!(list_box_rect(area, 100).h, 500.0);
    }

    #[test]
    fn test_list_row_at() {
        let rect = Rect::new(0.0, 100.0, 100.0, 62.0);
        assert_eq!(list_row_at(rect, 0, 101.0), 0);
        assert_eq!(list_row_at(rect, 0, 101.0 + LIST_ROW_HEIGHT * 2.5), 2);
        assert_eq!(list_row_at(rect, 4, 105.0), 4);
    }
}

//! Editor layout - side panel, grid canvas and status bar

use macroquad::prelude::*;
use crate::app::StatusMessage;
use crate::ui::{
    draw_text_input, label, list_box, list_box_rect, text_button, Rect, UiContext, ACCENT_COLOR,
    ERROR_COLOR, FONT_SIZE_CONTENT, FONT_SIZE_HEADER, HEADER_COLOR, PANEL_BG, TEXT_COLOR, TEXT_DIM,
};
use super::grid_view::draw_grid_view;
use super::EditorState;

/// Width of the left control panel
const SIDE_PANEL_WIDTH: f32 = 240.0;
const HEADER_HEIGHT: f32 = 24.0;
const STATUS_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 24.0;
const ROW_GAP: f32 = 6.0;

/// Actions that can be triggered by the editor UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Width/height fields were committed
    ResizeGrid,
    /// Panel `index` of the grid with this generation was clicked
    PanelClicked { generation: u64, index: usize },
    /// Save the grid under the save-name field
    Save,
    Load(String),
    Delete(String),
    /// Re-fetch the layouts list
    Refresh,
}

/// Draw the complete editor UI, returns the actions triggered this frame
pub fn draw_editor(
    ctx: &mut UiContext,
    state: &mut EditorState,
    status: Option<&StatusMessage>,
) -> Vec<EditorAction> {
    let mut actions = Vec::new();
    let screen = Rect::screen(screen_width(), screen_height());

    let status_rect = screen.slice_bottom(STATUS_HEIGHT);
    let main_rect = screen.remaining_after_bottom(STATUS_HEIGHT);
    let (side_rect, canvas_rect) = main_rect.split_h_px(SIDE_PANEL_WIDTH);

    draw_side_panel(ctx, side_rect, state, &mut actions);

    if let Some(index) = draw_grid_view(ctx, canvas_rect, &state.grid) {
        actions.push(EditorAction::PanelClicked {
            generation: state.grid.generation(),
            index,
        });
    }

    draw_status_bar(status_rect, state, status);

    actions
}

fn draw_side_panel(
    ctx: &mut UiContext,
    rect: Rect,
    state: &mut EditorState,
    actions: &mut Vec<EditorAction>,
) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);

    let header = rect.slice_top(HEADER_HEIGHT);
    draw_rectangle(header.x, header.y, header.w, header.h, HEADER_COLOR);
    label(header.pad(4.0), "Layout", FONT_SIZE_HEADER, TEXT_COLOR);

    let mut area = rect.remaining_after_top(HEADER_HEIGHT).pad(8.0);
    let mut next_row = |height: f32| {
        let row = area.slice_top(height);
        area = area.remaining_after_top(height + ROW_GAP);
        row
    };

    // Grid size
    let (w_label, h_label) = next_row(14.0).split_columns(ROW_GAP);
    label(w_label, "Width", FONT_SIZE_CONTENT, TEXT_DIM);
    label(h_label, "Height", FONT_SIZE_CONTENT, TEXT_DIM);
    let (w_rect, h_rect) = next_row(ROW_HEIGHT).split_columns(ROW_GAP);
    let w_event = draw_text_input(w_rect, &ctx.mouse, &mut state.width_input, FONT_SIZE_CONTENT);
    let h_event = draw_text_input(h_rect, &ctx.mouse, &mut state.height_input, FONT_SIZE_CONTENT);
    if w_event.committed || h_event.committed {
        actions.push(EditorAction::ResizeGrid);
    }

    // Save
    label(next_row(14.0), "Save as", FONT_SIZE_CONTENT, TEXT_DIM);
    let name_rect = next_row(ROW_HEIGHT);
    let name_event = draw_text_input(name_rect, &ctx.mouse, &mut state.save_name, FONT_SIZE_CONTENT);
    let can_save = !state.save_name.text.trim().is_empty();
    if text_button(ctx, next_row(ROW_HEIGHT), "Save", can_save)
        || (name_event.committed && can_save)
    {
        actions.push(EditorAction::Save);
    }

    // Stored layouts
    let list_header = next_row(14.0);
    label(list_header, "Layouts", FONT_SIZE_CONTENT, TEXT_DIM);

    let buttons_height = ROW_HEIGHT * 2.0 + ROW_GAP;
    let list_area = area.remaining_after_bottom(buttons_height + ROW_GAP);
    let list_rect = list_box_rect(list_area, state.layout_names.len());
    if let Some(row) = list_box(
        ctx,
        list_rect,
        &state.layout_names,
        state.selected_layout,
        &mut state.list_scroll,
    ) {
        state.select_layout(row);
    }

    let buttons = Rect::new(area.x, list_rect.bottom() + ROW_GAP, area.w, buttons_height);
    let (load_rect, delete_rect) = buttons.slice_top(ROW_HEIGHT).split_columns(ROW_GAP);
    let refresh_rect = buttons.slice_bottom(ROW_HEIGHT);

    let selected = state.selected_name().map(str::to_string);
    if text_button(ctx, load_rect, "Load", selected.is_some()) {
        if let Some(name) = selected.clone() {
            actions.push(EditorAction::Load(name));
        }
    }
    if text_button(ctx, delete_rect, "Delete", selected.is_some()) {
        if let Some(name) = selected {
            actions.push(EditorAction::Delete(name));
        }
    }
    if text_button(ctx, refresh_rect, "Refresh", true) {
        actions.push(EditorAction::Refresh);
    }
}

fn draw_status_bar(rect: Rect, state: &EditorState, status: Option<&StatusMessage>) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::from_rgba(40, 40, 45, 255));

    let (cw, ch) = state.grid.geometry().canvas_size();
    let info = format!(
        "Grid: {}x{} | Canvas: {}x{} px | Walls: {}",
        state.grid.width(),
        state.grid.height(),
        cw,
        ch,
        state.grid.serialize().len()
    );
    label(rect.pad(4.0), &info, FONT_SIZE_CONTENT, TEXT_DIM);

    if let Some(status) = status {
        let color = if status.is_error { ERROR_COLOR } else { ACCENT_COLOR };
        let dims = measure_text(&status.text, None, FONT_SIZE_CONTENT as u16, 1.0);
        let x = (rect.right() - dims.width - 8.0).max(rect.x + 300.0);
        label(Rect::new(x, rect.y, rect.right() - x, rect.h), &status.text, FONT_SIZE_CONTENT, color);
    }
}

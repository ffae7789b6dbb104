//! Text input widget with cursor and keyboard handling

use macroquad::prelude::*;
use super::{MouseState, Rect};

/// Which characters a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFilter {
    #[default]
    Any,
    Digits,
}

impl InputFilter {
    fn accepts(self, ch: char) -> bool {
        match self {
            InputFilter::Any => ch >= ' ' && ch != '\u{7f}',
            InputFilter::Digits => ch.is_ascii_digit(),
        }
    }
}

/// What happened to a text field this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextInputEvent {
    /// Text content changed
    pub changed: bool,
    /// Enter pressed or focus left the field after an edit
    pub committed: bool,
}

/// State for a text input field
#[derive(Debug, Clone)]
pub struct TextInputState {
    /// The text content
    pub text: String,
    /// Cursor position (byte index)
    pub cursor: usize,
    /// Selection start (byte index), if selecting
    pub selection_start: Option<usize>,
    /// Blink timer for cursor
    pub blink_timer: f32,
    /// Whether the input has focus
    pub focused: bool,
    /// Accepted characters
    pub filter: InputFilter,
    /// Maximum length in characters
    pub max_len: usize,
    /// Edited since it last gained focus or committed
    dirty: bool,
}

impl TextInputState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            selection_start: None,
            blink_timer: 0.0,
            focused: false,
            filter: InputFilter::Any,
            max_len: 80,
            dirty: false,
        }
    }

    /// Numeric field limited to `max_len` digits
    pub fn digits(value: usize, max_len: usize) -> Self {
        Self {
            filter: InputFilter::Digits,
            max_len,
            ..Self::new(value.to_string())
        }
    }

    /// Replace the content without marking the field as edited
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.selection_start = None;
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Parse the content as a number (digit fields)
    pub fn value(&self) -> Option<usize> {
        self.text.trim().parse().ok()
    }

    /// Get selected text range (start, end) in sorted order
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_start.map(|start| {
            if start < self.cursor {
                (start, self.cursor)
            } else {
                (self.cursor, start)
            }
        })
    }

    /// Delete selected text and return cursor to selection start
    pub fn delete_selection(&mut self) {
        if let Some((start, end)) = self.selection_range() {
            self.text.drain(start..end);
            self.cursor = start;
            self.selection_start = None;
        }
    }

    /// Check if there's a selection
    pub fn has_selection(&self) -> bool {
        self.selection_start.is_some() && self.selection_start != Some(self.cursor)
    }

    /// Move cursor left, optionally extending selection
    pub fn move_left(&mut self, extend_selection: bool) {
        if extend_selection {
            if self.selection_start.is_none() {
                self.selection_start = Some(self.cursor);
            }
        } else {
            // If we have a selection, move to the start of it
            if let Some((start, _)) = self.selection_range() {
                self.cursor = start;
                self.selection_start = None;
                return;
            }
        }

        if self.cursor > 0 {
            // Move back one character (handle UTF-8)
            let prev = self.text[..self.cursor]
                .char_indices()
                .rev()
                .next()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor = prev;
        }

        if !extend_selection {
            self.selection_start = None;
        }
    }

    /// Move cursor right, optionally extending selection
    pub fn move_right(&mut self, extend_selection: bool) {
        if extend_selection {
            if self.selection_start.is_none() {
                self.selection_start = Some(self.cursor);
            }
        } else {
            // If we have a selection, move to the end of it
            if let Some((_, end)) = self.selection_range() {
                self.cursor = end;
                self.selection_start = None;
                return;
            }
        }

        if self.cursor < self.text.len() {
            // Move forward one character (handle UTF-8)
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.cursor = next;
        }

        if !extend_selection {
            self.selection_start = None;
        }
    }

    /// Move cursor to start
    pub fn move_home(&mut self, extend_selection: bool) {
        if extend_selection && self.selection_start.is_none() {
            self.selection_start = Some(self.cursor);
        }
        self.cursor = 0;
        if !extend_selection {
            self.selection_start = None;
        }
    }

    /// Move cursor to end
    pub fn move_end(&mut self, extend_selection: bool) {
        if extend_selection && self.selection_start.is_none() {
            self.selection_start = Some(self.cursor);
        }
        self.cursor = self.text.len();
        if !extend_selection {
            self.selection_start = None;
        }
    }

    /// Select all text
    pub fn select_all(&mut self) {
        self.selection_start = Some(0);
        self.cursor = self.text.len();
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, ch: char) {
        if !self.filter.accepts(ch) {
            return;
        }
        if self.has_selection() {
            self.delete_selection();
        }
        if self.text.chars().count() >= self.max_len {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        if self.cursor > 0 {
            // Find previous character boundary
            let prev = self.text[..self.cursor]
                .char_indices()
                .rev()
                .next()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete character after cursor (delete key)
    pub fn delete(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        if self.cursor < self.text.len() {
            // Find next character boundary
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    /// Handle keyboard input, returns true if text changed
    pub fn handle_input(&mut self) -> bool {
        let old_text = self.text.clone();
        self.blink_timer += get_frame_time();

        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper) || is_key_down(KeyCode::RightSuper);

        // Navigation
        if is_key_pressed(KeyCode::Left) {
            self.move_left(shift);
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::Right) {
            self.move_right(shift);
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::Home) {
            self.move_home(shift);
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::End) {
            self.move_end(shift);
            self.blink_timer = 0.0;
        }

        // Select all
        if ctrl && is_key_pressed(KeyCode::A) {
            self.select_all();
            self.blink_timer = 0.0;
        }

        // Deletion
        if is_key_pressed(KeyCode::Backspace) {
            self.backspace();
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::Delete) {
            self.delete();
            self.blink_timer = 0.0;
        }

        // Character input (filtered by insert_char)
        while let Some(ch) = get_char_pressed() {
            self.insert_char(ch);
            self.blink_timer = 0.0;
        }

        self.text != old_text
    }

    /// Mark focus change; returns true if an edit is committed by losing focus
    pub fn set_focused(&mut self, focused: bool) -> bool {
        let committed = self.focused && !focused && self.dirty;
        if committed || focused != self.focused {
            self.dirty = false;
        }
        self.focused = focused;
        committed
    }

    /// Enter pressed: commit pending edit
    pub fn commit(&mut self) -> bool {
        let committed = self.dirty;
        self.dirty = false;
        committed
    }
}

/// Colors for text input
const INPUT_BG: Color = Color::new(0.12, 0.12, 0.14, 1.0);
const INPUT_BORDER: Color = Color::new(0.0, 0.75, 0.9, 1.0);
const INPUT_BORDER_IDLE: Color = Color::new(0.3, 0.3, 0.35, 1.0);
const INPUT_TEXT: Color = Color::new(0.8, 0.8, 0.85, 1.0);
const INPUT_SELECTION: Color = Color::new(0.0, 0.5, 0.7, 0.5);
const INPUT_CURSOR: Color = Color::new(0.9, 0.9, 0.95, 1.0);

/// Draw a text input field and handle input for this frame
pub fn draw_text_input(rect: Rect, mouse: &MouseState, state: &mut TextInputState, font_size: f32) -> TextInputEvent {
    let mut event = TextInputEvent::default();

    // Click inside focuses, click elsewhere blurs
    if mouse.left_pressed {
        event.committed |= state.set_focused(mouse.inside(&rect));
    }

    // Draw background
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, INPUT_BG);
    let border = if state.focused { INPUT_BORDER } else { INPUT_BORDER_IDLE };
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);

    let padding = 8.0;
    let text_x = rect.x + padding;
    let text_y = rect.y + (rect.h + font_size * 0.7) / 2.0;

    if state.focused {
        if state.handle_input() {
            state.dirty = true;
            event.changed = true;
        }
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            event.committed |= state.commit();
        }
    }

    // Measure text up to cursor for cursor positioning
    let text_before_cursor = &state.text[..state.cursor];
    let cursor_offset = measure_text(text_before_cursor, None, font_size as u16, 1.0).width;

    // Draw selection highlight
    if let Some((start, end)) = state.selection_range() {
        let start_text = &state.text[..start];
        let selected_text = &state.text[start..end];
        let start_x = text_x + measure_text(start_text, None, font_size as u16, 1.0).width;
        let sel_width = measure_text(selected_text, None, font_size as u16, 1.0).width;
        draw_rectangle(start_x, rect.y + 4.0, sel_width, rect.h - 8.0, INPUT_SELECTION);
    }

    // Draw text
    draw_text(&state.text, text_x, text_y, font_size, INPUT_TEXT);

    // Draw cursor (blinking)
    if state.focused && (state.blink_timer % 1.0) < 0.5 {
        let cursor_x = text_x + cursor_offset;
        draw_line(cursor_x, rect.y + 6.0, cursor_x, rect.y + rect.h - 6.0, 1.5, INPUT_CURSOR);
    }

    event
}

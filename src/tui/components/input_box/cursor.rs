//! Cursor position tracking and navigation for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the row scroll offset. The
//! text buffer stays in `InputBox` and is passed in explicitly.

use super::text_wrap::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, char_width, display_width, inner_width,
    row_of, visual_rows,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible row (0 when content fits in the viewport)
    pub scroll_offset: u16,
    /// Area width from the last render (used for vertical movement)
    pub last_area_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_area_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Place the cursor at the end of `buffer` (after the parent replaces it).
    pub fn move_to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
        self.scroll_offset = 0;
    }

    /// Move one visual row up (`-1`) or down (`1`), keeping the display column
    /// where the target row is long enough.
    ///
    /// Returns `true` if the cursor moved.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let rows = visual_rows(buffer, inner_width(self.last_area_width));
        let current = row_of(&rows, self.pos);

        let target = match direction {
            d if d < 0 && current > 0 => current - 1,
            d if d > 0 && current + 1 < rows.len() => current + 1,
            _ => return false,
        };

        let column = display_width(&buffer[rows[current].start..self.pos]);
        let row = rows[target].clone();

        let mut pos = row.start;
        let mut width = 0;
        for (i, c) in buffer[row.clone()].char_indices() {
            width += char_width(c);
            if width > column {
                break;
            }
            pos = row.start + i + c.len_utf8();
        }
        self.pos = pos;
        true
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let rows = visual_rows(buffer, inner_width(area_width));
        if rows.len() <= usize::from(MAX_VISIBLE_LINES) {
            self.scroll_offset = 0;
            return;
        }

        let cursor_row = u16::try_from(row_of(&rows, self.pos)).unwrap_or(u16::MAX);
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_row - (MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let rows = visual_rows(buffer, inner_width(area.width));
        let row = row_of(&rows, self.pos);
        let column = display_width(&buffer[rows[row].start..self.pos]);

        let visible_row = u16::try_from(row)
            .unwrap_or(u16::MAX)
            .saturating_sub(self.scroll_offset);
        let column = u16::try_from(column).unwrap_or(u16::MAX);

        (
            area.x.saturating_add(CONTENT_OFFSET_X).saturating_add(column),
            area.y.saturating_add(CONTENT_OFFSET_Y).saturating_add(visible_row),
        )
    }
}

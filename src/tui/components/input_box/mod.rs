//! # InputBox Component
//!
//! The text field of the chat view.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newlines)
//! - Handle editing (backspace, delete, cursor movement)
//! - Report every change and every Enter press to the parent
//! - Display the buffer with a cursor, scrolling internally past 5 rows
//!
//! ## State Management
//!
//! The buffer here is a view of `ChatState::input`. Every edit emits
//! `InputEvent::Changed` so the parent can dispatch `Action::InputChanged`;
//! Enter emits `InputEvent::Submit` without touching the buffer, because the
//! reducer decides whether a send happens. Afterwards the parent calls
//! [`InputBox::sync`] to mirror the state back (cleared on send).

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    visual_rows,
};

const PLACEHOLDER: &str = "Type your message...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Buffer content changed; the parent should read `buffer`.
    Changed,
    /// Enter pressed
    Submit,
    /// Only the cursor moved
    CursorMoved,
}

pub struct InputBox {
    /// Text buffer, mirrored from `ChatState::input`
    pub buffer: String,
    /// Dim the border while a request is pending (Prop)
    pub is_loading: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            is_loading: false,
            cursor: CursorState::new(),
        }
    }

    /// Replace the buffer with `text` if it differs, moving the cursor to the end.
    pub fn sync(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor.move_to_end(&self.buffer);
        }
    }

    /// Height needed for the current buffer: 1..=5 content rows plus borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = visual_rows(&self.buffer, inner_width(area_width)).len();
        let visible = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .min(MAX_VISIBLE_LINES);
        visible + VERTICAL_OVERHEAD
    }

    fn visible_lines(&self, area_width: u16) -> Vec<Line<'_>> {
        if self.buffer.is_empty() {
            let dimmed = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
            return vec![Line::styled(PLACEHOLDER, dimmed)];
        }
        visual_rows(&self.buffer, inner_width(area_width))
            .into_iter()
            .skip(usize::from(self.cursor.scroll_offset))
            .take(usize::from(MAX_VISIBLE_LINES))
            .map(|row| Line::raw(&self.buffer[row]))
            .collect()
    }

    fn insert(&mut self, text: &str) -> InputEvent {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        InputEvent::Changed
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_area_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let border_style = if self.is_loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Message")
            .title_bottom(Line::from(" Enter to send · Ctrl+J newline · Esc quit ").right_aligned())
            .padding(Padding::horizontal(1));

        let input = Paragraph::new(self.visible_lines(area.width)).block(block);
        frame.render_widget(input, area);

        frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                Some(self.insert(c.encode_utf8(&mut tmp)))
            }
            TuiEvent::Paste(text) => Some(self.insert(text)),
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::CursorMoved
                })
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

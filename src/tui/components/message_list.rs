//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display messages in chronological order as bubbles
//! - Keep the view pinned to the newest message until the user scrolls up
//! - Cache bubble heights (messages never change, so heights only need
//!   computing once per width)
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice (props).

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

const EMPTY_HINT: &str = "No messages yet. Type a question and press Enter.";

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    fn set_offset_y(&mut self, y: u16) {
        self.scroll_state.set_offset(Position { x: 0, y });
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        if self.scroll_state.offset().y > max_y {
            self.set_offset_y(max_y);
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
            self.set_offset_y(max_y);
        }
    }

    /// Whether messages exist below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        self.scroll_state.offset().y < self.max_offset()
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, messages: &'a [Message]) -> Self {
        Self { state, messages }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.viewport_height = area.height;

        if self.messages.is_empty() {
            self.state.layout.sync(self.messages, 0);
            let hint = Paragraph::new(EMPTY_HINT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            let y = area.y + area.height / 2;
            frame.render_widget(hint, Rect::new(area.x, y, area.width, 1.min(area.height)));
            return;
        }

        // Leave one column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        self.state.layout.sync(self.messages, content_width);

        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.set_offset_y(bottom);
        } else {
            self.state.clamp_scroll();
        }

        let total_height = self.state.layout.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let offset = self.state.scroll_state.offset().y;
        for index in self.state.layout.visible_range(offset, area.height) {
            let message = &self.messages[index];
            let row = Rect::new(
                0,
                self.state.layout.top_of(index),
                content_width,
                self.state.layout.heights[index],
            );
            scroll_view.render_widget(MessageBubble::new(message), MessageBubble::place(message, row));
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on the persistent state: scrolling must work even on
/// frames where no `MessageList` is constructed.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                let bottom = self.max_offset();
                self.set_offset_y(bottom);
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights.
///
/// Messages are append-only and immutable, so a height stays valid until the
/// width changes. New messages only add entries at the end.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running sum: `prefix_heights[i]` is the bottom edge of message `i`.
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// Bring the cache up to date with `messages` at `content_width`.
    pub fn sync(&mut self, messages: &[Message], content_width: u16) {
        if self.content_width != content_width || messages.len() < self.heights.len() {
            self.heights.clear();
            self.prefix_heights.clear();
            self.content_width = content_width;
        }

        let mut bottom = self.total_height();
        for message in &messages[self.heights.len()..] {
            let height = MessageBubble::calculate_height(message, content_width);
            bottom = bottom.saturating_add(height);
            self.heights.push(height);
            self.prefix_heights.push(bottom);
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Top edge of message `index` in content coordinates.
    pub fn top_of(&self, index: usize) -> u16 {
        self.prefix_heights[index] - self.heights[index]
    }

    /// Indices of messages overlapping the viewport, plus half a screen of
    /// margin on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let margin = viewport_height / 2;
        let first_row = scroll_offset.saturating_sub(margin);
        let last_row = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(margin);

        let start = self.prefix_heights.partition_point(|&end| end <= first_row);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < last_row)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn conversation(turns: usize) -> Vec<Message> {
        (0..turns)
            .flat_map(|i| [Message::user(format!("question {i}")), Message::bot(format!("answer {i}"))])
            .collect()
    }

    fn render(state: &mut MessageListState, messages: &[Message], width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| MessageList::new(state, messages).render(f, f.area()))
            .unwrap();
        terminal
    }

    fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_layout_cache_appends_new_messages_only() {
        let mut cache = LayoutCache::new();
        let mut messages = vec![Message::user("a")];
        cache.sync(&messages, 40);
        assert_eq!(cache.heights, vec![3]);

        messages.push(Message::bot("b"));
        cache.sync(&messages, 40);
        assert_eq!(cache.heights, vec![3, 3]);
        assert_eq!(cache.prefix_heights, vec![3, 6]);
        assert_eq!(cache.top_of(1), 3);
        assert_eq!(cache.total_height(), 6);
    }

    #[test]
    fn test_layout_cache_rebuilds_on_width_change() {
        let mut cache = LayoutCache::new();
        let messages = vec![Message::bot("Hello world")];
        cache.sync(&messages, 80);
        assert_eq!(cache.heights, vec![3]);

        // Row 16 → bubble content width 8 → two lines
        cache.sync(&messages, 16);
        assert_eq!(cache.heights, vec![4]);
    }

    #[test]
    fn test_visible_range_limits_rendering() {
        let mut cache = LayoutCache::new();
        cache.sync(&conversation(50), 40);
        let range = cache.visible_range(0, 10);
        assert_eq!(range.start, 0);
        assert!(range.end < 100);
        assert!(cache.visible_range(u16::MAX, 10).is_empty());
    }

    #[test]
    fn test_empty_conversation_shows_hint() {
        let mut state = MessageListState::new();
        let terminal = render(&mut state, &[], 60, 5);
        assert!(screen_lines(&terminal).iter().any(|l| l.contains("No messages yet")));
    }

    #[test]
    fn test_user_right_bot_left() {
        let mut state = MessageListState::new();
        let messages = vec![Message::user("ping"), Message::bot("pong")];
        let terminal = render(&mut state, &messages, 40, 10);
        let lines = screen_lines(&terminal);

        let user_col = lines[1].find("ping").unwrap();
        let bot_col = lines[4].find("pong").unwrap();
        assert!(user_col > 20, "user text at column {user_col}");
        assert!(bot_col < 5, "bot text at column {bot_col}");
    }

    #[test]
    fn test_sticks_to_bottom_as_messages_arrive() {
        let mut state = MessageListState::new();
        let mut messages = conversation(10);
        render(&mut state, &messages, 40, 10);
        assert!(!state.has_unseen_content());

        messages.push(Message::user("one more"));
        let terminal = render(&mut state, &messages, 40, 10);
        assert!(!state.has_unseen_content());
        assert!(screen_lines(&terminal).iter().any(|l| l.contains("one more")));
    }

    #[test]
    fn test_scroll_up_unpins_and_scroll_to_bottom_repins() {
        let mut state = MessageListState::new();
        let messages = conversation(10);
        render(&mut state, &messages, 40, 10);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        assert!(state.has_unseen_content());

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_scroll_down_at_end_repins() {
        let mut state = MessageListState::new();
        render(&mut state, &conversation(10), 40, 10);

        state.handle_event(&TuiEvent::ScrollUp);
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }
}

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::message::Message;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never take more than this share of the row (numerator / 4).
const MAX_WIDTH_QUARTERS: u32 = 3;

/// A stateless component that renders one chat turn as a bubble.
///
/// # Styling
///
/// - **User**: right-aligned, cyan accent, titled "you"
/// - **Bot**: left-aligned, neutral gray border, titled "bot"
///
/// An empty bot reply (no `response` field) still gets a bubble so the turn
/// is visible.
///
/// # Layout
///
/// The bubble shrinks to fit short messages and caps at three quarters of the
/// row. [`bubble_width`](Self::bubble_width) and
/// [`calculate_height`](Self::calculate_height) predict the size without
/// rendering, so `MessageList` can lay out its scroll view up front.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Width of the bubble for a message placed in a row `row_width` wide.
    pub fn bubble_width(message: &Message, row_width: u16) -> u16 {
        let max_width = (u32::from(row_width) * MAX_WIDTH_QUARTERS / 4) as u16;
        let max_width = max_width.max(HORIZONTAL_OVERHEAD + 1).min(row_width);

        let longest_line = message
            .text()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let wanted = u16::try_from(longest_line)
            .unwrap_or(u16::MAX)
            .saturating_add(HORIZONTAL_OVERHEAD)
            // Room for the "you"/"bot" title
            .max(HORIZONTAL_OVERHEAD + 3);

        wanted.min(max_width)
    }

    /// Calculate the height required for this message in a row `row_width` wide.
    ///
    /// Wrapping options must match `Paragraph`'s word wrapping closely enough
    /// that the predicted height equals the rendered one.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(message, row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }

        let content = message.text();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(usize::from(content_width))
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len().max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    /// The bubble's rect inside a full-width row: flush right for the user,
    /// flush left for the bot.
    pub fn place(message: &Message, row: Rect) -> Rect {
        let width = Self::bubble_width(message, row.width);
        let x = if message.is_user() {
            row.x + row.width.saturating_sub(width)
        } else {
            row.x
        };
        Rect::new(x, row.y, width, row.height)
    }

    fn style(&self) -> (Style, Style) {
        if self.message.is_user() {
            let accent = Style::default().fg(Color::Cyan);
            (accent, accent)
        } else {
            (
                Style::default(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            )
        }
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let (text_style, border_style) = self.style();
        let (title, alignment) = if self.message.is_user() {
            ("you", Alignment::Right)
        } else {
            ("bot", Alignment::Left)
        };

        let block = Block::bordered()
            .title(title)
            .title_alignment(alignment)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text())
            .style(text_style)
            .wrap(Wrap { trim: false })
            .render(inner_area, buf);
    }
}

//! # TitleBar Component
//!
//! One-line header: the "Chat" title, the endpoint being queried, and a
//! "↓ New" marker when messages sit below the scroll position.
//!
//! Purely presentational: all data arrives as props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    /// Where queries go (e.g. "http://127.0.0.1:8000/query/")
    pub endpoint: &'a str,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(endpoint: &'a str, has_unseen_content: bool) -> Self {
        Self {
            endpoint,
            has_unseen_content,
        }
    }

    fn line(&self) -> Line<'a> {
        let bar = Style::default().bg(Color::Blue).fg(Color::White);
        let mut spans = vec![
            Span::styled(" Chat ", bar.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}", self.endpoint), bar.add_modifier(Modifier::DIM)),
        ];
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ New", bar.fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bar = Paragraph::new(self.line()).style(Style::default().bg(Color::Blue));
        frame.render_widget(bar, area);
    }
}

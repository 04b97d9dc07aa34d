//! # StatusLine Component
//!
//! Loading spinner and error text between the conversation and the input.
//! Takes no rows when there is nothing to show.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusLine<'a> {
    pub is_loading: bool,
    pub error: Option<&'a str>,
    /// Animation tick, advanced by the event loop
    pub spinner_frame: usize,
}

impl<'a> StatusLine<'a> {
    pub fn new(is_loading: bool, error: Option<&'a str>, spinner_frame: usize) -> Self {
        Self {
            is_loading,
            error,
            spinner_frame,
        }
    }

    /// Rows needed: one for the spinner, one for the error.
    pub fn height(&self) -> u16 {
        u16::from(self.is_loading) + u16::from(self.error.is_some())
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::with_capacity(2);
        if self.is_loading {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            lines.push(Line::from(vec![
                Span::styled(glyph, Style::default().fg(Color::Cyan)),
                Span::styled(" Waiting for response…", Style::default().fg(Color::DarkGray)),
            ]));
        }
        if let Some(error) = self.error {
            lines.push(Line::from(Span::styled(
                error,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }
}

impl Component for StatusLine<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        frame.render_widget(Paragraph::new(self.lines()), area);
    }
}

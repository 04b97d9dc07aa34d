use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::ChatState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, StatusLine, TitleBar};

/// Split the frame into title, conversation, status and input rows.
pub fn layout(area: Rect, status_height: u16, input_height: u16) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(status_height), Length(input_height)]).areas(area)
}

pub fn draw_ui(
    frame: &mut Frame,
    state: &ChatState,
    tui: &mut TuiState,
    endpoint: &str,
    spinner_frame: usize,
) {
    let mut status = StatusLine::new(state.is_loading, state.error.as_deref(), spinner_frame);
    tui.input_box.is_loading = state.is_loading;
    let input_height = tui.input_box.calculate_height(frame.area().width);

    let [title_area, main_area, status_area, input_area] =
        layout(frame.area(), status.height(), input_height);

    MessageList::new(&mut tui.message_list, &state.messages).render(frame, main_area);
    TitleBar::new(endpoint, tui.message_list.has_unseen_content()).render(frame, title_area);
    status.render(frame, status_area);
    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use crate::core::state::FAILED_REQUEST_MESSAGE;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &ChatState, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| draw_ui(f, state, tui, "http://127.0.0.1:8000/query/", 0))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_gives_messages_the_rest() {
        let [title, main, status, input] = layout(Rect::new(0, 0, 80, 24), 1, 3);
        assert_eq!(title.height, 1);
        assert_eq!(status.height, 1);
        assert_eq!(input.height, 3);
        assert_eq!(main.height, 24 - 1 - 1 - 3);
        assert_eq!(input.y + input.height, 24);
    }

    #[test]
    fn test_draw_idle_conversation() {
        let mut state = ChatState::default();
        state.messages.push(Message::user("hi"));
        state.messages.push(Message::bot("hello"));
        let mut tui = TuiState::new();

        let text = draw(&state, &mut tui);
        assert!(text.contains("Chat"));
        assert!(text.contains("hi"));
        assert!(text.contains("hello"));
        assert!(!text.contains("Waiting for response"));
    }

    #[test]
    fn test_draw_loading_and_error() {
        let mut state = ChatState::default();
        state.is_loading = true;
        state.error = Some(FAILED_REQUEST_MESSAGE.to_string());
        let mut tui = TuiState::new();

        let text = draw(&state, &mut tui);
        assert!(text.contains("Waiting for response"));
        assert!(text.contains("Failed to fetch response from the server"));
        assert!(tui.input_box.is_loading);
    }

    #[test]
    fn test_draw_shows_input_text() {
        let state = ChatState::default();
        let mut tui = TuiState::new();
        tui.input_box.sync("typed so far");

        let text = draw(&state, &mut tui);
        assert!(text.contains("typed so far"));
    }
}

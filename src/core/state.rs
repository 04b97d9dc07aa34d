//! # Conversation State
//!
//! Everything the chat view knows, held in one struct. No terminal types
//! live here; presentation state belongs to the `tui` module.
//!
//! ```text
//! ChatState
//! ├── messages: Vec<Message>      // append-only, display order
//! ├── input: String               // current text field value
//! ├── is_loading: bool            // single shared flag
//! ├── error: Option<String>       // last failure, cleared on send
//! ├── reply_order: ReplyOrder     // how overlapping replies are applied
//! └── latest_request: Option<RequestId>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::fmt;

use crate::ReplyOrder;
use crate::core::message::Message;

/// The single user-facing error text. Every kind of request failure maps to it.
pub const FAILED_REQUEST_MESSAGE: &str =
    "Failed to fetch response from the server. Please try again.";

/// Monotonic tag for one send operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub input: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub reply_order: ReplyOrder,
    latest_request: Option<RequestId>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(ReplyOrder::default())
    }
}

impl ChatState {
    pub fn new(reply_order: ReplyOrder) -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            is_loading: false,
            error: None,
            reply_order,
            latest_request: None,
        }
    }

    /// The id handed to the most recent send, if any send happened yet.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest_request
    }

    /// Allocate the next request id and remember it as the latest.
    pub(crate) fn issue_request_id(&mut self) -> RequestId {
        let next = self.latest_request.map_or(1, |id| id.0 + 1);
        let id = RequestId(next);
        self.latest_request = Some(id);
        id
    }

    /// Whether a reply for `id` should be dropped because a newer send exists.
    /// Always false under [`ReplyOrder::Completion`].
    pub fn is_superseded(&self, id: RequestId) -> bool {
        match self.reply_order {
            ReplyOrder::Completion => false,
            ReplyOrder::Latest => self.latest_request.is_some_and(|latest| id < latest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = ChatState::default();
        assert!(state.messages.is_empty());
        assert!(state.input.is_empty());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.reply_order, ReplyOrder::Completion);
        assert_eq!(state.latest_request(), None);
    }

    #[test]
    fn test_request_ids_are_monotonic() {
        let mut state = ChatState::default();
        let first = state.issue_request_id();
        let second = state.issue_request_id();
        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);
        assert!(first < second);
        assert_eq!(state.latest_request(), Some(second));
        assert_eq!(second.to_string(), "#2");
    }

    #[test]
    fn test_superseded_only_under_latest_order() {
        let mut completion = ChatState::new(ReplyOrder::Completion);
        let old = completion.issue_request_id();
        completion.issue_request_id();
        assert!(!completion.is_superseded(old));

        let mut latest = ChatState::new(ReplyOrder::Latest);
        let old = latest.issue_request_id();
        let new = latest.issue_request_id();
        assert!(latest.is_superseded(old));
        assert!(!latest.is_superseded(new));
    }
}

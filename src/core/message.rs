//! # Message
//!
//! One chat turn. Created once, never edited.

/// A single chat turn, authored either by the user or by the remote bot.
///
/// Fields are private so a message cannot change after it has been appended
/// to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    is_user: bool,
}

impl Message {
    /// A message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    /// A reply from the query endpoint.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_user(&self) -> bool {
        self.is_user
    }
}

//! # Actions
//!
//! Everything that can happen in the chat view becomes an `Action`.
//! User presses Enter? That's `Action::Send`.
//! Server replies? That's `Action::QueryCompleted { id, outcome }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the adapter must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::ReplyOrder;
use crate::core::message::Message;
use crate::core::state::{ChatState, FAILED_REQUEST_MESSAGE, RequestId};
use crate::query::{QueryError, QueryResponse};

#[derive(Debug)]
pub enum Action {
    /// The text field changed; carries its full new value.
    InputChanged(String),
    /// Enter pressed in the text field.
    Send,
    /// A spawned query finished.
    QueryCompleted {
        id: RequestId,
        outcome: Result<QueryResponse, QueryError>,
    },
    Quit,
}

/// I/O requested by the reducer. Performed by the adapter.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Issue one request carrying `query`.
    SpawnQuery {
        id: RequestId,
        query: String,
        /// Abort requests still in flight before spawning this one.
        abort_pending: bool,
    },
    Quit,
}

pub fn update(state: &mut ChatState, action: Action) -> Effect {
    match action {
        Action::InputChanged(text) => {
            state.input = text;
            Effect::None
        }
        Action::Send => {
            // Truthiness check: "" is a no-op, " " is sent as-is.
            if state.input.is_empty() {
                debug!("Send ignored: input is empty");
                return Effect::None;
            }

            let query = state.input.clone();
            state.messages.push(Message::user(query.clone()));
            state.is_loading = true;
            state.error = None;
            state.input.clear();

            let id = state.issue_request_id();
            info!("Send {}: {} bytes", id, query.len());
            Effect::SpawnQuery {
                id,
                query,
                abort_pending: state.reply_order == ReplyOrder::Latest,
            }
        }
        Action::QueryCompleted { id, outcome } => {
            if state.is_superseded(id) {
                debug!("Dropping reply for superseded request {}", id);
                return Effect::None;
            }

            match outcome {
                Ok(reply) => {
                    let text = reply.display_text();
                    debug!("Reply for {}: {} bytes", id, text.len());
                    state.messages.push(Message::bot(text));
                }
                Err(e) => {
                    warn!("Request {} failed: {}", id, e);
                    state.error = Some(FAILED_REQUEST_MESSAGE.to_string());
                }
            }
            state.is_loading = false;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

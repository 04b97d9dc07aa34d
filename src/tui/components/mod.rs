//! # TUI Components
//!
//! All UI pieces of the chat view.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created fresh each frame from the data they display:
//! - `TitleBar`: "Chat" header with the endpoint
//! - `MessageBubble`: one chat turn
//! - `StatusLine`: loading spinner and error text
//!
//! ### Stateful Components (Event-Driven)
//!
//! Hold presentation state across frames and react to `TuiEvent`s:
//! - `InputBox`: the text field, mirroring `ChatState::input`
//! - `MessageList` / `MessageListState`: scrollable conversation with a
//!   height cache
//!
//! Components receive external data as props (struct fields), never by
//! reaching into `ChatState` themselves.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top bar)
//! ├── message.rs       (Single message bubble)
//! ├── message_list.rs  (Scrollable message container)
//! ├── status_line.rs   (Spinner + error)
//! └── input_box/       (Text field)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod status_line;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use status_line::StatusLine;
pub use title_bar::TitleBar;

//! # Core Application Logic
//!
//! The chat view's business logic. It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ChatState            │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │   query    │
//!            │  Adapter   │ ─spawns──▶ │  client    │
//!            │ (ratatui)  │            │ (reqwest)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: The immutable `Message` chat turn
//! - [`state`]: The `ChatState` struct, all conversation state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration (defaults → file → env → CLI)

pub mod action;
pub mod config;
pub mod message;
pub mod state;

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::action::{Action, update};
use crate::core::state::ChatState;
use crate::query::{QueryClient, QueryError, QueryResponse};

/// A client that answers every query with the same outcome and records
/// what it was asked.
pub struct ScriptedClient {
    outcome: Result<QueryResponse, QueryError>,
    received: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(QueryResponse::from_text(text)),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(QueryError::Network("connection refused".to_string())),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryClient for ScriptedClient {
    fn endpoint(&self) -> &str {
        "scripted://test"
    }

    async fn query(&self, query: &str) -> Result<QueryResponse, QueryError> {
        self.received.lock().unwrap().push(query.to_string());
        self.outcome.clone()
    }
}

/// A client whose queries never resolve.
pub struct PendingClient;

#[async_trait]
impl QueryClient for PendingClient {
    fn endpoint(&self) -> &str {
        "pending://test"
    }

    async fn query(&self, _query: &str) -> Result<QueryResponse, QueryError> {
        std::future::pending().await
    }
}

/// A default state whose text field already holds `input`.
pub fn state_with_input(input: &str) -> ChatState {
    let mut state = ChatState::default();
    update(&mut state, Action::InputChanged(input.to_string()));
    state
}

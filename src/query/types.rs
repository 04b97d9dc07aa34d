//! Wire types for the query endpoint.
//!
//! Request:  `{ "query": "<input>" }`
//! Response: `{ "response": "<reply>", ... }`, other fields ignored.

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Request
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

// ============================================================================
// Response
// ============================================================================

/// The parts of a successful reply body the chat view cares about.
///
/// Parsing is lenient: a body that is not a JSON object, or an object without
/// a `response` field, still produces a `QueryResponse` (with no value).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub response: Option<Value>,
}

impl QueryResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            response: Some(Value::String(text.into())),
        }
    }

    /// Extract the `response` field from a raw body. Never fails.
    pub fn from_body(body: &[u8]) -> Self {
        let response = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut map)) => map.remove("response"),
            _ => None,
        };
        Self { response }
    }

    /// Text to show as the bot message.
    ///
    /// Missing or `null` becomes an empty string; non-string values are shown
    /// as their JSON text.
    pub fn display_text(&self) -> String {
        match &self.response {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

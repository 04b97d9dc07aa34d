//! querychat library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod query;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How completed queries are applied when several sends overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyOrder {
    /// Apply every reply as it arrives, in completion order.
    #[default]
    Completion,
    /// Only the most recent send may produce a reply; older ones are dropped.
    Latest,
}

impl ReplyOrder {
    pub fn label(&self) -> &'static str {
        match self {
            ReplyOrder::Completion => "completion",
            ReplyOrder::Latest => "latest",
        }
    }
}

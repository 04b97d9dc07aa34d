use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{QueryRequest, QueryResponse};

/// Default address of the query service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/query/";

/// Errors that can occur while asking the endpoint.
///
/// The chat view treats every variant the same way; the distinction only
/// shows up in the log.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The HTTP client could not be built (bad TLS backend, etc.).
    Config(String),
    /// Connection refused, DNS failure, broken body stream.
    Network(String),
    /// The configured request timeout elapsed.
    Timeout,
    /// The server answered with a non-2xx status.
    Status { status: u16, body: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Config(msg) => write!(f, "client config error: {msg}"),
            QueryError::Network(msg) => write!(f, "network error: {msg}"),
            QueryError::Timeout => write!(f, "request timed out"),
            QueryError::Status { status, body } => {
                write!(f, "server error (HTTP {status}): {body}")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            QueryError::Timeout
        } else {
            QueryError::Network(e.to_string())
        }
    }
}

/// The one network capability the chat view depends on.
///
/// Implemented by [`HttpQueryClient`] in production and by fakes in tests.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Where queries are sent (for the title bar and logs).
    fn endpoint(&self) -> &str;

    /// Send one query and wait for the reply.
    async fn query(&self, query: &str) -> Result<QueryResponse, QueryError>;
}

/// reqwest-backed client that POSTs `{ "query": ... }` to a fixed URL.
pub struct HttpQueryClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpQueryClient {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, QueryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| QueryError::Config(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query(&self, query: &str) -> Result<QueryResponse, QueryError> {
        info!("POST {} (query_len={})", self.endpoint, query.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryRequest { query })
            .send()
            .await?;

        let status = response.status();
        debug!("Query endpoint status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Query endpoint error: {} - {}", status, body);
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        debug!("Query reply: {} bytes", body.len());

        let reply = QueryResponse::from_body(&body);
        if reply.response.is_none() {
            warn!("Reply has no `response` field; showing an empty message");
        }
        Ok(reply)
    }
}

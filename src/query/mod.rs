pub mod client;
pub mod types;

pub use client::{DEFAULT_ENDPOINT, HttpQueryClient, QueryClient, QueryError};
pub use types::{QueryRequest, QueryResponse};

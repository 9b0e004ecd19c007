use thiserror::Error;

/// Configuration and setup errors surfaced by the client library.
///
/// Expected request failures never appear here - those are returned as
/// [`Outcome`](crate::api::Outcome) values by the dispatcher. This type
/// covers the cases where the library cannot even attempt a dispatch,
/// such as a missing or unusable base URL.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

//! Shared error taxonomy for backend calls.

use thiserror::Error;

/// Errors surfaced by [`OrdersApi`](super::OrdersApi) and
/// [`VendorDirectory`](super::VendorDirectory) implementations.
///
/// The variants mirror the backend's HTTP contract: 400/422 carry field
/// messages, 401/403 collapse into `Unauthorized`, 404 is `NotFound`, 5xx is
/// `Server`, and anything that never produced a response is `Transport`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The backend rejected the request body (HTTP 400/422).
    #[error("Request rejected: {}", field_messages.join("; "))]
    BadRequest { field_messages: Vec<String> },

    /// Missing or expired credentials (HTTP 401/403).
    #[error("Not authorized")]
    Unauthorized,

    /// The referenced resource does not exist (HTTP 404). Terminal for that
    /// identifier; retrying will not help.
    #[error("Not found")]
    NotFound,

    /// Transient backend failure (HTTP 5xx). Retryable.
    #[error("Server error: {0}")]
    Server(String),

    /// The request never completed: DNS, connection, or timeout failure.
    #[error("Network error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Whether retrying the same request can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Server(_) | ApiError::Transport(_))
    }
}

//! Store error types.
//!
//! Failures when talking to the hosted document store. There is no retry
//! policy: every error surfaces to the caller, who logs it and treats a
//! failed load as an empty list.

use thiserror::Error;

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (bad project ID or API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Database, collection, or document not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

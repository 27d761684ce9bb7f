//! Fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching a remote resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure or client setup failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The request did not complete in time.
    #[error("Request timed out: {0}")]
    Timeout(String),
}

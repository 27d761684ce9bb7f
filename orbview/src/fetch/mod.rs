//! Remote resource fetching for the headless widget.
//!
//! The [`AsyncHttpClient`] trait is the seam between widget code and the
//! network, so tests can substitute a mock client.

mod error;
mod http;

pub use error::FetchError;
pub use http::{AsyncHttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};

#[cfg(test)]
pub use http::tests;

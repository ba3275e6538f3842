//! Domain error types for lazypick
//!
//! Page fetches are the only fallible boundary in this app; everything else
//! surfaces through `anyhow` at the top level.

use thiserror::Error;

/// Errors produced by a page fetch.
///
/// These are `Clone` so the pagination store can keep the most recent
/// failure around for the host without consuming it. Fetch failures are
/// recovered locally: the store clears its loading flag and leaves the
/// cursor untouched so the same page can be retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
}

/// Result type alias for FetchError
pub type FetchResult<T> = std::result::Result<T, FetchError>;

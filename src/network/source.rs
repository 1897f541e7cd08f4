use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use super::types::Listing;

/// Errors that can occur while fetching listings.
///
/// The store collapses every variant into a single error status; the
/// variants exist so the cause can be logged.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The endpoint answered with a non-success status.
    Api { status: u16, message: String },
    /// The body could not be decoded into listings.
    Parse(String),
    /// The fetch did not finish within the configured timeout.
    Timeout(Duration),
    /// The source itself gave up before producing a result (e.g. its
    /// upstream channel closed). Aborting the store's fetch task never
    /// produces this; the future is simply dropped.
    Cancelled,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            FetchError::Timeout(after) => write!(f, "timed out after {}s", after.as_secs()),
            FetchError::Cancelled => write!(f, "fetch cancelled"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Something that can produce the current set of listings.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Fetches every listing, in the order the server returns them.
    async fn fetch_listings(&self) -> Result<Vec<Listing>, FetchError>;
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use crate::network::{FetchError, Listing, ListingSource};

/// Three listings in the shape the real endpoint returns.
pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: Some("424905".to_string()),
            image_url: Some("http://mars.jpl.nasa.gov/msl-raw-images/msss/01000/mcam/1000MR0044631300503690E01_DXXX.jpg".to_string()),
            property_type: Some("buy".to_string()),
            price: 8_000_000.0,
        },
        Listing {
            id: Some("424906".to_string()),
            image_url: Some("http://mars.jpl.nasa.gov/msl-raw-images/msss/01000/mcam/1000ML0044631300305227E03_DXXX.jpg".to_string()),
            property_type: Some("rent".to_string()),
            price: 450_000.0,
        },
        Listing {
            id: Some("424907".to_string()),
            image_url: None,
            property_type: Some("buy".to_string()),
            price: 8_000_000.0,
        },
    ]
}

enum Canned {
    Listings(Vec<Listing>),
    Failure(Mutex<Option<FetchError>>),
}

/// A source that answers immediately with a canned result.
pub struct StaticSource {
    canned: Canned,
}

impl StaticSource {
    pub fn ok(listings: Vec<Listing>) -> Self {
        Self {
            canned: Canned::Listings(listings),
        }
    }

    /// Fails the first call with `error`; later calls fail as cancelled.
    pub fn err(error: FetchError) -> Self {
        Self {
            canned: Canned::Failure(Mutex::new(Some(error))),
        }
    }
}

#[async_trait]
impl ListingSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_listings(&self) -> Result<Vec<Listing>, FetchError> {
        match &self.canned {
            Canned::Listings(listings) => Ok(listings.clone()),
            Canned::Failure(error) => Err(error
                .lock()
                .ok()
                .and_then(|mut e| e.take())
                .unwrap_or(FetchError::Cancelled)),
        }
    }
}

/// A source whose fetches stay pending until the test resolves them.
pub struct ControlledSource {
    results: tokio::sync::Mutex<mpsc::UnboundedReceiver<Result<Vec<Listing>, FetchError>>>,
    calls: std::sync::Arc<AtomicUsize>,
    called: std::sync::Arc<Notify>,
}

/// Test-side handle for a [`ControlledSource`].
pub struct SourceControl {
    results: mpsc::UnboundedSender<Result<Vec<Listing>, FetchError>>,
    calls: std::sync::Arc<AtomicUsize>,
    called: std::sync::Arc<Notify>,
}

impl ControlledSource {
    pub fn new() -> (Self, SourceControl) {
        let (tx, rx) = mpsc::unbounded_channel();
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        let called = std::sync::Arc::new(Notify::new());
        (
            Self {
                results: tokio::sync::Mutex::new(rx),
                calls: calls.clone(),
                called: called.clone(),
            },
            SourceControl {
                results: tx,
                calls,
                called,
            },
        )
    }
}

impl SourceControl {
    /// Hands `result` to the pending (or next) fetch and lets it run.
    pub async fn resolve(&self, result: Result<Vec<Listing>, FetchError>) {
        let _ = self.results.send(result);
        tokio::task::yield_now().await;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns once at least one fetch has started.
    pub async fn wait_until_called(&self) {
        if self.calls() == 0 {
            self.called.notified().await;
        }
    }
}

#[async_trait]
impl ListingSource for ControlledSource {
    fn name(&self) -> &str {
        "controlled"
    }

    async fn fetch_listings(&self) -> Result<Vec<Listing>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.called.notify_one();
        let mut results = self.results.lock().await;
        results.recv().await.unwrap_or(Err(FetchError::Cancelled))
    }
}

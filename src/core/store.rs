//! # Listing Store
//!
//! Owns the three observable values the UI reacts to and drives the fetch
//! that fills them.
//!
//! ```text
//! ListingStore
//! ├── state: watch::Sender<ListingsState>        // status + collection
//! │     ├── status: FetchStatus                  // Loading | Done | Error
//! │     └── listings: Vec<Arc<Listing>>          // server order
//! ├── selection: watch::Sender<Option<Arc<..>>>  // pending navigation
//! └── in_flight: Option<JoinHandle<()>>          // current fetch task
//! ```
//!
//! Only the store holds the senders. Consumers call `subscribe()` and
//! `subscribe_selection()` and get read-only `watch::Receiver`s.
//!
//! ## Fetch lifecycle
//!
//! `refresh()` writes `Loading` before it spawns anything, so observers see
//! the loading state immediately. The spawned task awaits the source and
//! then writes the collection and the terminal status in one `watch`
//! modification: a reader can never see `Done` next to a stale collection.
//!
//! Every terminal write re-checks, under the watch lock, that the store has
//! not been disposed and that no newer fetch has started. `dispose()` flips
//! the disposed flag under the same lock, so a fetch that resolves after
//! disposal is dropped on the floor.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::network::{FetchError, Listing, ListingSource};

/// Progress of the most recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Loading,
    Done,
    Error,
}

/// Snapshot of the status and listing collection, published as one value.
#[derive(Debug, Clone, Default)]
pub struct ListingsState {
    pub status: FetchStatus,
    pub listings: Vec<Arc<Listing>>,
    /// Incremented by every `refresh()`; terminal writes must match it.
    generation: u64,
    disposed: bool,
}

impl ListingsState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// What `refresh()` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new fetch was spawned.
    Started,
    /// A fetch is already pending; the request was ignored.
    AlreadyInFlight,
    /// The store has been disposed and no longer fetches.
    Disposed,
}

#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Upper bound on a single fetch. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

pub struct ListingStore {
    source: Arc<dyn ListingSource>,
    options: StoreOptions,
    state: Arc<watch::Sender<ListingsState>>,
    selection: watch::Sender<Option<Arc<Listing>>>,
    in_flight: Option<JoinHandle<()>>,
    activated: bool,
}

impl ListingStore {
    pub fn new(source: Arc<dyn ListingSource>, options: StoreOptions) -> Self {
        let (state, _) = watch::channel(ListingsState::default());
        let (selection, _) = watch::channel(None);
        Self {
            source,
            options,
            state: Arc::new(state),
            selection,
            in_flight: None,
            activated: false,
        }
    }

    /// Starts the first fetch. Only the first call has any effect.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&mut self) {
        if self.activated {
            debug!("Listing store already activated");
            return;
        }
        self.activated = true;
        info!("Activating listing store (source: {})", self.source.name());
        self.refresh();
    }

    /// Starts a new fetch unless one is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn refresh(&mut self) -> RefreshOutcome {
        if self.state.borrow().disposed {
            debug!("Refresh ignored: store disposed");
            return RefreshOutcome::Disposed;
        }
        if self.is_fetching() {
            debug!("Refresh ignored: fetch already in flight");
            return RefreshOutcome::AlreadyInFlight;
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.status = FetchStatus::Loading;
            generation = state.generation;
        });
        info!("Fetch #{} started", generation);

        let source = self.source.clone();
        let state = self.state.clone();
        let timeout = self.options.fetch_timeout;
        self.in_flight = Some(tokio::spawn(async move {
            let result = fetch_with_timeout(source.as_ref(), timeout).await;
            apply_result(&state, generation, result);
        }));

        RefreshOutcome::Started
    }

    /// Records `listing` as the pending navigation target. Last write wins.
    pub fn select_listing(&self, listing: Arc<Listing>) {
        debug!("Listing selected: {}", listing.label());
        self.selection.send_replace(Some(listing));
    }

    /// Clears the pending navigation target. No-op when nothing is pending.
    pub fn selection_handled(&self) {
        self.selection.send_if_modified(|pending| pending.take().is_some());
    }

    /// Cancels any in-flight fetch. Late results are discarded without
    /// touching the status or the collection. Safe to call more than once.
    pub fn dispose(&mut self) {
        let newly_disposed = !self.state.borrow().disposed;
        // No notification: observers see no change from disposal
        self.state.send_if_modified(|state| {
            state.disposed = true;
            false
        });
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        if newly_disposed {
            info!("Listing store disposed");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListingsState> {
        self.state.subscribe()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<Option<Arc<Listing>>> {
        self.selection.subscribe()
    }

    pub fn status(&self) -> FetchStatus {
        self.state.borrow().status
    }

    pub fn listings(&self) -> Vec<Arc<Listing>> {
        self.state.borrow().listings.clone()
    }

    pub fn pending_selection(&self) -> Option<Arc<Listing>> {
        self.selection.borrow().clone()
    }

    /// True while the current fetch has neither published a result nor
    /// died. A task that panicked does not block later refreshes.
    pub fn is_fetching(&self) -> bool {
        let awaiting_result = {
            let state = self.state.borrow();
            state.generation > 0 && state.status == FetchStatus::Loading
        };
        awaiting_result
            && self
                .in_flight
                .as_ref()
                .is_some_and(|handle| !handle.is_finished())
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}

impl Drop for ListingStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn fetch_with_timeout(
    source: &dyn ListingSource,
    timeout: Option<Duration>,
) -> Result<Vec<Listing>, FetchError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, source.fetch_listings())
            .await
            .unwrap_or(Err(FetchError::Timeout(limit))),
        None => source.fetch_listings().await,
    }
}

/// Publishes the outcome of fetch `generation`, unless it has been
/// superseded or the store disposed. Returns whether it was applied.
fn apply_result(
    state: &watch::Sender<ListingsState>,
    generation: u64,
    result: Result<Vec<Listing>, FetchError>,
) -> bool {
    let summary = match &result {
        Ok(listings) => format!("{} listings", listings.len()),
        Err(e) => e.to_string(),
    };

    let applied = state.send_if_modified(|current| {
        if current.disposed || current.generation != generation {
            return false;
        }
        match result {
            Ok(listings) => {
                current.listings = listings.into_iter().map(Arc::new).collect();
                current.status = FetchStatus::Done;
            }
            Err(_) => {
                current.listings = Vec::new();
                current.status = FetchStatus::Error;
            }
        }
        true
    });

    if applied {
        info!("Fetch #{} finished: {}", generation, summary);
    } else {
        warn!("Fetch #{} discarded ({}): store disposed or superseded", generation, summary);
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ControlledSource, StaticSource, sample_listings};

    fn store_with(source: Arc<dyn ListingSource>) -> ListingStore {
        ListingStore::new(source, StoreOptions::default())
    }

    /// Waits until the state leaves `Loading` for the current generation.
    async fn settled(rx: &mut watch::Receiver<ListingsState>) -> ListingsState {
        rx.wait_for(|s| s.status != FetchStatus::Loading)
            .await
            .unwrap()
            .clone()
    }

    #[tokio::test]
    async fn test_initial_state_is_loading_and_empty() {
        let store = store_with(Arc::new(StaticSource::ok(sample_listings())));
        assert_eq!(store.status(), FetchStatus::Loading);
        assert!(store.listings().is_empty());
        assert!(store.pending_selection().is_none());
    }

    #[tokio::test]
    async fn test_refresh_sets_loading_synchronously() {
        let (source, _control) = ControlledSource::new();
        let mut store = store_with(Arc::new(source));
        let rx = store.subscribe();

        assert_eq!(store.refresh(), RefreshOutcome::Started);
        // Nothing has been awaited yet
        assert_eq!(rx.borrow().status, FetchStatus::Loading);
        assert_eq!(rx.borrow().generation(), 1);
    }

    #[tokio::test]
    async fn test_successful_fetch_keeps_server_order() {
        let mut store = store_with(Arc::new(StaticSource::ok(sample_listings())));
        let mut rx = store.subscribe();
        store.activate();

        let state = settled(&mut rx).await;
        assert_eq!(state.status, FetchStatus::Done);
        let ids: Vec<_> = state.listings.iter().map(|l| l.label().to_string()).collect();
        assert_eq!(ids, vec!["424905", "424906", "424907"]);
    }

    #[tokio::test]
    async fn test_empty_response_is_done() {
        let mut store = store_with(Arc::new(StaticSource::ok(Vec::new())));
        let mut rx = store.subscribe();
        store.activate();

        let state = settled(&mut rx).await;
        assert_eq!(state.status, FetchStatus::Done);
        assert!(state.listings.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_empties_collection() {
        let (source, control) = ControlledSource::new();
        let mut store = store_with(Arc::new(source));
        let mut rx = store.subscribe();

        store.refresh();
        control.resolve(Ok(sample_listings())).await;
        assert_eq!(settled(&mut rx).await.listings.len(), 3);

        store.refresh();
        assert_eq!(rx.borrow_and_update().status, FetchStatus::Loading);
        // Previous collection stays visible while loading
        assert_eq!(rx.borrow().listings.len(), 3);
        control
            .resolve(Err(FetchError::Parse("expected value".to_string())))
            .await;

        let state = settled(&mut rx).await;
        assert_eq!(state.status, FetchStatus::Error);
        assert!(state.listings.is_empty());
    }

    #[tokio::test]
    async fn test_every_error_kind_collapses_to_error() {
        for error in [
            FetchError::Network("connection refused".to_string()),
            FetchError::Api {
                status: 500,
                message: "boom".to_string(),
            },
            FetchError::Parse("bad json".to_string()),
            FetchError::Cancelled,
        ] {
            let mut store = store_with(Arc::new(StaticSource::err(error)));
            let mut rx = store.subscribe();
            store.activate();
            let state = settled(&mut rx).await;
            assert_eq!(state.status, FetchStatus::Error);
            assert!(state.listings.is_empty());
        }
    }

    #[tokio::test]
    async fn test_activate_only_fetches_once() {
        let (source, control) = ControlledSource::new();
        let mut store = store_with(Arc::new(source));
        store.activate();
        store.activate();
        control.resolve(Ok(Vec::new())).await;

        let mut rx = store.subscribe();
        settled(&mut rx).await;
        assert_eq!(control.calls(), 1);
        assert_eq!(rx.borrow().generation(), 1);
    }

    #[tokio::test]
    async fn test_refresh_while_in_flight_is_ignored() {
        let (source, control) = ControlledSource::new();
        let mut store = store_with(Arc::new(source));

        assert_eq!(store.refresh(), RefreshOutcome::Started);
        assert!(store.is_fetching());
        assert_eq!(store.refresh(), RefreshOutcome::AlreadyInFlight);
        assert_eq!(store.subscribe().borrow().generation(), 1);

        control.resolve(Ok(sample_listings())).await;
        let mut rx = store.subscribe();
        settled(&mut rx).await;
        assert_eq!(control.calls(), 1);
    }

    #[tokio::test]
    async fn test_dispose_discards_late_result() {
        let (source, control) = ControlledSource::new();
        let mut store = store_with(Arc::new(source));
        let mut rx = store.subscribe();

        store.refresh();
        control.wait_until_called().await;
        rx.borrow_and_update();
        store.dispose();

        // The fetch future was aborted; resolving it must change nothing
        control.resolve(Ok(sample_listings())).await;
        tokio::task::yield_now().await;

        assert_eq!(rx.borrow().status, FetchStatus::Loading);
        assert!(rx.borrow().listings.is_empty());
        assert!(rx.borrow().is_disposed());
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.refresh(), RefreshOutcome::Disposed);
    }

    #[tokio::test]
    async fn test_drop_discards_late_result() {
        let (source, control) = ControlledSource::new();
        let mut store = store_with(Arc::new(source));
        let rx = store.subscribe();

        store.refresh();
        control.wait_until_called().await;
        drop(store);

        control.resolve(Ok(sample_listings())).await;
        tokio::task::yield_now().await;

        // The sender may already be gone; the last published value remains
        let state = rx.borrow();
        assert_eq!(state.status, FetchStatus::Loading);
        assert!(state.listings.is_empty());
        assert!(state.is_disposed());
        assert_eq!(control.calls(), 1);
    }

    #[tokio::test]
    async fn test_source_giving_up_collapses_to_error() {
        let (source, control) = ControlledSource::new();
        let mut store = store_with(Arc::new(source));
        let mut rx = store.subscribe();

        store.refresh();
        // Closing the result channel makes the source report Cancelled
        drop(control);

        let state = settled(&mut rx).await;
        assert_eq!(state.status, FetchStatus::Error);
        assert!(state.listings.is_empty());
    }

    #[test]
    fn test_apply_result_rejects_disposed_and_stale_generations() {
        let (state, rx) = watch::channel(ListingsState::default());
        state.send_modify(|s| s.generation = 2);

        assert!(!apply_result(&state, 1, Ok(sample_listings())));
        assert_eq!(rx.borrow().status, FetchStatus::Loading);

        state.send_modify(|s| s.disposed = true);
        assert!(!apply_result(&state, 2, Ok(sample_listings())));
        assert!(rx.borrow().listings.is_empty());
    }

    #[test]
    fn test_apply_result_writes_collection_and_status_together() {
        let (state, mut rx) = watch::channel(ListingsState::default());
        state.send_modify(|s| s.generation = 1);
        rx.borrow_and_update();

        assert!(apply_result(&state, 1, Ok(sample_listings())));
        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update();
        assert_eq!(snapshot.status, FetchStatus::Done);
        assert_eq!(snapshot.listings.len(), 3);
    }

    #[tokio::test]
    async fn test_timeout_collapses_to_error() {
        let (source, _control) = ControlledSource::new();
        let mut store = ListingStore::new(
            Arc::new(source),
            StoreOptions {
                fetch_timeout: Some(Duration::from_millis(20)),
            },
        );
        let mut rx = store.subscribe();
        store.refresh();

        let state = settled(&mut rx).await;
        assert_eq!(state.status, FetchStatus::Error);
    }

    #[tokio::test]
    async fn test_select_listing_last_write_wins() {
        let store = store_with(Arc::new(StaticSource::ok(Vec::new())));
        let listings: Vec<_> = sample_listings().into_iter().map(Arc::new).collect();

        store.select_listing(listings[0].clone());
        store.select_listing(listings[1].clone());

        let pending = store.pending_selection().unwrap();
        assert!(Arc::ptr_eq(&pending, &listings[1]));
    }

    #[tokio::test]
    async fn test_selection_handled_clears_and_is_idempotent() {
        let store = store_with(Arc::new(StaticSource::ok(Vec::new())));
        let mut rx = store.subscribe_selection();
        let listing = Arc::new(sample_listings().remove(0));

        store.select_listing(listing);
        assert!(rx.borrow_and_update().is_some());

        store.selection_handled();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());

        // Second call neither errors nor notifies
        store.selection_handled();
        assert!(!rx.has_changed().unwrap());
        assert!(store.pending_selection().is_none());
    }

    #[tokio::test]
    async fn test_rental_scenario_from_api_payload() {
        let json = r#"[{"id":"1","img_src":"http://x/a.jpg","type":"rent","price":100}]"#;
        let listings: Vec<Listing> = serde_json::from_str(json).unwrap();
        let mut store = store_with(Arc::new(StaticSource::ok(listings)));
        let mut rx = store.subscribe();
        store.activate();

        let state = settled(&mut rx).await;
        assert_eq!(state.status, FetchStatus::Done);
        assert!(state.listings[0].is_rental());
        assert_eq!(state.listings[0].image_url.as_deref(), Some("http://x/a.jpg"));
    }
}

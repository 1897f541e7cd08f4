//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Observing the store
//!
//! The event loop holds two `watch::Receiver`s from the `ListingStore`:
//!
//! - **listings**: on change, the new collection is handed to the grid
//!   (which diffs it against its cards) together with the status from the
//!   same snapshot.
//! - **selection**: a pending listing opens the detail screen, and the loop
//!   immediately reports it handled so each selection navigates once.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (loading spinner, detail image placeholder): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, store changes,
//!   or terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::sync::Arc;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::store::FetchStatus;
use crate::network::{Listing, ListingSource, MarsApiClient};
use crate::tui::component::EventHandler;
use crate::tui::components::{GridEvent, GridState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which screen the main area shows.
#[derive(Debug, Clone)]
pub enum Screen {
    Overview,
    Detail(Arc<Listing>),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub grid: GridState,
    pub screen: Screen,
    /// Status from the same snapshot as the grid's cards.
    pub fetch_status: FetchStatus,
}

impl TuiState {
    pub fn new(grid_columns: u16) -> Self {
        Self {
            grid: GridState::new(grid_columns),
            screen: Screen::Overview,
            fetch_status: FetchStatus::Loading,
        }
    }

    /// Applies one store snapshot to the presentation state.
    pub fn apply_listings(&mut self, status: FetchStatus, listings: &[Arc<Listing>]) {
        self.fetch_status = status;
        self.grid.submit_list(listings);
    }

    fn is_animating(&self) -> bool {
        match &self.screen {
            Screen::Detail(listing) => listing.image_url.is_some(),
            Screen::Overview => self.fetch_status == FetchStatus::Loading,
        }
    }
}

/// Status bar text after a snapshot with `status`. `None` keeps the
/// current message (e.g. "Refreshing...") while loading.
fn status_message_for(status: FetchStatus) -> Option<String> {
    match status {
        FetchStatus::Loading => None,
        FetchStatus::Done => Some(String::new()),
        FetchStatus::Error => Some(String::from("Could not load listings")),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = MarsApiClient::new(Some(config.base_url.clone()));
    let source: Arc<dyn ListingSource> = Arc::new(client);
    let mut app = App::from_config(source, &config);
    let mut tui = TuiState::new(app.grid_columns);

    let mut listings_rx = app.store.subscribe();
    let mut selection_rx = app.store.subscribe_selection();

    let mut terminal = ratatui::init();
    update(&mut app, Action::Activate);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Presenter: apply the latest status + collection as one snapshot
        if listings_rx.has_changed().unwrap_or(false) {
            let (status, listings) = {
                let snapshot = listings_rx.borrow_and_update();
                (snapshot.status, snapshot.listings.clone())
            };
            debug!("Snapshot received: {:?}, {} listings", status, listings.len());
            tui.apply_listings(status, &listings);
            if let Some(message) = status_message_for(status) {
                app.status_message = message;
            }
            needs_redraw = true;
        }

        // Navigator: consume a pending selection exactly once
        if selection_rx.has_changed().unwrap_or(false) {
            let pending = selection_rx.borrow_and_update().clone();
            if let Some(listing) = pending {
                info!("Opening listing {}", listing.label());
                tui.screen = Screen::Detail(listing);
                update(&mut app, Action::SelectionHandled);
                needs_redraw = true;
            }
        }

        let animating = tui.is_animating();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let frame_index = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, frame_index))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit | TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::Refresh => {
                    update(&mut app, Action::Refresh);
                }
                TuiEvent::Escape if matches!(tui.screen, Screen::Detail(_)) => {
                    tui.screen = Screen::Overview;
                }
                _ if matches!(tui.screen, Screen::Overview) => {
                    if let Some(GridEvent::Select(listing)) = tui.grid.handle_event(&event) {
                        update(&mut app, Action::Select(listing));
                    }
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

//! # Actions
//!
//! Everything that can happen in marsview becomes an `Action`.
//! User presses `r`? That's `Action::Refresh`.
//! User opens a card? That's `Action::Select(listing)`.
//!
//! The `update()` function applies an action to the app state and returns
//! an `Effect` telling the event loop what to do next. The fetch itself runs
//! inside the store; `update()` never awaits.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use std::sync::Arc;

use log::{debug, info};

use crate::core::state::App;
use crate::core::store::RefreshOutcome;
use crate::network::Listing;

#[derive(Debug)]
pub enum Action {
    /// Start the first fetch.
    Activate,
    /// Fetch again (user-triggered recovery).
    Refresh,
    /// A listing was picked in the grid.
    Select(Arc<Listing>),
    /// The navigator acted on the pending selection.
    SelectionHandled,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Activate => {
            app.store.activate();
            app.status_message = String::from("Loading listings...");
            Effect::None
        }
        Action::Refresh => {
            app.status_message = match app.store.refresh() {
                RefreshOutcome::Started => String::from("Refreshing..."),
                RefreshOutcome::AlreadyInFlight => String::from("Already loading"),
                RefreshOutcome::Disposed => String::from("Shutting down"),
            };
            Effect::None
        }
        Action::Select(listing) => {
            app.store.select_listing(listing);
            Effect::None
        }
        Action::SelectionHandled => {
            app.store.selection_handled();
            Effect::None
        }
        Action::Quit => {
            info!("Quit requested");
            app.store.dispose();
            Effect::Quit
        }
    }
}

//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing source, count and status
//! - `StatusView`: Loading spinner / connection error placeholder
//! - `ImagePane`: Placeholder for a listing photo
//! - `ListingDetail`: Full view of a single listing
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `ListingGrid`: Card grid with diff-based card cache and selection
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status bar)
//! ├── status_view.rs     (Loading / error placeholder)
//! ├── image_pane.rs      (Photo placeholder)
//! ├── listing_grid.rs    (Scrollable card grid)
//! └── listing_detail.rs  (Detail screen)
//! ```

pub mod image_pane;
pub mod listing_detail;
pub mod listing_grid;
pub mod status_view;
mod title_bar;

pub use listing_detail::ListingDetail;
pub use listing_grid::{GridEvent, GridState, ListingGrid};
pub use status_view::StatusView;
pub use title_bar::TitleBar;

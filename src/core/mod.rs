//! # Core Application Logic
//!
//! This module contains marsview's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ListingStore         │
//!                    │  • Action / update()    │
//!                    │  • diff, image, config  │
//!                    └───────────┬─────────────┘
//!                                │ watch::Receiver
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`]: `ListingStore`, the observable fetch state machine
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`diff`]: Edit scripts between two listing collections
//! - [`image`]: Image URL normalization
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod diff;
pub mod image;
pub mod state;
pub mod store;

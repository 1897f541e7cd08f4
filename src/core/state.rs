//! # Application State
//!
//! Core business state for marsview. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: ListingStore          // status, listings, selection
//! ├── status_message: String       // status bar text
//! ├── source_label: String         // where listings come from
//! └── grid_columns: u16            // cards per grid row
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::store::{ListingStore, StoreOptions};
use crate::network::ListingSource;

pub struct App {
    pub store: ListingStore,
    pub status_message: String,
    pub source_label: String,
    pub grid_columns: u16,
}

impl App {
    pub fn new(source: Arc<dyn ListingSource>, source_label: String) -> Self {
        Self {
            store: ListingStore::new(source, StoreOptions::default()),
            status_message: String::new(),
            source_label,
            grid_columns: crate::core::config::DEFAULT_GRID_COLUMNS,
        }
    }

    pub fn from_config(source: Arc<dyn ListingSource>, config: &ResolvedConfig) -> Self {
        let options = StoreOptions {
            fetch_timeout: config.fetch_timeout,
        };
        Self {
            store: ListingStore::new(source, options),
            status_message: String::new(),
            source_label: config.base_url.clone(),
            grid_columns: config.grid_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::store::FetchStatus;
    use crate::test_support::StaticSource;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(Arc::new(StaticSource::ok(Vec::new())), "test".to_string());
        assert!(app.status_message.is_empty());
        assert_eq!(app.source_label, "test");
        assert_eq!(app.store.status(), FetchStatus::Loading);
    }

    #[test]
    fn test_app_from_config() {
        let config = ResolvedConfig {
            base_url: "http://localhost:1/".to_string(),
            grid_columns: 4,
            fetch_timeout: Some(Duration::from_secs(1)),
            log_file: "x.log".to_string(),
        };
        let app = App::from_config(Arc::new(StaticSource::ok(Vec::new())), &config);
        assert_eq!(app.grid_columns, 4);
        assert_eq!(app.source_label, "http://localhost:1/");
    }
}

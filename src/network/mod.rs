pub mod mars_api;
pub mod source;
pub mod types;

pub use mars_api::MarsApiClient;
pub use source::{FetchError, ListingSource};
pub use types::Listing;

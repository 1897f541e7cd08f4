//! Mars real-estate API client.
//!
//! A single endpoint, `GET {base_url}/realestate`, returns a JSON array of
//! listings. No authentication.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::network::{FetchError, Listing, ListingSource};

pub const DEFAULT_BASE_URL: &str = "https://mars.udacity.com/";
const LISTINGS_PATH: &str = "realestate";

/// HTTP client for the Mars real-estate listings endpoint.
pub struct MarsApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl MarsApiClient {
    pub fn new(base_url: Option<String>) -> Self {
        let final_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: final_url,
            client: reqwest::Client::new(),
        }
    }

    /// Full URL of the listings endpoint.
    pub fn listings_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), LISTINGS_PATH)
    }
}

#[async_trait]
impl ListingSource for MarsApiClient {
    fn name(&self) -> &str {
        "mars-api"
    }

    async fn fetch_listings(&self) -> Result<Vec<Listing>, FetchError> {
        let url = self.listings_url();
        info!("Fetching listings from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Listings response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Listings API error: {} - {}", status, err_body);
            return Err(FetchError::Api {
                status,
                message: err_body,
            });
        }

        // Read the body first so transport and decode failures stay distinct
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        debug!("Listings body received: {} bytes", body.len());

        let listings: Vec<Listing> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        info!("Decoded {} listings", listings.len());
        Ok(listings)
    }
}

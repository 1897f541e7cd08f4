//! Listing image addresses.
//!
//! The image host only serves over TLS, while the listings endpoint hands
//! out `http://` URLs. Every image URL is rewritten to `https` before use.

use log::debug;
use reqwest::Url;

/// What an image pane should show for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// No usable URL: show the broken-image placeholder.
    Placeholder,
    /// A remote image, shown as a loading placeholder captioned with its URL.
    Remote(String),
}

impl ImageSlot {
    pub fn for_url(raw: Option<&str>) -> Self {
        match secure_image_url(raw) {
            Some(url) => ImageSlot::Remote(url),
            None => ImageSlot::Placeholder,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ImageSlot::Remote(url) => Some(url),
            ImageSlot::Placeholder => None,
        }
    }
}

/// Returns `raw` with its scheme forced to `https`.
///
/// `None` when the URL is absent, unparseable, or cannot carry an https
/// scheme (e.g. `data:` URLs).
pub fn secure_image_url(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            debug!("Ignoring unparseable image URL {:?}: {}", raw, e);
            return None;
        }
    };

    if url.scheme() != "https" && url.set_scheme("https").is_err() {
        debug!("Cannot serve image URL over https: {}", raw);
        return None;
    }
    Some(url.to_string())
}

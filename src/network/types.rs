use serde::{Deserialize, Serialize};

/// Property type value the API uses for rentals.
pub const RENTAL_TYPE: &str = "rent";

/// A single real-estate listing as returned by the listings endpoint.
///
/// Listings are immutable once decoded. The store keeps them behind `Arc`
/// so that the grid can tell "the same listing" (same allocation) apart
/// from "a listing with the same id".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Listing {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "img_src", default)]
    pub image_url: Option<String>,
    #[serde(rename = "type", default)]
    pub property_type: Option<String>,
    pub price: f64,
}

impl Listing {
    pub fn is_rental(&self) -> bool {
        self.property_type.as_deref() == Some(RENTAL_TYPE)
    }

    /// Human-readable listing type, e.g. "For Rent".
    pub fn display_type(&self) -> &'static str {
        if self.is_rental() {
            "For Rent"
        } else {
            "For Sale"
        }
    }

    /// Price formatted for display. Rentals are shown per month.
    pub fn display_price(&self) -> String {
        let amount = format_amount(self.price);
        if self.is_rental() {
            format!("${amount}/month")
        } else {
            format!("${amount}")
        }
    }

    /// Short label used in logs and card titles.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("unknown")
    }
}

/// Formats a price with thousands separators, dropping the fractional part
/// when it is zero.
fn format_amount(value: f64) -> String {
    // Round once to whole cents so .995 carries into the whole part
    let total_cents = (value.abs() * 100.0).round() as u64;
    let (whole, cents) = (total_cents / 100, total_cents % 100);
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && total_cents > 0 { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

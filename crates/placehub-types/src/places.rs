//! Google Places shapes as re-exposed by the PlaceHub proxy.
//!
//! Upstream field names (`photo_reference`, `formatted_phone_number`, ...)
//! are renamed here into the shapes the front-end consumes. Photo URLs are
//! always rewritten to point at the local photo proxy so the API key never
//! reaches the browser.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PlaceId;

/// Path of the local photo proxy route.
pub const PHOTO_PROXY_PATH: &str = "/api/gplaces/photo";

/// Width requested for search result thumbnails.
pub const SEARCH_THUMBNAIL_WIDTH: u32 = 400;

/// Width requested for photos on the details view.
pub const DETAIL_PHOTO_WIDTH: u32 = 800;

/// Width used by the photo proxy when the caller gives none.
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

/// Build the local photo proxy URL for a photo reference.
pub fn photo_proxy_url(reference: &str, max_width: u32) -> String {
    format!("{PHOTO_PROXY_PATH}?ref={reference}&maxwidth={max_width}")
}

/// A single candidate returned by the place text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SearchCandidate {
    /// Google place identifier.
    pub place_id: PlaceId,
    /// Display name.
    pub name: String,
    /// Full formatted address.
    pub formatted_address: String,
    /// Category icon URL supplied by Google.
    pub icon: String,
    /// Place types (e.g. `restaurant`, `point_of_interest`).
    #[serde(default)]
    pub types: Vec<String>,
    /// Thumbnail URL on the photo proxy, or an empty string when the place
    /// has no photos.
    #[serde(default)]
    pub image: String,
}

/// Response body of `GET /api/gplaces/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SearchResponse {
    /// Matching candidates. Empty when the provider found nothing.
    pub candidates: Vec<SearchCandidate>,
}

/// Opening hours block of a place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OpeningHours {
    /// Whether the place is open right now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    /// Human-readable opening hours, one line per weekday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_text: Option<Vec<String>>,
}

/// A photo attached to a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlacePhoto {
    /// Opaque photo reference used by the photo endpoint.
    pub reference: String,
    /// Original width in pixels.
    pub width: u32,
    /// Original height in pixels.
    pub height: u32,
    /// HTML attributions that must be shown with the photo.
    #[serde(default)]
    pub attributions: Vec<String>,
    /// Photo proxy URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A user review of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlaceReview {
    /// Reviewer display name.
    pub author: String,
    /// Star rating given by the reviewer.
    pub rating: f64,
    /// Review body.
    pub text: String,
    /// Unix timestamp (seconds) of the review.
    pub time: i64,
}

/// Full detail record for a single place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlaceDetails {
    /// Google place identifier.
    pub id: PlaceId,
    /// Display name.
    pub name: String,
    /// Full formatted address.
    pub address: String,
    /// Average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Formatted phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Opening hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    /// Place types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Short neighbourhood-level address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    /// Photos with URLs rewritten to the photo proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<PlacePhoto>>,
    /// User reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<PlaceReview>>,
}

impl PlaceDetails {
    /// Photos of the place, or an empty slice when it has none.
    pub fn photos(&self) -> &[PlacePhoto] {
        self.photos.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_proxy_url_carries_reference_and_width() {
        let url = photo_proxy_url("AUjq9jl", 800);
        assert_eq!(url, "/api/gplaces/photo?ref=AUjq9jl&maxwidth=800");
    }

    #[test]
    fn details_use_camel_case_opening_hours() {
        let details = PlaceDetails {
            id: PlaceId::new("abc"),
            name: String::from("Cafe"),
            address: String::from("1 Main St"),
            rating: Some(4.5),
            phone: None,
            website: None,
            opening_hours: Some(OpeningHours {
                open_now: Some(true),
                weekday_text: None,
            }),
            types: None,
            vicinity: None,
            photos: None,
            reviews: None,
        };

        let json = serde_json::to_value(&details).unwrap_or_default();
        assert_eq!(json["openingHours"]["open_now"], true);
        assert!(json.get("phone").is_none());
        assert!(details.photos().is_empty());
    }
}

//! Serper.dev search shapes.
//!
//! Serper already answers in the camelCase shapes the front-end uses, so
//! these types are mostly a typed mirror of its `places` and `search`
//! responses.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::Cid;

/// Which Serper endpoint a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SerperSearchMode {
    /// Local places (`/places`).
    Places,
    /// Organic web results (`/search`).
    Search,
}

impl SerperSearchMode {
    /// Path segment of the Serper endpoint for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Places => "places",
            Self::Search => "search",
        }
    }
}

impl core::str::FromStr for SerperSearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "places" => Ok(Self::Places),
            "search" => Ok(Self::Search),
            other => Err(format!("unknown search mode: {other}")),
        }
    }
}

/// Parameters accepted by the Serper proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SerperSearchParams {
    /// Query text.
    pub q: String,
    /// Free-form location (e.g. `Berlin, Germany`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Country code (e.g. `de`, `us`, `br`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,
    /// Language code (e.g. `de`, `en`, `pt`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    /// Number of results to request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
}

/// Echo of the parameters Serper actually used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SerperSearchParameters {
    /// Query text.
    #[serde(default)]
    pub q: String,
    /// Country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl: Option<String>,
    /// Language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    /// Search type reported by Serper.
    #[serde(default, rename = "type")]
    pub search_type: String,
    /// Number of results requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
    /// Result page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Location used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Search engine reported by Serper.
    #[serde(default)]
    pub engine: String,
}

/// A place returned by the Serper places endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SerperPlace {
    /// 1-based rank in the result list.
    pub position: u32,
    /// Place name.
    pub title: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: f64,
    /// Average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of ratings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
    /// Business category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Content identifier.
    pub cid: Cid,
}

/// Response of a `places` search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SerperPlacesResponse {
    /// Parameters Serper used.
    #[serde(default)]
    pub search_parameters: SerperSearchParameters,
    /// Places found.
    #[serde(default)]
    pub places: Vec<SerperPlace>,
    /// Credits consumed by the call.
    #[serde(default)]
    pub credits: u32,
}

/// An organic web result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SerperOrganicResult {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub link: String,
    /// Snippet shown under the title.
    #[serde(default)]
    pub snippet: String,
    /// 1-based rank.
    pub position: u32,
}

/// Response of a `search` (organic) query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SerperSearchResponse {
    /// Parameters Serper used.
    #[serde(default)]
    pub search_parameters: SerperSearchParameters,
    /// Organic results.
    #[serde(default)]
    pub organic: Vec<SerperOrganicResult>,
    /// Credits consumed by the call.
    #[serde(default)]
    pub credits: u32,
}

/// Result of a Serper search in either mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", content = "data", rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SerperResult {
    /// Places mode result.
    Places(SerperPlacesResponse),
    /// Organic search mode result.
    Search(SerperSearchResponse),
}

impl SerperResult {
    /// The mode this result was produced by.
    pub const fn mode(&self) -> SerperSearchMode {
        match self {
            Self::Places(_) => SerperSearchMode::Places,
            Self::Search(_) => SerperSearchMode::Search,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn place_parses_camel_case_fields() {
        let json = serde_json::json!({
            "position": 1,
            "title": "Bäckerei",
            "address": "Hauptstr. 1",
            "latitude": 52.52,
            "longitude": 13.40,
            "rating": 4.7,
            "ratingCount": 312,
            "phoneNumber": "+49 30 123",
            "cid": "99887766"
        });

        let place: SerperPlace = serde_json::from_value(json).unwrap();
        assert_eq!(place.rating_count, Some(312));
        assert_eq!(place.cid.as_str(), "99887766");
        assert!(place.category.is_none());
    }

    #[test]
    fn mode_round_trips_through_str() {
        assert_eq!("places".parse::<SerperSearchMode>(), Ok(SerperSearchMode::Places));
        assert_eq!(SerperSearchMode::Search.as_str(), "search");
        assert!("images".parse::<SerperSearchMode>().is_err());
    }

    #[test]
    fn result_is_tagged_by_mode() {
        let result = SerperResult::Search(SerperSearchResponse::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "search");
        assert_eq!(result.mode(), SerperSearchMode::Search);
    }
}

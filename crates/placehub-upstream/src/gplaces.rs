//! Google Places adapter.
//!
//! Wraps the legacy Places web service: text search
//! (`findplacefromtext`), place details, and the photo endpoint. Photo
//! references in every response are rewritten to the local photo proxy so
//! the API key stays on the server.

use placehub_types::{
    DETAIL_PHOTO_WIDTH, OpeningHours, PlaceDetails, PlaceId, PlacePhoto, PlaceReview,
    SEARCH_THUMBNAIL_WIDTH, SearchCandidate, photo_proxy_url,
};
use serde::Deserialize;
use tracing::debug;

use crate::config::{GooglePlacesConfig, secret};
use crate::error::{UpstreamError, provider_message};
use crate::media::{MediaPayload, read_media};

/// Fields requested from the text search endpoint.
const SEARCH_FIELDS: &str = "formatted_address,icon,name,photos,place_id,types";

/// Fields requested from the details endpoint.
const DETAIL_FIELDS: &str = "name,photos,rating,reviews,formatted_address,website,opening_hours,formatted_phone_number,types,vicinity,place_id";

// ---------------------------------------------------------------------------
// Raw upstream shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    candidates: Vec<RawCandidate>,
}

#[derive(Debug, Deserialize)]
struct RawCandidate {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<RawPhoto>,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    photo_reference: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    html_attributions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<RawDetails>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    #[serde(default)]
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
    #[serde(default)]
    types: Option<Vec<String>>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    photos: Option<Vec<RawPhoto>>,
    #[serde(default)]
    reviews: Option<Vec<RawReview>>,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    text: String,
    #[serde(default)]
    time: i64,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the Google Places web service.
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    /// Create a client with an explicit key and base URL.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration, or `None` when no key is set.
    pub fn from_config(config: &GooglePlacesConfig, client: reqwest::Client) -> Option<Self> {
        secret(config.api_key.as_ref()).map(|key| Self::new(client, config.base_url.clone(), key))
    }

    /// Find places matching a free-text query.
    ///
    /// A `ZERO_RESULTS` answer is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Rejected`] when Google answers with any other
    /// non-`OK` status, or a transport/decode error.
    pub async fn find_place(&self, query: &str) -> Result<Vec<SearchCandidate>, UpstreamError> {
        let url = format!("{}/findplacefromtext/json", self.base_url);

        let response: FindPlaceResponse = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("inputtype", "textquery"),
                ("input", query),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await?
            .json()
            .await?;

        debug!(status = response.status, candidates = response.candidates.len(), "find place answered");
        reshape_candidates(response)
    }

    /// Fetch the full record of a single place.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::NotFound`] when Google answers with a
    /// non-`OK` status, or a transport/decode error.
    pub async fn details(&self, place_id: &str) -> Result<PlaceDetails, UpstreamError> {
        let url = format!("{}/details/json", self.base_url);

        let response: DetailsResponse = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("place_id", place_id),
                ("fields", DETAIL_FIELDS),
            ])
            .send()
            .await?
            .json()
            .await?;

        reshape_details(response)
    }

    /// Fetch a photo by reference, scaled to at most `max_width` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Status`] carrying Google's status code when
    /// the photo cannot be served.
    pub async fn photo(&self, reference: &str, max_width: u32) -> Result<MediaPayload, UpstreamError> {
        let url = format!("{}/photo", self.base_url);
        let max_width = max_width.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("maxwidth", max_width.as_str()),
                ("photoreference", reference),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: String::from("Failed to fetch photo"),
            });
        }

        read_media(response).await
    }
}

// ---------------------------------------------------------------------------
// Reshaping
// ---------------------------------------------------------------------------

fn reshape_candidates(response: FindPlaceResponse) -> Result<Vec<SearchCandidate>, UpstreamError> {
    match response.status.as_str() {
        "ZERO_RESULTS" => return Ok(Vec::new()),
        "OK" => {}
        other => {
            return Err(UpstreamError::Rejected(provider_message(
                response.error_message.as_deref(),
                Some(other),
                "API error",
                "Failed to search places",
            )));
        }
    }

    Ok(response
        .candidates
        .into_iter()
        .map(|item| {
            let image = item
                .photos
                .first()
                .map(|p| photo_proxy_url(&p.photo_reference, SEARCH_THUMBNAIL_WIDTH))
                .unwrap_or_default();

            SearchCandidate {
                place_id: PlaceId::new(item.place_id),
                name: item.name,
                formatted_address: item.formatted_address,
                icon: item.icon,
                types: item.types,
                image,
            }
        })
        .collect())
}

fn reshape_details(response: DetailsResponse) -> Result<PlaceDetails, UpstreamError> {
    let result = match (response.status.as_str(), response.result) {
        ("OK", Some(result)) => result,
        (status, _) => {
            return Err(UpstreamError::NotFound(provider_message(
                response.error_message.as_deref(),
                Some(status),
                "Place not found",
                "Place not found",
            )));
        }
    };

    let photos = result.photos.map(|photos| {
        photos
            .into_iter()
            .map(|photo| PlacePhoto {
                url: Some(photo_proxy_url(&photo.photo_reference, DETAIL_PHOTO_WIDTH)),
                reference: photo.photo_reference,
                width: photo.width,
                height: photo.height,
                attributions: photo.html_attributions,
            })
            .collect()
    });

    let reviews = result.reviews.map(|reviews| {
        reviews
            .into_iter()
            .map(|review| PlaceReview {
                author: review.author_name,
                rating: review.rating,
                text: review.text,
                time: review.time,
            })
            .collect()
    });

    Ok(PlaceDetails {
        id: PlaceId::new(result.place_id),
        name: result.name,
        address: result.formatted_address.unwrap_or_default(),
        rating: result.rating,
        phone: result.formatted_phone_number,
        website: result.website,
        opening_hours: result.opening_hours,
        types: result.types,
        vicinity: result.vicinity,
        photos,
        reviews,
    })
}

//! Shared type definitions for PlaceHub.
//!
//! Every route in the proxy API and every call in the client library speaks
//! in these types. They flow to `TypeScript` via `ts-rs` so the front-end
//! and the server agree on field names.
//!
//! # Modules
//!
//! - [`ids`] -- Newtype wrappers for provider-issued identifiers
//! - [`places`] -- Google Places candidates, details, photos, reviews
//! - [`serper`] -- Serper.dev places and organic search results
//! - [`instagram`] -- Instagram profile and post records
//! - [`storage`] -- Object storage upload/list/delete shapes
//! - [`api`] -- Error envelope, webhook and health responses

pub mod api;
pub mod ids;
pub mod instagram;
pub mod places;
pub mod serper;
pub mod storage;

// Re-export all public types at crate root for convenience.
pub use api::{ErrorBody, HealthResponse, WebhookResponse};
pub use ids::{Cid, PlaceId};
pub use instagram::{IgPost, IgPostsResponse, IgProfile};
pub use places::{
    DEFAULT_PHOTO_WIDTH, DETAIL_PHOTO_WIDTH, OpeningHours, PHOTO_PROXY_PATH, PlaceDetails,
    PlacePhoto, PlaceReview, SEARCH_THUMBNAIL_WIDTH, SearchCandidate, SearchResponse,
    photo_proxy_url,
};
pub use serper::{
    SerperOrganicResult, SerperPlace, SerperPlacesResponse, SerperResult, SerperSearchMode,
    SerperSearchParameters, SerperSearchParams, SerperSearchResponse,
};
pub use storage::{DeleteResult, FileList, StorageFile, UploadOptions, UploadResult};

/// A bookmarked place. Bookmarks are Serper places keyed by their `cid`.
pub type Bookmark = SerperPlace;

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings into `bindings/` relative to the
        // crate root when `export_all` runs.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::PlaceId::export_all();
        let _ = crate::ids::Cid::export_all();

        // Places
        let _ = crate::places::SearchCandidate::export_all();
        let _ = crate::places::SearchResponse::export_all();
        let _ = crate::places::OpeningHours::export_all();
        let _ = crate::places::PlacePhoto::export_all();
        let _ = crate::places::PlaceReview::export_all();
        let _ = crate::places::PlaceDetails::export_all();

        // Serper
        let _ = crate::serper::SerperSearchMode::export_all();
        let _ = crate::serper::SerperSearchParams::export_all();
        let _ = crate::serper::SerperSearchParameters::export_all();
        let _ = crate::serper::SerperPlace::export_all();
        let _ = crate::serper::SerperPlacesResponse::export_all();
        let _ = crate::serper::SerperOrganicResult::export_all();
        let _ = crate::serper::SerperSearchResponse::export_all();
        let _ = crate::serper::SerperResult::export_all();

        // Instagram
        let _ = crate::instagram::IgProfile::export_all();
        let _ = crate::instagram::IgPost::export_all();
        let _ = crate::instagram::IgPostsResponse::export_all();

        // Storage
        let _ = crate::storage::UploadOptions::export_all();
        let _ = crate::storage::UploadResult::export_all();
        let _ = crate::storage::DeleteResult::export_all();
        let _ = crate::storage::StorageFile::export_all();
        let _ = crate::storage::FileList::export_all();

        // Envelopes
        let _ = crate::api::ErrorBody::export_all();
        let _ = crate::api::WebhookResponse::export_all();
        let _ = crate::api::HealthResponse::export_all();
    }
}

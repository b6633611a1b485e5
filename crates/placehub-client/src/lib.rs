//! Client library for the PlaceHub API.
//!
//! Mirrors what the browser front-end does on top of the proxy routes:
//!
//! - [`api`] -- typed fetch wrappers with a uniform error shape
//! - [`view`] -- the places page view-state machine
//! - [`batch`] -- sequential batch upload of place photos
//! - [`bookmarks`] -- locally persisted bookmarks keyed by `cid`
//! - [`serper`] -- the Serper search page, with its last result kept on disk

pub mod api;
pub mod batch;
pub mod bookmarks;
pub mod error;
pub mod persist;
pub mod serper;
pub mod view;

pub use api::ApiClient;
pub use batch::{BatchOutcome, FailedPhoto, PhotoUploadItem, UploadedPhoto};
pub use bookmarks::{BookmarkError, BookmarkStore};
pub use error::ClientError;
pub use persist::PersistError;
pub use serper::SerperPage;
pub use view::{Phase, PlacesPage, View};

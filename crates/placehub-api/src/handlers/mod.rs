//! Route handlers for the PlaceHub API.
//!
//! Every handler is a single pass-through: validate parameters, call one
//! adapter from [`AppState`](crate::state::AppState), reshape, return.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/health` | Liveness and configured integrations |
//! | `GET` | `/api/gplaces/search` | Place text search |
//! | `GET` | `/api/gplaces/details` | Place details |
//! | `GET` | `/api/gplaces/photo` | Photo passthrough |
//! | `POST` | `/api/serper/{mode}` | Serper places or web search |
//! | `GET` | `/api/instagram/profile` | Instagram profile |
//! | `GET` | `/api/instagram/posts` | Instagram recent posts |
//! | `GET` | `/api/proxy/image` | Image passthrough |
//! | `POST` | `/api/storage/upload` | Multipart upload |
//! | `POST` | `/api/storage/upload-url` | Upload from URL |
//! | `GET` | `/api/storage/list` | List a folder |
//! | `DELETE` | `/api/storage/delete` | Delete an object |
//! | `POST` | `/api/webhook/link-places` | Forward to webhook |

pub mod health;
pub mod instagram;
pub mod media;
pub mod places;
pub mod search;
pub mod storage;
pub mod webhook;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use placehub_upstream::MediaPayload;

/// `Cache-Control` value on proxied images.
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Serve binary media with its upstream content type and a one-day cache.
fn image_response(payload: MediaPayload) -> Response {
    (
        [
            (header::CONTENT_TYPE, payload.content_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_owned()),
        ],
        payload.bytes,
    )
        .into_response()
}

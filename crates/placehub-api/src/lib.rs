//! HTTP proxy API for PlaceHub.
//!
//! This crate provides an Axum server that sits between the front-end and
//! third-party APIs:
//!
//! - **Google Places** text search, details, and photo passthrough
//! - **Serper.dev** places and organic web search
//! - **Instagram** public profile and recent posts
//! - **Object storage** upload (multipart or from URL), list, and delete
//! - **Webhooks** forwarding of "link places" payloads
//!
//! # Architecture
//!
//! Handlers are stateless per request. [`AppState`] only carries the
//! adapters built at startup; an adapter whose secret is missing is
//! absent, and its routes answer 500. Every error uses the same JSON
//! envelope, `{"error", "status"}`.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, StateError};
